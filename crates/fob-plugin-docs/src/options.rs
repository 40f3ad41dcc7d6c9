//! Documentation options.
//!
//! Options are an untyped JSON map handed to the engine verbatim; the plugin
//! itself only interprets the two output keys `out` and `json`.

use serde_json::{Map, Value};

/// Output directory used when neither `out` nor `json` is configured.
pub const DEFAULT_OUT_DIR: &str = "./docs";

pub const OUT_KEY: &str = "out";
pub const JSON_KEY: &str = "json";

/// Merged, immutable option set for the documentation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct DocOptions {
    values: Map<String, Value>,
}

/// Which artifact a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// A JSON API description written to the `json` path.
    Json,
    /// A rendered HTML site written below the `out` directory.
    Directory,
}

impl DocOptions {
    /// The engine defaults the plugin starts from.
    pub fn defaults() -> Map<String, Value> {
        let mut defaults = Map::new();
        defaults.insert("module".into(), Value::from("commonjs"));
        defaults.insert("target".into(), Value::from("es5"));
        defaults.insert("exclude".into(), Value::from("**/node_modules/**/*.*"));
        defaults.insert("experimentalDecorators".into(), Value::Bool(true));
        defaults.insert("excludeExternals".into(), Value::Bool(true));
        defaults
    }

    /// Deep-merge `overrides` onto [`DocOptions::defaults`]. Caller values win
    /// key by key and nested objects merge recursively. When the result has no
    /// usable `out` or `json`, `out` defaults to [`DEFAULT_OUT_DIR`].
    pub fn merged(overrides: Option<Map<String, Value>>) -> Self {
        let mut values = Self::defaults();
        for (key, value) in overrides.into_iter().flatten() {
            match values.get_mut(&key) {
                Some(slot) => merge_values(slot, &value),
                None => {
                    values.insert(key, value);
                }
            }
        }

        if !is_set(values.get(OUT_KEY)) && !is_set(values.get(JSON_KEY)) {
            values.insert(OUT_KEY.into(), Value::from(DEFAULT_OUT_DIR));
        }

        Self { values }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Configured site directory, if set to a non-empty string.
    pub fn out(&self) -> Option<&str> {
        non_empty_str(self.values.get(OUT_KEY))
    }

    /// Configured JSON file path, if set to a non-empty string.
    pub fn json(&self) -> Option<&str> {
        non_empty_str(self.values.get(JSON_KEY))
    }

    /// JSON wins when both outputs are configured.
    pub fn output_mode(&self) -> OutputMode {
        if self.json().is_some() {
            OutputMode::Json
        } else {
            OutputMode::Directory
        }
    }
}

impl Default for DocOptions {
    fn default() -> Self {
        Self::merged(None)
    }
}

impl From<Map<String, Value>> for DocOptions {
    fn from(overrides: Map<String, Value>) -> Self {
        Self::merged(Some(overrides))
    }
}

/// Recursive merge: objects merge key by key, anything else replaces the target.
pub(crate) fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                match target_map.get_mut(key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

/// Truthiness of an output option: null, `false` and `""` count as unset.
fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}
