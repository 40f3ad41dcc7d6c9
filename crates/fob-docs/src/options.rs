//! Engine options.
//!
//! The engine receives the plugin's merged option map verbatim. Only the keys
//! listed on [`EngineOptions`] are interpreted; everything else (including the
//! output paths, which are passed to the emitters explicitly) is ignored.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{DocsError, Result};

/// Typed view over the option keys the engine understands.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineOptions {
    /// Glob patterns removed from the expanded input set.
    #[serde(deserialize_with = "one_or_many")]
    pub exclude: Vec<String>,
    /// Skip declaration files and anything under `node_modules`.
    pub exclude_externals: bool,
    /// Drop symbols tagged `@internal`.
    pub exclude_internal: bool,
    /// Site title; defaults to "Documentation".
    pub name: Option<String>,
    /// Path to a Markdown readme, or `"none"` to disable the lookup.
    pub readme: Option<String>,
    /// Remove the output directory before writing the HTML site.
    pub clean_output_dir: bool,
    /// Module format of the sources. Recorded only; OXC infers syntax from extensions.
    pub module: Option<String>,
    /// Compilation target of the sources. Recorded only.
    pub target: Option<String>,
    /// Decorator syntax flag. Recorded only; OXC always accepts decorators.
    pub experimental_decorators: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            exclude_externals: false,
            exclude_internal: true,
            name: None,
            readme: None,
            clean_output_dir: true,
            module: None,
            target: None,
            experimental_decorators: false,
        }
    }
}

/// Where the index page readme comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeSource {
    /// Look for `README.md` in the working directory.
    Auto,
    /// No readme on the index page.
    Disabled,
    File(PathBuf),
}

impl EngineOptions {
    /// Interpret an option map. Values of the wrong type are reported as
    /// [`DocsError::Options`].
    pub fn from_map(options: &Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(options.clone())).map_err(|error| {
            DocsError::Options {
                message: error.to_string(),
            }
        })
    }

    pub fn project_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("Documentation")
    }

    pub fn readme_source(&self) -> ReadmeSource {
        match self.readme.as_deref().map(str::trim) {
            None | Some("") => ReadmeSource::Auto,
            Some(value) if value.eq_ignore_ascii_case("none") => ReadmeSource::Disabled,
            Some(value) => ReadmeSource::File(PathBuf::from(value)),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(pattern) => vec![pattern],
        OneOrMany::Many(patterns) => patterns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test fixture must be an object"),
        }
    }

    #[test]
    fn reads_plugin_defaults() {
        let options = EngineOptions::from_map(&map(json!({
            "module": "commonjs",
            "target": "es5",
            "exclude": "**/node_modules/**/*.*",
            "experimentalDecorators": true,
            "excludeExternals": true,
            "out": "./docs"
        })))
        .unwrap();

        assert_eq!(options.exclude, vec!["**/node_modules/**/*.*"]);
        assert!(options.exclude_externals);
        assert!(options.experimental_decorators);
        assert_eq!(options.module.as_deref(), Some("commonjs"));
        assert!(options.exclude_internal);
        assert!(options.clean_output_dir);
    }

    #[test]
    fn accepts_exclude_lists() {
        let options =
            EngineOptions::from_map(&map(json!({ "exclude": ["**/*.spec.ts", "legacy/**"] })))
                .unwrap();
        assert_eq!(options.exclude.len(), 2);
    }

    #[test]
    fn rejects_mistyped_values() {
        let error = EngineOptions::from_map(&map(json!({ "excludeExternals": "yes" })))
            .unwrap_err();
        assert!(matches!(error, DocsError::Options { .. }));
    }

    #[test]
    fn readme_source_variants() {
        let mut options = EngineOptions::default();
        assert_eq!(options.readme_source(), ReadmeSource::Auto);

        options.readme = Some("none".into());
        assert_eq!(options.readme_source(), ReadmeSource::Disabled);

        options.readme = Some("docs/intro.md".into());
        assert_eq!(
            options.readme_source(),
            ReadmeSource::File(PathBuf::from("docs/intro.md"))
        );
    }

    #[test]
    fn project_name_falls_back() {
        let mut options = EngineOptions::default();
        assert_eq!(options.project_name(), "Documentation");
        options.name = Some("  ".into());
        assert_eq!(options.project_name(), "Documentation");
        options.name = Some("my-lib".into());
        assert_eq!(options.project_name(), "my-lib");
    }
}
