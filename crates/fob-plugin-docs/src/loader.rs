//! Layered option loading.
//!
//! Sources, lowest priority first:
//! 1. an options file (`docs.json` / `docs.toml` in the base directory, or an
//!    explicit path)
//! 2. `FOB_DOCS_*` environment variables (`FOB_DOCS_EXCLUDE_EXTERNALS=false`
//!    sets `excludeExternals`)
//! 3. programmatic overrides
//!
//! The result is the caller option map handed to [`DocsGenerator::new`],
//! which still applies the engine defaults on top.
//!
//! [`DocsGenerator::new`]: crate::DocsGenerator::new

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DocgenError, Result};

/// Options files probed in the base directory, in order.
pub const DEFAULT_OPTION_FILES: [&str; 2] = ["docs.json", "docs.toml"];

pub const DEFAULT_ENV_PREFIX: &str = "FOB_DOCS_";

/// Builder for the caller option map.
#[derive(Debug, Clone)]
pub struct OptionsLoader {
    base_dir: PathBuf,
    file: Option<PathBuf>,
    env_prefix: String,
    overrides: Map<String, Value>,
}

impl Default for OptionsLoader {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            file: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            overrides: Map::new(),
        }
    }
}

impl OptionsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory probed for the default options files.
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Use this options file instead of probing. It must exist.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Values that win over every other source.
    pub fn overrides(mut self, overrides: Map<String, Value>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn load(&self) -> Result<Map<String, Value>> {
        let mut figment = Figment::new();

        if let Some(path) = self.options_file()? {
            debug!(path = %path.display(), "loading documentation options file");
            figment = match file_format(&path)? {
                FileFormat::Json => figment.merge(Json::file(&path)),
                FileFormat::Toml => figment.merge(Toml::file(&path)),
            };
        }

        figment = figment.merge(
            Env::prefixed(&self.env_prefix)
                .map(|key| camel_case(key.as_str()).into())
                .lowercase(false),
        );

        if !self.overrides.is_empty() {
            figment = figment.merge(Serialized::defaults(&self.overrides));
        }

        figment.extract().map_err(|error| DocgenError::Config {
            message: error.to_string(),
        })
    }

    fn options_file(&self) -> Result<Option<PathBuf>> {
        if let Some(path) = &self.file {
            if !path.is_file() {
                return Err(DocgenError::Config {
                    message: format!("options file not found: {}", path.display()),
                });
            }
            return Ok(Some(path.clone()));
        }

        Ok(DEFAULT_OPTION_FILES
            .iter()
            .map(|name| self.base_dir.join(name))
            .find(|candidate| candidate.is_file()))
    }
}

enum FileFormat {
    Json,
    Toml,
}

fn file_format(path: &Path) -> Result<FileFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(FileFormat::Json),
        Some("toml") => Ok(FileFormat::Toml),
        _ => Err(DocgenError::Config {
            message: format!(
                "unsupported options file {}: expected .json or .toml",
                path.display()
            ),
        }),
    }
}

/// `EXCLUDE_EXTERNALS` → `excludeExternals`
fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (index, word) in key.split('_').filter(|word| !word.is_empty()).enumerate() {
        let lower = word.to_ascii_lowercase();
        if index == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
