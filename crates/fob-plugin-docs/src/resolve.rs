//! Per-run output resolution.
//!
//! Resolution never touches the stored [`DocOptions`]; it produces a
//! [`RunPlan`] holding a working copy of the options with the resolved
//! output path written back under its key.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde_json::{Map, Value};

use crate::options::{DEFAULT_OUT_DIR, DocOptions, JSON_KEY, OUT_KEY, OutputMode};

/// Where a run writes its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Json(PathBuf),
    Directory(PathBuf),
}

impl OutputTarget {
    pub fn path(&self) -> &Path {
        match self {
            OutputTarget::Json(path) | OutputTarget::Directory(path) => path,
        }
    }
}

/// Options and output target for a single generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub options: Map<String, Value>,
    pub target: OutputTarget,
}

/// Resolve a configured output path against the host's output directory.
///
/// Absolute paths are returned unchanged. Relative paths are joined onto
/// `host_output_dir` and normalized; without a host directory they stay
/// relative to the working directory.
pub fn resolve_output_path(configured: &Path, host_output_dir: Option<&Path>) -> PathBuf {
    if configured.is_absolute() {
        return configured.to_path_buf();
    }
    match host_output_dir {
        Some(dir) => dir.join(configured).clean(),
        None => configured.to_path_buf(),
    }
}

impl DocOptions {
    /// Build the plan for one run against the host's output directory.
    pub fn resolve(&self, host_output_dir: Option<&Path>) -> RunPlan {
        let mode = self.output_mode();
        let (key, configured) = match mode {
            OutputMode::Json => (JSON_KEY, self.json().unwrap_or_default()),
            OutputMode::Directory => (OUT_KEY, self.out().unwrap_or(DEFAULT_OUT_DIR)),
        };

        let resolved = resolve_output_path(Path::new(configured), host_output_dir);
        let mut options = self.as_map().clone();
        options.insert(
            key.to_string(),
            Value::from(resolved.to_string_lossy().into_owned()),
        );

        let target = match mode {
            OutputMode::Json => OutputTarget::Json(resolved),
            OutputMode::Directory => OutputTarget::Directory(resolved),
        };
        RunPlan { options, target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_are_untouched() {
        assert_eq!(
            resolve_output_path(Path::new("/abs/docs"), Some(Path::new("/build"))),
            PathBuf::from("/abs/docs")
        );
    }

    #[test]
    fn relative_paths_join_host_dir() {
        assert_eq!(
            resolve_output_path(Path::new("./docs"), Some(Path::new("/build"))),
            PathBuf::from("/build/docs")
        );
        assert_eq!(
            resolve_output_path(Path::new("../site/api.json"), Some(Path::new("/build/dist"))),
            PathBuf::from("/build/site/api.json")
        );
    }

    #[test]
    fn relative_paths_without_host_dir_pass_through() {
        assert_eq!(
            resolve_output_path(Path::new("./docs"), None),
            PathBuf::from("./docs")
        );
    }
}
