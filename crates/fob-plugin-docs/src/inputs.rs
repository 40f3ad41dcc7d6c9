//! The set of inputs handed to the engine.

use std::path::{Path, PathBuf};

/// Input used when the caller gives none: the current directory.
pub const DEFAULT_INPUT: &str = "./";

/// What the caller asked to document: one path or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    Single(String),
    Many(Vec<String>),
}

impl From<&str> for InputSpec {
    fn from(path: &str) -> Self {
        Self::Single(path.to_string())
    }
}

impl From<String> for InputSpec {
    fn from(path: String) -> Self {
        Self::Single(path)
    }
}

impl From<&Path> for InputSpec {
    fn from(path: &Path) -> Self {
        Self::Single(path.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for InputSpec {
    fn from(path: PathBuf) -> Self {
        Self::from(path.as_path())
    }
}

impl From<Vec<String>> for InputSpec {
    fn from(paths: Vec<String>) -> Self {
        Self::Many(paths)
    }
}

impl From<Vec<&str>> for InputSpec {
    fn from(paths: Vec<&str>) -> Self {
        Self::Many(paths.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for InputSpec {
    fn from(paths: &[&str]) -> Self {
        Self::Many(paths.iter().map(|path| path.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for InputSpec {
    fn from(paths: [&str; N]) -> Self {
        Self::Many(paths.iter().map(|path| path.to_string()).collect())
    }
}

/// Non-empty, ordered list of paths or globs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFiles(Vec<String>);

impl InputFiles {
    /// Normalize an optional spec. A missing spec, an empty path and an empty
    /// list all become [`DEFAULT_INPUT`].
    pub fn new(spec: Option<InputSpec>) -> Self {
        let paths = match spec {
            Some(InputSpec::Single(path)) if !path.is_empty() => vec![path],
            Some(InputSpec::Many(paths)) if !paths.is_empty() => paths,
            _ => vec![DEFAULT_INPUT.to_string()],
        };
        Self(paths)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty. Normalization never produces an empty list.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for InputFiles {
    fn default() -> Self {
        Self::new(None)
    }
}

impl From<InputSpec> for InputFiles {
    fn from(spec: InputSpec) -> Self {
        Self::new(Some(spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(spec: impl Into<InputSpec>) -> InputFiles {
        InputFiles::new(Some(spec.into()))
    }

    #[test]
    fn single_path_is_wrapped() {
        assert_eq!(files("src").as_slice(), ["src"]);
        assert_eq!(
            files(PathBuf::from("lib/index.ts")).as_slice(),
            ["lib/index.ts"]
        );
    }

    #[test]
    fn sequences_are_kept_in_order() {
        assert_eq!(files(["b", "a"]).as_slice(), ["b", "a"]);
        assert_eq!(
            files(vec!["x".to_string(), "y".to_string()]).as_slice(),
            ["x", "y"]
        );
    }

    #[test]
    fn empty_inputs_use_current_directory() {
        assert_eq!(InputFiles::default().as_slice(), [DEFAULT_INPUT]);
        assert_eq!(files("").as_slice(), [DEFAULT_INPUT]);
        assert_eq!(files(Vec::<String>::new()).as_slice(), [DEFAULT_INPUT]);
    }
}
