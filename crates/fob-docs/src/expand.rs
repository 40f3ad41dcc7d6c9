//! Input expansion.
//!
//! Turns the user-facing list of inputs (files, directories, glob patterns)
//! into the concrete, de-duplicated list of source files the extractor reads.

use std::fs;
use std::path::{Component, Path, PathBuf};

use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::{DocsError, Result};
use crate::options::EngineOptions;

const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Expands input paths and globs into source files.
#[derive(Debug, Clone)]
pub struct InputExpander {
    exclude: Override,
    exclude_externals: bool,
}

impl InputExpander {
    /// Build an expander from exclusion globs.
    pub fn new<I, S>(exclude: I, exclude_externals: bool) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = OverrideBuilder::new(".");
        for pattern in exclude {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }
            builder.add(pattern).map_err(|error| DocsError::Options {
                message: format!("invalid exclude pattern '{pattern}': {error}"),
            })?;
        }
        let exclude = builder.build().map_err(|error| DocsError::Options {
            message: error.to_string(),
        })?;

        Ok(Self {
            exclude,
            exclude_externals,
        })
    }

    pub fn from_options(options: &EngineOptions) -> Result<Self> {
        Self::new(&options.exclude, options.exclude_externals)
    }

    /// Expand every input in order. Files named explicitly are kept even when
    /// their extension is not a known source extension; walked files are not.
    pub fn expand<S: AsRef<str>>(&self, inputs: &[S]) -> Result<Vec<PathBuf>> {
        let mut seen = FxHashSet::default();
        let mut files = Vec::new();

        for input in inputs {
            let input = input.as_ref();
            let found = if is_glob(input) {
                self.expand_glob(input)?
            } else {
                self.expand_path(Path::new(input))?
            };

            for file in found {
                if seen.insert(file.clone()) {
                    files.push(file);
                }
            }
        }

        debug!(inputs = inputs.len(), files = files.len(), "expanded documentation inputs");
        Ok(files)
    }

    fn expand_path(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let metadata = fs::metadata(path).map_err(|error| DocsError::io(path, error))?;
        if metadata.is_dir() {
            return self.walk(path, |_| true);
        }
        if self.is_excluded(path) {
            return Ok(Vec::new());
        }
        Ok(vec![path.to_path_buf()])
    }

    fn expand_glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let (base, rest) = split_glob(pattern);
        if !base.exists() {
            return Ok(Vec::new());
        }

        let mut builder = OverrideBuilder::new(&base);
        builder
            .add(&format!("/{rest}"))
            .map_err(|error| DocsError::Options {
                message: format!("invalid input pattern '{pattern}': {error}"),
            })?;
        let matcher = builder.build().map_err(|error| DocsError::Options {
            message: error.to_string(),
        })?;

        self.walk(&base, |path| {
            let relative = path.strip_prefix(&base).unwrap_or(path);
            matcher.matched(relative, false).is_whitelist()
        })
    }

    fn walk(&self, root: &Path, accept: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .hidden(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|error| walk_error(root, error))?;
            if !entry.file_type().is_some_and(|kind| kind.is_file()) {
                continue;
            }
            let path = entry.path();
            if !is_source_file(path) || self.is_excluded(path) || !accept(path) {
                continue;
            }
            files.push(path.to_path_buf());
        }
        Ok(files)
    }

    /// Returns `true` when `path` matches an exclude glob or is an external file.
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude_externals && is_external(path) {
            return true;
        }
        self.exclude.matched(path, false).is_whitelist()
    }
}

fn walk_error(root: &Path, error: ignore::Error) -> DocsError {
    let message = error.to_string();
    match error.into_io_error() {
        Some(io) => DocsError::io(root, io),
        None => DocsError::Other { message },
    }
}

fn is_glob(input: &str) -> bool {
    input.contains(['*', '?', '[', '{'])
}

/// Split a glob into the literal directory prefix and the pattern remainder.
fn split_glob(pattern: &str) -> (PathBuf, String) {
    let mut base = PathBuf::new();
    let mut rest = Vec::new();
    for component in Path::new(pattern).components() {
        let text = component.as_os_str().to_string_lossy();
        if rest.is_empty() && !is_glob(&text) {
            match component {
                Component::CurDir => {}
                _ => base.push(component),
            }
        } else {
            rest.push(text.into_owned());
        }
    }

    if base.as_os_str().is_empty() {
        base.push(".");
    }
    (base, rest.join("/"))
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn is_external(path: &Path) -> bool {
    let declaration = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts")
        });
    declaration
        || path
            .components()
            .any(|component| component.as_os_str() == "node_modules")
}
