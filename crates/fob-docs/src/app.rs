//! The engine facade.
//!
//! [`Application`] exposes the four steps a host drives in order: expand the
//! inputs, convert the files into a [`Project`], then emit either JSON or an
//! HTML site.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DocsError, Result};
use crate::expand::InputExpander;
use crate::extractor::{DocsExtractor, ExtractOptions};
use crate::model::Project;
use crate::options::{EngineOptions, ReadmeSource};

/// A configured documentation engine instance.
#[derive(Debug, Clone)]
pub struct Application {
    options: EngineOptions,
    expander: InputExpander,
    extractor: DocsExtractor,
}

impl Application {
    /// Create an engine from a raw option map.
    pub fn new(options: &Map<String, Value>) -> Result<Self> {
        Self::with_options(EngineOptions::from_map(options)?)
    }

    pub fn with_options(options: EngineOptions) -> Result<Self> {
        let expander = InputExpander::from_options(&options)?;
        let extractor = DocsExtractor::new(ExtractOptions {
            include_internal: !options.exclude_internal,
        });
        Ok(Self {
            options,
            expander,
            extractor,
        })
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Expand files, directories and globs into the list of sources to read.
    pub fn expand_input_files<S: AsRef<str>>(&self, inputs: &[S]) -> Result<Vec<PathBuf>> {
        self.expander.expand(inputs)
    }

    /// Extract documentation from `files`. Returns `None` when no file
    /// contributed a documented export.
    pub fn convert(&self, files: &[PathBuf]) -> Result<Option<Project>> {
        let mut project = Project::new(self.options.project_name());
        self.extractor
            .extract_into(&mut project, files.iter().cloned())?;

        if project.modules.is_empty() {
            debug!(files = files.len(), "no documented exports found");
            return Ok(None);
        }

        project.readme = self.load_readme()?;
        debug!(
            modules = project.modules.len(),
            symbols = project.symbol_count(),
            "converted project"
        );
        Ok(Some(project))
    }

    /// Write the project as a JSON API description.
    #[cfg(feature = "json")]
    pub fn generate_json(&self, project: &Project, path: &Path) -> Result<()> {
        crate::generators::json::write_json(project, path)
    }

    /// Write the rendered HTML site below `dir`.
    #[cfg(feature = "html")]
    pub fn generate_docs(&self, project: &Project, dir: &Path) -> Result<()> {
        crate::generators::html::write_site(project, dir, self.options.clean_output_dir)
    }

    fn load_readme(&self) -> Result<Option<String>> {
        match self.options.readme_source() {
            ReadmeSource::Disabled => Ok(None),
            ReadmeSource::File(path) => fs::read_to_string(&path)
                .map(Some)
                .map_err(|error| DocsError::io(path, error)),
            ReadmeSource::Auto => Ok(["README.md", "readme.md", "Readme.md"]
                .iter()
                .map(Path::new)
                .find(|candidate| candidate.is_file())
                .and_then(|candidate| fs::read_to_string(candidate).ok())),
        }
    }
}
