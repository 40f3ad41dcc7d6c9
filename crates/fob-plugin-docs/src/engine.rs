//! The seam between the plugin and the documentation engine.
//!
//! The generator only ever talks to these traits, so any engine with an
//! expand / convert / emit lifecycle can be plugged in. [`FobDocsFactory`]
//! wires up the `fob-docs` engine shipped with this workspace.

use std::path::{Path, PathBuf};

use fob_docs::{Application, DocsError, Project};
use serde_json::{Map, Value};

/// A documentation engine instance, created fresh for every run.
pub trait DocEngine {
    /// The engine's in-memory model of the documented API.
    type Project;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Expand paths and globs into the concrete files to document.
    fn expand_input_files(&self, inputs: &[String]) -> Result<Vec<PathBuf>, Self::Error>;

    /// Build a project from `files`. `None` means nothing was documented.
    fn convert(&self, files: &[PathBuf]) -> Result<Option<Self::Project>, Self::Error>;

    fn generate_json(&self, project: &Self::Project, path: &Path) -> Result<(), Self::Error>;

    fn generate_docs(&self, project: &Self::Project, dir: &Path) -> Result<(), Self::Error>;
}

/// Builds an engine from the per-run option map.
pub trait EngineFactory: Send + Sync {
    type Engine: DocEngine;
    type Error: std::error::Error + Send + Sync + 'static;

    fn create(&self, options: &Map<String, Value>) -> Result<Self::Engine, Self::Error>;
}

/// Factory for the bundled `fob-docs` engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct FobDocsFactory;

impl EngineFactory for FobDocsFactory {
    type Engine = Application;
    type Error = DocsError;

    fn create(&self, options: &Map<String, Value>) -> Result<Application, DocsError> {
        Application::new(options)
    }
}

impl DocEngine for Application {
    type Project = Project;
    type Error = DocsError;

    fn expand_input_files(&self, inputs: &[String]) -> Result<Vec<PathBuf>, DocsError> {
        Application::expand_input_files(self, inputs)
    }

    fn convert(&self, files: &[PathBuf]) -> Result<Option<Project>, DocsError> {
        Application::convert(self, files)
    }

    fn generate_json(&self, project: &Project, path: &Path) -> Result<(), DocsError> {
        Application::generate_json(self, project, path)
    }

    fn generate_docs(&self, project: &Project, dir: &Path) -> Result<(), DocsError> {
        Application::generate_docs(self, project, dir)
    }
}
