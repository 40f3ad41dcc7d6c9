//! Run orchestration.
//!
//! [`DocsGenerator`] owns the merged options and the normalized inputs. Each
//! call to [`DocsGenerator::generate`] builds a fresh engine, expands the
//! inputs, converts them and emits exactly one artifact.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::engine::{DocEngine, EngineFactory, FobDocsFactory};
use crate::error::{DocgenError, Result, Stage};
use crate::inputs::{InputFiles, InputSpec};
use crate::options::DocOptions;
use crate::resolve::OutputTarget;

/// What a single run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// A JSON API description was written to this file.
    Json(PathBuf),
    /// An HTML site was written below this directory.
    Site(PathBuf),
    /// The inputs contained nothing to document; nothing was written.
    Skipped,
}

/// Documentation generator bound to one set of options and inputs.
#[derive(Debug, Clone)]
pub struct DocsGenerator<F = FobDocsFactory> {
    options: DocOptions,
    inputs: InputFiles,
    factory: F,
}

impl DocsGenerator<FobDocsFactory> {
    /// Merge `options` onto the defaults and normalize `inputs`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fob_plugin_docs::{DocsGenerator, InputSpec};
    /// use serde_json::json;
    ///
    /// let generator = DocsGenerator::new(
    ///     json!({ "json": "api.json" }).as_object().cloned(),
    ///     Some(InputSpec::from("src")),
    /// );
    /// assert_eq!(generator.inputs().as_slice(), ["src"]);
    /// ```
    pub fn new(options: Option<Map<String, Value>>, inputs: Option<InputSpec>) -> Self {
        Self::with_factory(FobDocsFactory, options, inputs)
    }
}

impl<F: EngineFactory> DocsGenerator<F> {
    /// Use a custom engine factory.
    pub fn with_factory(
        factory: F,
        options: Option<Map<String, Value>>,
        inputs: Option<InputSpec>,
    ) -> Self {
        Self {
            options: DocOptions::merged(options),
            inputs: InputFiles::new(inputs),
            factory,
        }
    }

    pub fn options(&self) -> &DocOptions {
        &self.options
    }

    pub fn inputs(&self) -> &InputFiles {
        &self.inputs
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Run one generation pass. Relative output paths are resolved against
    /// `host_output_dir` for this run only; the stored options never change.
    pub fn generate(&self, host_output_dir: Option<&Path>) -> Result<GenerationOutcome> {
        let plan = self.options.resolve(host_output_dir);
        debug!(target = ?plan.target, inputs = self.inputs.len(), "starting documentation run");

        let engine = self
            .factory
            .create(&plan.options)
            .map_err(DocgenError::engine(Stage::Create))?;

        let files = engine
            .expand_input_files(self.inputs.as_slice())
            .map_err(DocgenError::engine(Stage::Expand))?;
        debug!(files = files.len(), "expanded documentation inputs");

        let Some(project) = engine
            .convert(&files)
            .map_err(DocgenError::engine(Stage::Convert))?
        else {
            debug!("nothing to document, skipping output");
            return Ok(GenerationOutcome::Skipped);
        };

        match plan.target {
            OutputTarget::Json(path) => {
                info!(path = %path.display(), "generating documentation json");
                engine
                    .generate_json(&project, &path)
                    .map_err(DocgenError::engine(Stage::Emit))?;
                Ok(GenerationOutcome::Json(path))
            }
            OutputTarget::Directory(dir) => {
                info!(dir = %dir.display(), "generating documentation site");
                engine
                    .generate_docs(&project, &dir)
                    .map_err(DocgenError::engine(Stage::Emit))?;
                Ok(GenerationOutcome::Site(dir))
            }
        }
    }

    /// Called once the host has finished its build.
    pub fn finish(&self) {
        info!("documentation generation finished");
    }
}
