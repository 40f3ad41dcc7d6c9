//! Error types for documentation generation.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Boxed error raised by a documentation engine.
pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for the plugin.
pub type Result<T> = std::result::Result<T, DocgenError>;

/// The engine call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Constructing the engine from the run options.
    Create,
    /// Expanding input paths and globs.
    Expand,
    /// Converting files into a project.
    Convert,
    /// Writing JSON or the HTML site.
    Emit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Create => "create",
            Stage::Expand => "expand",
            Stage::Convert => "convert",
            Stage::Emit => "emit",
        })
    }
}

/// Errors surfaced by the documentation plugin.
#[derive(Error, Debug, Diagnostic)]
pub enum DocgenError {
    /// The documentation engine failed. Never retried; the build fails.
    #[error("documentation engine failed during {stage}: {source}")]
    #[diagnostic(code(fob::docs::engine))]
    Engine {
        stage: Stage,
        #[source]
        source: EngineError,
    },

    /// Loading layered options failed.
    #[error("invalid documentation options: {message}")]
    #[diagnostic(
        code(fob::docs::config),
        help("Check the options file syntax and FOB_DOCS_* environment variables")
    )]
    Config { message: String },
}

impl DocgenError {
    pub(crate) fn engine<E>(stage: Stage) -> impl FnOnce(E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        move |source| Self::Engine {
            stage,
            source: Box::new(source),
        }
    }

    /// The failing engine stage, if this is an engine error.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Engine { stage, .. } => Some(*stage),
            Self::Config { .. } => None,
        }
    }
}
