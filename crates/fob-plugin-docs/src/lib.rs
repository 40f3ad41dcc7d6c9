#![deny(clippy::all)]
// The engine reads sources and writes documentation with std::fs
#![allow(clippy::disallowed_methods)]

//! Rolldown plugin that generates API documentation after each build.
//!
//! The plugin merges caller options onto the engine defaults, resolves the
//! configured output path against the bundle's output directory and drives a
//! documentation engine through expand → convert → emit. It writes either a
//! JSON API description (`json`) or an HTML site (`out`, default `./docs`).
//!
//! ```rust,no_run
//! use fob_plugin_docs::{DocsGenerator, GenerationOutcome};
//! use serde_json::json;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), fob_plugin_docs::DocgenError> {
//! let generator = DocsGenerator::new(
//!     json!({ "json": "api.json", "exclude": "**/*.test.ts" }).as_object().cloned(),
//!     Some("src".into()),
//! );
//! match generator.generate(Some(Path::new("/project/dist")))? {
//!     GenerationOutcome::Json(path) => println!("wrote {}", path.display()),
//!     GenerationOutcome::Site(dir) => println!("wrote site to {}", dir.display()),
//!     GenerationOutcome::Skipped => println!("nothing to document"),
//! }
//! generator.finish();
//! # Ok(()) }
//! ```

pub mod engine;
pub mod error;
pub mod generator;
pub mod inputs;
pub mod loader;
pub mod options;
pub mod resolve;

#[cfg(feature = "logging")]
pub mod logging;

#[cfg(feature = "rolldown-integration")]
pub mod plugin;

pub use engine::{DocEngine, EngineFactory, FobDocsFactory};
pub use error::{DocgenError, EngineError, Result, Stage};
pub use generator::{DocsGenerator, GenerationOutcome};
pub use inputs::{DEFAULT_INPUT, InputFiles, InputSpec};
pub use loader::OptionsLoader;
pub use options::{DEFAULT_OUT_DIR, DocOptions, OutputMode};
pub use resolve::{OutputTarget, RunPlan, resolve_output_path};

#[cfg(feature = "rolldown-integration")]
pub use plugin::{DocgenPlugin, document_build, finish_build};
