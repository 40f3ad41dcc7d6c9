#![deny(clippy::all)]
#![cfg(not(target_family = "wasm"))]
// fob-docs is native-only and uses std::fs for reading sources and writing output
#![allow(clippy::disallowed_methods)]

//! Documentation engine for the Fob bundler.
//!
//! This crate provides:
//! - A project model describing the exported API surface of a set of modules.
//! - An extractor that reads exported symbols and their JSDoc comments using OXC.
//! - Input expansion for paths, directories and glob patterns.
//! - Emitters for a JSON API description and a static HTML documentation site.
//! - [`Application`], the facade that ties those steps together and is driven by
//!   the `fob-plugin-docs` bundler plugin.

pub mod app;
pub mod error;
pub mod expand;
pub mod extractor;
pub mod jsdoc;
pub mod model;
pub mod options;

#[cfg(any(feature = "html", feature = "json"))]
pub mod generators;

pub use app::Application;
pub use error::{DocsError, Result};
pub use expand::InputExpander;
pub use extractor::{DocsExtractor, ExtractOptions};
pub use model::{
    ExportedSymbol, JsDocTag, MemberDoc, MemberKind, ModuleDoc, ParameterDoc, Project,
    SourceLocation, SymbolKind,
};
pub use options::{EngineOptions, ReadmeSource};

#[cfg(feature = "json")]
pub use generators::json::render_json;

#[cfg(feature = "html")]
pub use generators::html::{SitePage, render_site};
