//! Rolldown integration.
//!
//! ```text
//! build → generate_bundle → DocsGenerator::generate → JSON file | HTML site
//!       → close_bundle    → DocsGenerator::finish
//! ```
//!
//! Documentation runs in `generate_bundle` so relative `out`/`json` paths can
//! be resolved against the bundle's output directory. The hook future
//! resolves once the engine has finished writing; an engine failure resolves
//! it with an error and fails the build.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rolldown_plugin::{HookGenerateBundleArgs, HookNoopReturn, HookUsage, Plugin, PluginContext};
use serde_json::{Map, Value};

use crate::engine::{EngineFactory, FobDocsFactory};
use crate::error::Result;
use crate::generator::{DocsGenerator, GenerationOutcome};
use crate::inputs::InputSpec;

/// Rolldown plugin that documents the configured inputs after every build.
///
/// # Example
///
/// ```rust,no_run
/// use fob_plugin_docs::DocgenPlugin;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let plugin = Arc::new(DocgenPlugin::new(
///     json!({ "out": "api" }).as_object().cloned(),
///     Some("src".into()),
/// ));
/// // Add to your Rolldown bundler configuration
/// ```
#[derive(Debug)]
pub struct DocgenPlugin<F = FobDocsFactory> {
    generator: Arc<DocsGenerator<F>>,
}

impl DocgenPlugin<FobDocsFactory> {
    pub fn new(options: Option<Map<String, Value>>, inputs: Option<InputSpec>) -> Self {
        Self::from_generator(DocsGenerator::new(options, inputs))
    }
}

impl<F: EngineFactory> DocgenPlugin<F> {
    pub fn from_generator(generator: DocsGenerator<F>) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }

    pub fn generator(&self) -> &DocsGenerator<F> {
        &self.generator
    }
}

impl<F> Clone for DocgenPlugin<F> {
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<F> Plugin for DocgenPlugin<F>
where
    F: EngineFactory + std::fmt::Debug + 'static,
{
    fn name(&self) -> Cow<'static, str> {
        "fob-docgen".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::GenerateBundle | HookUsage::CloseBundle
    }

    fn generate_bundle(
        &self,
        ctx: &PluginContext,
        _args: &mut HookGenerateBundleArgs<'_>,
    ) -> impl std::future::Future<Output = HookNoopReturn> + Send {
        let options = ctx.options();
        let cwd = options.cwd.clone();
        let dir = options.dir.clone();
        let generator = Arc::clone(&self.generator);

        async move {
            document_build(&*generator, &cwd, dir.as_deref()).await?;
            Ok(())
        }
    }

    fn close_bundle(
        &self,
        _ctx: &PluginContext,
    ) -> impl std::future::Future<Output = HookNoopReturn> + Send {
        let generator = Arc::clone(&self.generator);

        async move {
            finish_build(&*generator).await;
            Ok(())
        }
    }
}

/// Emit-hook body: document the build whose bundler options are `cwd` and
/// `dir`. An error here fails the build.
pub async fn document_build<F: EngineFactory>(
    generator: &DocsGenerator<F>,
    cwd: &Path,
    dir: Option<&str>,
) -> Result<GenerationOutcome> {
    generator.generate(host_output_dir(cwd, dir).as_deref())
}

/// Close-hook body.
pub async fn finish_build<F: EngineFactory>(generator: &DocsGenerator<F>) {
    generator.finish();
}

/// The bundle's output directory, absolute when `dir` is relative to `cwd`.
/// `None` when the bundle goes to a single file or stays in memory.
fn host_output_dir(cwd: &Path, dir: Option<&str>) -> Option<PathBuf> {
    dir.map(|dir| cwd.join(dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_dir_is_joined_onto_cwd() {
        assert_eq!(
            host_output_dir(Path::new("/project"), Some("dist")),
            Some(PathBuf::from("/project/dist"))
        );
        assert_eq!(
            host_output_dir(Path::new("/project"), Some("/srv/out")),
            Some(PathBuf::from("/srv/out"))
        );
        assert_eq!(host_output_dir(Path::new("/project"), None), None);
    }

    #[test]
    fn plugin_clones_share_one_generator() {
        let plugin = DocgenPlugin::new(None, None);
        let clone = plugin.clone();
        assert!(std::ptr::eq(plugin.generator(), clone.generator()));
        assert_eq!(plugin.name(), "fob-docgen");
    }
}
