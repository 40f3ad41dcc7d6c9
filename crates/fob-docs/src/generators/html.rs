//! Static HTML site emitter.
//!
//! Layout of the generated tree:
//!
//! ```text
//! <out>/index.html            project title, readme, module list
//! <out>/modules/<slug>.html   one page per module
//! <out>/assets/style.css
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{Environment, context};
use rustc_hash::FxHashSet;
use serde::Serialize;

use super::write_file;
use crate::error::{DocsError, Result};
use crate::model::{ExportedSymbol, JsDocTag, ModuleDoc, ParameterDoc, Project};

const LAYOUT_TEMPLATE: &str = include_str!("templates/layout.html");
const INDEX_TEMPLATE: &str = include_str!("templates/index.html");
const MODULE_TEMPLATE: &str = include_str!("templates/module.html");
const STYLESHEET: &str = include_str!("templates/style.css");

/// A rendered file, relative to the output directory.
#[derive(Debug, Clone)]
pub struct SitePage {
    pub path: PathBuf,
    pub contents: String,
}

/// Render every page of the site in memory.
pub fn render_site(project: &Project) -> Result<Vec<SitePage>> {
    let env = environment()?;
    let slugs = module_slugs(&project.modules);
    let mut pages = Vec::with_capacity(project.modules.len() + 2);

    let modules: Vec<ModuleLink<'_>> = project
        .modules
        .iter()
        .zip(&slugs)
        .map(|(module, slug)| ModuleLink {
            path: &module.path,
            href: format!("modules/{slug}.html"),
            description: module.description.as_deref(),
            symbol_count: module.symbols.len(),
        })
        .collect();

    let index = env
        .get_template("index.html")
        .and_then(|template| {
            template.render(context! {
                version => env!("CARGO_PKG_VERSION"),
                root => "",
                project_name => &project.name,
                readme => project.readme.as_deref().map(markdown_to_html),
                modules => modules,
            })
        })
        .map_err(render_error)?;
    pages.push(SitePage {
        path: PathBuf::from("index.html"),
        contents: index,
    });

    let module_template = env.get_template("module.html").map_err(render_error)?;
    for (module, slug) in project.modules.iter().zip(&slugs) {
        let symbols: Vec<SymbolView<'_>> = module.symbols.iter().map(SymbolView::from).collect();
        let contents = module_template
            .render(context! {
                version => env!("CARGO_PKG_VERSION"),
                root => "../",
                project_name => &project.name,
                path => &module.path,
                description => module.description.as_deref().map(markdown_to_html),
                symbols => symbols,
            })
            .map_err(render_error)?;
        pages.push(SitePage {
            path: Path::new("modules").join(format!("{slug}.html")),
            contents,
        });
    }

    pages.push(SitePage {
        path: Path::new("assets").join("style.css"),
        contents: STYLESHEET.to_string(),
    });

    Ok(pages)
}

/// Render the site and write it below `dir`. When `clean` is set, the
/// contents of an existing `dir` are removed first so pages of deleted
/// modules do not linger.
pub fn write_site(project: &Project, dir: &Path, clean: bool) -> Result<()> {
    let pages = render_site(project)?;

    if clean {
        clean_site_dir(dir)?;
    }
    for page in pages {
        write_file(&dir.join(&page.path), &page.contents)?;
    }
    Ok(())
}

/// Files every generated site contains.
const SITE_MARKERS: [&str; 2] = ["index.html", "assets/style.css"];

/// Empty `dir` in place. Only an empty directory or one holding a previous
/// site is cleared; anything else is refused untouched.
fn clean_site_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }
    if !dir.is_dir() {
        return Err(DocsError::Options {
            message: format!("output path exists but is not a directory: {}", dir.display()),
        });
    }

    let entries = fs::read_dir(dir)
        .map_err(|error| DocsError::io(dir, error))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|error| DocsError::io(dir, error))?;
    if entries.is_empty() {
        return Ok(());
    }
    if !SITE_MARKERS.iter().all(|marker| dir.join(marker).is_file()) {
        return Err(DocsError::Options {
            message: format!(
                "refusing to clean {}: it is not empty and does not contain a documentation site \
                 (set cleanOutputDir to false or choose another output directory)",
                dir.display()
            ),
        });
    }

    for entry in entries {
        let path = entry.path();
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|error| DocsError::io(&path, error))?;
    }
    Ok(())
}

fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    for (name, source) in [
        ("layout.html", LAYOUT_TEMPLATE),
        ("index.html", INDEX_TEMPLATE),
        ("module.html", MODULE_TEMPLATE),
    ] {
        env.add_template(name, source).map_err(render_error)?;
    }
    Ok(env)
}

fn render_error(error: minijinja::Error) -> DocsError {
    DocsError::Render {
        message: error.to_string(),
    }
}

fn markdown_to_html(text: &str) -> String {
    markdown::to_html(text)
}

/// File-name-safe, unique slugs for module paths.
fn module_slugs(modules: &[ModuleDoc]) -> Vec<String> {
    let mut used = FxHashSet::default();
    modules
        .iter()
        .map(|module| {
            let base = slugify(&module.path);
            let mut slug = base.clone();
            let mut suffix = 2;
            while !used.insert(slug.clone()) {
                slug = format!("{base}-{suffix}");
                suffix += 1;
            }
            slug
        })
        .collect()
}

fn slugify(path: &str) -> String {
    let trimmed = path.trim_start_matches("./");
    let mut slug = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "module".to_string()
    } else {
        slug.to_string()
    }
}

#[derive(Serialize)]
struct ModuleLink<'a> {
    path: &'a str,
    href: String,
    description: Option<&'a str>,
    symbol_count: usize,
}

#[derive(Serialize)]
struct SymbolView<'a> {
    anchor: String,
    name: &'a str,
    kind: &'static str,
    line: u32,
    summary: Option<String>,
    signature: Option<&'a str>,
    parameters: &'a [ParameterDoc],
    returns: Option<&'a str>,
    deprecated: Option<&'a str>,
    examples: &'a [String],
    tags: &'a [JsDocTag],
    members: Vec<MemberView<'a>>,
}

#[derive(Serialize)]
struct MemberView<'a> {
    name: &'a str,
    kind: &'static str,
    is_static: bool,
    summary: Option<String>,
    deprecated: Option<&'a str>,
}

impl<'a> From<&'a ExportedSymbol> for SymbolView<'a> {
    fn from(symbol: &'a ExportedSymbol) -> Self {
        Self {
            anchor: format!("{}-{}", slugify(symbol.kind.label()), slugify(&symbol.name)),
            name: &symbol.name,
            kind: symbol.kind.label(),
            line: symbol.location.line,
            summary: symbol.summary.as_deref().map(markdown_to_html),
            signature: symbol.signature.as_deref(),
            parameters: &symbol.parameters,
            returns: symbol.returns.as_deref(),
            deprecated: symbol.deprecated.as_deref(),
            examples: &symbol.examples,
            tags: &symbol.tags,
            members: symbol
                .members
                .iter()
                .map(|member| MemberView {
                    name: &member.name,
                    kind: member.kind.label(),
                    is_static: member.is_static,
                    summary: member.summary.as_deref().map(markdown_to_html),
                    deprecated: member.deprecated.as_deref(),
                })
                .collect(),
        }
    }
}
