use serde::{Deserialize, Serialize};

/// The documented API surface produced by a single conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Display name used as the site title.
    pub name: String,
    /// Markdown shown on the site index, usually taken from a README.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    /// Modules with at least one documented export.
    pub modules: Vec<ModuleDoc>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            readme: None,
            modules: Vec::new(),
        }
    }

    /// Returns `true` when no module contains any documented symbols.
    pub fn is_empty(&self) -> bool {
        self.modules.iter().all(|module| module.symbols.is_empty())
    }

    pub fn add_module(&mut self, module: ModuleDoc) {
        self.modules.push(module);
    }

    /// Total number of exported symbols across all modules.
    pub fn symbol_count(&self) -> usize {
        self.modules.iter().map(|module| module.symbols.len()).sum()
    }
}

/// Documentation summary for a single source module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDoc {
    /// File-system path for the module.
    pub path: String,
    /// Free-form description derived from the leading file comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub symbols: Vec<ExportedSymbol>,
}

impl ModuleDoc {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: None,
            symbols: Vec::new(),
        }
    }
}

/// Documentation for an exported symbol (function, class, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedSymbol {
    pub name: String,
    pub kind: SymbolKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Declaration head as written in the source, e.g. `function add(a: number): number`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<ParameterDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub examples: Vec<String>,
    /// Tags that were not mapped to dedicated fields.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<JsDocTag>,
    /// Members of classes and interfaces.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub members: Vec<MemberDoc>,
    pub location: SourceLocation,
}

impl ExportedSymbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            kind,
            summary: None,
            signature: None,
            parameters: Vec::new(),
            returns: None,
            deprecated: None,
            examples: Vec::new(),
            tags: Vec::new(),
            members: Vec::new(),
            location,
        }
    }
}

/// A documented member of a class or interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDoc {
    pub name: String,
    pub kind: MemberKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub is_static: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    pub location: SourceLocation,
}

impl MemberDoc {
    pub fn new(name: impl Into<String>, kind: MemberKind, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            kind,
            summary: None,
            is_static: false,
            deprecated: None,
            location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Constructor,
    Method,
    Property,
    Accessor,
}

impl MemberKind {
    pub fn label(self) -> &'static str {
        match self {
            MemberKind::Constructor => "constructor",
            MemberKind::Method => "method",
            MemberKind::Property => "property",
            MemberKind::Accessor => "accessor",
        }
    }
}

/// Parameter documentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDoc {
    pub name: String,
    /// Type hint extracted from JSDoc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterDoc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: None,
            description: None,
        }
    }
}

/// Structured representation of an arbitrary JSDoc tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsDocTag {
    /// Tag identifier (e.g. `see`, `since`).
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl JsDocTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            type_hint: None,
            description: None,
        }
    }
}

/// Enumerates exported symbol kinds supported by the documentation model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Class,
    Interface,
    TypeAlias,
    Enum,
    Variable,
    Namespace,
    DefaultExport,
    #[default]
    Other,
}

impl SymbolKind {
    /// Human-readable label used by the HTML emitter.
    pub fn label(self) -> &'static str {
        match self {
            SymbolKind::Function => "function",
            SymbolKind::Class => "class",
            SymbolKind::Interface => "interface",
            SymbolKind::TypeAlias => "type",
            SymbolKind::Enum => "enum",
            SymbolKind::Variable => "variable",
            SymbolKind::Namespace => "namespace",
            SymbolKind::DefaultExport => "default export",
            SymbolKind::Other => "export",
        }
    }
}

/// Lightweight source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// One-based line index.
    pub line: u32,
    /// One-based column index.
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}
