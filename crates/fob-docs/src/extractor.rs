use std::fs;
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPattern, BindingPatternKind, Class, ClassElement, Comment, Declaration,
    ExportDefaultDeclarationKind, ExportNamedDeclaration, Function, MethodDefinitionKind,
    PropertyKey, Statement, TSAccessibility, TSInterfaceDeclaration, TSSignature,
};
use oxc_parser::Parser;
use oxc_span::{SourceType, Span};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{DocsError, Result};
use crate::jsdoc::{ParsedJsDoc, parse_jsdoc};
use crate::model::{
    ExportedSymbol, MemberDoc, MemberKind, ModuleDoc, Project, SourceLocation, SymbolKind,
};

/// Options controlling documentation extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Include symbols and members marked with `@internal`.
    pub include_internal: bool,
}

/// Extracts documentation for exported symbols from JavaScript / TypeScript modules.
#[derive(Debug, Clone, Default)]
pub struct DocsExtractor {
    options: ExtractOptions,
}

impl DocsExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Extract every file into `project`, skipping modules without documented exports.
    pub fn extract_into<I>(&self, project: &mut Project, inputs: I) -> Result<()>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for path in inputs {
            let module = self.extract_from_path(&path)?;
            if !module.symbols.is_empty() {
                project.add_module(module);
            }
        }
        Ok(())
    }

    /// Extract documentation from a file on disk.
    pub fn extract_from_path(&self, path: impl AsRef<Path>) -> Result<ModuleDoc> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|error| DocsError::io(path, error))?;
        self.extract_from_source(path, &source)
    }

    /// Extract documentation from an in-memory source string. The source type
    /// is inferred from the path's extension.
    pub fn extract_from_source(&self, path: impl AsRef<Path>, source: &str) -> Result<ModuleDoc> {
        let path = path.as_ref();
        let source_type = SourceType::from_path(path).map_err(|error| {
            DocsError::parse_error(path.to_path_buf(), &[error.to_string()])
        })?;

        let allocator = Allocator::default();
        let parsed = Parser::new(&allocator, source, source_type).parse();
        if parsed.panicked || !parsed.errors.is_empty() {
            let diagnostics: Vec<String> =
                parsed.errors.iter().map(|error| error.to_string()).collect();
            return Err(DocsError::parse_error(path.to_path_buf(), &diagnostics));
        }

        let program = &parsed.program;
        let mut context = ModuleContext {
            source,
            comments: jsdoc_by_attachment(program.comments.iter()),
            consumed: FxHashSet::default(),
            lines: LineIndex::new(source),
            include_internal: self.options.include_internal,
        };

        let mut module = ModuleDoc::new(path.to_string_lossy());
        let mut first_export: Option<u32> = None;

        for statement in program.body.iter() {
            if let Some(start) = context.collect(statement, &mut module.symbols) {
                first_export = Some(first_export.map_or(start, |current| current.min(start)));
            }
        }

        module.description = context.module_description(program.comments.iter(), first_export);
        Ok(module)
    }
}

/// Per-file extraction state.
struct ModuleContext<'s, 'c> {
    source: &'s str,
    comments: FxHashMap<u32, &'c Comment>,
    consumed: FxHashSet<u32>,
    lines: LineIndex,
    include_internal: bool,
}

impl ModuleContext<'_, '_> {
    /// Push the symbols exported by `statement`. Returns the statement start
    /// when it is an export, documented or not.
    fn collect(&mut self, statement: &Statement<'_>, out: &mut Vec<ExportedSymbol>) -> Option<u32> {
        match statement {
            Statement::ExportNamedDeclaration(export) => {
                self.collect_named(export, out);
                Some(export.span.start)
            }
            Statement::ExportDefaultDeclaration(export) => {
                let Some(doc) = self.take_doc(export.span.start) else {
                    return Some(export.span.start);
                };
                let symbol = match &export.declaration {
                    ExportDefaultDeclarationKind::FunctionDeclaration(function) => {
                        self.function_symbol(function, SymbolKind::DefaultExport)
                    }
                    ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                        self.class_symbol(class, SymbolKind::DefaultExport)
                    }
                    _ => ExportedSymbol::new(
                        "default",
                        SymbolKind::DefaultExport,
                        self.lines.location(export.span.start),
                    ),
                };
                out.push(with_doc(symbol, doc));
                Some(export.span.start)
            }
            Statement::TSExportAssignment(export) => {
                if let Some(doc) = self.take_doc(export.span.start) {
                    let location = self.lines.location(export.span.start);
                    let symbol =
                        ExportedSymbol::new("default", SymbolKind::DefaultExport, location);
                    out.push(with_doc(symbol, doc));
                }
                Some(export.span.start)
            }
            Statement::TSNamespaceExportDeclaration(export) => {
                if let Some(doc) = self.take_doc(export.span.start) {
                    let location = self.lines.location(export.span.start);
                    let symbol = ExportedSymbol::new(
                        export.id.name.to_string(),
                        SymbolKind::Namespace,
                        location,
                    );
                    out.push(with_doc(symbol, doc));
                }
                Some(export.span.start)
            }
            _ => None,
        }
    }

    fn collect_named(
        &mut self,
        export: &ExportNamedDeclaration<'_>,
        out: &mut Vec<ExportedSymbol>,
    ) {
        let Some(declaration) = &export.declaration else {
            return;
        };
        let Some(doc) = self.take_doc(export.span.start) else {
            return;
        };

        let symbols = match declaration {
            Declaration::VariableDeclaration(variable) => variable
                .declarations
                .iter()
                .filter_map(|declarator| {
                    let name = binding_name(&declarator.id)?;
                    let location = self.lines.location(declarator.span.start);
                    Some(ExportedSymbol::new(name, SymbolKind::Variable, location))
                })
                .collect(),
            Declaration::FunctionDeclaration(function) => {
                vec![self.function_symbol(function, SymbolKind::Function)]
            }
            Declaration::ClassDeclaration(class) => {
                vec![self.class_symbol(class, SymbolKind::Class)]
            }
            Declaration::TSInterfaceDeclaration(interface) => {
                vec![self.interface_symbol(interface)]
            }
            Declaration::TSTypeAliasDeclaration(alias) => {
                let location = self.lines.location(alias.span.start);
                let mut symbol =
                    ExportedSymbol::new(alias.id.name.to_string(), SymbolKind::TypeAlias, location);
                symbol.signature = self.text(alias.span.start, alias.span.end);
                vec![symbol]
            }
            Declaration::TSEnumDeclaration(enumeration) => {
                let location = self.lines.location(enumeration.span.start);
                vec![ExportedSymbol::new(
                    enumeration.id.name.to_string(),
                    SymbolKind::Enum,
                    location,
                )]
            }
            Declaration::TSModuleDeclaration(namespace) => {
                let location = self.lines.location(namespace.span.start);
                vec![ExportedSymbol::new(
                    namespace.id.name().to_string(),
                    SymbolKind::Namespace,
                    location,
                )]
            }
            _ => Vec::new(),
        };

        out.extend(symbols.into_iter().map(|symbol| with_doc(symbol, doc.clone())));
    }

    /// Look up and consume the JSDoc attached at `start`. Returns `None` when
    /// the declaration is `@internal` and internals are excluded; an
    /// undocumented declaration yields an empty doc.
    fn take_doc(&mut self, start: u32) -> Option<ParsedJsDoc> {
        let Some(comment) = self.comments.get(&start).copied() else {
            return Some(ParsedJsDoc::default());
        };
        self.consumed.insert(comment.span.start);
        let doc = parse_jsdoc(slice(self.source, comment.content_span()));
        (self.include_internal || !doc.is_internal).then_some(doc)
    }

    fn function_symbol(&self, function: &Function<'_>, kind: SymbolKind) -> ExportedSymbol {
        let name = function
            .id
            .as_ref()
            .map(|id| id.name.to_string())
            .unwrap_or_else(|| "default".to_string());
        let mut symbol = ExportedSymbol::new(name, kind, self.lines.location(function.span.start));
        let head_end = function
            .body
            .as_ref()
            .map_or(function.span.end, |body| body.span.start);
        symbol.signature = self.text(function.span.start, head_end);
        symbol
    }

    fn class_symbol(&mut self, class: &Class<'_>, kind: SymbolKind) -> ExportedSymbol {
        let name = class
            .id
            .as_ref()
            .map(|id| id.name.to_string())
            .unwrap_or_else(|| "default".to_string());
        let mut symbol = ExportedSymbol::new(name, kind, self.lines.location(class.span.start));

        for element in class.body.body.iter() {
            let (key, kind, is_static, accessibility, span) = match element {
                ClassElement::MethodDefinition(method) => {
                    let kind = match method.kind {
                        MethodDefinitionKind::Constructor => MemberKind::Constructor,
                        MethodDefinitionKind::Method => MemberKind::Method,
                        MethodDefinitionKind::Get | MethodDefinitionKind::Set => {
                            MemberKind::Accessor
                        }
                    };
                    (&method.key, kind, method.r#static, method.accessibility, method.span)
                }
                ClassElement::PropertyDefinition(property) => (
                    &property.key,
                    MemberKind::Property,
                    property.r#static,
                    property.accessibility,
                    property.span,
                ),
                ClassElement::AccessorProperty(accessor) => (
                    &accessor.key,
                    MemberKind::Accessor,
                    accessor.r#static,
                    None,
                    accessor.span,
                ),
                _ => continue,
            };

            if matches!(accessibility, Some(TSAccessibility::Private)) {
                continue;
            }
            let name = match kind {
                MemberKind::Constructor => Some("constructor".to_string()),
                _ => member_name(key),
            };
            let Some(name) = name else {
                continue;
            };
            // a getter/setter pair documents one accessor
            if kind == MemberKind::Accessor
                && symbol
                    .members
                    .iter()
                    .any(|member| member.kind == MemberKind::Accessor && member.name == name)
            {
                continue;
            }
            if let Some(mut member) = self.member(name, kind, span) {
                member.is_static = is_static;
                symbol.members.push(member);
            }
        }

        symbol
    }

    fn interface_symbol(&mut self, interface: &TSInterfaceDeclaration<'_>) -> ExportedSymbol {
        let location = self.lines.location(interface.span.start);
        let mut symbol =
            ExportedSymbol::new(interface.id.name.to_string(), SymbolKind::Interface, location);

        for signature in interface.body.body.iter() {
            let (key, kind, span) = match signature {
                TSSignature::TSPropertySignature(property) => {
                    (&property.key, MemberKind::Property, property.span)
                }
                TSSignature::TSMethodSignature(method) => {
                    (&method.key, MemberKind::Method, method.span)
                }
                _ => continue,
            };
            let Some(name) = member_name(key) else {
                continue;
            };
            // overloads share a name
            if symbol.members.iter().any(|member| member.name == name) {
                continue;
            }
            if let Some(member) = self.member(name, kind, span) {
                symbol.members.push(member);
            }
        }

        symbol
    }

    fn member(&mut self, name: String, kind: MemberKind, span: Span) -> Option<MemberDoc> {
        let doc = self.take_doc(span.start)?;
        let mut member = MemberDoc::new(name, kind, self.lines.location(span.start));
        member.summary = doc.summary;
        member.deprecated = doc.deprecated;
        Some(member)
    }

    /// First unattached JSDoc block before the first export.
    fn module_description<'c>(
        &self,
        comments: impl IntoIterator<Item = &'c Comment>,
        first_export: Option<u32>,
    ) -> Option<String> {
        comments
            .into_iter()
            .filter(|comment| comment.is_jsdoc())
            .filter(|comment| !self.consumed.contains(&comment.span.start))
            .take_while(|comment| first_export.is_none_or(|limit| comment.span.start < limit))
            .map(|comment| parse_jsdoc(slice(self.source, comment.content_span())))
            .filter(|doc| self.include_internal || !doc.is_internal)
            .find_map(|doc| doc.summary)
    }

    /// Source text for a span with whitespace collapsed.
    fn text(&self, start: u32, end: u32) -> Option<String> {
        let text = self.source.get(start as usize..end as usize)?;
        let text = text.trim().trim_end_matches(';');
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        (!collapsed.is_empty()).then_some(collapsed)
    }
}

fn with_doc(mut symbol: ExportedSymbol, doc: ParsedJsDoc) -> ExportedSymbol {
    symbol.summary = doc.summary;
    symbol.parameters = doc.parameters;
    symbol.returns = doc.returns;
    symbol.deprecated = doc.deprecated;
    symbol.examples = doc.examples;
    symbol.tags = doc.tags;
    symbol
}

/// JSDoc comments keyed by the offset of the token they document. When several
/// blocks precede the same token the closest one wins.
fn jsdoc_by_attachment<'c>(
    comments: impl Iterator<Item = &'c Comment>,
) -> FxHashMap<u32, &'c Comment> {
    comments
        .filter(|comment| comment.is_jsdoc())
        .map(|comment| (comment.attached_to, comment))
        .collect()
}

fn binding_name(pattern: &BindingPattern<'_>) -> Option<String> {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => Some(ident.name.to_string()),
        _ => None,
    }
}

fn member_name(key: &PropertyKey<'_>) -> Option<String> {
    if matches!(key, PropertyKey::PrivateIdentifier(_)) {
        return None;
    }
    key.static_name().map(|name| name.to_string())
}

fn slice(source: &str, span: Span) -> &str {
    &source[span.start as usize..span.end as usize]
}

#[derive(Debug)]
struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .bytes()
                    .enumerate()
                    .filter(|(_, byte)| *byte == b'\n')
                    .map(|(index, _)| index as u32 + 1),
            )
            .collect();
        Self { line_starts }
    }

    fn location(&self, offset: u32) -> SourceLocation {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index.saturating_sub(1),
        };
        SourceLocation::new(line as u32 + 1, offset - self.line_starts[line] + 1)
    }
}
