//! JSDoc comment parsing.
//!
//! Comments are split into blocks first: the leading summary block and one
//! block per `@tag`, where a tag's payload runs until the next line that starts
//! with `@`. Each block is then interpreted on its own.

use crate::model::{JsDocTag, ParameterDoc};

/// Structured representation of a parsed JSDoc comment.
#[derive(Debug, Default, Clone)]
pub struct ParsedJsDoc {
    /// Summary text before any tags.
    pub summary: Option<String>,
    /// Parameter information derived from `@param` tags.
    pub parameters: Vec<ParameterDoc>,
    /// Return value description from `@return` / `@returns`.
    pub returns: Option<String>,
    /// Deprecated message from `@deprecated`.
    pub deprecated: Option<String>,
    /// Example snippets collected from `@example`.
    pub examples: Vec<String>,
    /// Tags that were not converted into typed fields.
    pub tags: Vec<JsDocTag>,
    /// Whether the comment contained `@internal`.
    pub is_internal: bool,
}

impl ParsedJsDoc {
    /// Returns `true` if the comment does not contain any meaningful data.
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.parameters.is_empty()
            && self.returns.is_none()
            && self.deprecated.is_none()
            && self.examples.is_empty()
            && self.tags.is_empty()
    }
}

struct TagBlock<'a> {
    name: &'a str,
    lines: Vec<&'a str>,
}

impl TagBlock<'_> {
    /// Payload with lines joined by spaces, for prose tags.
    fn prose(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Payload with line structure preserved, for code tags.
    fn verbatim(&self) -> String {
        let mut lines = self.lines.clone();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        let start = lines
            .iter()
            .position(|line| !line.trim().is_empty())
            .unwrap_or(lines.len());
        lines[start..].join("\n")
    }
}

/// Parse a JSDoc block (without the `/**` and `*/` delimiters).
pub fn parse_jsdoc(raw: &str) -> ParsedJsDoc {
    let lines = strip_decoration(raw);
    let (summary_lines, blocks) = split_blocks(&lines);

    let mut doc = ParsedJsDoc {
        summary: join_paragraph(&summary_lines),
        ..ParsedJsDoc::default()
    };

    for block in blocks {
        match block.name {
            "param" | "arg" | "argument" => {
                if let Some(parameter) = parse_param(&block.prose()) {
                    doc.parameters.push(parameter);
                }
            }
            "returns" | "return" => {
                let (type_hint, rest) = split_type(&block.prose());
                let value = match (type_hint, rest) {
                    (Some(ty), Some(rest)) => format!("{ty} {rest}"),
                    (Some(ty), None) => ty,
                    (None, Some(rest)) => rest,
                    (None, None) => continue,
                };
                doc.returns = Some(value);
            }
            "deprecated" => {
                let message = block.prose();
                doc.deprecated = Some(if message.is_empty() {
                    "Deprecated".to_string()
                } else {
                    message
                });
            }
            "example" => {
                let example = block.verbatim();
                if !example.trim().is_empty() {
                    doc.examples.push(example);
                }
            }
            "internal" => doc.is_internal = true,
            other => {
                let mut tag = JsDocTag::new(other);
                let (type_hint, rest) = split_type(&block.prose());
                tag.type_hint = type_hint;
                tag.description = rest;
                doc.tags.push(tag);
            }
        }
    }

    doc
}

/// Remove leading whitespace and the `*` gutter from every line. Indentation
/// after the gutter is kept so `@example` code stays readable.
fn strip_decoration(raw: &str) -> Vec<&str> {
    raw.lines()
        .map(|line| {
            let line = line.trim_start();
            match line.strip_prefix('*') {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest).trim_end(),
                None => line.trim_end(),
            }
        })
        .collect()
}

fn split_blocks<'a>(lines: &[&'a str]) -> (Vec<&'a str>, Vec<TagBlock<'a>>) {
    let mut summary = Vec::new();
    let mut blocks: Vec<TagBlock<'a>> = Vec::new();

    for &line in lines {
        if let Some(rest) = line.trim_start().strip_prefix('@') {
            let (name, payload) = match rest.split_once(char::is_whitespace) {
                Some((name, payload)) => (name, payload),
                None => (rest, ""),
            };
            blocks.push(TagBlock {
                name,
                lines: vec![payload],
            });
        } else if let Some(block) = blocks.last_mut() {
            block.lines.push(line);
        } else {
            summary.push(line);
        }
    }

    (summary, blocks)
}

fn join_paragraph(lines: &[&str]) -> Option<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in lines.iter().map(|line| line.trim()) {
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    (!paragraphs.is_empty()).then(|| paragraphs.join("\n\n"))
}

fn parse_param(payload: &str) -> Option<ParameterDoc> {
    let (type_hint, rest) = split_type(payload);
    let rest = rest?;
    let (name, description) = match rest.split_once(char::is_whitespace) {
        Some((name, description)) => (name, Some(description)),
        None => (rest.as_str(), None),
    };

    // `[name=default]` marks an optional parameter
    let name = name.trim_matches(|c| c == '[' || c == ']');
    let name = name.split('=').next().unwrap_or(name).trim();
    if name.is_empty() {
        return None;
    }

    let mut parameter = ParameterDoc::new(name);
    parameter.type_hint = type_hint;
    parameter.description = description
        .map(|text| text.trim().trim_start_matches("- ").trim().to_string())
        .filter(|text| !text.is_empty());
    Some(parameter)
}

/// Split a leading `{Type}` from the rest of a tag payload. Braces nest, so
/// `{Record<string, {a: number}>}` is read as a single type.
fn split_type(payload: &str) -> (Option<String>, Option<String>) {
    let trimmed = payload.trim();
    let non_empty = |text: &str| {
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    };

    if !trimmed.starts_with('{') {
        return (None, non_empty(trimmed));
    }

    let mut depth = 0usize;
    for (index, ch) in trimmed.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let ty = non_empty(&trimmed[1..index]);
                    let rest = non_empty(&trimmed[index + 1..]);
                    return (ty, rest);
                }
            }
            _ => {}
        }
    }

    (None, non_empty(trimmed))
}
