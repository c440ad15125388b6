//! Output buffer shared by every formatter
//!
//! Tracks `offset`, `line` and `column` of the text written so far; the
//! counters are in chars.

use crate::config::{AttributeQuotes, Config, OutputHooks, OutputOptions, SelfClosingStyle};
use crate::syntax::ast::{AbbreviationNode, Attribute, AttributeValueType, ValueToken};

pub const EXPRESSION_START: &str = "{";
pub const EXPRESSION_END: &str = "}";

#[derive(Debug)]
pub struct OutputStream<'a> {
    options: &'a OutputOptions,
    hooks: &'a OutputHooks,
    pub value: String,
    pub level: usize,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl<'a> OutputStream<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self::with_level(config, 0)
    }

    pub fn with_level(config: &'a Config, level: usize) -> Self {
        Self {
            options: &config.options.output,
            hooks: &config.hooks,
            value: String::new(),
            level,
            offset: 0,
            line: 0,
            column: 0,
        }
    }

    /// Text without newline handling, passed through the text hook
    pub fn push(&mut self, text: &str) {
        let processed = self.hooks.text(text);
        self.push_raw(&processed);
    }

    /// Text that may contain newlines; each line break re-indents
    pub fn push_string(&mut self, value: &str) {
        let lines = split_lines(value);
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.into_iter().enumerate() {
            self.push(line);
            if i != last {
                let level = self.level;
                self.push_newline(level);
            }
        }
    }

    /// Line break followed by base indent and `indent` levels
    pub fn push_newline(&mut self, indent: usize) {
        let base_indent = self.options.base_indent.clone();
        let text = format!("{}{}", self.options.newline, base_indent);
        self.push(&text);
        self.line += 1;
        self.column = base_indent.chars().count();
        if indent > 0 {
            self.push_indent(indent);
        }
    }

    pub fn push_indent(&mut self, size: usize) {
        let indent = self.options.indent.repeat(size);
        self.push(&indent);
    }

    /// Tabstop rendered by the field hook; skips the text hook
    pub fn push_field(&mut self, index: usize, placeholder: &str) {
        let field = self.hooks.field(index, placeholder);
        self.push_raw(&field);
    }

    fn push_raw(&mut self, text: &str) {
        let len = text.chars().count();
        self.value.push_str(text);
        self.offset += len;
        self.column += len;
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

/// Splits on `\r\n`, `\r` and `\n`
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    lines.push(&text[start..]);
    lines
}

pub fn has_newline(token: &ValueToken) -> bool {
    matches!(token, ValueToken::Text(text) if text.contains(['\r', '\n']))
}

// ============================================================================
// NAMING AND ATTRIBUTE HELPERS
// ============================================================================

pub fn tag_name(name: &str, config: &Config) -> String {
    config.options.output.tag_case.apply(name)
}

pub fn attr_name(name: &str, config: &Config) -> String {
    config.options.output.attribute_case.apply(name)
}

pub fn attr_quote(attr: &Attribute, config: &Config, is_open: bool) -> &'static str {
    if attr.value_type == AttributeValueType::Expression {
        return if is_open { EXPRESSION_START } else { EXPRESSION_END };
    }
    match config.options.output.attribute_quotes {
        AttributeQuotes::Single => "'",
        AttributeQuotes::Double => "\"",
    }
}

pub fn is_boolean_attribute(attr: &Attribute, config: &Config) -> bool {
    if attr.boolean {
        return true;
    }
    let name = attr.name.as_deref().unwrap_or_default().to_lowercase();
    config
        .options
        .output
        .boolean_attributes
        .iter()
        .any(|a| *a == name)
}

pub fn self_close(config: &Config) -> &'static str {
    config.options.output.self_closing_style.marker()
}

pub fn is_xml_style(config: &Config) -> bool {
    config.options.output.self_closing_style != SelfClosingStyle::Html
}

/// Inline-level element, or a text-only node
pub fn is_inline(node: &AbbreviationNode, config: &Config) -> bool {
    match &node.name {
        Some(name) => config.options.is_inline(name),
        None => node.value.is_some() && node.attributes.is_none(),
    }
}

/// Implied attributes are dropped unless they received a value
pub fn should_output_attribute(attr: &Attribute) -> bool {
    !attr.implied
        || attr.value_type != AttributeValueType::Raw
        || attr.value.as_ref().is_some_and(|v| !v.is_empty())
}
