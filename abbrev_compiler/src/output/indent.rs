//! Indentation-based dialects: Haml, Slim and Pug
//!
//! All three share one walker and differ only in the punctuation around
//! names, attributes and multi-line text.

use super::stream::{
    attr_name, attr_quote, is_boolean_attribute, should_output_attribute, split_lines,
};
use super::{caret, WalkState};
use crate::config::{Config, SelfClosingStyle};
use crate::syntax::ast::{Abbreviation, AbbreviationNode, Attribute, ValueToken};

/// Punctuation of one dialect
#[derive(Debug, Clone, Default)]
pub struct IndentFormat {
    pub before_name: &'static str,
    pub after_name: &'static str,
    pub before_attribute: &'static str,
    pub after_attribute: &'static str,
    pub glue_attribute: &'static str,
    pub boolean_value: &'static str,
    pub before_text_line: &'static str,
    pub after_text_line: &'static str,
    pub self_close: &'static str,
}

pub fn haml(abbr: &Abbreviation, config: &Config) -> String {
    let format = IndentFormat {
        before_name: "%",
        before_attribute: "(",
        after_attribute: ")",
        glue_attribute: " ",
        after_text_line: " |",
        boolean_value: "true",
        self_close: "/",
        ..IndentFormat::default()
    };
    indent_format(abbr, config, &format)
}

pub fn slim(abbr: &Abbreviation, config: &Config) -> String {
    let format = IndentFormat {
        before_attribute: " ",
        glue_attribute: " ",
        before_text_line: "| ",
        self_close: "/",
        ..IndentFormat::default()
    };
    indent_format(abbr, config, &format)
}

pub fn pug(abbr: &Abbreviation, config: &Config) -> String {
    let xml = config.options.output.self_closing_style == SelfClosingStyle::Xml;
    let format = IndentFormat {
        before_attribute: "(",
        after_attribute: ")",
        glue_attribute: ", ",
        before_text_line: "| ",
        self_close: if xml { "/" } else { "" },
        ..IndentFormat::default()
    };
    indent_format(abbr, config, &format)
}

pub fn indent_format(abbr: &Abbreviation, config: &Config, format: &IndentFormat) -> String {
    let mut walker = IndentWalker {
        state: WalkState::new(config),
        format,
    };
    for (index, node) in abbr.children.iter().enumerate() {
        walker.element(node, index, None);
    }
    walker.state.out.into_string()
}

struct IndentWalker<'a> {
    state: WalkState<'a>,
    format: &'a IndentFormat,
}

impl IndentWalker<'_> {
    fn element(&mut self, node: &AbbreviationNode, index: usize, parent: Option<&AbbreviationNode>) {
        let (primary, secondary): (Vec<&Attribute>, Vec<&Attribute>) = node
            .attributes
            .iter()
            .flatten()
            .partition(|attr| is_primary_attribute(attr));

        let level = usize::from(parent.is_some());
        self.state.out.level += level;

        // First top-level node and text nodes stay on the current line
        if !(parent.is_none() && index == 0) && !node.is_snippet() {
            let level = self.state.out.level;
            self.state.out.push_newline(level);
        }

        if let Some(name) = &node.name {
            if name != "div" || primary.is_empty() {
                let text = format!("{}{}{}", self.format.before_name, name, self.format.after_name);
                self.state.out.push_string(&text);
            }
        }

        self.push_primary_attributes(&primary);
        let secondary: Vec<&Attribute> = secondary
            .into_iter()
            .filter(|attr| should_output_attribute(attr))
            .collect();
        self.push_secondary_attributes(&secondary);

        if node.self_closing && node.value.is_none() && node.children.is_empty() {
            if !self.format.self_close.is_empty() {
                self.state.out.push_string(self.format.self_close);
            }
        } else {
            self.push_value(node);
            for (i, child) in node.children.iter().enumerate() {
                self.element(child, i, Some(node));
            }
        }

        self.state.out.level -= level;
    }

    /// `#id` and `.class` shorthand; whitespace inside classes becomes dots
    fn push_primary_attributes(&mut self, attrs: &[&Attribute]) {
        for attr in attrs {
            let Some(value) = &attr.value else {
                continue;
            };
            if attr.is_named("class") {
                self.state.out.push_string(".");
                let tokens: Vec<ValueToken> = value
                    .iter()
                    .map(|token| match token {
                        ValueToken::Text(text) => ValueToken::Text(dot_separated(text)),
                        field => field.clone(),
                    })
                    .collect();
                self.state.push_tokens(&tokens);
            } else {
                self.state.out.push_string("#");
                self.state.push_tokens(value);
            }
        }
    }

    fn push_secondary_attributes(&mut self, attrs: &[&Attribute]) {
        if attrs.is_empty() {
            return;
        }
        let config = self.state.config;
        let format = self.format;

        if !format.before_attribute.is_empty() {
            self.state.out.push_string(format.before_attribute);
        }
        for (i, attr) in attrs.iter().enumerate() {
            let name = attr_name(attr.name.as_deref().unwrap_or_default(), config);
            self.state.out.push_string(&name);

            if is_boolean_attribute(attr, config) && attr.value.is_none() {
                if !config.options.output.compact_boolean && !format.boolean_value.is_empty() {
                    self.state.out.push_string(&format!("={}", format.boolean_value));
                }
            } else {
                self.state.out.push_string(&format!("={}", attr_quote(attr, config, true)));
                let value = attr.value.clone().unwrap_or_else(caret);
                self.state.push_tokens(&value);
                self.state.out.push_string(attr_quote(attr, config, false));
            }

            if i + 1 != attrs.len() && !format.glue_attribute.is_empty() {
                self.state.out.push_string(format.glue_attribute);
            }
        }
        if !format.after_attribute.is_empty() {
            self.state.out.push_string(format.after_attribute);
        }
    }

    /// Value or caret of a leaf node; multi-line values become text blocks
    fn push_value(&mut self, node: &AbbreviationNode) {
        if node.value.is_none() && !node.children.is_empty() {
            return;
        }
        let value = node.value.clone().unwrap_or_else(caret);
        let lines = split_token_lines(&value);
        let format = self.format;

        if lines.len() == 1 {
            if node.name.is_some() || node.attributes.is_some() {
                self.state.out.push(" ");
            }
            self.state.push_tokens(&value);
            return;
        }

        let lengths: Vec<usize> = lines.iter().map(|line| value_length(line)).collect();
        let max_length = lengths.iter().copied().max().unwrap_or(0);

        self.state.out.level += 1;
        for (line, length) in lines.iter().zip(lengths) {
            let level = self.state.out.level;
            self.state.out.push_newline(level);
            if !format.before_text_line.is_empty() {
                self.state.out.push(format.before_text_line);
            }
            self.state.push_tokens(line);
            if !format.after_text_line.is_empty() {
                self.state.out.push(&" ".repeat(max_length - length));
                self.state.out.push(format.after_text_line);
            }
        }
        self.state.out.level -= 1;
    }
}

/// Every whitespace run becomes a single dot
fn dot_separated(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                result.push('.');
            }
            in_space = true;
        } else {
            result.push(ch);
            in_space = false;
        }
    }
    result
}

fn is_primary_attribute(attr: &Attribute) -> bool {
    attr.is_named("class") || attr.is_named("id")
}

/// Token lists, one per output line
fn split_token_lines(tokens: &[ValueToken]) -> Vec<Vec<ValueToken>> {
    let mut result = Vec::new();
    let mut line: Vec<ValueToken> = Vec::new();

    for token in tokens {
        match token {
            ValueToken::Text(text) => {
                let mut parts = split_lines(text).into_iter();
                line.push(ValueToken::text(parts.next().unwrap_or_default()));
                for part in parts {
                    result.push(std::mem::take(&mut line));
                    line.push(ValueToken::text(part));
                }
            }
            field => line.push(field.clone()),
        }
    }

    if !line.is_empty() {
        result.push(line);
    }
    result
}

fn value_length(tokens: &[ValueToken]) -> usize {
    tokens
        .iter()
        .map(|token| match token {
            ValueToken::Text(text) => text.chars().count(),
            ValueToken::Field { name, .. } => name.chars().count(),
        })
        .sum()
}
