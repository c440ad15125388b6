//! Comment templates around elements
//!
//! A template is plain text with `[NAME]` placeholders. Text inside the
//! brackets around the name (`[ #ID]`) is printed only when the element
//! has a value for that attribute.

use super::WalkState;
use crate::config::CommentOptions;
use crate::syntax::ast::{AbbreviationNode, ValueToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    Text(String),
    Placeholder {
        before: String,
        name: String,
        after: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct CommentState {
    pub enabled: bool,
    pub trigger: Vec<String>,
    pub before: Option<Vec<TemplateToken>>,
    pub after: Option<Vec<TemplateToken>>,
}

impl CommentState {
    pub fn new(options: &CommentOptions) -> Self {
        let parse = |text: &str| (!text.is_empty()).then(|| template(text));
        Self {
            enabled: options.enabled,
            trigger: options.trigger.clone(),
            before: parse(&options.before),
            after: parse(&options.after),
        }
    }

    fn should_comment(&self, node: &AbbreviationNode) -> bool {
        if !self.enabled || self.trigger.is_empty() || node.name.is_none() {
            return false;
        }
        node.attributes
            .iter()
            .flatten()
            .filter_map(|attr| attr.name.as_ref())
            .any(|name| self.trigger.contains(name))
    }
}

/// Splits a template into text and placeholders
pub fn template(text: &str) -> Vec<TemplateToken> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut offset = 0;
    let mut pos = 0;

    while pos < chars.len() {
        let start = pos;
        match consume_placeholder(&chars, &mut pos) {
            Some(placeholder) => {
                if offset != start {
                    tokens.push(TemplateToken::Text(chars[offset..start].iter().collect()));
                }
                tokens.push(placeholder);
                offset = pos;
            }
            None => pos += 1,
        }
    }

    if offset != pos {
        tokens.push(TemplateToken::Text(chars[offset..].iter().collect()));
    }
    tokens
}

fn is_token_start(ch: char) -> bool {
    ch.is_ascii_uppercase()
}

fn is_token(ch: char) -> bool {
    is_token_start(ch) || ch.is_ascii_digit() || ch == '_' || ch == '-'
}

/// `[before NAME after]` at `pos`; `pos` moves past it only on success
fn consume_placeholder(chars: &[char], pos: &mut usize) -> Option<TemplateToken> {
    if chars.get(*pos) != Some(&'[') {
        return None;
    }

    let start = *pos + 1;
    let mut cursor = start;
    let mut name_pos = start;
    let mut after_pos = start;
    let mut stack = 1;
    let slice = |from: usize, to: usize| chars[from..to].iter().collect::<String>();

    while cursor < chars.len() {
        let ch = chars[cursor];
        if is_token_start(ch) {
            name_pos = cursor;
            while chars.get(cursor).copied().is_some_and(is_token) {
                cursor += 1;
            }
            after_pos = cursor;
        } else {
            if ch == '[' {
                stack += 1;
            } else if ch == ']' {
                stack -= 1;
                if stack == 0 {
                    *pos = cursor + 1;
                    return Some(TemplateToken::Placeholder {
                        before: slice(start, name_pos),
                        name: slice(name_pos, after_pos),
                        after: slice(after_pos, cursor),
                    });
                }
            }
            cursor += 1;
        }
    }
    None
}

pub fn comment_node_before(node: &AbbreviationNode, state: &mut WalkState) {
    let Some(tokens) = state.comment.before.clone() else {
        return;
    };
    if state.comment.should_comment(node) {
        output(node, &tokens, state);
    }
}

pub fn comment_node_after(node: &AbbreviationNode, state: &mut WalkState) {
    let Some(tokens) = state.comment.after.clone() else {
        return;
    };
    if state.comment.should_comment(node) {
        output(node, &tokens, state);
    }
}

fn output(node: &AbbreviationNode, tokens: &[TemplateToken], state: &mut WalkState) {
    let lookup = |name: &str| -> Option<&Vec<ValueToken>> {
        node.attributes
            .iter()
            .flatten()
            .rev()
            .filter(|attr| attr.value.is_some())
            .find(|attr| attr.name.as_deref().is_some_and(|n| n.to_uppercase() == name))
            .and_then(|attr| attr.value.as_ref())
    };

    for token in tokens {
        match token {
            TemplateToken::Text(text) => state.out.push_string(text),
            TemplateToken::Placeholder {
                before,
                name,
                after,
            } => {
                if let Some(value) = lookup(name) {
                    state.out.push_string(before);
                    state.push_tokens(value);
                    state.out.push_string(after);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_tokens() {
        let tokens = template("\n<!-- /[#ID][.CLASS] -->");
        assert_eq!(
            tokens,
            vec![
                TemplateToken::Text("\n<!-- /".into()),
                TemplateToken::Placeholder {
                    before: "#".into(),
                    name: "ID".into(),
                    after: String::new(),
                },
                TemplateToken::Placeholder {
                    before: ".".into(),
                    name: "CLASS".into(),
                    after: String::new(),
                },
                TemplateToken::Text(" -->".into()),
            ]
        );
    }

    #[test]
    fn test_unclosed_bracket_is_text() {
        assert_eq!(template("a[ID"), vec![TemplateToken::Text("a[ID".into())]);
    }
}
