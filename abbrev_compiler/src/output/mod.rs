//! Output formatters
//!
//! Markup trees are printed as HTML or one of the indentation-based
//! dialects (Haml, Slim, Pug); stylesheet properties go through [`css`].
//! Every formatter writes into an [`OutputStream`] and numbers tabstops
//! so that fields of different nodes never share an index.

pub mod comment;
pub mod css;
pub mod html;
pub mod indent;
pub mod stream;

pub use comment::CommentState;
pub use stream::OutputStream;

use crate::config::Config;
use crate::logging::codes;
use crate::syntax::ast::{Abbreviation, AbbreviationNode, CssProperty, ValueToken};
use crate::{log_debug, log_success};

/// Caret placed into empty elements and attribute values
pub fn caret() -> Vec<ValueToken> {
    vec![ValueToken::field(0, "")]
}

/// Formatter state for one walk over a markup tree
pub struct WalkState<'a> {
    pub out: OutputStream<'a>,
    pub config: &'a Config,
    /// Next free tabstop index
    pub field: usize,
    pub comment: CommentState,
}

impl<'a> WalkState<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            out: OutputStream::new(config),
            config,
            field: 1,
            comment: CommentState::new(&config.options.comment),
        }
    }

    /// Writes value tokens, shifting field indexes past those already used
    pub fn push_tokens(&mut self, tokens: &[ValueToken]) {
        let mut largest: Option<usize> = None;
        for token in tokens {
            match token {
                ValueToken::Text(text) => self.out.push_string(text),
                ValueToken::Field { index, name } => {
                    self.out.push_field(self.field + index, name);
                    largest = largest.max(Some(*index));
                }
            }
        }
        if let Some(largest) = largest {
            self.field += largest + 1;
        }
    }
}

/// Text-only node: no name and no attributes
pub fn is_snippet(node: Option<&AbbreviationNode>) -> bool {
    node.is_some_and(AbbreviationNode::is_snippet)
}

/// Prints a markup tree in the dialect named by `config.syntax`
pub fn stringify_markup(abbr: &Abbreviation, config: &Config) -> String {
    log_debug!("Formatting markup", "syntax" => &config.syntax, "top_level" => abbr.children.len());

    let result = match config.syntax.as_str() {
        "haml" => indent::haml(abbr, config),
        "slim" => indent::slim(abbr, config),
        "pug" => indent::pug(abbr, config),
        _ => html::html(abbr, config),
    };

    log_success!(codes::success::OUTPUT_COMPLETE, "Markup formatted",
        "syntax" => &config.syntax,
        "length" => result.len()
    );
    result
}

/// Prints resolved stylesheet properties
pub fn stringify_stylesheet(properties: &[CssProperty], config: &Config) -> String {
    log_debug!("Formatting stylesheet", "syntax" => &config.syntax, "properties" => properties.len());

    let result = css::css(properties, config);

    log_success!(codes::success::OUTPUT_COMPLETE, "Stylesheet formatted",
        "syntax" => &config.syntax,
        "length" => result.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve::resolve;
    use crate::config::{OutputHooks, PartialConfig, TabstopFields};
    use std::sync::Arc;

    #[test]
    fn test_field_numbering_advances() {
        let config = resolve(PartialConfig {
            hooks: OutputHooks {
                field: Some(Arc::new(TabstopFields)),
                text: None,
            },
            ..PartialConfig::default()
        })
        .unwrap();
        let mut state = WalkState::new(&config);

        state.push_tokens(&[ValueToken::field(0, "a"), ValueToken::text("-"), ValueToken::field(1, "")]);
        state.push_tokens(&caret());
        assert_eq!(state.out.value, "${1:a}-${2}${3}");
        assert_eq!(state.field, 4);
    }
}
