//! Token types for both abbreviation grammars
//!
//! Markup and stylesheet abbreviations are tokenized by different rules but
//! share the field token (`${1:name}`) and the [`TokenScanner`] cursor the
//! parsers walk tokens with. Every token carries its character span in the
//! abbreviation; tokens synthesized by later stages use a default span.

pub mod markup;
pub mod stylesheet;
pub mod token_stream;

use std::fmt;

pub use markup::{BracketContext, MarkupToken, OperatorKind, Repeater, RepeaterNumber};
pub use stylesheet::{ColorValue, NumberValue, StyleOperator, StyleToken};
pub use token_stream::TokenScanner;

pub use crate::utils::{Position, SourceMap, Span, Spanned};

/// `${1:placeholder}` tabstop, or `${name}` variable when `index` is absent
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub index: Option<usize>,
    pub name: String,
}

impl Field {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            name: name.into(),
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            index: None,
            name: name.into(),
        }
    }

    pub fn is_variable(&self) -> bool {
        self.index.is_none()
    }
}

/// TextMate-compatible form
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) if self.name.is_empty() => write!(f, "${{{}}}", index),
            Some(index) => write!(f, "${{{}:{}}}", index, self.name),
            None => write!(f, "${{{}}}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_display() {
        assert_eq!(Field::new(1, "name").to_string(), "${1:name}");
        assert_eq!(Field::new(2, "").to_string(), "${2}");
        assert_eq!(Field::variable("charset").to_string(), "${charset}");
        assert!(Field::variable("lang").is_variable());
    }
}
