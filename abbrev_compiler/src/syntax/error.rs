//! Token-stream errors raised by both parsers

use crate::logging::{codes, Code};
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// ` at N` suffix when the offending token has a position
fn at(pos: &Option<usize>) -> String {
    pos.map(|p| format!(" at {}", p)).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// Tokens left over after the top-level statements
    #[error("Unexpected character{}", at(.pos))]
    UnexpectedCharacter { pos: Option<usize> },

    #[error("Unexpected \"{kind}\" token{}", at(.pos))]
    UnexpectedToken { kind: String, pos: Option<usize> },

    #[error("Unclosed quote{}", at(.pos))]
    UnclosedQuote { pos: Option<usize> },

    #[error("Expecting ]{}", at(.pos))]
    UnclosedAttributeSet { pos: Option<usize> },

    #[error("Unexpected token{}", at(.pos))]
    UnexpectedStylesheetToken { pos: Option<usize> },
}

impl SyntaxError {
    pub fn unexpected_token(kind: &str, pos: Option<usize>) -> Self {
        Self::UnexpectedToken {
            kind: kind.to_string(),
            pos,
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedCharacter { .. } => codes::syntax::UNEXPECTED_CHARACTER,
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::UnclosedQuote { .. } => codes::syntax::UNCLOSED_QUOTE,
            Self::UnclosedAttributeSet { .. } => codes::syntax::UNCLOSED_ATTRIBUTE_SET,
            Self::UnexpectedStylesheetToken { .. } => codes::syntax::UNEXPECTED_STYLESHEET_TOKEN,
        }
    }

    pub fn pos(&self) -> Option<usize> {
        match self {
            Self::UnexpectedCharacter { pos }
            | Self::UnexpectedToken { pos, .. }
            | Self::UnclosedQuote { pos }
            | Self::UnclosedAttributeSet { pos }
            | Self::UnexpectedStylesheetToken { pos } => *pos,
        }
    }

    pub fn span(&self) -> Option<Span> {
        self.pos().map(Span::point)
    }

    pub fn severity(&self) -> codes::Severity {
        codes::get_severity(self.error_code().as_str())
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}
