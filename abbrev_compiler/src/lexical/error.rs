//! Character-level scanning errors

use crate::config::constants::compile_time::lexical::MAX_ABBREVIATION_LENGTH;
use crate::logging::codes;
use crate::utils::{SourceMap, Span};
use thiserror::Error;

/// Error raised while turning abbreviation text into tokens
///
/// `pos` is a 0-based character offset into `input`; messages report it
/// 1-based, which is what editors display.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScannerError {
    #[error("Unexpected character at {}", .pos + 1)]
    UnexpectedCharacter { pos: usize, input: String },

    #[error("Expecting }} at {}", .pos + 1)]
    ExpectingBrace { pos: usize, input: String },

    #[error("Unexpected bracket at {}", .pos + 1)]
    UnexpectedBracket { pos: usize, input: String },

    #[error("Abbreviation too long: {length} characters (max {MAX_ABBREVIATION_LENGTH})")]
    AbbreviationTooLong { length: usize },
}

impl ScannerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ScannerError::UnexpectedCharacter { .. } => codes::lexical::UNEXPECTED_CHARACTER,
            ScannerError::ExpectingBrace { .. } => codes::lexical::EXPECTING_BRACE,
            ScannerError::UnexpectedBracket { .. } => codes::lexical::UNEXPECTED_BRACKET,
            ScannerError::AbbreviationTooLong { .. } => codes::lexical::ABBREVIATION_TOO_LONG,
        }
    }

    pub fn pos(&self) -> usize {
        match self {
            ScannerError::UnexpectedCharacter { pos, .. }
            | ScannerError::ExpectingBrace { pos, .. }
            | ScannerError::UnexpectedBracket { pos, .. } => *pos,
            ScannerError::AbbreviationTooLong { .. } => 0,
        }
    }

    pub fn input(&self) -> &str {
        match self {
            ScannerError::UnexpectedCharacter { input, .. }
            | ScannerError::ExpectingBrace { input, .. }
            | ScannerError::UnexpectedBracket { input, .. } => input,
            ScannerError::AbbreviationTooLong { .. } => "",
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            ScannerError::AbbreviationTooLong { .. } => None,
            _ => Some(Span::point(self.pos())),
        }
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

    /// Message followed by the input and a caret under the failing column
    ///
    /// ```text
    /// Unexpected character at 4
    /// div%
    /// ---^
    /// ```
    pub fn diagnostic(&self) -> String {
        match self {
            ScannerError::AbbreviationTooLong { .. } => self.to_string(),
            _ => SourceMap::new(self.input()).caret_diagnostic(&self.to_string(), self.pos()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_one_based() {
        let err = ScannerError::UnexpectedCharacter {
            pos: 3,
            input: "div%".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected character at 4");
        assert_eq!(err.error_code(), codes::lexical::UNEXPECTED_CHARACTER);
    }

    #[test]
    fn test_diagnostic_points_at_column() {
        let err = ScannerError::ExpectingBrace {
            pos: 5,
            input: "a[b=${1".to_string(),
        };
        assert_eq!(err.diagnostic(), "Expecting } at 6\na[b=${1\n-----^");
    }
}
