//! Snippet definition errors

use crate::logging::{codes, Code};

pub type SnippetResult<T> = Result<T, SnippetError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnippetError {
    /// Snippet body failed to tokenize or parse
    #[error("Invalid snippet \"{key}\": {message}")]
    InvalidSnippet { key: String, message: String },

    /// Snippet expands to itself through its own body
    #[error("Snippet \"{key}\" refers to itself")]
    RecursiveSnippet { key: String },
}

impl SnippetError {
    pub fn invalid(key: &str, message: impl ToString) -> Self {
        Self::InvalidSnippet {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::InvalidSnippet { key, .. } | Self::RecursiveSnippet { key } => key,
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::InvalidSnippet { .. } => codes::snippets::INVALID_SNIPPET,
            Self::RecursiveSnippet { .. } => codes::snippets::RECURSIVE_SNIPPET,
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
}
