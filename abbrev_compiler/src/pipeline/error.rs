use crate::config::ConfigError;
use crate::lexical::ScannerError;
use crate::logging::{codes, Code};
use crate::syntax::SyntaxError;
use crate::utils::SourceMap;

/// Expansion errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] ScannerError),

    #[error("Syntax analysis failed: {0}")]
    SyntaxAnalysis(#[from] SyntaxError),

    #[error("Configuration failed: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::LexicalAnalysis(err) => err.error_code(),
            Self::SyntaxAnalysis(err) => err.error_code(),
            Self::Configuration(err) => err.error_code(),
            Self::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    /// Message with the abbreviation and a caret under the failing column
    ///
    /// Errors without a position print their message only.
    pub fn diagnostic(&self, abbreviation: &str) -> String {
        match self {
            Self::LexicalAnalysis(err) => err.diagnostic(),
            Self::SyntaxAnalysis(err) => match err.pos() {
                Some(pos) => SourceMap::new(abbreviation).caret_diagnostic(&err.to_string(), pos),
                None => err.to_string(),
            },
            _ => self.to_string(),
        }
    }
}
