//! Lexical analysis of markup and stylesheet abbreviations
//!
//! Both tokenizers share the character [`scanner::Scanner`] and report
//! failures as [`ScannerError`]. The module-level functions below add the
//! input length guard and stage logging around them.

pub mod error;
pub mod markup;
pub mod scanner;
pub mod stylesheet;

use crate::config::constants::compile_time::lexical::MAX_ABBREVIATION_LENGTH;
use crate::logging::codes;
use crate::tokens::{MarkupToken, StyleToken};

pub use error::ScannerError;
pub use scanner::Scanner;

// ============================================================================
// MODULE API
// ============================================================================

/// Tokenizes a markup abbreviation (`ul>li*3`)
pub fn tokenize_markup(source: &str) -> Result<Vec<MarkupToken>, ScannerError> {
    check_length(source)?;
    crate::log_debug!("Tokenizing markup abbreviation", "length" => source.chars().count());

    match markup::tokenize(source) {
        Ok(tokens) => {
            crate::log_success!(codes::success::TOKENIZATION_COMPLETE,
                "Markup abbreviation tokenized",
                "tokens" => tokens.len()
            );
            Ok(tokens)
        }
        Err(err) => {
            log_scanner_error(&err);
            Err(err)
        }
    }
}

/// Tokenizes a stylesheet abbreviation; `is_value` reads a bare property value
pub fn tokenize_stylesheet(source: &str, is_value: bool) -> Result<Vec<StyleToken>, ScannerError> {
    check_length(source)?;
    crate::log_debug!("Tokenizing stylesheet abbreviation",
        "length" => source.chars().count(),
        "value_mode" => is_value
    );

    match stylesheet::tokenize(source, is_value) {
        Ok(tokens) => {
            crate::log_success!(codes::success::TOKENIZATION_COMPLETE,
                "Stylesheet abbreviation tokenized",
                "tokens" => tokens.len()
            );
            Ok(tokens)
        }
        Err(err) => {
            log_scanner_error(&err);
            Err(err)
        }
    }
}

fn check_length(source: &str) -> Result<(), ScannerError> {
    let length = source.chars().count();
    if length > MAX_ABBREVIATION_LENGTH {
        let err = ScannerError::AbbreviationTooLong { length };
        log_scanner_error(&err);
        return Err(err);
    }
    Ok(())
}

fn log_scanner_error(err: &ScannerError) {
    crate::log_error!(err.error_code(), &err.to_string(), span = err.span(),
        "input" => err.input()
    );
}

// ============================================================================
// MODULE INITIALIZATION AND VALIDATION
// ============================================================================

/// Checks that every lexical error code is registered with metadata
pub fn init_lexical_logging() -> Result<(), String> {
    let lexical_codes = [
        codes::lexical::UNEXPECTED_CHARACTER,
        codes::lexical::EXPECTING_BRACE,
        codes::lexical::UNEXPECTED_BRACKET,
        codes::lexical::ABBREVIATION_TOO_LONG,
    ];

    for code in &lexical_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_debug!("Lexical limits initialized",
        "max_abbreviation_length" => MAX_ABBREVIATION_LENGTH
    );

    Ok(())
}

/// Smoke test of both tokenizers, used by pipeline validation
pub fn validate_tokenization() -> Result<(), String> {
    let markup = markup::tokenize("ul>li.item$*2").map_err(|e| e.to_string())?;
    if markup.len() != 7 {
        return Err(format!("Markup tokenizer produced {} tokens, expected 7", markup.len()));
    }

    let styles = stylesheet::tokenize("m10-20", false).map_err(|e| e.to_string())?;
    if styles.len() != 4 {
        return Err(format!("Stylesheet tokenizer produced {} tokens, expected 4", styles.len()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_init_logging() {
        assert!(init_lexical_logging().is_ok());
    }

    #[test]
    fn test_validate_tokenization() {
        assert!(validate_tokenization().is_ok());
    }

    #[test]
    fn test_length_guard() {
        let long = "a".repeat(MAX_ABBREVIATION_LENGTH + 1);
        assert_matches!(
            tokenize_markup(&long),
            Err(ScannerError::AbbreviationTooLong { .. })
        );
        assert_matches!(
            tokenize_stylesheet(&long, false),
            Err(ScannerError::AbbreviationTooLong { .. })
        );
    }

    #[test]
    fn test_module_api_tokenizes() {
        assert_eq!(tokenize_markup("a+b").unwrap().len(), 3);
        assert_eq!(tokenize_stylesheet("p10", false).unwrap().len(), 2);
    }
}
