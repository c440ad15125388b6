//! Syntax analysis - token lists to parse trees
//!
//! The markup parser produces a [`TokenGroup`] tree that still contains
//! repeaters and groups; the stylesheet parser produces unresolved
//! [`CssProperty`] nodes.

pub mod ast;
pub mod error;
pub mod markup;
pub mod stylesheet;

pub use ast::{
    Abbreviation, AbbreviationNode, Attribute, AttributeValueType, CssProperty, CssToken,
    CssValue, CssValueToken, TokenAttribute, TokenElement, TokenGroup, TokenStatement,
    ValueToken,
};
pub use error::{SyntaxError, SyntaxResult};
pub use markup::ParserOptions;

use crate::logging::codes;
use crate::tokens::{MarkupToken, StyleToken};
use crate::{log_debug, log_error, log_success};

/// Parses markup tokens with stage logging
pub fn parse_markup_tokens(
    tokens: &[MarkupToken],
    options: ParserOptions,
) -> SyntaxResult<TokenGroup> {
    log_debug!("Starting markup parse", "tokens" => tokens.len(), "jsx" => options.jsx);

    let result = markup::parse(tokens, options);
    match &result {
        Ok(tree) => {
            log_success!(codes::success::PARSE_COMPLETE, "Markup abbreviation parsed",
                "top_level" => tree.elements.len()
            );
        }
        Err(error) => {
            log_error!(error.error_code(), "Markup parse failed", span = error.span(),
                "error" => error
            );
        }
    }
    result
}

/// Parses stylesheet tokens with stage logging
pub fn parse_stylesheet_tokens(
    tokens: &[StyleToken],
    value_mode: bool,
) -> SyntaxResult<Vec<CssProperty>> {
    log_debug!("Starting stylesheet parse", "tokens" => tokens.len(), "value_mode" => value_mode);

    let result = stylesheet::parse(tokens, value_mode);
    match &result {
        Ok(properties) => {
            log_success!(codes::success::PARSE_COMPLETE, "Stylesheet abbreviation parsed",
                "properties" => properties.len()
            );
        }
        Err(error) => {
            log_error!(error.error_code(), "Stylesheet parse failed", span = error.span(),
                "error" => error
            );
        }
    }
    result
}

/// Checks that every syntax error code is registered with metadata
pub fn init_syntax_logging() -> Result<(), String> {
    let syntax_codes = [
        codes::syntax::UNEXPECTED_CHARACTER,
        codes::syntax::UNEXPECTED_TOKEN,
        codes::syntax::UNCLOSED_QUOTE,
        codes::syntax::UNCLOSED_ATTRIBUTE_SET,
        codes::syntax::UNEXPECTED_STYLESHEET_TOKEN,
    ];

    for code in &syntax_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Syntax error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging() {
        assert!(init_syntax_logging().is_ok());
    }

    #[test]
    fn test_logged_parsers() {
        let tokens = crate::lexical::markup::tokenize("ul>li").unwrap();
        let tree = parse_markup_tokens(&tokens, ParserOptions::default()).unwrap();
        assert_eq!(tree.elements.len(), 1);

        let tokens = crate::lexical::stylesheet::tokenize("p+m", false).unwrap();
        let props = parse_stylesheet_tokens(&tokens, false).unwrap();
        assert_eq!(props.len(), 2);
    }
}
