//! Stylesheet abbreviation parser
//!
//! `property (+ property)*`, where a property is an optional name followed
//! by comma-separated values. A literal directly followed by `(` is a
//! function call whose arguments are values themselves.

use super::ast::{CssProperty, CssValue, CssValueToken};
use super::error::{SyntaxError, SyntaxResult};
use crate::tokens::stylesheet::{StyleOperator, StyleToken, Token};
use crate::tokens::TokenScanner;
use crate::utils::Spanned;

type Scanner<'a> = TokenScanner<'a, Token>;

/// Parses stylesheet tokens; `value_mode` reads a bare value with no property name
pub fn parse(tokens: &[StyleToken], value_mode: bool) -> SyntaxResult<Vec<CssProperty>> {
    let mut scanner = Scanner::new(tokens);
    let mut result = Vec::new();

    while scanner.readable() {
        if let Some(property) = consume_property(&mut scanner, value_mode)? {
            result.push(property);
        } else if !scanner.consume(|t| t.is_operator(StyleOperator::Sibling)) {
            return Err(SyntaxError::UnexpectedStylesheetToken {
                pos: scanner.offset(),
            });
        }
    }

    Ok(result)
}

fn consume_property(scanner: &mut Scanner, value_mode: bool) -> SyntaxResult<Option<CssProperty>> {
    let mut name = None;
    let mut important = false;
    let mut value = Vec::new();

    if !value_mode && !is_function_start(scanner) {
        if let Some(Token::Literal(literal)) = scanner.peek().map(|t| &t.value) {
            scanner.pos += 1;
            name = Some(literal.clone());
            scanner.consume(is_value_delimiter);
        }
    }

    if value_mode {
        scanner.consume(Token::is_white_space);
    }

    while scanner.readable() {
        if scanner.consume(|t| t.is_operator(StyleOperator::Important)) {
            important = true;
        } else if let Some(fragment) = consume_value(scanner, value_mode)? {
            value.push(fragment);
        } else if !scanner.consume(|t| t.is_operator(StyleOperator::ArgumentDelimiter)) {
            break;
        }
    }

    if name.is_some() || !value.is_empty() || important {
        Ok(Some(CssProperty {
            name,
            value,
            important,
            snippet: None,
        }))
    } else {
        Ok(None)
    }
}

/// Value tokens up to the next comma; `-` and `:` between them are skipped
fn consume_value(scanner: &mut Scanner, in_argument: bool) -> SyntaxResult<Option<CssValue>> {
    let mut result = Vec::new();

    while let Some(token) = scanner.peek() {
        if token.value.is_value() {
            scanner.pos += 1;
            if let Token::Literal(name) = &token.value {
                if let Some(arguments) = consume_arguments(scanner)? {
                    result.push(Spanned::new(
                        CssValueToken::FunctionCall {
                            name: name.clone(),
                            arguments,
                        },
                        token.span,
                    ));
                    continue;
                }
            }
            if let Some(value) = value_token(&token.value) {
                result.push(Spanned::new(value, token.span));
            }
        } else if is_value_delimiter(&token.value) || (in_argument && token.value.is_white_space()) {
            scanner.pos += 1;
        } else {
            break;
        }
    }

    Ok((!result.is_empty()).then(|| CssValue::new(result)))
}

fn consume_arguments(scanner: &mut Scanner) -> SyntaxResult<Option<Vec<CssValue>>> {
    let start = scanner.pos;
    if !scanner.consume(|t| t.is_bracket(Some(true))) {
        return Ok(None);
    }

    let mut args = Vec::new();
    while scanner.readable() && !scanner.consume(|t| t.is_bracket(Some(false))) {
        if let Some(value) = consume_value(scanner, true)? {
            args.push(value);
        } else if !scanner.consume(Token::is_white_space)
            && !scanner.consume(|t| t.is_operator(StyleOperator::ArgumentDelimiter))
        {
            return Err(SyntaxError::UnexpectedStylesheetToken {
                pos: scanner.offset(),
            });
        }
    }

    scanner.start = start;
    Ok(Some(args))
}

fn value_token(token: &Token) -> Option<CssValueToken> {
    match token {
        Token::Literal(value) => Some(CssValueToken::Literal(value.clone())),
        Token::Number(n) => Some(CssValueToken::Number(n.clone())),
        Token::Color(c) => Some(CssValueToken::Color(c.clone())),
        Token::String { value, single } => Some(CssValueToken::String {
            value: value.clone(),
            single: *single,
        }),
        Token::CustomProperty(value) => Some(CssValueToken::CustomProperty(value.clone())),
        Token::Field(field) => Some(CssValueToken::Field(field.clone())),
        Token::Bracket { .. } | Token::Operator(_) | Token::WhiteSpace => None,
    }
}

fn is_value_delimiter(token: &Token) -> bool {
    token.is_operator(StyleOperator::PropertyDelimiter)
        || token.is_operator(StyleOperator::ValueDelimiter)
}

fn is_function_start(scanner: &Scanner) -> bool {
    matches!(
        (scanner.peek(), scanner.peek_ahead(1)),
        (Some(t1), Some(t2)) if t1.value.is_literal() && t2.value.is_bracket(None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::stylesheet::tokenize;
    use assert_matches::assert_matches;

    fn parse_str(source: &str) -> Vec<CssProperty> {
        parse(&tokenize(source, false).unwrap(), false).unwrap()
    }

    #[test]
    fn test_name_and_values() {
        let props = parse_str("m10-20");
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].name.as_deref(), Some("m"));
        assert_eq!(props[0].value.len(), 1);
        assert_eq!(props[0].value[0].value.len(), 2);
    }

    #[test]
    fn test_siblings_and_important() {
        let props = parse_str("p10+m5!");
        assert_eq!(props.len(), 2);
        assert!(!props[0].important);
        assert!(props[1].important);
    }

    #[test]
    fn test_comma_separates_values() {
        let props = parse_str("ff:a,b");
        assert_eq!(props[0].name.as_deref(), Some("ff"));
        assert_eq!(props[0].value.len(), 2);
    }

    #[test]
    fn test_function_call() {
        let props = parse_str("bg:lg(red, blue)");
        let token = &props[0].value[0].value[0].value;
        assert_matches!(token, CssValueToken::FunctionCall { name, arguments }
            if name == "lg" && arguments.len() == 2);
    }

    #[test]
    fn test_function_without_property() {
        let props = parse_str("lg(red)");
        assert!(props[0].name.is_none());
        assert_matches!(&props[0].value[0].value[0].value, CssValueToken::FunctionCall { .. });
    }

    #[test]
    fn test_value_mode() {
        let tokens = tokenize("auto 10", true).unwrap();
        let props = parse(&tokens, true).unwrap();
        assert!(props[0].name.is_none());
        assert_eq!(props[0].value[0].value.len(), 2);
    }

    #[test]
    fn test_unexpected_token() {
        let tokens = tokenize("p )", false);
        assert!(tokens.is_err());

        let tokens = tokenize("p 1", false).unwrap();
        let err = parse(&tokens, false).unwrap_err();
        assert_eq!(err, SyntaxError::UnexpectedStylesheetToken { pos: Some(1) });
        assert_eq!(err.to_string(), "Unexpected token at 1");
    }
}
