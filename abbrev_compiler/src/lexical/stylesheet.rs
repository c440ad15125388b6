//! Stylesheet abbreviation tokenizer
//!
//! Outside of parentheses literals are read in "short" form (letters only)
//! so that `p10` splits into a property literal and a number. Inside
//! function arguments, and in value mode, literals may contain digits and
//! dashes.

use super::error::ScannerError;
use super::scanner::{
    is_alpha_numeric_word, is_alpha_word, is_number, is_quote, is_space, Scanner,
};
use crate::tokens::stylesheet::{ColorValue, NumberValue, StyleOperator, StyleToken, Token};
use crate::utils::{Span, Spanned};

/// Splits a stylesheet abbreviation into tokens
///
/// `is_value` reads the whole input as a property value (`@@value` scope).
pub fn tokenize(source: &str, is_value: bool) -> Result<Vec<StyleToken>, ScannerError> {
    let mut scanner = Scanner::new(source);
    let mut brackets: i32 = 0;
    let mut tokens: Vec<StyleToken> = Vec::new();

    while !scanner.eof() {
        let Some(token) = next_token(&mut scanner, brackets == 0 && !is_value)? else {
            return Err(scanner.unexpected_character());
        };

        if let Token::Bracket { open } = token.value {
            if brackets == 0 && open {
                merge_tokens(&scanner, &mut tokens);
            }
            brackets += if open { 1 } else { -1 };
            if brackets < 0 {
                return Err(ScannerError::UnexpectedBracket {
                    pos: token.span.start.offset,
                    input: scanner.source(),
                });
            }
        }

        // A dash right after a unitless number or a color separates values
        let dash_follows = should_consume_dash_after(&token.value);
        tokens.push(token);
        if dash_follows {
            let start = scanner.pos;
            if let Some(op) = operator(&mut scanner) {
                tokens.push(spanned(op, start, scanner.pos));
            }
        }
    }

    Ok(tokens)
}

fn next_token(scanner: &mut Scanner, short: bool) -> Result<Option<StyleToken>, ScannerError> {
    let start = scanner.pos;

    if let Some(field) = scanner.consume_field()? {
        return Ok(Some(spanned(Token::Field(field), start, scanner.pos)));
    }

    let token = custom_property(scanner)
        .or_else(|| number_value(scanner))
        .or_else(|| color_value(scanner))
        .or_else(|| string_value(scanner))
        .or_else(|| bracket(scanner))
        .or_else(|| operator(scanner))
        .or_else(|| white_space(scanner))
        .or_else(|| literal(scanner, short));

    Ok(token.map(|token| spanned(token, start, scanner.pos)))
}

fn spanned(token: Token, start: usize, end: usize) -> StyleToken {
    Spanned::new(token, Span::from_offsets(start, end))
}

fn should_consume_dash_after(token: &Token) -> bool {
    match token {
        Token::Color(_) => true,
        Token::Number(n) => n.unit.is_empty(),
        _ => false,
    }
}

/// Joins trailing literal and number tokens into one literal
///
/// Called before an opening bracket so that `scale3d(` becomes a single
/// function name instead of `scale` and `3d`.
fn merge_tokens(scanner: &Scanner, tokens: &mut Vec<StyleToken>) {
    let mut start = 0;
    let mut end = 0;

    while let Some(token) = tokens.last() {
        if !matches!(token.value, Token::Literal(_) | Token::Number(_)) {
            break;
        }
        start = token.span.start.offset;
        if end == 0 {
            end = token.span.end.offset;
        }
        tokens.pop();
    }

    if start != end {
        tokens.push(spanned(
            Token::Literal(scanner.substring(start, end)),
            start,
            end,
        ));
    }
}

// ============================================================================
// PRODUCTIONS
// ============================================================================

/// `--name`
fn custom_property(scanner: &mut Scanner) -> Option<Token> {
    let start = scanner.pos;
    if scanner.eat('-') && scanner.eat('-') {
        scanner.start = start;
        scanner.eat_while(is_keyword);
        return Some(Token::CustomProperty(scanner.current()));
    }
    scanner.pos = start;
    None
}

fn number_value(scanner: &mut Scanner) -> Option<Token> {
    let start = scanner.pos;
    if !consume_number(scanner) {
        return None;
    }

    let raw_value = scanner.substring(start, scanner.pos);
    scanner.start = scanner.pos;
    if !scanner.eat('%') {
        scanner.eat_while(is_alpha_word);
    }
    let unit = scanner.current();
    let value = raw_value.parse::<f64>().unwrap_or(0.0);

    Some(Token::Number(NumberValue::new(value, unit, raw_value)))
}

/// `-?\d*(\.\d*)?`, where a lone dot or a lone dash is not a number
fn consume_number(scanner: &mut Scanner) -> bool {
    let start = scanner.pos;
    scanner.eat('-');
    let after_negative = scanner.pos;
    let has_decimal = scanner.eat_while(is_number);
    let prev_pos = scanner.pos;

    if scanner.eat('.') {
        let has_float = scanner.eat_while(is_number);
        if !has_decimal && !has_float {
            scanner.pos = prev_pos;
        }
    }

    if scanner.pos == after_negative {
        scanner.pos = start;
    }
    scanner.pos != start
}

/// `#abc`, `#0`, `#fff.5`, `#t`
fn color_value(scanner: &mut Scanner) -> Option<Token> {
    let start = scanner.pos;
    if !scanner.eat('#') {
        return None;
    }

    let value_start = scanner.pos;
    let mut color = String::new();
    let alpha;

    if scanner.eat_while(is_hex) {
        color = scanner.substring(value_start, scanner.pos);
        alpha = color_alpha(scanner);
    } else if scanner.eat('t') {
        color = "0".to_string();
        alpha = Some(color_alpha(scanner).unwrap_or_else(|| "0".to_string()));
    } else {
        alpha = color_alpha(scanner);
    }

    if !color.is_empty() || alpha.is_some() || scanner.eof() {
        let mut parsed = ColorValue::parse(&color, alpha.as_deref());
        parsed.raw = scanner.substring(start + 1, scanner.pos);
        Some(Token::Color(parsed))
    } else {
        Some(Token::Literal(scanner.substring(start, scanner.pos)))
    }
}

/// `.5` alpha suffix; a bare dot means fully opaque
fn color_alpha(scanner: &mut Scanner) -> Option<String> {
    let start = scanner.pos;
    if !scanner.eat('.') {
        return None;
    }
    scanner.start = start;
    if scanner.eat_while(is_number) {
        Some(scanner.current())
    } else {
        Some("1".to_string())
    }
}

/// Quoted string; an unterminated string runs to the end of input
fn string_value(scanner: &mut Scanner) -> Option<Token> {
    let quote = scanner.peek().filter(|c| is_quote(*c))?;
    let start = scanner.pos;
    let mut finished = false;
    scanner.pos += 1;

    while !scanner.eof() {
        if scanner.eat(quote) {
            finished = true;
            break;
        }
        scanner.pos += 1;
    }

    scanner.start = start;
    let end = scanner.pos - usize::from(finished);
    Some(Token::String {
        value: scanner.substring(start + 1, end),
        single: quote == '\'',
    })
}

fn bracket(scanner: &mut Scanner) -> Option<Token> {
    let ch = scanner.peek().filter(|c| matches!(c, '(' | ')'))?;
    scanner.pos += 1;
    Some(Token::Bracket { open: ch == '(' })
}

fn operator(scanner: &mut Scanner) -> Option<Token> {
    let op = StyleOperator::of(scanner.peek()?)?;
    scanner.pos += 1;
    Some(Token::Operator(op))
}

fn white_space(scanner: &mut Scanner) -> Option<Token> {
    if scanner.eat_while(is_space) {
        Some(Token::WhiteSpace)
    } else {
        None
    }
}

/// Keyword or property name
///
/// `@var` and `$var` prefixes read SCSS/LESS variables. A leading dot is
/// allowed only at the start (`.5` was already taken as a number).
fn literal(scanner: &mut Scanner, short: bool) -> Option<Token> {
    let start = scanner.pos;

    if scanner.eat_if(is_ident_prefix) {
        if start > 0 {
            scanner.eat_while(is_keyword);
        } else {
            scanner.eat_while(is_literal);
        }
    } else if scanner.eat_if(is_alpha_word) {
        if short {
            scanner.eat_while(is_literal);
        } else {
            scanner.eat_while(is_keyword);
        }
    } else {
        scanner.eat('.');
        scanner.eat_while(is_literal);
    }

    if start != scanner.pos {
        scanner.start = start;
        Some(Token::Literal(scanner.substring(start, scanner.pos)))
    } else {
        None
    }
}

// ============================================================================
// CHARACTER CLASSES
// ============================================================================

fn is_ident_prefix(ch: char) -> bool {
    ch == '@' || ch == '$'
}

fn is_hex(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

fn is_keyword(ch: char) -> bool {
    is_alpha_numeric_word(ch) || ch == '-'
}

fn is_literal(ch: char) -> bool {
    is_alpha_word(ch) || ch == '%' || ch == '/'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Field;
    use assert_matches::assert_matches;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source, false)
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    fn lit(value: &str) -> Token {
        Token::Literal(value.to_string())
    }

    fn num(value: f64, unit: &str, raw: &str) -> Token {
        Token::Number(NumberValue::new(value, unit, raw))
    }

    #[test]
    fn test_property_with_numbers() {
        assert_eq!(
            kinds("m10-20"),
            vec![
                lit("m"),
                num(10.0, "", "10"),
                Token::Operator(StyleOperator::ValueDelimiter),
                num(20.0, "", "20"),
            ]
        );
    }

    #[test]
    fn test_negative_numbers_and_units() {
        assert_eq!(
            kinds("m-10p"),
            vec![lit("m"), num(-10.0, "p", "-10")]
        );
        assert_eq!(kinds("w.5"), vec![lit("w"), num(0.5, "", ".5")]);
    }

    #[test]
    fn test_color_with_alpha() {
        let tokens = kinds("c#fff.5");
        assert_eq!(tokens[0], lit("c"));
        assert_matches!(&tokens[1], Token::Color(c) if c.r == 255 && c.a == 0.5 && c.raw == "fff.5");
    }

    #[test]
    fn test_transparent_color() {
        let tokens = kinds("bg#t");
        assert_matches!(&tokens[1], Token::Color(c) if c.is_transparent() && c.raw == "t");
    }

    #[test]
    fn test_hash_without_color_is_literal() {
        let tokens = kinds("#x");
        assert_eq!(tokens[0], lit("#"));
    }

    #[test]
    fn test_function_name_is_merged() {
        let tokens = kinds("trf:scale3d(1)");
        assert_eq!(tokens[0], lit("trf"));
        assert_eq!(tokens[1], Token::Operator(StyleOperator::PropertyDelimiter));
        assert_eq!(tokens[2], lit("scale3d"));
        assert_eq!(tokens[3], Token::Bracket { open: true });
    }

    #[test]
    fn test_value_mode_reads_keywords() {
        let tokens: Vec<Token> = tokenize("no-repeat", true)
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .collect();
        assert_eq!(tokens, vec![lit("no-repeat")]);
    }

    #[test]
    fn test_strings_fields_and_custom_properties() {
        let tokens = kinds("ff'Arial'");
        assert_eq!(
            tokens[1],
            Token::String {
                value: "Arial".into(),
                single: true
            }
        );

        let tokens = kinds("c${1:red}");
        assert_eq!(tokens[1], Token::Field(Field::new(1, "red")));

        let tokens = kinds("--main-color");
        assert_eq!(tokens[0], Token::CustomProperty("--main-color".into()));
    }

    #[test]
    fn test_unbalanced_bracket() {
        let err = tokenize("a)", false).unwrap_err();
        assert_matches!(err, ScannerError::UnexpectedBracket { pos: 1, .. });
    }

    #[test]
    fn test_important_and_sibling() {
        assert_eq!(
            kinds("p!+m"),
            vec![
                lit("p"),
                Token::Operator(StyleOperator::Important),
                Token::Operator(StyleOperator::Sibling),
                lit("m"),
            ]
        );
    }
}
