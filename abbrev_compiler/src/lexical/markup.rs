//! Markup abbreviation tokenizer
//!
//! Productions are tried in a fixed order at every position: field,
//! repeater placeholder, repeater number, repeater, white space, literal,
//! operator, quote, bracket. Which characters end a literal depends on
//! whether the scanner is inside quotes, an `[attribute]` set or a
//! `{text}` expression, which is tracked in [`Context`].

use super::error::ScannerError;
use super::scanner::{
    is_alpha_numeric_word, is_number, is_quote, is_space, is_umlaut, Scanner,
};
use crate::tokens::markup::{
    BracketContext, MarkupToken, OperatorKind, Repeater, RepeaterNumber, Token,
};
use crate::utils::{Span, Spanned};

/// Nesting state that changes how literals are read
#[derive(Debug, Default, Clone, Copy)]
struct Context {
    group: i32,
    attribute: i32,
    expression: i32,
    quote: Option<char>,
}

impl Context {
    fn enter(&mut self, context: BracketContext, open: bool) {
        let delta = if open { 1 } else { -1 };
        match context {
            BracketContext::Group => self.group += delta,
            BracketContext::Attribute => self.attribute += delta,
            BracketContext::Expression => self.expression += delta,
        }
    }
}

/// Splits a markup abbreviation into tokens
pub fn tokenize(source: &str) -> Result<Vec<MarkupToken>, ScannerError> {
    let mut scanner = Scanner::new(source);
    let mut ctx = Context::default();
    let mut tokens = Vec::new();

    while !scanner.eof() {
        let ch = scanner.peek();
        let Some(token) = next_token(&mut scanner, &mut ctx)? else {
            return Err(scanner.unexpected_character());
        };

        match &token.value {
            Token::Quote { .. } => {
                ctx.quote = if ch == ctx.quote { None } else { ch };
            }
            Token::Bracket { open, context } => ctx.enter(*context, *open),
            _ => {}
        }
        tokens.push(token);
    }

    Ok(tokens)
}

fn next_token(scanner: &mut Scanner, ctx: &mut Context) -> Result<Option<MarkupToken>, ScannerError> {
    let start = scanner.pos;

    if ctx.expression > 0 || ctx.attribute > 0 {
        if let Some(field) = scanner.consume_field()? {
            return Ok(Some(spanned(Token::Field(field), start, scanner.pos)));
        }
    }

    let token = repeater_placeholder(scanner)
        .or_else(|| repeater_number(scanner))
        .or_else(|| repeater(scanner))
        .or_else(|| white_space(scanner))
        .or_else(|| literal(scanner, ctx))
        .or_else(|| operator(scanner))
        .or_else(|| quote(scanner))
        .or_else(|| bracket(scanner));

    Ok(token.map(|token| spanned(token, start, scanner.pos)))
}

fn spanned(token: Token, start: usize, end: usize) -> MarkupToken {
    Spanned::new(token, Span::from_offsets(start, end))
}

// ============================================================================
// PRODUCTIONS
// ============================================================================

fn literal(scanner: &mut Scanner, ctx: &mut Context) -> Option<Token> {
    let start = scanner.pos;
    let expression_start = ctx.expression;
    let mut value = String::new();

    while !scanner.eof() {
        if escaped(scanner) {
            value.push_str(&scanner.current());
            continue;
        }

        let Some(ch) = scanner.peek() else { break };

        if ch == '/' && ctx.quote.is_none() && ctx.expression == 0 && ctx.attribute == 0 {
            // `/` between digits stays in the literal: `col-1/2`
            let prev = scanner.pos.checked_sub(1).and_then(|p| scanner.char_at(p));
            let next = scanner.char_at(scanner.pos + 1);
            if prev.is_some_and(is_number) && next.is_some_and(is_number) {
                value.push(ch);
                scanner.pos += 1;
                continue;
            }
        }

        if Some(ch) == ctx.quote || ch == '$' || is_allowed_operator(ch, ctx) {
            break;
        }

        if expression_start > 0 {
            if ch == '{' {
                ctx.expression += 1;
            } else if ch == '}' {
                if ctx.expression > expression_start {
                    ctx.expression -= 1;
                } else {
                    break;
                }
            }
        } else if ctx.quote.is_none() {
            if ctx.attribute == 0 && !is_element_name(ch) {
                break;
            }
            if is_allowed_space(ch, ctx)
                || is_allowed_repeater(ch, ctx)
                || is_quote(ch)
                || BracketContext::of(ch).is_some()
            {
                break;
            }
        }

        value.push(ch);
        scanner.pos += 1;
    }

    if start != scanner.pos {
        scanner.start = start;
        Some(Token::Literal(value))
    } else {
        None
    }
}

/// Consumes `\x`, leaving `x` as the current range
fn escaped(scanner: &mut Scanner) -> bool {
    if scanner.eat('\\') {
        scanner.start = scanner.pos;
        if !scanner.eof() {
            scanner.pos += 1;
        }
        true
    } else {
        false
    }
}

fn white_space(scanner: &mut Scanner) -> Option<Token> {
    let start = scanner.pos;
    if scanner.eat_while(is_space) {
        Some(Token::WhiteSpace(scanner.substring(start, scanner.pos)))
    } else {
        None
    }
}

fn quote(scanner: &mut Scanner) -> Option<Token> {
    let ch = scanner.peek().filter(|c| is_quote(*c))?;
    scanner.pos += 1;
    Some(Token::Quote { single: ch == '\'' })
}

fn bracket(scanner: &mut Scanner) -> Option<Token> {
    let ch = scanner.peek()?;
    let context = BracketContext::of(ch)?;
    scanner.pos += 1;
    Some(Token::Bracket {
        open: matches!(ch, '(' | '[' | '{'),
        context,
    })
}

fn operator(scanner: &mut Scanner) -> Option<Token> {
    let op = OperatorKind::of(scanner.peek()?)?;
    scanner.pos += 1;
    Some(Token::Operator(op))
}

fn repeater(scanner: &mut Scanner) -> Option<Token> {
    if !scanner.eat('*') {
        return None;
    }
    scanner.start = scanner.pos;
    if scanner.eat_while(is_number) {
        let count = scanner.current().parse::<usize>().unwrap_or(1);
        Some(Token::Repeater(Repeater::new(count)))
    } else {
        Some(Token::Repeater(Repeater::implicit()))
    }
}

fn repeater_placeholder(scanner: &mut Scanner) -> Option<Token> {
    let start = scanner.pos;
    if scanner.eat('$') && scanner.eat('#') {
        return Some(Token::RepeaterPlaceholder);
    }
    scanner.pos = start;
    None
}

/// `$`, `$$$`, `$@-`, `$@^^3`
fn repeater_number(scanner: &mut Scanner) -> Option<Token> {
    let start = scanner.pos;
    if !scanner.eat_while(|c| c == '$') {
        return None;
    }

    let size = scanner.pos - start;
    let mut reverse = false;
    let mut base = 1;
    let mut parent = 0;

    if scanner.eat('@') {
        while scanner.eat('^') {
            parent += 1;
        }
        reverse = scanner.eat('-');
        scanner.start = scanner.pos;
        if scanner.eat_while(is_number) {
            base = scanner.current().parse::<usize>().unwrap_or(1);
        }
    }

    scanner.start = start;
    Some(Token::RepeaterNumber(RepeaterNumber {
        size,
        reverse,
        base,
        parent,
    }))
}

// ============================================================================
// CONTEXT RULES
// ============================================================================

/// Operators are literal text inside quotes and expressions; inside
/// attribute sets only `=` is an operator
fn is_allowed_operator(ch: char, ctx: &Context) -> bool {
    match OperatorKind::of(ch) {
        None => false,
        Some(_) if ctx.quote.is_some() || ctx.expression > 0 => false,
        Some(op) => ctx.attribute == 0 || op == OperatorKind::Equal,
    }
}

fn is_allowed_space(ch: char, ctx: &Context) -> bool {
    is_space(ch) && ctx.expression == 0
}

fn is_allowed_repeater(ch: char, ctx: &Context) -> bool {
    ch == '*' && ctx.attribute == 0 && ctx.expression == 0
}

fn is_element_name(ch: char) -> bool {
    is_alpha_numeric_word(ch) || is_umlaut(ch) || matches!(ch, '-' | ':' | '!')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Field;
    use assert_matches::assert_matches;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    fn lit(value: &str) -> Token {
        Token::Literal(value.to_string())
    }

    #[test]
    fn test_element_tree() {
        assert_eq!(
            kinds("ul>li.item"),
            vec![
                lit("ul"),
                Token::Operator(OperatorKind::Child),
                lit("li"),
                Token::Operator(OperatorKind::Class),
                lit("item"),
            ]
        );
    }

    #[test]
    fn test_spans_are_character_offsets() {
        let tokens = tokenize("ü+p").unwrap();
        assert_eq!(tokens[0].span, Span::from_offsets(0, 1));
        assert_eq!(tokens[2].span, Span::from_offsets(2, 3));
    }

    #[test]
    fn test_repeaters_and_numbering() {
        assert_eq!(
            kinds("li.a$$@^-3*5"),
            vec![
                lit("li"),
                Token::Operator(OperatorKind::Class),
                lit("a"),
                Token::RepeaterNumber(RepeaterNumber {
                    size: 2,
                    reverse: true,
                    base: 3,
                    parent: 1,
                }),
                Token::Repeater(Repeater::new(5)),
            ]
        );
        assert_eq!(
            kinds("p*"),
            vec![lit("p"), Token::Repeater(Repeater::implicit())]
        );
        assert_eq!(kinds("$#"), vec![Token::RepeaterPlaceholder]);
    }

    #[test]
    fn test_attribute_context() {
        assert_eq!(
            kinds("a[title=\"a b\" x]"),
            vec![
                lit("a"),
                Token::Bracket {
                    open: true,
                    context: BracketContext::Attribute
                },
                lit("title"),
                Token::Operator(OperatorKind::Equal),
                Token::Quote { single: false },
                lit("a b"),
                Token::Quote { single: false },
                Token::WhiteSpace(" ".into()),
                lit("x"),
                Token::Bracket {
                    open: false,
                    context: BracketContext::Attribute
                },
            ]
        );
    }

    #[test]
    fn test_operators_are_text_inside_expressions() {
        assert_eq!(
            kinds("p{a>b+c}"),
            vec![
                lit("p"),
                Token::Bracket {
                    open: true,
                    context: BracketContext::Expression
                },
                lit("a>b+c"),
                Token::Bracket {
                    open: false,
                    context: BracketContext::Expression
                },
            ]
        );
    }

    #[test]
    fn test_nested_braces_in_text() {
        let tokens = kinds("span{{foo}}");
        assert_eq!(tokens[2], lit("{foo}"));
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_fields_only_inside_attributes_and_text() {
        let tokens = kinds("a[href=${1:url}]");
        assert_eq!(tokens[4], Token::Field(Field::new(1, "url")));

        let tokens = kinds("p{${lang}}");
        assert_eq!(tokens[2], Token::Field(Field::variable("lang")));
    }

    #[test]
    fn test_escape_and_digit_slash() {
        assert_eq!(kinds("a\\>b"), vec![lit("a>b")]);
        assert_eq!(
            kinds(".col-1/2"),
            vec![Token::Operator(OperatorKind::Class), lit("col-1/2")]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("div%").unwrap_err();
        assert_matches!(err, ScannerError::UnexpectedCharacter { pos: 3, .. });
        assert_eq!(err.diagnostic(), "Unexpected character at 4\ndiv%\n---^");
    }

    #[test]
    fn test_unclosed_field_is_error() {
        let err = tokenize("a[x=${1]").unwrap_err();
        assert_matches!(err, ScannerError::ExpectingBrace { .. });
    }
}
