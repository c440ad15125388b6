//! Markup abbreviation parser
//!
//! Builds a [`TokenGroup`] tree from markup tokens. Nesting is tracked with
//! an explicit stack of open containers: `>` opens the element just read,
//! `^` closes one container per operator, `+` stays at the same level.

use super::ast::{TokenAttribute, TokenElement, TokenGroup, TokenStatement};
use super::error::{SyntaxError, SyntaxResult};
use crate::tokens::markup::{BracketContext, MarkupToken, OperatorKind, Token};
use crate::tokens::TokenScanner;
use crate::utils::Spanned;

type Scanner<'a> = TokenScanner<'a, Token>;

/// Parser switches taken from the expansion options
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserOptions {
    /// JSX component names (`Foo.Bar`) and `{expr}` shorthand attribute values
    pub jsx: bool,
}

/// Parses the whole token list; leftover tokens are an error
pub fn parse(tokens: &[MarkupToken], options: ParserOptions) -> SyntaxResult<TokenGroup> {
    let mut scanner = Scanner::new(tokens);
    let result = statements(&mut scanner, options)?;
    if scanner.readable() {
        return Err(SyntaxError::UnexpectedCharacter {
            pos: scanner.offset(),
        });
    }
    Ok(result)
}

fn statements(scanner: &mut Scanner, options: ParserOptions) -> SyntaxResult<TokenGroup> {
    let mut stack = vec![TokenStatement::Group(TokenGroup::default())];

    while scanner.readable() {
        let node = match element(scanner, options)? {
            Some(elem) => TokenStatement::Element(elem),
            None => match group(scanner, options)? {
                Some(group) => TokenStatement::Group(group),
                None => break,
            },
        };

        let Some(ctx) = stack.last_mut() else { break };
        ctx.elements_mut().push(node);

        if scanner.consume(|t| t.is_operator(OperatorKind::Child)) {
            let opened = ctx.elements_mut().pop();
            if let Some(opened) = opened {
                stack.push(opened);
            }
        } else if scanner.consume(|t| t.is_operator(OperatorKind::Sibling)) {
            continue;
        } else if scanner.consume(|t| t.is_operator(OperatorKind::Climb)) {
            loop {
                close_container(&mut stack);
                if !scanner.consume(|t| t.is_operator(OperatorKind::Climb)) {
                    break;
                }
            }
        }
    }

    while stack.len() > 1 {
        close_container(&mut stack);
    }

    match stack.pop() {
        Some(TokenStatement::Group(group)) => Ok(group),
        _ => Ok(TokenGroup::default()),
    }
}

/// Moves the innermost open container back into its parent
fn close_container(stack: &mut Vec<TokenStatement>) {
    if stack.len() > 1 {
        if let Some(node) = stack.pop() {
            if let Some(parent) = stack.last_mut() {
                parent.elements_mut().push(node);
            }
        }
    }
}

fn group(scanner: &mut Scanner, options: ParserOptions) -> SyntaxResult<Option<TokenGroup>> {
    if !scanner.consume(|t| t.is_bracket(BracketContext::Group, Some(true))) {
        return Ok(None);
    }

    let mut result = statements(scanner, options)?;
    if let Some(token) = scanner.next() {
        if token.value.is_bracket(BracketContext::Group, Some(false)) {
            result.repeat = repeater(scanner);
        }
    }
    Ok(Some(result))
}

fn element(scanner: &mut Scanner, options: ParserOptions) -> SyntaxResult<Option<TokenElement>> {
    let mut elem = TokenElement::default();

    if element_name(scanner, options) {
        elem.name = Some(scanner.current().to_vec());
    }

    while scanner.readable() {
        scanner.start = scanner.pos;

        if elem.repeat.is_none() && !elem.is_empty() && scanner.consume(is_repeater) {
            elem.repeat = repeater_at(scanner, scanner.pos - 1);
        } else if elem.value.is_none() && text(scanner) {
            elem.value = Some(get_text(scanner)?);
        } else if let Some(attrs) = next_attributes(scanner, options)? {
            elem.attributes.get_or_insert_with(Vec::new).extend(attrs);
        } else {
            if !elem.is_empty() && scanner.consume(|t| t.is_operator(OperatorKind::Close)) {
                elem.self_close = true;
                if elem.repeat.is_none() && scanner.consume(is_repeater) {
                    elem.repeat = repeater_at(scanner, scanner.pos - 1);
                }
            }
            break;
        }
    }

    Ok((!elem.is_empty()).then_some(elem))
}

fn next_attributes(
    scanner: &mut Scanner,
    options: ParserOptions,
) -> SyntaxResult<Option<Vec<TokenAttribute>>> {
    if let Some(attr) = short_attribute(scanner, OperatorKind::Id, options)? {
        return Ok(Some(vec![attr]));
    }
    if let Some(attr) = short_attribute(scanner, OperatorKind::Class, options)? {
        return Ok(Some(vec![attr]));
    }
    attribute_set(scanner)
}

/// `[a=b c="d" 'e']`
fn attribute_set(scanner: &mut Scanner) -> SyntaxResult<Option<Vec<TokenAttribute>>> {
    let open_pos = scanner.offset();
    if !scanner.consume(|t| t.is_bracket(BracketContext::Attribute, Some(true))) {
        return Ok(None);
    }

    let mut attributes = Vec::new();
    while scanner.readable() {
        if let Some(attr) = attribute(scanner)? {
            attributes.push(attr);
        } else if scanner.consume(|t| t.is_bracket(BracketContext::Attribute, Some(false))) {
            return Ok(Some(attributes));
        } else if !scanner.consume(Token::is_white_space) {
            let (kind, pos) = match scanner.peek() {
                Some(token) => (token.value.kind_name(), Some(token.span.start.offset)),
                None => ("EOF", None),
            };
            return Err(SyntaxError::unexpected_token(kind, pos));
        }
    }

    Err(SyntaxError::UnclosedAttributeSet { pos: open_pos })
}

/// `#id` or `.class`; repeated operators (`..a`) mark a multiple-value attribute
fn short_attribute(
    scanner: &mut Scanner,
    kind: OperatorKind,
    options: ParserOptions,
) -> SyntaxResult<Option<TokenAttribute>> {
    if !scanner.consume(|t| t.is_operator(kind)) {
        return Ok(None);
    }

    let mut count = 1;
    while scanner.consume(|t| t.is_operator(kind)) {
        count += 1;
    }

    let name = if kind == OperatorKind::Id { "id" } else { "class" };
    let mut attr = TokenAttribute {
        name: Some(vec![Spanned::synthetic(Token::Literal(name.to_string()))]),
        multiple: count > 1,
        ..Default::default()
    };

    if options.jsx && text(scanner) {
        attr.value = Some(get_text(scanner)?);
        attr.expression = true;
    } else if literal(scanner, false) {
        attr.value = Some(value_tokens(scanner.current())?);
    }

    Ok(Some(attr))
}

fn attribute(scanner: &mut Scanner) -> SyntaxResult<Option<TokenAttribute>> {
    if quoted(scanner)? {
        // Bare quoted value belongs to the default attribute
        return Ok(Some(TokenAttribute {
            value: Some(value_tokens(scanner.current())?),
            ..Default::default()
        }));
    }

    if literal(scanner, true) {
        let name = scanner.current().to_vec();
        let mut value = None;
        if scanner.consume(|t| t.is_operator(OperatorKind::Equal))
            && (quoted(scanner)? || literal(scanner, true))
        {
            value = Some(value_tokens(scanner.current())?);
        }
        return Ok(Some(TokenAttribute {
            name: Some(name),
            value,
            ..Default::default()
        }));
    }

    Ok(None)
}

fn repeater(scanner: &mut Scanner) -> Option<crate::tokens::Repeater> {
    if scanner.peek().is_some_and(|t| is_repeater(&t.value)) {
        scanner.pos += 1;
        return repeater_at(scanner, scanner.pos - 1);
    }
    None
}

fn repeater_at(scanner: &Scanner, index: usize) -> Option<crate::tokens::Repeater> {
    match scanner.token_at(index).map(|t| &t.value) {
        Some(Token::Repeater(r)) => Some(*r),
        _ => None,
    }
}

/// Quoted value including its quotes; `start` is set to the opening quote
fn quoted(scanner: &mut Scanner) -> SyntaxResult<bool> {
    let start = scanner.pos;
    let Some(open) = scanner.peek() else {
        return Ok(false);
    };
    let Token::Quote { single } = open.value else {
        return Ok(false);
    };

    scanner.pos += 1;
    while let Some(token) = scanner.next() {
        if token.value.is_quote(Some(single)) {
            scanner.start = start;
            return Ok(true);
        }
    }

    Err(SyntaxError::UnclosedQuote {
        pos: Some(open.span.start.offset),
    })
}

/// Unquoted value: everything up to a quote, operator, space or repeater
///
/// With `allow_brackets`, balanced brackets are part of the value and an
/// unmatched closing bracket ends it.
fn literal(scanner: &mut Scanner, allow_brackets: bool) -> bool {
    let start = scanner.pos;
    let mut attribute = 0;
    let mut expression = 0;
    let mut group = 0;

    while let Some(token) = scanner.peek() {
        match &token.value {
            Token::Bracket { open, context } if expression > 0 => {
                if *context == BracketContext::Expression {
                    expression += if *open { 1 } else { -1 };
                }
            }
            _ if expression > 0 => {}
            Token::Quote { .. }
            | Token::Operator(_)
            | Token::WhiteSpace(_)
            | Token::Repeater(_) => break,
            Token::Bracket { open, context } => {
                if !allow_brackets {
                    break;
                }
                let depth = match context {
                    BracketContext::Attribute => &mut attribute,
                    BracketContext::Expression => &mut expression,
                    BracketContext::Group => &mut group,
                };
                if *open {
                    *depth += 1;
                } else if *depth == 0 {
                    break;
                } else {
                    *depth -= 1;
                }
            }
            _ => {}
        }
        scanner.pos += 1;
    }

    if start != scanner.pos {
        scanner.start = start;
        true
    } else {
        false
    }
}

fn element_name(scanner: &mut Scanner, options: ParserOptions) -> bool {
    let start = scanner.pos;

    if options.jsx && scanner.consume(Token::is_capitalized_literal) {
        // `Foo.Bar.Baz` component names
        while scanner.readable() {
            let pos = scanner.pos;
            if !scanner.consume(|t| t.is_operator(OperatorKind::Class))
                || !scanner.consume(Token::is_capitalized_literal)
            {
                scanner.pos = pos;
                break;
            }
        }
    }

    while scanner.consume(|t| {
        matches!(
            t,
            Token::Literal(_) | Token::RepeaterNumber(_) | Token::RepeaterPlaceholder
        )
    }) {}

    if scanner.pos != start {
        scanner.start = start;
        true
    } else {
        false
    }
}

/// `{text}`, balanced on nested expression brackets
fn text(scanner: &mut Scanner) -> bool {
    let start = scanner.pos;
    if !scanner.consume(|t| t.is_bracket(BracketContext::Expression, Some(true))) {
        return false;
    }

    let mut brackets = 0;
    while let Some(token) = scanner.next() {
        if let Token::Bracket {
            open,
            context: BracketContext::Expression,
        } = token.value
        {
            if open {
                brackets += 1;
            } else if brackets == 0 {
                break;
            } else {
                brackets -= 1;
            }
        }
    }

    scanner.start = start;
    true
}

/// Text tokens without the surrounding braces
fn get_text(scanner: &Scanner) -> SyntaxResult<Vec<MarkupToken>> {
    let mut from = scanner.start;
    let mut to = scanner.pos;
    if scanner
        .token_at(from)
        .is_some_and(|t| t.value.is_bracket(BracketContext::Expression, Some(true)))
    {
        from += 1;
    }
    if to > from
        && scanner
            .token_at(to - 1)
            .is_some_and(|t| t.value.is_bracket(BracketContext::Expression, Some(false)))
    {
        to -= 1;
    }
    value_tokens(scanner.slice(from, to))
}

/// Tokens of a text or attribute value; a repeater (`{*a}`) has no text form
fn value_tokens(tokens: &[MarkupToken]) -> SyntaxResult<Vec<MarkupToken>> {
    match tokens.iter().find(|t| is_repeater(&t.value)) {
        Some(token) => Err(SyntaxError::unexpected_token(
            token.value.kind_name(),
            Some(token.span.start.offset),
        )),
        None => Ok(tokens.to_vec()),
    }
}

fn is_repeater(token: &Token) -> bool {
    matches!(token, Token::Repeater(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::markup::tokenize;
    use assert_matches::assert_matches;

    fn parse_str(source: &str) -> SyntaxResult<TokenGroup> {
        parse(&tokenize(source).unwrap(), ParserOptions::default())
    }

    fn name_of(statement: &TokenStatement) -> String {
        match statement {
            TokenStatement::Element(e) => e
                .name
                .as_ref()
                .map(|n| n.iter().map(|t| t.value.to_string()).collect())
                .unwrap_or_default(),
            TokenStatement::Group(_) => "()".to_string(),
        }
    }

    /// Compact tree dump: `a(b,c)`
    fn shape(statements: &[TokenStatement]) -> String {
        statements
            .iter()
            .map(|s| {
                let children = s.elements();
                if children.is_empty() {
                    name_of(s)
                } else {
                    format!("{}({})", name_of(s), shape(children))
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn test_child_sibling_climb() {
        let tree = parse_str("a>b+c>d^e^^f").unwrap();
        assert_eq!(shape(&tree.elements), "a(b,c(d),e),f");
    }

    #[test]
    fn test_group_with_repeater() {
        let tree = parse_str("(a+b)*2>c").unwrap();
        assert_matches!(&tree.elements[0], TokenStatement::Group(g) if g.repeat.map(|r| r.count) == Some(2));
        // children of a group are appended to the group itself
        assert_eq!(shape(&tree.elements), "()(a,b,c)");
    }

    #[test]
    fn test_element_parts() {
        let tree = parse_str("p#main.a.b[title=x]{hi}*3").unwrap();
        let TokenStatement::Element(p) = &tree.elements[0] else {
            panic!("expected element");
        };
        assert_eq!(p.attributes.as_ref().map(Vec::len), Some(4));
        assert_eq!(p.value.as_ref().map(Vec::len), Some(1));
        assert_eq!(p.repeat.map(|r| r.count), Some(3));
    }

    #[test]
    fn test_self_close_with_repeater() {
        let tree = parse_str("img/*2").unwrap();
        let TokenStatement::Element(img) = &tree.elements[0] else {
            panic!("expected element");
        };
        assert!(img.self_close);
        assert_eq!(img.repeat.map(|r| r.count), Some(2));
    }

    #[test]
    fn test_quoted_default_attribute() {
        let tree = parse_str("a['url' x]").unwrap();
        let TokenStatement::Element(a) = &tree.elements[0] else {
            panic!("expected element");
        };
        let attrs = a.attributes.as_ref().unwrap();
        assert!(attrs[0].name.is_none());
        assert_eq!(attrs[0].value.as_ref().map(Vec::len), Some(3));
        assert!(attrs[1].value.is_none());
    }

    #[test]
    fn test_multiple_class_shorthand() {
        let tree = parse_str("div..foo").unwrap();
        let TokenStatement::Element(div) = &tree.elements[0] else {
            panic!("expected element");
        };
        assert!(div.attributes.as_ref().unwrap()[0].multiple);
    }

    #[test]
    fn test_jsx_component_name() {
        let tokens = tokenize("Foo.Bar.baz").unwrap();
        let tree = parse(&tokens, ParserOptions { jsx: true }).unwrap();
        assert_eq!(name_of(&tree.elements[0]), "Foo.Bar");
    }

    #[test]
    fn test_unclosed_attribute_set() {
        assert_matches!(
            parse_str("div["),
            Err(SyntaxError::UnclosedAttributeSet { pos: Some(3) })
        );
    }

    #[test]
    fn test_unclosed_quote() {
        assert_matches!(
            parse_str("a[title=\"x]"),
            Err(SyntaxError::UnclosedQuote { pos: Some(8) })
        );
    }

    #[test]
    fn test_repeater_inside_text_is_rejected() {
        assert_matches!(
            parse_str("p{*hi}"),
            Err(SyntaxError::UnexpectedToken { ref kind, pos: Some(2) }) if kind == "Repeater"
        );
        assert_matches!(
            parse_str("p{ *}"),
            Err(SyntaxError::UnexpectedToken { pos: Some(3), .. })
        );
    }

    #[test]
    fn test_star_inside_word_stays_text() {
        let tree = parse_str("p{a *b}").unwrap();
        let TokenStatement::Element(p) = &tree.elements[0] else {
            panic!("expected element");
        };
        assert!(p
            .value
            .as_ref()
            .unwrap()
            .iter()
            .all(|t| !is_repeater(&t.value)));
    }

    #[test]
    fn test_trailing_tokens() {
        let err = parse_str("a)").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected character at 1");
    }
}
