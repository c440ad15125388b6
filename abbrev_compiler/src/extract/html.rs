//! Detection of HTML tags already written left of the caret

use super::scanner::{
    bracket_pair, is_close_bracket, is_open_bracket, is_quote, is_white_space, BackwardScanner,
};

/// Whether the scanner sits right after the `>` of an HTML tag
///
/// The position is left unchanged.
pub fn is_html(scanner: &mut BackwardScanner) -> bool {
    let start = scanner.pos;
    if !scanner.consume('>') {
        return false;
    }

    let mut ok = false;
    // possibly self-closed element
    scanner.consume('/');

    while !scanner.sol() {
        scanner.consume_while(is_white_space);

        if consume_ident(scanner) {
            // tag name, boolean attribute or unquoted attribute value
            if scanner.consume('/') {
                // closing tag or invalid tag
                ok = scanner.consume('<');
                break;
            } else if scanner.consume('<') {
                ok = true;
                break;
            } else if scanner.consume_if(is_white_space) {
                continue;
            } else if scanner.consume('=') {
                if consume_ident(scanner) {
                    continue;
                }
                break;
            } else if consume_attribute_with_unquoted_value(scanner) {
                // identifier was part of an unquoted value
                ok = true;
                break;
            }
            break;
        }

        if consume_attribute(scanner) {
            continue;
        }
        break;
    }

    scanner.pos = start;
    ok
}

fn consume_attribute(scanner: &mut BackwardScanner) -> bool {
    consume_attribute_with_quoted_value(scanner) || consume_attribute_with_unquoted_value(scanner)
}

fn consume_attribute_with_quoted_value(scanner: &mut BackwardScanner) -> bool {
    let start = scanner.pos;
    if scanner.consume_quoted() && scanner.consume('=') && consume_ident(scanner) {
        return true;
    }
    scanner.pos = start;
    false
}

fn consume_attribute_with_unquoted_value(scanner: &mut BackwardScanner) -> bool {
    let start = scanner.pos;
    let mut stack: Vec<char> = Vec::new();

    while !scanner.sol() {
        let Some(ch) = scanner.peek() else {
            break;
        };
        if is_close_bracket(ch) {
            stack.push(ch);
        } else if is_open_bracket(ch) {
            if stack.pop() != bracket_pair(ch) {
                break;
            }
        } else if !is_unquoted_value(ch) {
            break;
        }
        scanner.pos -= 1;
    }

    if start != scanner.pos && scanner.consume('=') && consume_ident(scanner) {
        return true;
    }
    scanner.pos = start;
    false
}

fn consume_ident(scanner: &mut BackwardScanner) -> bool {
    scanner.consume_while(is_ident)
}

fn is_ident(ch: char) -> bool {
    ch == ':' || ch == '-' || ch.is_ascii_alphanumeric()
}

fn is_unquoted_value(ch: char) -> bool {
    ch != '=' && !is_white_space(ch) && !is_quote(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_end(text: &str) -> bool {
        let mut scanner = BackwardScanner::new(text, 0);
        let result = is_html(&mut scanner);
        assert_eq!(scanner.pos, text.chars().count());
        result
    }

    #[test]
    fn test_tags() {
        assert!(at_end("<div>"));
        assert!(at_end("</div>"));
        assert!(at_end("<br/>"));
        assert!(at_end("<a href=\"x y\" target=_blank>"));
        assert!(at_end("<input disabled>"));
    }

    #[test]
    fn test_abbreviation_operators_are_not_tags() {
        assert!(!at_end("ul>"));
        assert!(!at_end("div"));
        assert!(!at_end("a=>"));
    }
}
