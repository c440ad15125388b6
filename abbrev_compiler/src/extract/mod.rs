//! Abbreviation extraction from editor lines
//!
//! Given a line and the caret position, [`extract_abbreviation`] walks
//! left from the caret and returns the longest span that can be expanded.
//! Text inside `[...]` and `{...}` is taken as is; outside of them only
//! abbreviation characters are accepted, and the walk stops at an HTML
//! tag the user already wrote (`<div>ul>li|` yields `ul>li`).

pub mod hints;
pub mod html;
pub mod scanner;

pub use hints::{add_indentation, is_expandable, is_lorem_safe};
pub use html::is_html;
pub use scanner::BackwardScanner;

use crate::config::SyntaxType;
use crate::logging::codes;
use crate::{log_debug, log_success};
use scanner::{bracket_pair, is_quote};
use serde::Serialize;

/// Characters besides ASCII letters and digits allowed outside brackets
const SPECIAL_CHARS: &[char] = &['#', '.', '*', ':', '$', '-', '_', '!', '@', '%', '^', '+', '>', '/'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Step over characters the editor likely auto-closed right of the caret
    pub look_ahead: bool,
    /// Abbreviation must follow this marker (`&&div`); empty disables it
    pub prefix: String,
    /// Stylesheets only track `()` as brackets
    pub syntax_type: SyntaxType,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            look_ahead: true,
            prefix: String::new(),
            syntax_type: SyntaxType::Markup,
        }
    }
}

impl ExtractOptions {
    pub fn stylesheet() -> Self {
        Self {
            syntax_type: SyntaxType::Stylesheet,
            ..Self::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

/// Extracted span; offsets are character indices into the line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedAbbreviation {
    pub abbreviation: String,
    /// Where the abbreviation text begins
    pub location: usize,
    /// Start of the text to replace, including the prefix
    pub start: usize,
    pub end: usize,
}

/// Finds the abbreviation ending at `pos` (end of line when `None`)
pub fn extract_abbreviation(
    line: &str,
    pos: Option<usize>,
    options: &ExtractOptions,
) -> Option<ExtractedAbbreviation> {
    let length = line.chars().count();
    let mut pos = pos.unwrap_or(length).min(length);
    log_debug!("Extracting abbreviation", "length" => length, "pos" => pos);

    let mut scanner = BackwardScanner::new(line, 0);
    if options.look_ahead {
        pos = offset_past_auto_closed(&scanner, pos, options.syntax_type);
    }

    let start = start_offset(&mut scanner, pos, &options.prefix)?;
    scanner.start = start;
    scanner.pos = pos;

    let markup = options.syntax_type == SyntaxType::Markup;
    let mut stack: Vec<char> = Vec::new();

    while !scanner.sol() {
        let Some(ch) = scanner.peek() else {
            break;
        };

        if stack.contains(&'}') {
            if ch == '}' {
                stack.push(ch);
                scanner.pos -= 1;
                continue;
            }
            if ch != '{' {
                scanner.pos -= 1;
                continue;
            }
        }

        if is_close_brace(ch, markup) {
            stack.push(ch);
        } else if is_open_brace(ch, markup) {
            if stack.pop() != bracket_pair(ch) {
                break;
            }
        } else if stack.contains(&']') || stack.contains(&'}') {
            // attribute sets and text are taken as they are
            scanner.pos -= 1;
            continue;
        } else if is_html(&mut scanner) || !is_abbreviation_char(ch) {
            break;
        }
        scanner.pos -= 1;
    }

    if !stack.is_empty() || scanner.pos == pos {
        log_debug!("No abbreviation found", "pos" => pos);
        return None;
    }

    let text = scanner.substring(scanner.pos, pos);
    let abbreviation = text.trim_start_matches(['*', '+', '>', '^']).to_string();
    let abbreviation_length = abbreviation.chars().count();
    let location = pos - abbreviation_length;

    let result = ExtractedAbbreviation {
        abbreviation,
        location,
        start: if options.prefix.is_empty() {
            location
        } else {
            start.saturating_sub(options.prefix.chars().count())
        },
        end: pos,
    };

    log_success!(codes::success::EXTRACTION_COMPLETE, "Abbreviation extracted",
        "abbreviation" => &result.abbreviation,
        "start" => result.start,
        "end" => result.end
    );
    Some(result)
}

/// Moves `pos` past a closing quote and brackets the editor inserted
fn offset_past_auto_closed(scanner: &BackwardScanner, mut pos: usize, syntax_type: SyntaxType) -> usize {
    let markup = syntax_type == SyntaxType::Markup;
    let char_at = |pos: usize| scanner.substring(pos, pos + 1).chars().next();

    if char_at(pos).is_some_and(is_quote) {
        pos += 1;
    }
    while char_at(pos).is_some_and(|ch| is_close_brace(ch, markup)) {
        pos += 1;
    }
    pos
}

/// Left limit of the scan: right after the nearest `prefix` before `pos`
///
/// `None` when a prefix is required but missing. Bracketed sections are
/// skipped so a prefix inside attribute values doesn't count.
fn start_offset(scanner: &mut BackwardScanner, pos: usize, prefix: &str) -> Option<usize> {
    if prefix.is_empty() {
        return Some(0);
    }

    let prefix: Vec<char> = prefix.chars().collect();
    scanner.start = 0;
    scanner.pos = pos;

    while !scanner.sol() {
        if scanner.consume_pair(']', '[') || scanner.consume_pair('}', '{') {
            continue;
        }
        let result = scanner.pos;
        if scanner.consume_sequence(&prefix) {
            return Some(result);
        }
        scanner.pos -= 1;
    }
    None
}

fn is_abbreviation_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || SPECIAL_CHARS.contains(&ch)
}

fn is_open_brace(ch: char, markup: bool) -> bool {
    ch == '(' || (markup && (ch == '[' || ch == '{'))
}

fn is_close_brace(ch: char, markup: bool) -> bool {
    ch == ')' || (markup && (ch == ']' || ch == '}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(line: &str) -> Option<String> {
        extract_abbreviation(line, None, &ExtractOptions::default()).map(|r| r.abbreviation)
    }

    #[test]
    fn test_plain_abbreviation() {
        let result = extract_abbreviation("hello world ul>li", None, &ExtractOptions::default());
        assert_eq!(
            result,
            Some(ExtractedAbbreviation {
                abbreviation: "ul>li".into(),
                location: 12,
                start: 12,
                end: 17,
            })
        );
    }

    #[test]
    fn test_stops_at_written_tag() {
        let line = "<div>ul>li</div>";
        let result = extract_abbreviation(line, Some(10), &ExtractOptions::default());
        assert_eq!(result.map(|r| (r.abbreviation, r.location)), Some(("ul>li".into(), 5)));
    }

    #[test]
    fn test_look_ahead_past_auto_closed() {
        let line = "<span>.foo[title=bar]</span>";
        let result = extract_abbreviation(line, Some(20), &ExtractOptions::default());
        assert_eq!(
            result,
            Some(ExtractedAbbreviation {
                abbreviation: ".foo[title=bar]".into(),
                location: 6,
                start: 6,
                end: 21,
            })
        );

        let no_look_ahead = ExtractOptions {
            look_ahead: false,
            ..ExtractOptions::default()
        };
        let inside = extract_abbreviation(line, Some(20), &no_look_ahead);
        assert_eq!(inside.map(|r| r.abbreviation), Some("title=bar".into()));
    }

    #[test]
    fn test_text_and_attributes_keep_spaces() {
        assert_eq!(extract("p{hello world}").as_deref(), Some("p{hello world}"));
        assert_eq!(extract("x a[title=\"a b\"]").as_deref(), Some("a[title=\"a b\"]"));
    }

    #[test]
    fn test_leading_operators_are_stripped() {
        let result = extract_abbreviation("foo +div", None, &ExtractOptions::default());
        assert_eq!(result.map(|r| (r.abbreviation, r.location)), Some(("div".into(), 5)));
    }

    #[test]
    fn test_unbalanced_brackets() {
        assert_eq!(extract("a)"), None);
        assert_eq!(extract(""), None);
        assert_eq!(extract("foo "), None);
    }

    #[test]
    fn test_stylesheet_brackets() {
        let options = ExtractOptions::stylesheet();
        let result = extract_abbreviation("  m10", None, &options);
        assert_eq!(result.map(|r| r.abbreviation), Some("m10".into()));
        assert_eq!(extract_abbreviation("a{b}", None, &options), None);
    }

    #[test]
    fn test_prefix() {
        let options = ExtractOptions::default().with_prefix("&&");
        let result = extract_abbreviation("text &&div>span", None, &options);
        assert_eq!(
            result,
            Some(ExtractedAbbreviation {
                abbreviation: "div>span".into(),
                location: 7,
                start: 5,
                end: 15,
            })
        );
        assert_eq!(extract_abbreviation("div", None, &options), None);
    }

    #[test]
    fn test_pos_is_clamped() {
        let result = extract_abbreviation("ul", Some(99), &ExtractOptions::default());
        assert_eq!(result.map(|r| r.end), Some(2));
    }
}
