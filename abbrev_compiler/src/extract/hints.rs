//! Editor-side checks run before offering an expansion

use crate::config::constants::compile_time::lorem::{MAX_LOREM_MULTIPLIER, MAX_LOREM_WORDS};
use crate::config::SnippetTable;
use crate::snippets::data::HTML_TAGS;
use regex::Regex;
use std::sync::OnceLock;

/// Characters that make a word look like an abbreviation
pub const POSITIVE_SYMBOLS: &[&str] = &[
    ".", "#", "!", ">", "+", "^", "*", "[", "]", "{", "}", "(", ")", "&",
];

/// Fragments that rule a word out
pub const NEGATIVE_SYMBOLS: &[&str] = &["</"];

static LOREM_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static MULTIPLIER_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

/// Whether `word`, typed on `line`, should be offered for expansion
///
/// Doctype and comment lines are skipped, as are runs of `!` other than
/// the `!!!` snippet. The word then has to be a known snippet or tag, carry
/// an abbreviation operator, or ask for lorem text of a sane size.
pub fn is_expandable(line: &str, word: &str, snippets: &SnippetTable) -> bool {
    if line.contains("<!") {
        return false;
    }
    if line.contains("!!") && !line.contains("!!!") {
        return false;
    }
    if line.contains("!!!!") {
        return false;
    }
    if NEGATIVE_SYMBOLS.iter().any(|symbol| word.contains(symbol)) {
        return false;
    }

    let lower = word.to_lowercase();
    let has_lorem = lower.contains("lorem");
    let candidate = snippets.contains_key(word)
        || HTML_TAGS.contains(&lower.as_str())
        || POSITIVE_SYMBOLS.iter().any(|symbol| word.contains(symbol))
        || has_lorem;

    candidate && (!has_lorem || is_lorem_safe(word))
}

/// Rejects lorem requests whose worst-case word count is too large
///
/// `lorem10-200` counts as 200; `li*10>lorem500` multiplies by every
/// repeat, with the product capped at the editor repeat limit.
pub fn is_lorem_safe(word: &str) -> bool {
    let Some(lorem) = LOREM_PATTERN
        .get_or_init(|| Regex::new(r"(?i)lorem[a-z]*(\d+)(?:-(\d+))?").ok())
        .as_ref()
    else {
        return true;
    };

    let parse = |m: Option<regex::Match>| {
        m.and_then(|m| m.as_str().parse::<usize>().ok())
            .unwrap_or(usize::MAX)
    };

    let mut max_count: Option<usize> = None;
    for caps in lorem.captures_iter(word) {
        let first = parse(caps.get(1));
        let second = caps.get(2).map_or(first, |_| parse(caps.get(2)));
        max_count = max_count.max(Some(first.max(second)));
    }

    let Some(max_count) = max_count else {
        return true;
    };
    if max_count > MAX_LOREM_WORDS {
        return false;
    }

    let Some(multiplier) = MULTIPLIER_PATTERN
        .get_or_init(|| Regex::new(r"\*(\d+)").ok())
        .as_ref()
    else {
        return true;
    };

    let mut factors = multiplier
        .captures_iter(word)
        .map(|caps| parse(caps.get(1)))
        .peekable();
    if factors.peek().is_none() {
        return true;
    }

    let total = factors
        .fold(1usize, |product, n| product.saturating_mul(n))
        .min(MAX_LOREM_MULTIPLIER);
    max_count.saturating_mul(total) <= MAX_LOREM_WORDS
}

/// Indents every non-blank line after the first with `base_indent`
///
/// The first line inherits the indentation already present where the
/// expansion is inserted. Line separators are kept as they are.
pub fn add_indentation(text: &str, base_indent: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut first_line = true;

    for line in text.split_inclusive('\n') {
        let (content, separator) = match line.strip_suffix("\r\n") {
            Some(content) => (content, "\r\n"),
            None => match line.strip_suffix('\n') {
                Some(content) => (content, "\n"),
                None => (line, ""),
            },
        };

        if content.trim().is_empty() {
            result.push_str(content);
        } else if first_line {
            result.push_str(content);
            first_line = false;
        } else {
            result.push_str(base_indent);
            result.push_str(content);
        }
        result.push_str(separator);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snippets::data::markup_snippets;

    #[test]
    fn test_expandable_words() {
        let snippets = markup_snippets();
        assert!(is_expandable("ul>li", "ul>li", snippets));
        assert!(is_expandable("div", "div", snippets));
        assert!(is_expandable("link:css", "link:css", snippets));
        assert!(is_expandable("lorem", "lorem", snippets));
        assert!(is_expandable("!!!", "!!!", snippets));
    }

    #[test]
    fn test_rejected_words() {
        let snippets = markup_snippets();
        assert!(!is_expandable("hello", "hello", snippets));
        assert!(!is_expandable("<!DOCTYPE html>", "html", snippets));
        assert!(!is_expandable("a!!", "a!!", snippets));
        assert!(!is_expandable("!!!!", "!!!!", snippets));
        assert!(!is_expandable("</div>", "</div>", snippets));
        assert!(!is_expandable("lorem1000000", "lorem1000000", snippets));
    }

    #[test]
    fn test_lorem_limits() {
        assert!(is_lorem_safe("p"));
        assert!(is_lorem_safe("lorem100000"));
        assert!(!is_lorem_safe("lorem100001"));
        assert!(!is_lorem_safe("lorem10-200000"));
        assert!(is_lorem_safe("li*10>lorem10000"));
        assert!(!is_lorem_safe("li*10>lorem50000"));
        // product capped at 400
        assert!(is_lorem_safe("li*1000*1000>lorem250"));
        assert!(!is_lorem_safe("li*1000*1000>lorem251"));
    }

    #[test]
    fn test_add_indentation() {
        assert_eq!(
            add_indentation("<ul>\n\t<li></li>\n\n</ul>", "    "),
            "<ul>\n    \t<li></li>\n\n    </ul>"
        );
        assert_eq!(add_indentation("<a>\r\n</a>", "\t"), "<a>\r\n\t</a>");
        assert_eq!(add_indentation("", "\t"), "");
    }
}
