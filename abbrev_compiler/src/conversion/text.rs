//! Wrapped-text insertion into unrolled nodes

use regex::Regex;
use std::sync::OnceLock;

use crate::syntax::ast::{AbbreviationNode, Attribute, AttributeValueType, ValueToken};

static URL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static SCHEME_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn matches(cell: &'static OnceLock<Option<Regex>>, pattern: &str, text: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}

pub fn is_url(text: &str) -> bool {
    matches(
        &URL_PATTERN,
        r"^((https?:|ftp:|file:)?//|(www|ftp)\.)[^ ]*$",
        text,
    )
}

pub fn is_email(text: &str) -> bool {
    matches(
        &EMAIL_PATTERN,
        r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,5}$",
        text,
    )
}

/// Appends `text` to the node value, extending its trailing text
pub fn insert_text(node: &mut AbbreviationNode, text: &str) {
    match node.value.as_mut() {
        Some(value) => match value.last_mut() {
            Some(ValueToken::Text(last)) => last.push_str(text),
            _ => value.push(ValueToken::text(text)),
        },
        None => node.value = Some(vec![ValueToken::text(text)]),
    }
}

/// Fills the `href` of a link from URL or e-mail text
pub fn insert_href(node: &mut AbbreviationNode, text: &str) {
    let href = if is_url(text) {
        if matches(&SCHEME_PATTERN, r"\w+:", text) || text.starts_with("//") {
            text.to_string()
        } else {
            format!("http://{}", text)
        }
    } else if is_email(text) {
        format!("mailto:{}", text)
    } else {
        String::new()
    };

    match node.attribute_mut("href") {
        Some(attr) => {
            if attr.value.is_none() {
                attr.value = Some(vec![ValueToken::Text(href)]);
            }
        }
        None => {
            let attr = Attribute {
                value_type: AttributeValueType::DoubleQuote,
                ..Attribute::new("href", vec![ValueToken::Text(href)])
            };
            node.attributes.get_or_insert_with(Vec::new).push(attr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_text_extends_last_text() {
        let mut node = AbbreviationNode::element("p");
        insert_text(&mut node, "a");
        insert_text(&mut node, "b");
        assert_eq!(node.value, Some(vec![ValueToken::text("ab")]));

        node.value = Some(vec![ValueToken::field(1, "")]);
        insert_text(&mut node, "c");
        assert_eq!(node.value.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_href_from_url_and_email() {
        let mut link = AbbreviationNode::element("a");
        insert_href(&mut link, "https://example.com");
        assert_eq!(
            link.attribute("href").unwrap().value,
            Some(vec![ValueToken::text("https://example.com")])
        );

        let mut link = AbbreviationNode::element("a");
        insert_href(&mut link, "me@example.org");
        assert_eq!(
            link.attribute("href").unwrap().value,
            Some(vec![ValueToken::text("mailto:me@example.org")])
        );
    }

    #[test]
    fn test_existing_href_with_value_is_kept() {
        let mut link = AbbreviationNode::element("a");
        link.attributes = Some(vec![Attribute::new("href", vec![ValueToken::text("#")])]);
        insert_href(&mut link, "www.example.com");
        assert_eq!(
            link.attribute("href").unwrap().value,
            Some(vec![ValueToken::text("#")])
        );
    }

    #[test]
    fn test_patterns() {
        assert!(is_url("//cdn.example.com/x.js"));
        assert!(is_url("ftp.example.com"));
        assert!(!is_url("hello world"));
        assert!(is_email("a.b@c.io"));
    }
}
