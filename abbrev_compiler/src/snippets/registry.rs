//! Stylesheet snippet registry
//!
//! A stylesheet snippet is either a CSS property with `|`-separated value
//! alternatives (`pos: position:relative|absolute`) or raw text emitted
//! as-is (`@f: @font-face {...}`). Properties are nested so that a shorthand
//! knows its longhands: `background` depends on `background-position`,
//! which depends on `background-position-x`. Keywords of dependencies are
//! searched after the shorthand's own.

use regex::Regex;
use std::sync::{Arc, OnceLock};

use super::error::{SnippetError, SnippetResult};
use crate::config::SnippetTable;
use crate::syntax::ast::{CssToken, CssValue, CssValueToken};
use crate::{lexical, log_debug, log_warning, syntax};

static PROPERTY_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn property_pattern() -> Option<&'static Regex> {
    PROPERTY_PATTERN
        .get_or_init(|| Regex::new(r"^([a-z-]+)(?:\s*:\s*([^\n\r;]+?);*)?$").ok())
        .as_ref()
}

// ============================================================================
// SNIPPET MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RawSnippet {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertySnippet {
    pub key: String,
    pub property: String,
    /// Value alternatives, each a comma-separated value list
    pub value: Vec<Vec<CssValue>>,
    /// Keyword name and the token it expands to, in definition order
    pub keywords: Vec<(String, CssToken)>,
    /// Longhands of this property, e.g. `border-width` for `border`
    pub dependencies: Vec<Arc<PropertySnippet>>,
}

impl PropertySnippet {
    pub fn keyword(&self, name: &str) -> Option<&CssToken> {
        self.keywords
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, token)| token)
    }

    pub fn keyword_names(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|(key, _)| key.as_str())
    }

    /// Whether `property` is a longhand of this one (`border` -> `border-top`)
    pub fn is_shorthand_of(&self, property: &str) -> bool {
        property
            .strip_prefix(self.property.as_str())
            .is_some_and(|rest| rest.starts_with('-'))
    }

    fn add_keyword(&mut self, name: String, token: CssToken) {
        match self.keywords.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = token,
            None => self.keywords.push((name, token)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CssSnippet {
    Raw(RawSnippet),
    Property(Arc<PropertySnippet>),
}

impl CssSnippet {
    pub fn key(&self) -> &str {
        match self {
            Self::Raw(snippet) => &snippet.key,
            Self::Property(snippet) => &snippet.key,
        }
    }

    pub fn as_property(&self) -> Option<&Arc<PropertySnippet>> {
        match self {
            Self::Property(snippet) => Some(snippet),
            Self::Raw(_) => None,
        }
    }

    pub fn is_property(&self) -> bool {
        matches!(self, Self::Property(_))
    }
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

/// Parses one `key: value` definition
pub fn create_snippet(key: &str, value: &str) -> SnippetResult<CssSnippet> {
    let captures = property_pattern().and_then(|re| re.captures(value));
    let Some(captures) = captures else {
        return Ok(CssSnippet::Raw(RawSnippet {
            key: key.to_string(),
            value: value.to_string(),
        }));
    };

    let mut snippet = PropertySnippet {
        key: key.to_string(),
        property: captures[1].to_string(),
        value: Vec::new(),
        keywords: Vec::new(),
        dependencies: Vec::new(),
    };

    if let Some(values) = captures.get(2) {
        for alternative in values.as_str().split('|') {
            let parsed = parse_value(key, alternative)?;
            for css_value in &parsed {
                collect_keywords(css_value, &mut snippet);
            }
            snippet.value.push(parsed);
        }
    }

    Ok(CssSnippet::Property(Arc::new(snippet)))
}

fn parse_value(key: &str, value: &str) -> SnippetResult<Vec<CssValue>> {
    let tokens = lexical::stylesheet::tokenize(value.trim(), true)
        .map_err(|err| SnippetError::invalid(key, err))?;
    let properties =
        syntax::stylesheet::parse(&tokens, true).map_err(|err| SnippetError::invalid(key, err))?;

    properties
        .into_iter()
        .next()
        .map(|property| property.value)
        .ok_or_else(|| SnippetError::invalid(key, "empty value"))
}

fn collect_keywords(css_value: &CssValue, snippet: &mut PropertySnippet) {
    for token in &css_value.value {
        match &token.value {
            CssValueToken::Literal(value) => snippet.add_keyword(value.clone(), token.clone()),
            CssValueToken::FunctionCall { name, .. } => {
                snippet.add_keyword(name.clone(), token.clone())
            }
            CssValueToken::Field(field) => {
                let name = field.name.trim();
                if !name.is_empty() {
                    snippet.add_keyword(name.to_string(), CssValueToken::literal(name));
                }
            }
            _ => {}
        }
    }
}

/// Builds the registry from a snippet table; invalid entries are skipped
pub fn convert_snippets(table: &SnippetTable) -> Vec<CssSnippet> {
    let mut result = Vec::with_capacity(table.len());

    for (key, value) in table.iter() {
        match create_snippet(key, value) {
            Ok(snippet) => result.push(snippet),
            Err(err) => {
                log_warning!("Skipping invalid stylesheet snippet",
                    "key" => key,
                    "error" => err
                );
            }
        }
    }

    let result = nest(result);
    log_debug!("Stylesheet snippets converted",
        "snippets" => result.len(),
        "properties" => result.iter().filter(|s| s.is_property()).count()
    );
    result
}

/// Sorts snippets by key and links each shorthand to its longhands
pub fn nest(mut snippets: Vec<CssSnippet>) -> Vec<CssSnippet> {
    snippets.sort_by(|a, b| a.key().cmp(b.key()));

    let mut dependencies: Vec<Vec<usize>> = vec![Vec::new(); snippets.len()];
    let mut stack: Vec<usize> = Vec::new();

    for (ix, snippet) in snippets.iter().enumerate() {
        let Some(current) = snippet.as_property() else {
            continue;
        };

        while let Some(&top) = stack.last() {
            let is_parent = snippets[top]
                .as_property()
                .is_some_and(|prev| prev.is_shorthand_of(&current.property));
            if is_parent {
                dependencies[top].push(ix);
                stack.push(ix);
                break;
            }
            stack.pop();
        }

        if stack.is_empty() {
            stack.push(ix);
        }
    }

    // Longhands have longer names, so building longest first sees every
    // dependency already linked.
    let mut order: Vec<usize> = (0..snippets.len())
        .filter(|&ix| !dependencies[ix].is_empty())
        .collect();
    order.sort_by_key(|&ix| {
        std::cmp::Reverse(
            snippets[ix]
                .as_property()
                .map_or(0, |snippet| snippet.property.len()),
        )
    });

    for ix in order {
        let linked = snippets[ix].as_property().map(|snippet| {
            let mut snippet = PropertySnippet::clone(snippet);
            snippet.dependencies = dependencies[ix]
                .iter()
                .filter_map(|&dep| snippets[dep].as_property().cloned())
                .collect();
            Arc::new(snippet)
        });
        if let Some(linked) = linked {
            snippets[ix] = CssSnippet::Property(linked);
        }
    }

    snippets
}

// ============================================================================
// CACHE
// ============================================================================

/// Converted stylesheet snippets shared between expansions
///
/// The first table seen fills the cache; later calls reuse it regardless
/// of the table they pass.
#[derive(Debug, Default)]
pub struct SnippetCache {
    stylesheet: OnceLock<Vec<CssSnippet>>,
}

impl SnippetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stylesheet_snippets(&self, table: &SnippetTable) -> &[CssSnippet] {
        self.stylesheet.get_or_init(|| convert_snippets(table))
    }

    pub fn is_filled(&self) -> bool {
        self.stylesheet.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn property(snippet: &CssSnippet) -> &PropertySnippet {
        snippet.as_property().expect("property snippet")
    }

    #[test]
    fn test_property_snippet() {
        let snippet = create_snippet("pos", "position:relative|absolute|fixed").unwrap();
        let snippet = property(&snippet);
        assert_eq!(snippet.property, "position");
        assert_eq!(snippet.value.len(), 3);
        assert_eq!(
            snippet.keyword_names().collect::<Vec<_>>(),
            vec!["relative", "absolute", "fixed"]
        );
    }

    #[test]
    fn test_property_without_value() {
        let snippet = create_snippet("p", "padding").unwrap();
        assert!(property(&snippet).value.is_empty());
    }

    #[test]
    fn test_raw_snippet() {
        let snippet = create_snippet("@f", "@font-face {\n\tfont-family: ${1};\n}").unwrap();
        assert_matches!(snippet, CssSnippet::Raw(RawSnippet { ref key, .. }) if key == "@f");
    }

    #[test]
    fn test_field_names_become_keywords() {
        let snippet = create_snippet("bd", "border:${1:1px} ${2:solid} ${3:#000}").unwrap();
        let snippet = property(&snippet);
        assert_matches!(
            snippet.keyword("solid").map(|t| &t.value),
            Some(CssValueToken::Literal(v)) if v == "solid"
        );
        assert!(snippet.keyword("1px").is_some());
    }

    #[test]
    fn test_function_keyword() {
        let snippet = create_snippet("trf", "transform:scale(${1:x}, ${2:y})").unwrap();
        assert_matches!(
            property(&snippet).keyword("scale").map(|t| &t.value),
            Some(CssValueToken::FunctionCall { name, arguments }) if name == "scale" && arguments.len() == 2
        );
    }

    #[test]
    fn test_nest_links_longhands() {
        let table = SnippetTable::from_pairs(&[
            ("bg", "background:#${1:000}"),
            ("bgp", "background-position:${1:0} ${2:0}"),
            ("bgpx", "background-position-x"),
            ("bd", "border:${1:1px}"),
        ]);
        let snippets = convert_snippets(&table);
        let keys: Vec<&str> = snippets.iter().map(CssSnippet::key).collect();
        assert_eq!(keys, vec!["bd", "bg", "bgp", "bgpx"]);

        let bg = property(&snippets[1]);
        assert_eq!(bg.dependencies.len(), 1);
        assert_eq!(bg.dependencies[0].property, "background-position");
        assert_eq!(bg.dependencies[0].dependencies[0].property, "background-position-x");
        assert!(property(&snippets[0]).dependencies.is_empty());
    }

    #[test]
    fn test_invalid_snippet_is_skipped() {
        let table = SnippetTable::from_pairs(&[("bad", "color:("), ("c", "color:#${1:000}")]);
        let snippets = convert_snippets(&table);
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].key(), "c");
    }

    #[test]
    fn test_cache_fills_once() {
        let cache = SnippetCache::new();
        assert!(!cache.is_filled());
        let table = SnippetTable::from_pairs(&[("c", "color")]);
        assert_eq!(cache.stylesheet_snippets(&table).len(), 1);
        assert_eq!(cache.stylesheet_snippets(&SnippetTable::new()).len(), 1);
        assert!(cache.is_filled());
    }
}
