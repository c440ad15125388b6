//! Resolution of parsed stylesheet abbreviations against snippets
//!
//! Each property name is fuzzy-matched to a snippet key. A matched
//! property snippet renames the node and expands keyword shorthands in its
//! value (`pos:a` -> `position: absolute`); a matched raw snippet replaces
//! the node with the snippet text. Unitless numbers then receive the
//! configured int or float unit.

use regex::Regex;
use std::sync::OnceLock;

use super::registry::{convert_snippets, CssSnippet, PropertySnippet, RawSnippet};
use super::score::{find_best_match, unmatched_part};
use crate::config::Config;
use crate::syntax::ast::{CssProperty, CssToken, CssValue, CssValueToken};
use crate::utils::Spanned;

static FIELD_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

const GRADIENT_NAME: &str = "lg";

/// Context names that select what an abbreviation may resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssScope {
    /// Every snippet
    Global,
    /// Raw snippets only, e.g. at the top level of a stylesheet
    Section,
    /// Property snippets only
    Property,
    /// Keywords of the property named by the context
    Value,
}

impl CssScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            CssScope::Global => "@@global",
            CssScope::Section => "@@section",
            CssScope::Property => "@@property",
            CssScope::Value => "@@value",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        [Self::Global, Self::Section, Self::Property, Self::Value]
            .into_iter()
            .find(|scope| scope.as_str() == name)
    }
}

/// Whether the abbreviation is a property value rather than a property
///
/// Any context name that is not an `@@` scope is a property name.
pub fn is_value_scope(config: &Config) -> bool {
    config.context.as_ref().is_some_and(|context| {
        context.name == CssScope::Value.as_str() || !context.name.starts_with("@@")
    })
}

fn context_scope(config: &Config) -> Option<CssScope> {
    config
        .context
        .as_ref()
        .and_then(|context| CssScope::parse(&context.name))
}

pub fn snippets_for_scope<'a>(snippets: &'a [CssSnippet], config: &Config) -> Vec<&'a CssSnippet> {
    let scope = context_scope(config);
    snippets
        .iter()
        .filter(|snippet| match scope {
            Some(CssScope::Section) => !snippet.is_property(),
            Some(CssScope::Property) => snippet.is_property(),
            _ => true,
        })
        .collect()
}

/// Resolves parsed properties; unmatched nodes are dropped under strict matching
pub fn resolve_properties(properties: Vec<CssProperty>, config: &Config) -> Vec<CssProperty> {
    let converted;
    let snippets: &[CssSnippet] = match &config.cache {
        Some(cache) => cache.stylesheet_snippets(&config.snippets),
        None => {
            converted = convert_snippets(&config.snippets);
            &converted
        }
    };

    let scoped = snippets_for_scope(snippets, config);
    properties
        .into_iter()
        .filter_map(|node| resolve_node(node, &scoped, config))
        .collect()
}

pub fn resolve_node(
    mut node: CssProperty,
    snippets: &[&CssSnippet],
    config: &Config,
) -> Option<CssProperty> {
    if !resolve_gradient(&mut node, config) {
        let min_score = config.options.stylesheet.fuzzy_search_min_score;

        if is_value_scope(config) {
            let property = config.context.as_ref().map(|c| c.name.as_str());
            let snippet = snippets
                .iter()
                .filter_map(|s| s.as_property())
                .find(|s| Some(s.property.as_str()) == property)
                .cloned();
            resolve_value_keywords(&mut node, config, snippet.as_deref(), min_score);
            node.snippet = snippet.map(CssSnippet::Property);
        } else if let Some(name) = node.name.clone() {
            let snippet = find_best_match(&name, snippets.iter().copied(), CssSnippet::key, min_score, true)
                .cloned();

            if let Some(snippet) = snippet {
                let resolved = match &snippet {
                    CssSnippet::Property(property) => resolve_as_property(&mut node, property, config),
                    CssSnippet::Raw(raw) => resolve_as_snippet(&mut node, raw),
                };
                node.snippet = Some(snippet);
                if !resolved && config.options.stylesheet.strict_match {
                    return None;
                }
            }
        }
    }

    if node.name.is_some() || config.context.is_some() {
        resolve_numeric_value(&mut node, config);
    }
    Some(node)
}

/// `lg(...)` becomes `background-image: linear-gradient(...)`
fn resolve_gradient(node: &mut CssProperty, config: &Config) -> bool {
    let gradient = match node.value.as_slice() {
        [single] => match single.value.as_slice() {
            [token @ Spanned {
                value: CssValueToken::FunctionCall { name, .. },
                ..
            }] if name == GRADIENT_NAME => Some(token.clone()),
            _ => None,
        },
        _ => None,
    };

    if gradient.is_none() && node.name.as_deref() != Some(GRADIENT_NAME) {
        return false;
    }

    let function = match gradient {
        Some(Spanned {
            value: CssValueToken::FunctionCall { arguments, .. },
            span,
        }) => Spanned::new(
            CssValueToken::FunctionCall {
                name: "linear-gradient".to_string(),
                arguments,
            },
            span,
        ),
        _ => Spanned::synthetic(CssValueToken::FunctionCall {
            name: "linear-gradient".to_string(),
            arguments: vec![CssValue::new(vec![CssValueToken::field(0, "")])],
        }),
    };

    if config.context.is_none() {
        node.name = Some("background-image".to_string());
    }
    node.value = vec![CssValue::new(vec![function])];
    true
}

/// Applies a property snippet; false when the abbreviation does not fit it
///
/// Characters of the name left over after matching the key are read as a
/// keyword (`dib` is `d` plus `ib`), which only works when no explicit
/// value was given.
fn resolve_as_property(node: &mut CssProperty, snippet: &PropertySnippet, config: &Config) -> bool {
    let abbr = node.name.clone().unwrap_or_default();
    let inline_value = unmatched_part(&abbr, &snippet.key);

    if !inline_value.is_empty() {
        if !node.value.is_empty() {
            return false;
        }
        let Some(keyword) = resolve_keyword(&inline_value, config, Some(snippet), 0.0) else {
            return false;
        };
        node.value.push(CssValue::new(vec![keyword]));
    }

    node.name = Some(snippet.property.clone());

    if !node.value.is_empty() {
        resolve_value_keywords(node, config, Some(snippet), 0.0);
    } else if let Some(default_value) = snippet.value.first() {
        // Only a choice between alternatives is worth selecting
        node.value = if snippet.value.len() == 1 || default_value.iter().any(has_field) {
            default_value.clone()
        } else {
            default_value
                .iter()
                .map(|value| wrap_with_field(value, config, &mut 1))
                .collect()
        };
    }
    true
}

fn resolve_value_keywords(
    node: &mut CssProperty,
    config: &Config,
    snippet: Option<&PropertySnippet>,
    min_score: f64,
) {
    for css_value in &mut node.value {
        for token in &mut css_value.value {
            let replacement = match &token.value {
                CssValueToken::Literal(value) => resolve_keyword(value, config, snippet, min_score),
                CssValueToken::FunctionCall { name, arguments } => {
                    match resolve_keyword(name, config, snippet, min_score) {
                        Some(Spanned {
                            value:
                                CssValueToken::FunctionCall {
                                    name: matched,
                                    arguments: defaults,
                                },
                            span,
                        }) => {
                            let mut merged = arguments.clone();
                            merged.extend(defaults.into_iter().skip(arguments.len()));
                            Some(Spanned::new(
                                CssValueToken::FunctionCall {
                                    name: matched,
                                    arguments: merged,
                                },
                                span,
                            ))
                        }
                        _ => None,
                    }
                }
                _ => None,
            };

            if let Some(replacement) = replacement {
                *token = replacement;
            }
        }
    }
}

/// Keyword of the snippet, then of its longhands, then a global keyword
fn resolve_keyword(
    keyword: &str,
    config: &Config,
    snippet: Option<&PropertySnippet>,
    min_score: f64,
) -> Option<CssToken> {
    if let Some(snippet) = snippet {
        let candidates = std::iter::once(snippet).chain(snippet.dependencies.iter().map(|d| d.as_ref()));
        for candidate in candidates {
            let names: Vec<&str> = candidate.keyword_names().collect();
            if let Some(name) = find_best_match(keyword, names.iter(), |k| *k, min_score, false) {
                return candidate.keyword(name).cloned();
            }
        }
    }

    find_best_match(
        keyword,
        config.options.stylesheet.keywords.iter(),
        String::as_str,
        min_score,
        false,
    )
    .map(|name| CssValueToken::literal(name.as_str()))
}

/// Splices a raw snippet, feeding input values into its tabstops
fn resolve_as_snippet(node: &mut CssProperty, snippet: &RawSnippet) -> bool {
    let mut input = node
        .value
        .first()
        .map(|value| value.value.clone())
        .unwrap_or_default()
        .into_iter();
    let mut output = Vec::new();
    let mut offset = 0;

    let pattern = FIELD_PATTERN
        .get_or_init(|| Regex::new(r"\$\{(\d+)(:[^}]+)?\}").ok())
        .as_ref();

    if let Some(pattern) = pattern {
        for captures in pattern.captures_iter(&snippet.value) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            if offset != whole.start() {
                output.push(CssValueToken::literal(&snippet.value[offset..whole.start()]));
            }
            offset = whole.end();

            let token = input.next().unwrap_or_else(|| {
                let index = captures[1].parse().unwrap_or(0);
                let name = captures.get(2).map_or("", |m| &m.as_str()[1..]);
                CssValueToken::field(index, name)
            });
            output.push(token);
        }
    }

    if offset < snippet.value.len() {
        output.push(CssValueToken::literal(&snippet.value[offset..]));
    }

    node.name = None;
    node.value = vec![CssValue::new(output)];
    true
}

fn resolve_numeric_value(node: &mut CssProperty, config: &Config) {
    let options = &config.options.stylesheet;
    let unitless = node
        .name
        .as_ref()
        .is_some_and(|name| options.unitless.contains(name));

    for css_value in &mut node.value {
        for token in &mut css_value.value {
            let CssValueToken::Number(number) = &mut token.value else {
                continue;
            };
            if !number.unit.is_empty() {
                if let Some(alias) = options.unit_aliases.get(&number.unit) {
                    number.unit = alias.clone();
                }
            } else if number.value != 0.0 && !unitless {
                number.unit = if number.raw_value.contains('.') {
                    options.float_unit.clone()
                } else {
                    options.int_unit.clone()
                };
            }
        }
    }
}

fn has_field(value: &CssValue) -> bool {
    value.value.iter().any(|token| match &token.value {
        CssValueToken::Field(_) => true,
        CssValueToken::FunctionCall { arguments, .. } => arguments.iter().any(has_field),
        _ => false,
    })
}

/// Turns every value token into a numbered tabstop holding its text
fn wrap_with_field(value: &CssValue, config: &Config, index: &mut usize) -> CssValue {
    let mut result = Vec::new();

    for token in &value.value {
        match &token.value {
            CssValueToken::Color(color) => result.push(next_field(
                color.to_css(config.options.stylesheet.short_hex),
                index,
            )),
            CssValueToken::Literal(text) => result.push(next_field(text.clone(), index)),
            CssValueToken::Number(number) => {
                result.push(next_field(format!("{}{}", number.value, number.unit), index))
            }
            CssValueToken::String { value, single } => {
                let quote = if *single { '\'' } else { '"' };
                result.push(next_field(format!("{}{}{}", quote, value, quote), index));
            }
            CssValueToken::FunctionCall { name, arguments } => {
                result.push(next_field(name.clone(), index));
                result.push(CssValueToken::literal("("));
                for (i, argument) in arguments.iter().enumerate() {
                    result.extend(wrap_with_field(argument, config, index).value);
                    if i + 1 != arguments.len() {
                        result.push(CssValueToken::literal(", "));
                    }
                }
                result.push(CssValueToken::literal(")"));
            }
            _ => result.push(token.clone()),
        }
    }

    CssValue::new(result)
}

fn next_field(text: String, index: &mut usize) -> CssToken {
    let field = CssValueToken::field(*index, text);
    *index += 1;
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve::resolve;
    use crate::config::{AbbreviationContext, PartialConfig, SnippetTable};
    use crate::tokens::Field;
    use assert_matches::assert_matches;

    fn config(snippets: &[(&str, &str)]) -> Config {
        let mut config = resolve(PartialConfig::stylesheet("css")).unwrap();
        config.snippets = SnippetTable::from_pairs(snippets);
        config
    }

    const SNIPPETS: &[(&str, &str)] = &[
        ("p", "padding"),
        ("pos", "position:relative|absolute"),
        ("c", "color:${1:#000}"),
        ("lh", "line-height"),
        ("fl", "float:left|right|none"),
        ("@f", "@font-face {\n\tfont-family: ${1};\n\tsrc: url(${2});\n}"),
    ];

    fn resolve_abbr(abbr: &str, config: &Config) -> Vec<CssProperty> {
        let tokens = crate::lexical::stylesheet::tokenize(abbr, is_value_scope(config)).unwrap();
        let parsed = crate::syntax::stylesheet::parse(&tokens, is_value_scope(config)).unwrap();
        resolve_properties(parsed, config)
    }

    fn single_token(node: &CssProperty) -> &CssValueToken {
        &node.value[0].value[0].value
    }

    #[test]
    fn test_property_with_number_gets_unit() {
        let config = config(SNIPPETS);
        let result = resolve_abbr("p10", &config);
        assert_eq!(result[0].name.as_deref(), Some("padding"));
        assert_matches!(single_token(&result[0]), CssValueToken::Number(n) if n.unit == "px");

        let result = resolve_abbr("p1.5", &config);
        assert_matches!(single_token(&result[0]), CssValueToken::Number(n) if n.unit == "em");

        let result = resolve_abbr("p2r", &config);
        assert_matches!(single_token(&result[0]), CssValueToken::Number(n) if n.unit == "rem");
    }

    #[test]
    fn test_unitless_property() {
        let config = config(SNIPPETS);
        let result = resolve_abbr("lh1.5", &config);
        assert_eq!(result[0].name.as_deref(), Some("line-height"));
        assert_matches!(single_token(&result[0]), CssValueToken::Number(n) if n.unit.is_empty());
    }

    #[test]
    fn test_unmatched_tail_is_keyword() {
        let config = config(SNIPPETS);
        let result = resolve_abbr("poa", &config);
        assert_eq!(result[0].name.as_deref(), Some("position"));
        assert_matches!(single_token(&result[0]), CssValueToken::Literal(v) if v == "absolute");
    }

    #[test]
    fn test_alternatives_become_tabstops() {
        let config = config(SNIPPETS);
        let result = resolve_abbr("pos", &config);
        assert_eq!(
            single_token(&result[0]),
            &CssValueToken::Field(Field::new(1, "relative"))
        );

        let result = resolve_abbr("c", &config);
        assert_eq!(
            single_token(&result[0]),
            &CssValueToken::Field(Field::new(1, "#000"))
        );
    }

    #[test]
    fn test_strict_match_drops_unresolved() {
        let mut config = config(SNIPPETS);
        let result = resolve_abbr("poz", &config);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name.as_deref(), Some("poz"));

        config.options.stylesheet.strict_match = true;
        assert!(resolve_abbr("poz", &config).is_empty());
    }

    #[test]
    fn test_raw_snippet_takes_input_values() {
        let config = config(SNIPPETS);
        let result = resolve_abbr("@f", &config);
        assert_eq!(result[0].name, None);
        assert_eq!(result[0].value[0].value.len(), 5);
        assert_eq!(
            result[0].value[0].value[1].value,
            CssValueToken::Field(Field::new(1, ""))
        );
        assert_matches!(result[0].snippet, Some(CssSnippet::Raw(_)));
    }

    #[test]
    fn test_gradient() {
        let config = config(SNIPPETS);
        let result = resolve_abbr("lg(red, blue)", &config);
        assert_eq!(result[0].name.as_deref(), Some("background-image"));
        assert_matches!(
            single_token(&result[0]),
            CssValueToken::FunctionCall { name, arguments } if name == "linear-gradient" && arguments.len() == 2
        );
    }

    #[test]
    fn test_value_scope_uses_context_property() {
        let mut config = config(SNIPPETS);
        config.context = Some(AbbreviationContext::new("float"));
        let result = resolve_abbr("r", &config);
        assert_eq!(result[0].name, None);
        assert_matches!(single_token(&result[0]), CssValueToken::Literal(v) if v == "right");
        assert!(result[0].snippet.is_some());
    }

    #[test]
    fn test_scope_filters() {
        let mut config = config(SNIPPETS);
        let snippets = convert_snippets(&config.snippets);

        config.context = Some(AbbreviationContext::new("@@section"));
        assert!(!is_value_scope(&config));
        assert_eq!(snippets_for_scope(&snippets, &config).len(), 1);

        config.context = Some(AbbreviationContext::new("@@property"));
        assert_eq!(snippets_for_scope(&snippets, &config).len(), 5);
    }

    #[test]
    fn test_global_keyword() {
        let config = config(SNIPPETS);
        let result = resolve_abbr("p:a", &config);
        assert_matches!(single_token(&result[0]), CssValueToken::Literal(v) if v == "auto");
    }
}
