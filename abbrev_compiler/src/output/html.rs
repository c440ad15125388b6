//! HTML, XML and JSX output

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::comment::{comment_node_after, comment_node_before};
use super::stream::{
    attr_name, attr_quote, has_newline, is_boolean_attribute, is_inline, is_xml_style,
    self_close, should_output_attribute, tag_name, EXPRESSION_END, EXPRESSION_START,
};
use super::{caret, is_snippet, WalkState};
use crate::config::Config;
use crate::syntax::ast::{Abbreviation, AbbreviationNode, Attribute, ValueToken};

static HTML_TAG_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn html_tag_pattern() -> Option<&'static Regex> {
    HTML_TAG_PATTERN
        .get_or_init(|| Regex::new(r"^<([\w\-:]+)[\s>]").ok())
        .as_ref()
}

const RESERVED_KEYWORDS: &[&str] = &[
    "for", "while", "of", "async", "await", "const", "let", "var", "continue", "break",
    "debugger", "do", "export", "import", "in", "instanceof", "new", "return", "switch", "this",
    "throw", "try", "catch", "typeof", "void", "with", "yield",
];

pub fn html(abbr: &Abbreviation, config: &Config) -> String {
    let mut state = WalkState::new(config);
    for (index, node) in abbr.children.iter().enumerate() {
        element(node, index, &abbr.children, None, &mut state);
    }
    state.out.into_string()
}

fn push_children(node: &AbbreviationNode, state: &mut WalkState) {
    for (index, child) in node.children.iter().enumerate() {
        element(child, index, &node.children, Some(node), state);
    }
}

fn element(
    node: &AbbreviationNode,
    index: usize,
    items: &[AbbreviationNode],
    parent: Option<&AbbreviationNode>,
    state: &mut WalkState,
) {
    let config = state.config;
    let format = should_format(node, index, items, parent, config);
    let level = get_indent(parent, config);

    state.out.level += level;
    if format {
        let level = state.out.level;
        state.out.push_newline(level);
    }

    if let Some(raw_name) = &node.name {
        let name = tag_name(raw_name, config);
        comment_node_before(node, state);
        state.out.push_string(&format!("<{}", name));
        for attr in node.attributes.iter().flatten() {
            if should_output_attribute(attr) {
                push_attribute(attr, state);
            }
        }

        if node.self_closing && node.children.is_empty() && node.value.is_none() {
            state.out.push_string(&format!("{}>", self_close(config)));
        } else {
            state.out.push_string(">");
            if !push_snippet(node, state) {
                if let Some(value) = &node.value {
                    let inner_format =
                        value.iter().any(has_newline) || starts_with_block_tag(value, config);
                    push_inner(state, value, inner_format);
                }
                push_children(node, state);
                if node.value.is_none() && node.children.is_empty() {
                    let output = &config.options.output;
                    let inner_format =
                        output.format_leaf_node || output.format_force.contains(raw_name);
                    push_inner(state, &caret(), inner_format);
                }
            }
            state.out.push_string(&format!("</{}>", name));
            comment_node_after(node, state);
        }
    } else if !push_snippet(node, state) {
        if let Some(value) = &node.value {
            state.push_tokens(value);
            push_children(node, state);
        }
    }

    if format && index + 1 == items.len() && parent.is_some() {
        let offset = if is_snippet(parent) { 0 } else { 1 };
        let level = state.out.level.saturating_sub(offset);
        state.out.push_newline(level);
    }
    state.out.level -= level;
}

/// Content of an element, on its own indented line when `format` is set
fn push_inner(state: &mut WalkState, tokens: &[ValueToken], format: bool) {
    if format {
        state.out.level += 1;
        let level = state.out.level;
        state.out.push_newline(level);
    }
    state.push_tokens(tokens);
    if format {
        state.out.level -= 1;
        let level = state.out.level;
        state.out.push_newline(level);
    }
}

fn push_attribute(attr: &Attribute, state: &mut WalkState) {
    let Some(raw_name) = attr.name.as_deref() else {
        return;
    };
    let config = state.config;
    let markup = &config.options.markup;
    let jsx = config.options.jsx.enabled;

    let mut l_quote = attr_quote(attr, config, true);
    let mut r_quote = attr_quote(attr, config, false);
    let name = attr_name(
        multi_value(raw_name, &markup.attributes, attr.multiple).unwrap_or(raw_name),
        config,
    );
    if jsx && attr.multiple {
        l_quote = EXPRESSION_START;
        r_quote = EXPRESSION_END;
    }

    let mut value = attr.value.clone();
    if let Some(prefix) = multi_value(raw_name, &markup.value_prefix, attr.multiple) {
        if let Some([ValueToken::Text(val)]) = attr.value.as_deref() {
            let accessor = if is_prop_key(val) {
                format!("{}.{}", prefix, val)
            } else {
                format!("{}['{}']", prefix, val)
            };
            value = Some(vec![ValueToken::Text(accessor)]);
            if jsx {
                l_quote = EXPRESSION_START;
                r_quote = EXPRESSION_END;
            }
        }
    }

    if is_boolean_attribute(attr, config) && value.is_none() {
        if !config.options.output.compact_boolean {
            value = Some(vec![ValueToken::Text(name.clone())]);
        }
    } else if value.is_none() {
        value = Some(caret());
    }

    state.out.push_string(&format!(" {}", name));
    match value {
        Some(value) => {
            state.out.push_string(&format!("={}", l_quote));
            state.push_tokens(&value);
            state.out.push_string(r_quote);
        }
        None if is_xml_style(config) => {
            state.out.push_string(&format!("={}{}", l_quote, r_quote));
        }
        None => {}
    }
}

/// Value with fields and children: children go in place of the first field
fn push_snippet(node: &AbbreviationNode, state: &mut WalkState) -> bool {
    let Some(value) = node.value.as_deref() else {
        return false;
    };
    if node.children.is_empty() {
        return false;
    }
    let Some(field_ix) = value.iter().position(ValueToken::is_field) else {
        return false;
    };

    state.push_tokens(&value[..field_ix]);
    let line = state.out.line;
    let mut pos = field_ix + 1;
    push_children(node, state);

    if state.out.line != line {
        if let Some(ValueToken::Text(text)) = value.get(pos) {
            state.out.push_string(text.trim_start());
            pos += 1;
        }
    }
    state.push_tokens(&value[pos..]);
    true
}

/// Whether `node` starts on a new line among its siblings `items`
fn should_format(
    node: &AbbreviationNode,
    index: usize,
    items: &[AbbreviationNode],
    parent: Option<&AbbreviationNode>,
    config: &Config,
) -> bool {
    if !config.options.output.format {
        return false;
    }
    if index == 0 && parent.is_none() {
        return false;
    }
    if is_snippet(parent) && items.len() == 1 {
        return false;
    }

    if node.is_snippet() {
        let value = node.value.as_deref().unwrap_or_default();
        let sibling_snippet = (index > 0 && is_snippet(items.get(index - 1)))
            || is_snippet(items.get(index + 1));
        if sibling_snippet
            || value.iter().any(has_newline)
            || (value.iter().any(ValueToken::is_field) && !node.children.is_empty())
        {
            return true;
        }
    }

    if !is_inline(node, config) {
        return true;
    }

    if index == 0 {
        if items.iter().any(|item| !is_inline(item, config)) {
            return true;
        }
    } else if !is_inline(&items[index - 1], config) {
        return true;
    }

    let inline_break = config.options.output.inline_break;
    if inline_break > 0 {
        let before = items[..index]
            .iter()
            .rev()
            .take_while(|item| is_inline(item, config))
            .count();
        let after = items[index + 1..]
            .iter()
            .take_while(|item| is_inline(item, config))
            .count();
        if 1 + before + after >= inline_break {
            return true;
        }
    }

    node.children
        .iter()
        .enumerate()
        .any(|(i, child)| should_format(child, i, &node.children, parent, config))
}

fn get_indent(parent: Option<&AbbreviationNode>, config: &Config) -> usize {
    match parent {
        None => 0,
        Some(parent) if parent.is_snippet() => 0,
        Some(AbbreviationNode {
            name: Some(name), ..
        }) if config.options.output.format_skip.contains(name) => 0,
        Some(_) => 1,
    }
}

fn starts_with_block_tag(value: &[ValueToken], config: &Config) -> bool {
    let Some(ValueToken::Text(first)) = value.first() else {
        return false;
    };
    html_tag_pattern()
        .and_then(|re| re.captures(first))
        .is_some_and(|m| !config.options.is_inline(&m[1]))
}

fn multi_value<'m>(key: &str, data: &'m HashMap<String, String>, multiple: bool) -> Option<&'m str> {
    let multi = multiple
        .then(|| data.get(&format!("{}*", key)))
        .flatten()
        .filter(|v| !v.is_empty());
    multi
        .or_else(|| data.get(key).filter(|v| !v.is_empty()))
        .map(String::as_str)
}

fn is_prop_key(name: &str) -> bool {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    valid_start
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_KEYWORDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve::resolve;
    use crate::config::PartialConfig;
    use crate::transforms::snippets::parse_snippet;
    use crate::transforms::transform_markup;

    fn expand_with(abbr: &str, partial: PartialConfig) -> String {
        let config = resolve(partial).unwrap();
        let mut tree = parse_snippet("test", abbr, &config).unwrap();
        transform_markup(&mut tree, &config);
        html(&tree, &config)
    }

    fn expand(abbr: &str) -> String {
        expand_with(abbr, PartialConfig::default())
    }

    #[test]
    fn test_nested_list() {
        assert_eq!(
            expand("div>ul>li*3"),
            "<div>\n\t<ul>\n\t\t<li></li>\n\t\t<li></li>\n\t\t<li></li>\n\t</ul>\n</div>"
        );
    }

    #[test]
    fn test_numbered_classes() {
        assert_eq!(
            expand("ul>li.item$*3"),
            "<ul>\n\t<li class=\"item1\"></li>\n\t<li class=\"item2\"></li>\n\t<li class=\"item3\"></li>\n</ul>"
        );
    }

    #[test]
    fn test_inline_siblings_stay_on_line() {
        assert_eq!(expand("p>span+em"), "<p><span></span><em></em></p>");
        assert_eq!(
            expand("p>i+b+em"),
            "<p>\n\t<i></i>\n\t<b></b>\n\t<em></em>\n</p>"
        );
    }

    #[test]
    fn test_implicit_inline_child() {
        assert_eq!(expand("span>.a"), "<span><span class=\"a\"></span></span>");
    }

    #[test]
    fn test_empty_attribute_gets_caret() {
        assert_eq!(expand("a"), "<a href=\"\"></a>");
    }

    #[test]
    fn test_self_closing_styles() {
        assert_eq!(expand("img"), "<img src=\"\" alt=\"\">");
        assert_eq!(
            expand_with("img", PartialConfig::markup("xhtml")),
            "<img src=\"\" alt=\"\" />"
        );
    }

    #[test]
    fn test_boolean_attributes() {
        assert_eq!(expand("div[checked]"), "<div checked=\"checked\"></div>");
        let partial = PartialConfig::default().with_option("output.compactBoolean", true);
        assert_eq!(expand_with("div[checked]", partial), "<div checked></div>");
    }

    #[test]
    fn test_text_content() {
        assert_eq!(expand("div{foo}"), "<div>foo</div>");
        assert_eq!(expand("div>{a}+{b}"), "<div>\n\ta\n\tb\n</div>");
    }

    #[test]
    fn test_comment_after_element() {
        let partial = PartialConfig::default().with_option("comment.enabled", true);
        assert_eq!(
            expand_with("div#main", partial),
            "<div id=\"main\"></div>\n<!-- /#main -->"
        );
    }

    #[test]
    fn test_jsx_attributes() {
        assert_eq!(
            expand_with("div.a", PartialConfig::markup("jsx")),
            "<div className=\"a\"></div>"
        );
    }

    #[test]
    fn test_tag_case() {
        let partial = PartialConfig::default().with_option("output.tagCase", "upper");
        assert_eq!(expand_with("div", partial), "<DIV></DIV>");
    }

    #[test]
    fn test_deterministic_output() {
        let config = resolve(PartialConfig::default()).unwrap();
        let mut tree = parse_snippet("test", "ul>li.a$*2>span{x}", &config).unwrap();
        transform_markup(&mut tree, &config);
        assert_eq!(html(&tree, &config), html(&tree, &config));
    }

    #[test]
    fn test_prop_keys() {
        assert!(is_prop_key("foo_1"));
        assert!(!is_prop_key("for"));
        assert!(!is_prop_key("foo-bar"));
    }
}
