//! Unrolls a parsed markup tree into [`AbbreviationNode`]s
//!
//! Repeated statements are cloned once per repeat with the repeater state
//! pushed on a stack, so numbering tokens inside resolve against the
//! innermost active repeater. Groups disappear: their statements are spliced
//! into the parent and inherit the group repeater.

use std::collections::HashMap;

use super::stringify::{stringify_name, stringify_value};
use super::text::{insert_href, insert_text};
use crate::config::TextInput;
use crate::syntax::ast::{
    Abbreviation, AbbreviationNode, Attribute, AttributeValueType, TokenAttribute, TokenElement,
    TokenGroup, TokenStatement, ValueToken,
};
use crate::tokens::markup::{BracketContext, Token};
use crate::tokens::Repeater;

/// Inputs of one conversion beyond the tree itself
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions<'a> {
    /// Text to wrap: one entry per implicit repeat, or a block for the deepest node
    pub text: Option<&'a TextInput>,
    pub variables: Option<&'a HashMap<String, String>>,
    /// Total clone budget; `None` or 0 means unlimited
    pub max_repeat: Option<usize>,
    /// Turn inserted URL or e-mail text into the `href` of an `<a>`
    pub href: bool,
}

/// Mutable state threaded through one conversion
pub struct ConvertState<'a> {
    /// A `$#` placeholder or implicit repeater already consumed the text
    pub inserted: bool,
    pub repeaters: Vec<Repeater>,
    text: Option<&'a TextInput>,
    clean_text: Vec<String>,
    text_inserted: bool,
    repeat_guard: usize,
    variables: Option<&'a HashMap<String, String>>,
}

impl<'a> ConvertState<'a> {
    pub fn new(options: &ConvertOptions<'a>) -> Self {
        let clean_text = match options.text {
            Some(TextInput::Lines(lines)) => lines
                .iter()
                .filter(|line| !line.trim().is_empty())
                .cloned()
                .collect(),
            _ => Vec::new(),
        };

        Self {
            inserted: false,
            repeaters: Vec::new(),
            text: options.text,
            clean_text,
            text_inserted: false,
            repeat_guard: match options.max_repeat {
                Some(limit) if limit > 0 => limit,
                _ => usize::MAX,
            },
            variables: options.variables,
        }
    }

    /// Text for the clone at `pos`; the whole text when `pos` is unknown
    pub fn get_text(&mut self, pos: Option<usize>) -> String {
        self.text_inserted = true;
        match self.text {
            Some(TextInput::Lines(lines)) => match pos {
                Some(pos) if pos < self.clean_text.len() => self.clean_text[pos].clone(),
                Some(pos) => lines.get(pos).cloned().unwrap_or_default(),
                None => lines.join("\n"),
            },
            Some(TextInput::Single(text)) => text.clone(),
            None => String::new(),
        }
    }

    /// Variable value, or the variable name when it is not defined
    pub fn variable(&self, name: &str) -> String {
        self.variables
            .and_then(|vars| vars.get(name))
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    fn has_lines(&self) -> bool {
        matches!(self.text, Some(TextInput::Lines(_)))
    }
}

/// Converts a parsed tree into an unrolled abbreviation
pub fn convert(tree: &TokenGroup, options: &ConvertOptions) -> Abbreviation {
    let mut state = ConvertState::new(options);
    let mut abbr = Abbreviation {
        children: convert_group(tree, tree.repeat, &mut state),
    };

    if let Some(text) = options.text {
        if !state.text_inserted {
            if let Some(last) = abbr.children.last_mut() {
                let deepest = last.deepest_mut();
                let text = match text {
                    TextInput::Lines(lines) => lines.join("\n"),
                    TextInput::Single(text) => text.clone(),
                };
                insert_text(deepest, &text);
                if options.href && deepest.name.as_deref() == Some("a") {
                    insert_href(deepest, &text);
                }
            }
        }
    }

    abbr
}

fn convert_statement(node: &TokenStatement, state: &mut ConvertState) -> Vec<AbbreviationNode> {
    let Some(original) = node.repeat() else {
        return convert_node(node, None, state);
    };

    let mut repeat = *original;
    repeat.count = if repeat.implicit && state.has_lines() {
        state.clean_text.len()
    } else {
        repeat.count.max(1)
    };

    let mut result = Vec::new();
    state.repeaters.push(repeat);
    for i in 0..repeat.count {
        repeat.value = i;
        if let Some(top) = state.repeaters.last_mut() {
            top.value = i;
        }

        let mut items = convert_node(node, Some(repeat), state);
        if repeat.implicit && !state.inserted {
            let text = state.get_text(Some(i));
            if let Some(last) = items.last_mut() {
                insert_text(last.deepest_mut(), &text);
            }
        }
        result.append(&mut items);

        // At least one clone is produced even when the budget is spent
        state.repeat_guard = state.repeat_guard.saturating_sub(1);
        if state.repeat_guard == 0 {
            break;
        }
    }
    state.repeaters.pop();

    if repeat.implicit {
        state.inserted = true;
    }
    result
}

fn convert_node(
    node: &TokenStatement,
    repeat: Option<Repeater>,
    state: &mut ConvertState,
) -> Vec<AbbreviationNode> {
    match node {
        TokenStatement::Element(elem) => convert_element(elem, repeat, state),
        TokenStatement::Group(group) => convert_group(group, repeat, state),
    }
}

fn convert_element(
    node: &TokenElement,
    repeat: Option<Repeater>,
    state: &mut ConvertState,
) -> Vec<AbbreviationNode> {
    let mut elem = AbbreviationNode {
        name: node.name.as_ref().map(|tokens| stringify_name(tokens, state)),
        value: node.value.as_ref().map(|tokens| stringify_value(tokens, state)),
        attributes: None,
        children: Vec::new(),
        repeat,
        self_closing: node.self_close,
    };

    let mut children = Vec::new();
    for child in &node.elements {
        children.extend(convert_statement(child, state));
    }

    if let Some(attributes) = &node.attributes {
        elem.attributes = Some(
            attributes
                .iter()
                .map(|attr| convert_attribute(attr, state))
                .collect(),
        );
    }

    // Text without fields: children become siblings instead of nesting
    let promote = elem.name.is_none()
        && elem.attributes.is_none()
        && elem
            .value
            .as_ref()
            .is_some_and(|value| !value.iter().any(ValueToken::is_field));

    if promote {
        let mut result = vec![elem];
        result.extend(children);
        result
    } else {
        elem.children = children;
        vec![elem]
    }
}

fn convert_group(
    node: &TokenGroup,
    repeat: Option<Repeater>,
    state: &mut ConvertState,
) -> Vec<AbbreviationNode> {
    let mut result = Vec::new();
    for child in &node.elements {
        result.extend(convert_statement(child, state));
    }

    if let Some(repeat) = repeat {
        for item in result.iter_mut().filter(|item| item.repeat.is_none()) {
            item.repeat = Some(repeat);
        }
    }
    result
}

fn convert_attribute(node: &TokenAttribute, state: &mut ConvertState) -> Attribute {
    let mut value_type = if node.expression {
        AttributeValueType::Expression
    } else {
        AttributeValueType::Raw
    };

    let mut name = node.name.as_ref().map(|tokens| stringify_name(tokens, state));
    let implied = name.as_deref().is_some_and(|n| n.starts_with('!'));
    let boolean = name.as_deref().is_some_and(|n| n.ends_with('.'));
    if let Some(n) = name.as_mut() {
        if boolean {
            n.pop();
        }
        if implied {
            n.remove(0);
        }
    }

    let value = node.value.as_ref().map(|tokens| {
        let mut tokens = tokens.as_slice();
        match tokens.first().map(|t| &t.value) {
            Some(Token::Quote { single }) => {
                let single = *single;
                tokens = &tokens[1..];
                if tokens.last().is_some_and(|t| t.value.is_quote(Some(single))) {
                    tokens = &tokens[..tokens.len() - 1];
                }
                value_type = if single {
                    AttributeValueType::SingleQuote
                } else {
                    AttributeValueType::DoubleQuote
                };
            }
            Some(t) if t.is_bracket(BracketContext::Expression, Some(true)) => {
                value_type = AttributeValueType::Expression;
                tokens = &tokens[1..];
                if tokens
                    .last()
                    .is_some_and(|t| t.value.is_bracket(BracketContext::Expression, Some(false)))
                {
                    tokens = &tokens[..tokens.len() - 1];
                }
            }
            _ => {}
        }
        stringify_value(tokens, state)
    });

    Attribute {
        name,
        value,
        boolean,
        implied,
        value_type,
        multiple: node.multiple,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::markup::tokenize;
    use crate::syntax::markup::{parse, ParserOptions};

    fn unroll_with(abbr: &str, options: &ConvertOptions) -> Abbreviation {
        let tokens = tokenize(abbr).unwrap();
        let tree = parse(&tokens, ParserOptions::default()).unwrap();
        convert(&tree, options)
    }

    fn unroll(abbr: &str) -> Abbreviation {
        unroll_with(abbr, &ConvertOptions::default())
    }

    fn class_of(node: &AbbreviationNode) -> String {
        let attr = node.attribute("class").unwrap();
        crate::syntax::ast::value_to_string(attr.value.as_ref().unwrap())
    }

    #[test]
    fn test_repeat_clones_with_numbering() {
        let abbr = unroll("ul>li.item$*3");
        let ul = &abbr.children[0];
        assert_eq!(ul.children.len(), 3);
        let classes: Vec<String> = ul.children.iter().map(class_of).collect();
        assert_eq!(classes, vec!["item1", "item2", "item3"]);
        assert_eq!(ul.children[2].repeat.unwrap().value, 2);
    }

    #[test]
    fn test_numbering_padding_reverse_and_base() {
        let abbr = unroll("i.a$$@-3*2");
        let classes: Vec<String> = abbr.children.iter().map(class_of).collect();
        assert_eq!(classes, vec!["a04", "a03"]);
    }

    #[test]
    fn test_numbering_against_parent_repeater() {
        let abbr = unroll("ul*2>li.x$@^*2");
        let classes: Vec<String> = abbr
            .children
            .iter()
            .flat_map(|ul| ul.children.iter().map(class_of))
            .collect();
        assert_eq!(classes, vec!["x1", "x2", "x3", "x4"]);
    }

    #[test]
    fn test_group_repeat_is_attached() {
        let abbr = unroll("(a+b)*2");
        assert_eq!(abbr.children.len(), 4);
        assert_eq!(abbr.children[3].repeat.unwrap().value, 1);
    }

    #[test]
    fn test_text_without_fields_promotes_children() {
        let abbr = unroll("{text}>b");
        assert_eq!(abbr.children.len(), 2);
        assert_eq!(abbr.children[1].name.as_deref(), Some("b"));

        let abbr = unroll("{a${0}b}>b");
        assert_eq!(abbr.children.len(), 1);
        assert_eq!(abbr.children[0].children.len(), 1);
    }

    #[test]
    fn test_attribute_flags() {
        let abbr = unroll("a[!href. title='x' data-x={y}]");
        let attrs = abbr.children[0].attributes.as_ref().unwrap();
        assert_eq!(attrs[0].name.as_deref(), Some("href"));
        assert!(attrs[0].implied);
        assert!(attrs[0].boolean);
        assert_eq!(attrs[1].value_type, AttributeValueType::SingleQuote);
        assert_eq!(attrs[1].value, Some(vec![ValueToken::text("x")]));
        assert_eq!(attrs[2].value_type, AttributeValueType::Expression);
    }

    #[test]
    fn test_fields_stay_separate_in_values() {
        let abbr = unroll("a[href='x${1:url}y']");
        let attr = abbr.children[0].attribute("href").unwrap();
        assert_eq!(
            attr.value,
            Some(vec![
                ValueToken::text("x"),
                ValueToken::field(1, "url"),
                ValueToken::text("y"),
            ])
        );
    }

    #[test]
    fn test_variables_are_substituted() {
        let mut vars = HashMap::new();
        vars.insert("lang".to_string(), "fr".to_string());
        let options = ConvertOptions {
            variables: Some(&vars),
            ..Default::default()
        };
        let abbr = unroll_with("html[lang=${lang} dir=${dir}]", &options);
        let node = &abbr.children[0];
        assert_eq!(node.attribute("lang").unwrap().value, Some(vec![ValueToken::text("fr")]));
        assert_eq!(node.attribute("dir").unwrap().value, Some(vec![ValueToken::text("dir")]));
    }

    #[test]
    fn test_implicit_repeat_uses_text_lines() {
        let text = TextInput::Lines(vec!["one".into(), "  ".into(), "two".into()]);
        let options = ConvertOptions {
            text: Some(&text),
            ..Default::default()
        };
        let abbr = unroll_with("ul>li*", &options);
        let items = &abbr.children[0].children;
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].value, Some(vec![ValueToken::text("two")]));
    }

    #[test]
    fn test_placeholder_takes_text_line() {
        let text = TextInput::Lines(vec!["a".into(), "b".into()]);
        let options = ConvertOptions {
            text: Some(&text),
            ..Default::default()
        };
        let abbr = unroll_with("li.item-$#*", &options);
        let classes: Vec<String> = abbr.children.iter().map(class_of).collect();
        assert_eq!(classes, vec!["item-a", "item-b"]);
        assert!(abbr.children[0].value.is_none());
    }

    #[test]
    fn test_text_goes_to_deepest_node_with_href() {
        let text = TextInput::Single("www.example.com".into());
        let options = ConvertOptions {
            text: Some(&text),
            href: true,
            ..Default::default()
        };
        let abbr = unroll_with("p>a", &options);
        let a = &abbr.children[0].children[0];
        assert_eq!(a.value, Some(vec![ValueToken::text("www.example.com")]));
        assert_eq!(
            a.attribute("href").unwrap().value,
            Some(vec![ValueToken::text("http://www.example.com")])
        );
    }

    #[test]
    fn test_repeat_guard_limits_clones() {
        let options = ConvertOptions {
            max_repeat: Some(3),
            ..Default::default()
        };
        let abbr = unroll_with("li*10", &options);
        assert_eq!(abbr.children.len(), 3);
    }
}
