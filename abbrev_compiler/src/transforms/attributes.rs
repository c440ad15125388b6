//! Duplicate attribute merging

use std::collections::HashMap;

use crate::config::Config;
use crate::syntax::ast::{push_value_token, AbbreviationNode, Attribute, AttributeValueType, ValueToken};

/// Folds repeated attributes into the first occurrence
///
/// Class values are joined with a space. For other attributes the later
/// value wins unless `output.reverseAttributes` is set; `implied`,
/// `boolean` and an expression value type are never lost.
pub fn merge_attributes(node: &mut AbbreviationNode, config: &Config) {
    let Some(attributes) = node.attributes.take() else {
        return;
    };

    let mut result: Vec<Attribute> = Vec::with_capacity(attributes.len());
    let mut lookup: HashMap<String, usize> = HashMap::new();

    for attr in attributes {
        let Some(name) = attr.name.clone() else {
            result.push(attr);
            continue;
        };

        match lookup.get(&name) {
            Some(&ix) => {
                let prev = &mut result[ix];
                if name == "class" {
                    prev.value = merge_value(prev.value.take(), attr.value, " ");
                } else {
                    merge_declarations(prev, attr, config);
                }
            }
            None => {
                lookup.insert(name, result.len());
                result.push(attr);
            }
        }
    }

    node.attributes = Some(result);
}

fn merge_value(
    prev: Option<Vec<ValueToken>>,
    next: Option<Vec<ValueToken>>,
    glue: &str,
) -> Option<Vec<ValueToken>> {
    match (prev, next) {
        (Some(mut prev), Some(next)) => {
            if !prev.is_empty() {
                push_value_token(&mut prev, ValueToken::text(glue));
            }
            for token in next {
                push_value_token(&mut prev, token);
            }
            Some(prev)
        }
        (prev, next) => prev.or(next),
    }
}

fn merge_declarations(dest: &mut Attribute, src: Attribute, config: &Config) {
    dest.name = src.name;
    if !config.options.output.reverse_attributes {
        dest.value = src.value;
    }
    dest.implied |= src.implied;
    dest.boolean |= src.boolean;
    if dest.value_type != AttributeValueType::Expression {
        dest.value_type = src.value_type;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve::resolve;
    use crate::config::PartialConfig;

    fn node(attributes: Vec<Attribute>) -> AbbreviationNode {
        AbbreviationNode {
            attributes: Some(attributes),
            ..AbbreviationNode::element("div")
        }
    }

    #[test]
    fn test_classes_are_joined() {
        let config = resolve(PartialConfig::default()).unwrap();
        let mut node = node(vec![
            Attribute::new("class", vec![ValueToken::text("a")]),
            Attribute::new("title", vec![ValueToken::text("t")]),
            Attribute::new("class", vec![ValueToken::text("b"), ValueToken::field(1, "")]),
        ]);
        merge_attributes(&mut node, &config);

        let attrs = node.attributes.unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(
            attrs[0].value,
            Some(vec![ValueToken::text("a b"), ValueToken::field(1, "")])
        );
    }

    #[test]
    fn test_later_value_wins_and_flags_stick() {
        let config = resolve(PartialConfig::default()).unwrap();
        let mut first = Attribute::new("id", vec![ValueToken::text("x")]);
        first.implied = true;
        let mut node = node(vec![first, Attribute::new("id", vec![ValueToken::text("y")])]);
        merge_attributes(&mut node, &config);

        let attrs = node.attributes.unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].value, Some(vec![ValueToken::text("y")]));
        assert!(attrs[0].implied);
    }

    #[test]
    fn test_reverse_attributes_keeps_first_value() {
        let mut config = resolve(PartialConfig::default()).unwrap();
        config.options.output.reverse_attributes = true;
        let mut node = node(vec![
            Attribute::new("id", vec![ValueToken::text("x")]),
            Attribute::new("id", vec![ValueToken::text("y")]),
        ]);
        merge_attributes(&mut node, &config);
        assert_eq!(
            node.attributes.unwrap()[0].value,
            Some(vec![ValueToken::text("x")])
        );
    }

    #[test]
    fn test_unnamed_attributes_are_kept() {
        let config = resolve(PartialConfig::default()).unwrap();
        let unnamed = Attribute {
            value: Some(vec![ValueToken::text("v")]),
            ..Attribute::default()
        };
        let mut node = node(vec![unnamed.clone(), unnamed]);
        merge_attributes(&mut node, &config);
        assert_eq!(node.attributes.unwrap().len(), 2);
    }
}
