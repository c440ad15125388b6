//! `<label>` wrapping a form control needs neither `for` nor `id`

use crate::syntax::ast::{AbbreviationNode, Attribute, ValueToken};

pub fn label(node: &mut AbbreviationNode) {
    if node.name.as_deref() != Some("label") {
        return;
    }

    let is_control = |n: &AbbreviationNode| matches!(n.name.as_deref(), Some("input" | "textarea"));
    let Some(input) = node.find_mut(&is_control) else {
        return;
    };
    if let Some(attributes) = input.attributes.as_mut() {
        attributes.retain(|attr| !(attr.is_named("id") && is_empty_attribute(attr)));
    }

    if let Some(attributes) = node.attributes.as_mut() {
        attributes.retain(|attr| !(attr.is_named("for") && is_empty_attribute(attr)));
    }
}

/// No value, or only an unnamed tabstop
fn is_empty_attribute(attr: &Attribute) -> bool {
    match attr.value.as_deref() {
        None => true,
        Some([ValueToken::Field { name, .. }]) => name.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_attr(name: &str, attr: &str, value: Option<Vec<ValueToken>>) -> AbbreviationNode {
        AbbreviationNode {
            attributes: Some(vec![Attribute {
                name: Some(attr.to_string()),
                value,
                ..Attribute::default()
            }]),
            ..AbbreviationNode::element(name)
        }
    }

    #[test]
    fn test_empty_for_and_id_removed() {
        let mut node = with_attr("label", "for", None);
        node.children
            .push(with_attr("input", "id", Some(vec![ValueToken::field(1, "")])));
        label(&mut node);

        assert!(node.attribute("for").is_none());
        assert!(node.children[0].attribute("id").is_none());
    }

    #[test]
    fn test_filled_attributes_kept() {
        let mut node = with_attr("label", "for", Some(vec![ValueToken::text("name")]));
        node.children
            .push(with_attr("textarea", "id", Some(vec![ValueToken::field(1, "name")])));
        label(&mut node);

        assert!(node.attribute("for").is_some());
        assert!(node.children[0].attribute("id").is_some());
    }

    #[test]
    fn test_label_without_control_untouched() {
        let mut node = with_attr("label", "for", None);
        label(&mut node);
        assert!(node.attribute("for").is_some());
    }
}
