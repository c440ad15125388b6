//! XSLT cleanup: `select` and content are mutually exclusive

use crate::syntax::ast::AbbreviationNode;

pub fn xsl(node: &mut AbbreviationNode) {
    let matches_name = matches!(
        node.name.as_deref(),
        Some("xsl:variable" | "xsl:with-param")
    );
    if !matches_name || (node.children.is_empty() && node.value.is_none()) {
        return;
    }
    if let Some(attributes) = node.attributes.as_mut() {
        attributes.retain(|attr| !attr.is_named("select"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ast::{Attribute, ValueToken};

    fn variable() -> AbbreviationNode {
        AbbreviationNode {
            attributes: Some(vec![
                Attribute::new("name", vec![]),
                Attribute::new("select", vec![]),
            ]),
            ..AbbreviationNode::element("xsl:variable")
        }
    }

    #[test]
    fn test_select_dropped_with_content() {
        let mut node = variable();
        node.children.push(AbbreviationNode::element("p"));
        xsl(&mut node);
        assert!(node.attribute("select").is_none());

        let mut node = variable();
        node.value = Some(vec![ValueToken::text("x")]);
        xsl(&mut node);
        assert!(node.attribute("select").is_none());
    }

    #[test]
    fn test_empty_variable_keeps_select() {
        let mut node = variable();
        xsl(&mut node);
        assert!(node.attribute("select").is_some());
    }
}
