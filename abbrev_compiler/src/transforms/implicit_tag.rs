//! Element names for nodes written with attributes only (`.item`, `#main`)

use super::Ancestor;
use crate::config::Config;
use crate::syntax::ast::AbbreviationNode;

/// Conventional child element of a parent tag
fn child_element(parent: &str) -> Option<&'static str> {
    let name = match parent {
        "p" => "span",
        "ul" | "ol" => "li",
        "table" | "tbody" | "thead" | "tfoot" => "tr",
        "tr" => "td",
        "colgroup" => "col",
        "select" | "optgroup" => "option",
        "audio" | "video" => "source",
        "object" => "param",
        "map" => "area",
        _ => return None,
    };
    Some(name)
}

pub fn implicit_tag(node: &mut AbbreviationNode, ancestors: &[Ancestor], config: &Config) {
    if node.name.is_none() && node.attributes.is_some() {
        resolve_implicit_tag(node, ancestors, config);
    }
}

/// Names `node` after its parent, or after the context outside the abbreviation
pub fn resolve_implicit_tag(node: &mut AbbreviationNode, ancestors: &[Ancestor], config: &Config) {
    let parent_name = match ancestors.last() {
        Some(parent) => parent.name.clone().unwrap_or_default(),
        None => config
            .context
            .as_ref()
            .map(|context| context.name.clone())
            .unwrap_or_default(),
    }
    .to_lowercase();

    let name = child_element(&parent_name).unwrap_or_else(|| {
        if config.options.is_inline(&parent_name) {
            "span"
        } else {
            "div"
        }
    });
    node.name = Some(name.to_string());
}
