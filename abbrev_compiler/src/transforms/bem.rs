//! BEM class expansion
//!
//! `-name` is an element of the nearest block and `_name` a modifier:
//! `.b>.-e._m` gives `b__e b__e_m`. Each extra dash climbs one more
//! ancestor when looking for the block.

use regex::Regex;
use std::sync::OnceLock;

use super::Ancestor;
use crate::config::{AbbreviationContext, Config};
use crate::syntax::ast::{value_to_string, AbbreviationNode, ValueToken};

static ELEMENT_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static MODIFIER_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn element_pattern() -> Option<&'static Regex> {
    ELEMENT_PATTERN
        .get_or_init(|| Regex::new(r"(?i)^(-+)([a-z0-9]+[a-z0-9-]*)").ok())
        .as_ref()
}

fn modifier_pattern() -> Option<&'static Regex> {
    MODIFIER_PATTERN
        .get_or_init(|| Regex::new(r"(?i)^(_+)([a-z0-9]+[a-z0-9-_]*)").ok())
        .as_ref()
}

fn is_short_notation(class_name: &str) -> bool {
    element_pattern().is_some_and(|re| re.is_match(class_name))
        || modifier_pattern().is_some_and(|re| re.is_match(class_name))
}

/// Class names of a node and the one that names its block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BemData {
    pub class_names: Vec<String>,
    pub block: Option<String>,
}

impl BemData {
    pub fn parse(class_value: &str) -> Self {
        let class_names: Vec<String> = class_value.split_whitespace().map(String::from).collect();
        let block = find_block_name(&class_names);
        Self { class_names, block }
    }

    pub fn of_node(node: &AbbreviationNode) -> Self {
        let class_value = node
            .attributes
            .iter()
            .flatten()
            .find(|attr| attr.is_named("class") && attr.value.is_some())
            .and_then(|attr| attr.value.as_deref())
            .map(value_to_string)
            .unwrap_or_default();
        Self::parse(&class_value)
    }

    fn of_context(context: &AbbreviationContext) -> Self {
        Self::parse(context.attributes.get("class").map_or("", String::as_str))
    }
}

/// Block candidate: `b-name` style first, then anything starting with a letter
///
/// Scanning stops at the first element or modifier class.
fn find_block_name(class_names: &[String]) -> Option<String> {
    let candidate = |filter: &dyn Fn(&[u8]) -> bool| {
        class_names
            .iter()
            .take_while(|cl| !is_short_notation(cl))
            .find(|cl| filter(cl.as_bytes()))
            .cloned()
    };

    candidate(&|b| b.len() > 1 && b[0].is_ascii_alphabetic() && b[1] == b'-')
        .or_else(|| candidate(&|b| b.first().is_some_and(u8::is_ascii_alphabetic)))
}

fn unique(class_names: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(class_names.len());
    for name in class_names {
        if !name.is_empty() && !result.contains(&name) {
            result.push(name);
        }
    }
    result
}

fn update_class(node: &mut AbbreviationNode, value: String) {
    if let Some(attr) = node
        .attributes
        .iter_mut()
        .flatten()
        .find(|attr| attr.is_named("class"))
    {
        attr.value = Some(vec![ValueToken::Text(value)]);
    }
}

/// Expands BEM classes of `node`; returns the block data its children see
pub fn bem(node: &mut AbbreviationNode, ancestors: &[Ancestor], config: &Config) -> BemData {
    let data = expand_class_names(node);
    expand_short_notation(node, &data, ancestors, config);
    data
}

/// `b__el_mod` also gets its base `b__el`
fn expand_class_names(node: &mut AbbreviationNode) -> BemData {
    let mut data = BemData::of_node(node);
    let mut class_names = Vec::new();

    for cl in &data.class_names {
        match cl.find('_') {
            Some(ix) if ix > 0 && !cl.starts_with('-') => {
                class_names.push(cl[..ix].to_string());
                class_names.push(cl[ix..].to_string());
            }
            _ => class_names.push(cl.clone()),
        }
    }

    if !class_names.is_empty() {
        data.class_names = unique(class_names);
        data.block = find_block_name(&data.class_names);
        update_class(node, data.class_names.join(" "));
    }
    data
}

fn expand_short_notation(
    node: &mut AbbreviationNode,
    data: &BemData,
    ancestors: &[Ancestor],
    config: &Config,
) {
    let options = &config.options.bem;
    let path: Vec<Option<&BemData>> = ancestors
        .iter()
        .map(|ancestor| ancestor.bem.as_ref())
        .chain(std::iter::once(Some(data)))
        .collect();
    let mut class_names = Vec::new();

    for original in &data.class_names {
        let mut cl = original.as_str();
        let mut prefix = String::new();

        if let Some(m) = element_pattern().and_then(|re| re.captures(cl)) {
            prefix = format!(
                "{}{}{}",
                block_name(&path, m[1].len(), config.context.as_ref()),
                options.element,
                &m[2]
            );
            class_names.push(prefix.clone());
            let len = m[0].len();
            cl = &cl[len..];
        }

        if let Some(m) = modifier_pattern().and_then(|re| re.captures(cl)) {
            if prefix.is_empty() {
                prefix = block_name(&path, m[1].len(), None);
                class_names.push(prefix.clone());
            }
            class_names.push(format!("{}{}{}", prefix, options.modifier, &m[2]));
            let len = m[0].len();
            cl = &cl[len..];
        }

        if cl == original {
            class_names.push(original.clone());
        }
    }

    let class_names = unique(class_names);
    if !class_names.is_empty() {
        update_class(node, class_names.join(" "));
    }
}

/// Block of the `depth`-th entry from the end of `path`, searching upward
fn block_name(path: &[Option<&BemData>], depth: usize, context: Option<&AbbreviationContext>) -> String {
    let start = path.len().saturating_sub(depth);
    let found = (0..=start)
        .rev()
        .filter_map(|ix| path.get(ix).copied().flatten())
        .find_map(|data| data.block.clone());

    found
        .or_else(|| context.and_then(|context| BemData::of_context(context).block))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve::resolve;
    use crate::config::PartialConfig;
    use crate::syntax::ast::Attribute;

    fn config() -> Config {
        let mut config = resolve(PartialConfig::default()).unwrap();
        config.options.bem.enabled = true;
        config
    }

    fn node(classes: &str) -> AbbreviationNode {
        AbbreviationNode {
            attributes: Some(vec![Attribute::new("class", vec![ValueToken::text(classes)])]),
            ..AbbreviationNode::element("div")
        }
    }

    fn classes(node: &AbbreviationNode) -> String {
        node.attribute("class")
            .and_then(|a| a.value.as_deref())
            .map(value_to_string)
            .unwrap_or_default()
    }

    fn ancestor(classes: &str) -> Ancestor {
        Ancestor {
            bem: Some(BemData::parse(classes)),
            ..Ancestor::named("div")
        }
    }

    #[test]
    fn test_block_candidates() {
        let data = BemData::parse("a b-c");
        assert_eq!(data.block.as_deref(), Some("b-c"));

        let data = BemData::parse("-e block");
        assert_eq!(data.block, None);

        let data = BemData::parse("1x block");
        assert_eq!(data.block.as_deref(), Some("block"));
    }

    #[test]
    fn test_element_of_parent_block() {
        let config = config();
        let mut child = node("-item");
        bem(&mut child, &[ancestor("menu")], &config);
        assert_eq!(classes(&child), "menu__item");
    }

    #[test]
    fn test_element_with_modifier() {
        let config = config();
        let mut child = node("-item_active");
        bem(&mut child, &[ancestor("menu")], &config);
        assert_eq!(classes(&child), "menu__item menu__item_active");
    }

    #[test]
    fn test_modifier_of_own_block() {
        let config = config();
        let mut block = node("menu _wide");
        let data = bem(&mut block, &[], &config);
        assert_eq!(classes(&block), "menu menu_wide");
        assert_eq!(data.block.as_deref(), Some("menu"));
    }

    #[test]
    fn test_extra_dash_climbs() {
        let config = config();
        let mut child = node("--title");
        bem(&mut child, &[ancestor("card"), ancestor("card__body")], &config);
        assert_eq!(classes(&child), "card__title");
    }

    #[test]
    fn test_block_from_context() {
        let mut config = config();
        let mut context = AbbreviationContext::new("div");
        context.attributes.insert("class".into(), "nav".into());
        config.context = Some(context);

        let mut child = node("-link");
        bem(&mut child, &[], &config);
        assert_eq!(classes(&child), "nav__link");
    }

    #[test]
    fn test_full_class_expands_base() {
        let config = config();
        let mut child = node("b__el_mod");
        let data = bem(&mut child, &[], &config);
        assert_eq!(data.class_names, vec!["b", "__el_mod"]);
    }
}
