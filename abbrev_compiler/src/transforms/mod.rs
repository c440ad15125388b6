//! Markup tree transformations
//!
//! Runs after snippet resolution and before output. Every node is visited
//! once, parents before children, and sees the chain of nodes above it.

pub mod attributes;
pub mod bem;
pub mod implicit_tag;
pub mod label;
pub mod lorem;
pub mod snippets;
pub mod vocabulary;
pub mod xsl;

pub use bem::BemData;
pub use lorem::LoremGenerator;
pub use snippets::resolve_snippets;

use crate::config::Config;
use crate::conversion::count_nodes;
use crate::logging::codes;
use crate::syntax::ast::{Abbreviation, AbbreviationNode};
use crate::tokens::Repeater;
use crate::{log_debug, log_success};

/// What a transform needs to know about a node above the current one
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ancestor {
    pub name: Option<String>,
    pub repeat: Option<Repeater>,
    /// Present only when BEM expansion is enabled
    pub bem: Option<BemData>,
}

impl Ancestor {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }
}

/// Resolves snippets, then applies every node transform
pub fn transform_markup(abbr: &mut Abbreviation, config: &Config) {
    log_debug!("Resolving markup snippets", "nodes" => count_nodes(&abbr.children));
    resolve_snippets(abbr, config);

    let mut generator = match config.lorem_seed {
        Some(seed) => LoremGenerator::new(seed),
        None => LoremGenerator::random(),
    };
    apply_transforms(abbr, config, &mut generator);

    log_success!(codes::success::TRANSFORMS_APPLIED, "Markup transforms applied",
        "nodes" => count_nodes(&abbr.children),
        "bem" => config.options.bem.enabled
    );
}

/// Applies node transforms to an already resolved tree
pub fn apply_transforms(abbr: &mut Abbreviation, config: &Config, generator: &mut LoremGenerator) {
    let mut ancestors = Vec::new();
    for node in abbr.children.iter_mut() {
        transform_node(node, &mut ancestors, config, generator);
    }
}

fn transform_node(
    node: &mut AbbreviationNode,
    ancestors: &mut Vec<Ancestor>,
    config: &Config,
    generator: &mut LoremGenerator,
) {
    implicit_tag::implicit_tag(node, ancestors, config);
    attributes::merge_attributes(node, config);
    lorem::lorem(node, ancestors, config, generator);
    if config.syntax == "xsl" {
        xsl::xsl(node);
    }
    if config.is_markup() {
        label::label(node);
    }
    let bem = config
        .options
        .bem
        .enabled
        .then(|| bem::bem(node, ancestors, config));

    ancestors.push(Ancestor {
        name: node.name.clone(),
        repeat: node.repeat,
        bem,
    });
    for child in node.children.iter_mut() {
        transform_node(child, ancestors, config, generator);
    }
    ancestors.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve::resolve;
    use crate::config::PartialConfig;
    use crate::syntax::ast::value_to_string;
    use crate::transforms::snippets::parse_snippet;

    fn transformed(abbr: &str, partial: PartialConfig) -> Abbreviation {
        let config = resolve(partial).unwrap();
        let mut abbr = parse_snippet("test", abbr, &config).unwrap();
        transform_markup(&mut abbr, &config);
        abbr
    }

    fn class_of(node: &AbbreviationNode) -> String {
        node.attribute("class")
            .and_then(|a| a.value.as_deref())
            .map(value_to_string)
            .unwrap_or_default()
    }

    #[test]
    fn test_implicit_tags_follow_parents() {
        let abbr = transformed("ul>.item*2", PartialConfig::default());
        let ul = &abbr.children[0];
        assert_eq!(ul.children.len(), 2);
        assert!(ul.children.iter().all(|c| c.name.as_deref() == Some("li")));
    }

    #[test]
    fn test_bem_uses_parent_block() {
        let partial = PartialConfig::default().with_option("bem.enabled", true);
        let abbr = transformed(".card>.-title", partial);
        let card = &abbr.children[0];
        assert_eq!(class_of(card), "card");
        assert_eq!(class_of(&card.children[0]), "card__title");
    }

    #[test]
    fn test_lorem_is_seeded() {
        let partial = || PartialConfig {
            lorem_seed: Some(7),
            ..PartialConfig::default()
        };
        let first = transformed("p>lorem8", partial());
        let second = transformed("p>lorem8", partial());
        assert_eq!(first, second);
        assert!(first.children[0].children[0].name.is_none());
    }

    #[test]
    fn test_xsl_only_for_xsl_syntax() {
        let abbr = transformed(
            "xsl:variable[select=x]>span",
            PartialConfig::markup("xsl"),
        );
        assert!(abbr.children[0].attribute("select").is_none());

        let abbr = transformed("xsl:variable[select=x]>span", PartialConfig::default());
        assert!(abbr.children[0].attribute("select").is_some());
    }
}
