//! Abbreviation-to-node conversion
//!
//! Turns the parser's token tree into plain [`AbbreviationNode`]s: tokens
//! become strings, repeaters become clones, groups are spliced away.

pub mod markup;
pub mod stringify;
pub mod text;

pub use markup::{convert, ConvertOptions, ConvertState};
pub use text::{insert_href, insert_text};

use crate::logging::codes;
use crate::syntax::ast::{Abbreviation, AbbreviationNode, TokenGroup};
use crate::{log_debug, log_success};

/// Converts a parsed tree with stage logging
pub fn convert_markup(tree: &TokenGroup, options: &ConvertOptions) -> Abbreviation {
    log_debug!("Starting conversion",
        "statements" => tree.elements.len(),
        "has_text" => options.text.is_some()
    );

    let abbr = convert(tree, options);

    log_success!(codes::success::CONVERSION_COMPLETE, "Abbreviation unrolled",
        "nodes" => count_nodes(&abbr.children)
    );
    abbr
}

/// Total number of nodes in a forest
pub fn count_nodes(nodes: &[AbbreviationNode]) -> usize {
    nodes
        .iter()
        .map(|node| 1 + count_nodes(&node.children))
        .sum()
}
