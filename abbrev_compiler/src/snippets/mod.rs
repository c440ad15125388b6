//! Snippet dictionaries, fuzzy matching and stylesheet resolution
//!
//! Markup snippets are plain abbreviations looked up by exact key and are
//! expanded by [`crate::transforms`]. Stylesheet snippets are converted once
//! into a [`registry`] of properties and raw text, then matched fuzzily by
//! [`stylesheet::resolve_properties`].

pub mod data;
pub mod error;
pub mod registry;
pub mod score;
pub mod stylesheet;

pub use error::{SnippetError, SnippetResult};
pub use registry::{convert_snippets, create_snippet, nest, CssSnippet, PropertySnippet, RawSnippet, SnippetCache};
pub use score::{find_best_match, score_match, unmatched_part};
pub use stylesheet::{is_value_scope, resolve_properties, CssScope};

use crate::config::Config;
use crate::logging::codes;
use crate::syntax::ast::CssProperty;
use crate::{log_debug, log_success};

/// Resolves stylesheet properties with stage logging
pub fn resolve_stylesheet(properties: Vec<CssProperty>, config: &Config) -> Vec<CssProperty> {
    log_debug!("Resolving stylesheet snippets",
        "properties" => properties.len(),
        "cached" => config.cache.as_ref().is_some_and(|c| c.is_filled())
    );

    let resolved = resolve_properties(properties, config);

    log_success!(codes::success::SNIPPETS_RESOLVED, "Stylesheet snippets resolved",
        "properties" => resolved.len(),
        "matched" => resolved.iter().filter(|p| p.snippet.is_some()).count()
    );
    resolved
}

/// Checks snippet error codes and that the built-in registry converts
pub fn init_snippet_registry() -> Result<(), String> {
    let snippet_codes = [
        codes::snippets::INVALID_SNIPPET,
        codes::snippets::RECURSIVE_SNIPPET,
    ];

    for code in &snippet_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Snippet error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    let table = data::stylesheet_snippets();
    let converted = convert_snippets(table);
    if converted.is_empty() {
        return Err("Built-in stylesheet snippets produced an empty registry".to_string());
    }

    log_debug!("Snippet registry initialized",
        "markup" => data::markup_snippets().len(),
        "stylesheet" => converted.len(),
        "skipped" => table.len().saturating_sub(converted.len())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_registry() {
        assert!(init_snippet_registry().is_ok());
    }
}
