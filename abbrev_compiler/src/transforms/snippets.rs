//! Markup snippet resolution
//!
//! A markup snippet is itself an abbreviation. A node named after a snippet
//! is replaced by the snippet's parsed tree; the node's own attributes go to
//! every top-level node of that tree and its children move under the
//! tree's deepest node.

use crate::config::constants::compile_time::snippets::MAX_SNIPPET_DEPTH;
use crate::config::Config;
use crate::conversion::{convert, ConvertOptions};
use crate::lexical::markup::tokenize;
use crate::snippets::{SnippetError, SnippetResult};
use crate::syntax::ast::{Abbreviation, AbbreviationNode};
use crate::syntax::markup::{parse, ParserOptions};
use crate::{log_debug, log_warning};

/// Replaces snippet references in `abbr` with their expanded trees
pub fn resolve_snippets(abbr: &mut Abbreviation, config: &Config) {
    let mut resolver = SnippetResolver {
        config,
        stack: Vec::new(),
    };
    let children = std::mem::take(&mut abbr.children);
    abbr.children = resolver.walk(children);
}

/// Parses a snippet body the way a user abbreviation is parsed, minus text
pub fn parse_snippet(key: &str, body: &str, config: &Config) -> SnippetResult<Abbreviation> {
    let tokens = tokenize(body).map_err(|e| SnippetError::invalid(key, e))?;
    let tree = parse(
        &tokens,
        ParserOptions {
            jsx: config.options.jsx.enabled,
        },
    )
    .map_err(|e| SnippetError::invalid(key, e))?;

    Ok(convert(
        &tree,
        &ConvertOptions {
            text: None,
            variables: Some(&config.variables),
            max_repeat: config.max_repeat,
            href: config.options.markup.href,
        },
    ))
}

struct SnippetResolver<'a> {
    config: &'a Config,
    /// Bodies being expanded; a body already here is not expanded again
    stack: Vec<&'a str>,
}

impl<'a> SnippetResolver<'a> {
    fn walk(&mut self, nodes: Vec<AbbreviationNode>) -> Vec<AbbreviationNode> {
        let mut result = Vec::with_capacity(nodes.len());

        for mut child in nodes {
            match self.resolve(&child) {
                Some(mut resolved) => {
                    let nested = self.walk(std::mem::take(&mut child.children));
                    if let Some(last) = resolved.last_mut() {
                        last.deepest_mut().children.extend(nested);
                    }
                    result.extend(resolved);
                }
                None => {
                    child.children = self.walk(std::mem::take(&mut child.children));
                    result.push(child);
                }
            }
        }

        result
    }

    fn resolve(&mut self, child: &AbbreviationNode) -> Option<Vec<AbbreviationNode>> {
        let config = self.config;
        let key = child.name.as_deref()?;
        let body = config.snippets.get(key).filter(|body| !body.is_empty())?;

        // `img` -> `img[src alt]/` refers to itself and is a valid snippet
        if self.stack.contains(&body) {
            return None;
        }

        if self.stack.len() >= MAX_SNIPPET_DEPTH {
            let err = SnippetError::RecursiveSnippet {
                key: key.to_string(),
            };
            log_warning!("Snippet nesting too deep, keeping element",
                "code" => err.error_code(),
                "snippet" => key,
                "depth" => self.stack.len()
            );
            return None;
        }

        let abbr = match parse_snippet(key, body, config) {
            Ok(abbr) => abbr,
            Err(err) => {
                log_warning!("Unable to parse snippet, keeping element",
                    "code" => err.error_code(),
                    "snippet" => key,
                    "error" => err.to_string()
                );
                return None;
            }
        };

        self.stack.push(body);
        let mut nodes = self.walk(abbr.children);
        self.stack.pop();

        let reversed = config.options.output.reverse_attributes;
        for top in nodes.iter_mut() {
            if let Some(attributes) = &child.attributes {
                let from = top.attributes.take().unwrap_or_default();
                let to = attributes.clone();
                top.attributes = Some(if reversed {
                    to.into_iter().chain(from).collect()
                } else {
                    from.into_iter().chain(to).collect()
                });
            }
            merge_nodes(child, top);
        }

        log_debug!("Snippet expanded", "snippet" => key, "nodes" => nodes.len());
        Some(nodes)
    }
}

fn merge_nodes(from: &AbbreviationNode, to: &mut AbbreviationNode) {
    if from.self_closing {
        to.self_closing = true;
    }
    if from.value.is_some() {
        to.value = from.value.clone();
    }
    if from.repeat.is_some() {
        to.repeat = from.repeat;
    }
}
