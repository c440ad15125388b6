//! Merges caller configuration with built-in syntax defaults
//!
//! Precedence, lowest first: base defaults, syntax-type defaults, syntax
//! defaults, global overrides for the type, global overrides for the syntax,
//! and finally the caller's own values.

use serde_json::{json, Value};

use super::options::{
    Config, ConfigError, GlobalConfig, OptionOverrides, Options, PartialConfig, SnippetTable,
    SyntaxOverrides, SyntaxType,
};
use crate::snippets::data;

/// Built-in data for a syntax type (`markup`) or dialect (`jsx`)
pub fn syntax_defaults(name: &str) -> Option<SyntaxOverrides> {
    let (snippets, options): (Option<&SnippetTable>, Value) = match name {
        "markup" => (Some(data::markup_snippets()), json!({})),
        "stylesheet" => (Some(data::stylesheet_snippets()), json!({})),
        "xhtml" => (None, json!({ "output.selfClosingStyle": "xhtml" })),
        "xml" => (None, json!({ "output.selfClosingStyle": "xml" })),
        "xsl" => (
            Some(data::xsl_snippets()),
            json!({ "output.selfClosingStyle": "xml" }),
        ),
        "jsx" => (
            None,
            json!({
                "jsx.enabled": true,
                "markup.attributes": {
                    "class": "className",
                    "class*": "styleName",
                    "for": "htmlFor"
                },
                "markup.valuePrefix": { "class*": "styles" }
            }),
        ),
        "vue" => (None, json!({ "markup.attributes": { "class*": ":class" } })),
        "svelte" => (None, json!({ "jsx.enabled": true })),
        "pug" => (Some(data::pug_snippets()), json!({})),
        "sass" => (None, json!({ "stylesheet.after": "" })),
        "stylus" => (
            None,
            json!({ "stylesheet.between": " ", "stylesheet.after": "" }),
        ),
        _ => return None,
    };

    let options: OptionOverrides = match options {
        Value::Object(map) => map,
        _ => OptionOverrides::new(),
    };

    Some(SyntaxOverrides {
        variables: Default::default(),
        snippets: snippets.cloned().unwrap_or_default(),
        options,
    })
}

/// Produces the read-only configuration for one expansion
pub fn resolve_config(user: PartialConfig, globals: &GlobalConfig) -> Result<Config, ConfigError> {
    let syntax_type = user.syntax_type.unwrap_or_default();
    let syntax = user
        .syntax
        .clone()
        .unwrap_or_else(|| syntax_type.default_syntax().to_string());

    let type_defaults = syntax_defaults(syntax_type.as_str());
    let dialect_defaults = syntax_defaults(&syntax);
    let caller = SyntaxOverrides {
        variables: user.variables,
        snippets: user.snippets,
        options: user.options,
    };

    let layers: Vec<&SyntaxOverrides> = [
        type_defaults.as_ref(),
        dialect_defaults.as_ref(),
        globals.get(syntax_type.as_str()),
        globals.get(&syntax),
        Some(&caller),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut variables: std::collections::HashMap<String, String> = data::DEFAULT_VARIABLES
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut snippets = SnippetTable::new();
    let mut options = Options::default();

    for layer in layers {
        variables.extend(layer.variables.clone());
        snippets.extend(&layer.snippets);
        options = options.with_overrides(&layer.options)?;
    }

    crate::log_debug!("Resolved configuration",
        "type" => syntax_type.as_str(),
        "syntax" => &syntax,
        "snippets" => snippets.len()
    );

    Ok(Config {
        syntax_type,
        syntax,
        variables,
        snippets,
        options,
        context: user.context,
        text: user.text,
        max_repeat: user.max_repeat,
        lorem_seed: user.lorem_seed,
        hooks: user.hooks,
        cache: user.cache,
    })
}

/// Convenience for callers with no global overrides
pub fn resolve(user: PartialConfig) -> Result<Config, ConfigError> {
    resolve_config(user, &GlobalConfig::default())
}

impl SyntaxType {
    /// Syntax type a dialect belongs to, if the dialect is known
    pub fn of_syntax(syntax: &str) -> Option<SyntaxType> {
        match syntax {
            "html" | "xhtml" | "xml" | "xsl" | "jsx" | "vue" | "svelte" | "haml" | "slim"
            | "pug" => Some(SyntaxType::Markup),
            "css" | "scss" | "less" | "sass" | "stylus" | "sss" => Some(SyntaxType::Stylesheet),
            _ => None,
        }
    }
}
