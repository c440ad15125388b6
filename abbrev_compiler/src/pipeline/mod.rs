mod error;
mod info;
mod result;
mod validation;

// Re-export public types
pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use result::ExpansionResult;
pub use validation::validate_pipeline;

pub use crate::extract::{extract_abbreviation, ExtractOptions, ExtractedAbbreviation};
pub use crate::output::{stringify_markup, stringify_stylesheet};

use crate::config::resolve::resolve_config;
use crate::config::{Config, ExpansionPreferences, GlobalConfig, PartialConfig, SyntaxType};
use crate::conversion::{self, ConvertOptions};
use crate::syntax::ast::{Abbreviation, CssProperty};
use crate::syntax::ParserOptions;
use crate::tokens::{MarkupToken, StyleToken};
use crate::{lexical, snippets, syntax, transforms};
use std::path::Path;
use std::time::Instant;

/// Expands an abbreviation with the caller's configuration
///
/// Unset fields fall back to the `ABBREV_*` environment preferences, and
/// the global TOML file named by `ABBREV_CONFIG` is layered under the
/// caller's options.
pub fn expand_abbreviation(abbr: &str, user: PartialConfig) -> Result<String, PipelineError> {
    let preferences = ExpansionPreferences::default();
    let globals = load_globals(&preferences)?;
    let config = resolve_config(apply_preferences(user, &preferences), &globals)?;
    Ok(expand_with_details(abbr, &config)?.output)
}

/// Expands an abbreviation with an already resolved configuration
pub fn expand(abbr: &str, config: &Config) -> Result<String, PipelineError> {
    Ok(expand_with_details(abbr, config)?.output)
}

/// Expands and reports what was produced
pub fn expand_with_details(abbr: &str, config: &Config) -> Result<ExpansionResult, PipelineError> {
    let start_time = Instant::now();
    crate::log_info!("Expanding abbreviation",
        "abbreviation" => abbr,
        "type" => config.syntax_type.as_str(),
        "syntax" => &config.syntax
    );

    let (output, node_count) = match config.syntax_type {
        SyntaxType::Markup => {
            let tree = parse_markup(abbr, config)?;
            let count = conversion::count_nodes(&tree.children);
            (stringify_markup(&tree, config), count)
        }
        SyntaxType::Stylesheet => {
            let properties = parse_stylesheet(abbr, config)?;
            let count = properties.len();
            (stringify_stylesheet(&properties, config), count)
        }
    };

    let result = ExpansionResult::new(
        output,
        config.syntax_type,
        config.syntax.clone(),
        node_count,
        start_time.elapsed(),
    );
    result.log_success(abbr);
    Ok(result)
}

/// Parses a markup abbreviation into a resolved, transformed tree
pub fn parse_markup(abbr: &str, config: &Config) -> Result<Abbreviation, PipelineError> {
    let tokens = lexical::tokenize_markup(abbr)?;
    parse_markup_tokens(&tokens, config)
}

/// Same as [`parse_markup`] for input that is already tokenized
pub fn parse_markup_tokens(tokens: &[MarkupToken], config: &Config) -> Result<Abbreviation, PipelineError> {
    let tree = syntax::parse_markup_tokens(
        tokens,
        ParserOptions {
            jsx: config.options.jsx.enabled,
        },
    )?;

    let mut abbr = conversion::convert_markup(
        &tree,
        &ConvertOptions {
            text: config.text.as_ref(),
            variables: Some(&config.variables),
            max_repeat: config.max_repeat,
            href: config.options.markup.href,
        },
    );
    transforms::transform_markup(&mut abbr, config);
    Ok(abbr)
}

/// Parses a stylesheet abbreviation into properties matched against snippets
pub fn parse_stylesheet(abbr: &str, config: &Config) -> Result<Vec<CssProperty>, PipelineError> {
    let value_mode = snippets::is_value_scope(config);
    let tokens = lexical::tokenize_stylesheet(abbr, value_mode)?;
    parse_stylesheet_tokens(&tokens, config)
}

/// Same as [`parse_stylesheet`] for input that is already tokenized
pub fn parse_stylesheet_tokens(
    tokens: &[StyleToken],
    config: &Config,
) -> Result<Vec<CssProperty>, PipelineError> {
    let value_mode = snippets::is_value_scope(config);
    let properties = syntax::parse_stylesheet_tokens(tokens, value_mode)?;
    Ok(snippets::resolve_stylesheet(properties, config))
}

/// Fills unset config fields from the runtime preferences
pub fn apply_preferences(mut user: PartialConfig, preferences: &ExpansionPreferences) -> PartialConfig {
    if user.syntax.is_none() {
        if let Some(syntax) = &preferences.default_syntax {
            let syntax_type = SyntaxType::of_syntax(syntax);
            if user.syntax_type.is_none() || user.syntax_type == syntax_type {
                user.syntax_type = user.syntax_type.or(syntax_type);
                user.syntax = Some(syntax.clone());
            }
        }
    }
    if user.max_repeat.is_none() {
        user.max_repeat = Some(preferences.max_repeat);
    }
    if user.lorem_seed.is_none() {
        user.lorem_seed = preferences.lorem_seed;
    }
    user
}

/// Global overrides from the preferred config file, empty when none is set
pub fn load_globals(preferences: &ExpansionPreferences) -> Result<GlobalConfig, PipelineError> {
    match &preferences.config_file {
        Some(path) => Ok(GlobalConfig::from_file(Path::new(path))?),
        None => Ok(GlobalConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve::resolve;
    use crate::config::TextInput;
    use crate::syntax::SyntaxError;
    use assert_matches::assert_matches;

    fn markup(abbr: &str) -> Result<String, PipelineError> {
        expand(abbr, &resolve(PartialConfig::markup("html")).unwrap())
    }

    fn stylesheet(abbr: &str) -> Result<String, PipelineError> {
        expand(abbr, &resolve(PartialConfig::stylesheet("css")).unwrap())
    }

    #[test]
    fn test_validate_pipeline() {
        let _ = crate::logging::init_global_logging();
        let result = validate_pipeline();
        assert!(result.is_ok());
    }

    #[test]
    fn test_pipeline_error_creation() {
        let error = PipelineError::pipeline_error("Test error");
        match error {
            PipelineError::Pipeline { message } => {
                assert_eq!(message, "Test error");
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_nested_list() {
        assert_eq!(
            markup("div>ul>li*3").unwrap(),
            "<div>\n\t<ul>\n\t\t<li></li>\n\t\t<li></li>\n\t\t<li></li>\n\t</ul>\n</div>"
        );
    }

    #[test]
    fn test_numbered_classes() {
        let tree = parse_markup("ul>li.item$*3", &resolve(PartialConfig::markup("html")).unwrap()).unwrap();
        let classes: Vec<String> = tree.children[0]
            .children
            .iter()
            .filter_map(|li| li.attribute("class"))
            .filter_map(|attr| attr.value.as_ref())
            .map(|value| crate::syntax::ast::value_to_string(value))
            .collect();
        assert_eq!(classes, vec!["item1", "item2", "item3"]);
    }

    #[test]
    fn test_top_level_groups() {
        let tree = parse_markup("p+ul>li^div", &resolve(PartialConfig::markup("html")).unwrap()).unwrap();
        assert_eq!(tree.children.len(), 3);
    }

    #[test]
    fn test_stylesheet_expansion() {
        assert_eq!(stylesheet("m10-20").unwrap(), "margin: 10px 20px;");
        assert_eq!(stylesheet("c#fff.5").unwrap(), "color: rgba(255, 255, 255, 0.5);");
    }

    #[test]
    fn test_unclosed_attribute_set() {
        let error = markup("div[").unwrap_err();
        assert_matches!(
            error,
            PipelineError::SyntaxAnalysis(SyntaxError::UnclosedAttributeSet { .. })
        );
    }

    #[test]
    fn test_repeater_in_text_is_an_error() {
        assert_matches!(
            markup("p{*hi}"),
            Err(PipelineError::SyntaxAnalysis(SyntaxError::UnexpectedToken { .. }))
        );
        assert_eq!(markup("p{a *b}").unwrap(), "<p>a *b</p>");
    }

    #[test]
    fn test_scanner_error_diagnostic() {
        let error = markup("div%").unwrap_err();
        assert_matches!(error, PipelineError::LexicalAnalysis(_));
        assert_eq!(error.diagnostic("div%"), "Unexpected character at 4\ndiv%\n---^");
    }

    #[test]
    fn test_wrap_with_text() {
        let config = resolve(PartialConfig {
            text: Some(TextInput::Lines(vec!["a".into(), "b".into()])),
            ..PartialConfig::markup("html")
        })
        .unwrap();
        assert_eq!(expand("ul>li*", &config).unwrap(), "<ul>\n\t<li>a</li>\n\t<li>b</li>\n</ul>");
    }

    #[test]
    fn test_apply_preferences() {
        let preferences = ExpansionPreferences {
            max_repeat: 10,
            default_syntax: Some("css".into()),
            lorem_seed: Some(7),
            config_file: None,
        };
        let user = apply_preferences(PartialConfig::default(), &preferences);
        assert_eq!(user.syntax.as_deref(), Some("css"));
        assert_eq!(user.syntax_type, Some(SyntaxType::Stylesheet));
        assert_eq!(user.max_repeat, Some(10));
        assert_eq!(user.lorem_seed, Some(7));

        // explicit markup type keeps its own default syntax
        let user = apply_preferences(
            PartialConfig {
                syntax_type: Some(SyntaxType::Markup),
                ..PartialConfig::default()
            },
            &preferences,
        );
        assert_eq!(user.syntax, None);
    }

    #[test]
    fn test_load_globals_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abbrev.toml");
        std::fs::write(&path, "[markup.options]\n\"output.selfClosingStyle\" = \"xhtml\"\n").unwrap();

        let preferences = ExpansionPreferences {
            max_repeat: 0,
            default_syntax: None,
            lorem_seed: None,
            config_file: Some(path.display().to_string()),
        };
        let globals = load_globals(&preferences).unwrap();
        let config = resolve_config(PartialConfig::markup("html"), &globals).unwrap();
        assert_eq!(expand("br", &config).unwrap(), "<br />");
    }

    #[test]
    fn test_missing_config_file() {
        let preferences = ExpansionPreferences {
            max_repeat: 0,
            default_syntax: None,
            lorem_seed: None,
            config_file: Some("/nonexistent/abbrev.toml".into()),
        };
        assert_matches!(load_globals(&preferences), Err(PipelineError::Configuration(_)));
    }

    #[test]
    fn test_deterministic_output() {
        let config = resolve(PartialConfig::markup("html")).unwrap();
        let tree = parse_markup("div#a>p.b*2>span{x}", &config).unwrap();
        assert_eq!(stringify_markup(&tree, &config), stringify_markup(&tree, &config));
    }
}
