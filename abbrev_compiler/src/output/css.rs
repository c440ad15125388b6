//! Stylesheet output, plain CSS or CSS-in-JS objects

use super::stream::OutputStream;
use crate::config::Config;
use crate::snippets::CssScope;
use crate::syntax::ast::{CssProperty, CssToken, CssValue, CssValueToken};
use crate::tokens::stylesheet::{frac, NumberValue};

pub fn css(properties: &[CssProperty], config: &Config) -> String {
    let mut out = OutputStream::new(config);
    let format = config.options.output.format;
    let section_scope = config
        .context
        .as_ref()
        .is_some_and(|context| context.name == CssScope::Section.as_str());

    let properties = properties
        .iter()
        .filter(|property| !section_scope || property.snippet.is_some());

    for (i, property) in properties.enumerate() {
        if format && i != 0 {
            let level = out.level;
            out.push_newline(level);
        }
        output_property(property, &mut out, config);
    }
    out.into_string()
}

fn output_property(property: &CssProperty, out: &mut OutputStream, config: &Config) {
    let options = &config.options.stylesheet;

    let Some(name) = &property.name else {
        // Raw snippet: tokens as they are
        for value in &property.value {
            for token in &value.value {
                output_token(token, out, config);
            }
        }
        output_important(property, out, !property.value.is_empty());
        return;
    };

    let name = if options.json {
        to_camel_case(name)
    } else {
        name.clone()
    };
    out.push_string(&format!("{}{}", name, options.between));

    if property.value.is_empty() {
        out.push_field(0, "");
    } else {
        property_value(property, out, config);
    }

    if options.json {
        out.push(",");
    } else {
        output_important(property, out, true);
        out.push(&options.after);
    }
}

fn property_value(property: &CssProperty, out: &mut OutputStream, config: &Config) {
    let options = &config.options.stylesheet;

    if options.json {
        if let Some(num) = single_numeric(property) {
            if num.unit.is_empty() || num.unit == "px" {
                out.push(&frac(num.value, 4));
                return;
            }
        }
    }

    let quote = if options.json_double_quotes { "\"" } else { "'" };
    if options.json {
        out.push(quote);
    }
    for (i, value) in property.value.iter().enumerate() {
        if i != 0 {
            out.push(", ");
        }
        output_value(value, out, config);
    }
    if options.json {
        out.push(quote);
    }
}

fn output_important(property: &CssProperty, out: &mut OutputStream, separator: bool) {
    if property.important {
        if separator {
            out.push(" ");
        }
        out.push("!important");
    }
}

/// Space-separated tokens; a field typed right after the previous token
/// (`foo${bar}`) stays attached
fn output_value(value: &CssValue, out: &mut OutputStream, config: &Config) {
    let mut prev_end: Option<usize> = None;
    for (i, token) in value.value.iter().enumerate() {
        let attached = matches!(token.value, CssValueToken::Field(_))
            && !token.is_synthetic()
            && prev_end == Some(token.span.start().offset);
        if i != 0 && !attached {
            out.push(" ");
        }
        output_token(token, out, config);
        prev_end = (!token.is_synthetic()).then(|| token.span.end().offset);
    }
}

fn output_token(token: &CssToken, out: &mut OutputStream, config: &Config) {
    match &token.value {
        CssValueToken::Color(color) => {
            out.push(&color.to_css(config.options.stylesheet.short_hex));
        }
        CssValueToken::Literal(value) | CssValueToken::CustomProperty(value) => {
            out.push_string(value);
        }
        CssValueToken::Number(number) => {
            out.push_string(&format!("{}{}", frac(number.value, 4), number.unit));
        }
        CssValueToken::String { value, single } => {
            let quote = if *single { '\'' } else { '"' };
            out.push_string(&format!("{}{}{}", quote, value, quote));
        }
        CssValueToken::Field(field) => {
            out.push_field(field.index.unwrap_or_default(), &field.name);
        }
        CssValueToken::FunctionCall { name, arguments } => {
            out.push(&format!("{}(", name));
            for (i, argument) in arguments.iter().enumerate() {
                if i != 0 {
                    out.push(", ");
                }
                output_value(argument, out, config);
            }
            out.push(")");
        }
    }
}

fn single_numeric(property: &CssProperty) -> Option<&NumberValue> {
    match property.value.as_slice() {
        [value] => match value.value.as_slice() {
            [token] => match &token.value {
                CssValueToken::Number(number) => Some(number),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    }
}

/// `margin-top` -> `marginTop`
pub fn to_camel_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(ch) = chars.next() {
        let next_is_word = chars
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || *c == '_');
        if ch == '-' && next_is_word {
            if let Some(next) = chars.next() {
                result.extend(next.to_uppercase());
            }
        } else {
            result.push(ch);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve::resolve;
    use crate::config::{AbbreviationContext, PartialConfig};
    use crate::lexical::stylesheet::tokenize;
    use crate::snippets::{is_value_scope, resolve_properties};
    use crate::syntax::stylesheet::parse;

    fn expand_with(abbr: &str, partial: PartialConfig) -> String {
        let config = resolve(partial).unwrap();
        let value_mode = is_value_scope(&config);
        let tokens = tokenize(abbr, value_mode).unwrap();
        let properties = parse(&tokens, value_mode).unwrap();
        let resolved = resolve_properties(properties, &config);
        css(&resolved, &config)
    }

    fn expand(abbr: &str) -> String {
        expand_with(abbr, PartialConfig::stylesheet("css"))
    }

    #[test]
    fn test_shorthand_numbers() {
        assert_eq!(expand("m10-20"), "margin: 10px 20px;");
        assert_eq!(expand("p1.5"), "padding: 1.5em;");
    }

    #[test]
    fn test_colors() {
        assert_eq!(expand("c#fff"), "color: #fff;");
        assert_eq!(expand("c#fff.5"), "color: rgba(255, 255, 255, 0.5);");
        assert_eq!(
            expand_with("c#fff", PartialConfig::stylesheet("css").with_option("stylesheet.shortHex", false)),
            "color: #ffffff;"
        );
    }

    #[test]
    fn test_important_and_siblings() {
        assert_eq!(expand("m0!+p0"), "margin: 0 !important;\npadding: 0;");
    }

    #[test]
    fn test_empty_value_gets_caret() {
        assert_eq!(expand("mt"), "margin-top: ;");
    }

    #[test]
    fn test_syntax_punctuation() {
        assert_eq!(expand_with("p10", PartialConfig::stylesheet("stylus")), "padding 10px");
        assert_eq!(expand_with("p10", PartialConfig::stylesheet("sass")), "padding: 10px");
    }

    #[test]
    fn test_json_output() {
        let json = || PartialConfig::stylesheet("css").with_option("stylesheet.json", true);
        assert_eq!(expand_with("mt10", json()), "marginTop: 10,");
        assert_eq!(expand_with("m10-20", json()), "margin: '10px 20px',");
        assert_eq!(
            expand_with("p2r", json().with_option("stylesheet.jsonDoubleQuotes", true)),
            "padding: \"2rem\","
        );
    }

    #[test]
    fn test_section_scope_drops_unmatched() {
        let partial = PartialConfig {
            context: Some(AbbreviationContext::new("@@section")),
            ..PartialConfig::stylesheet("css")
        };
        let result = expand_with("@f+zzqx", partial);
        assert!(result.starts_with("@font-face {"));
        assert!(!result.contains("zzqx"));
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("border-top-left-radius"), "borderTopLeftRadius");
        assert_eq!(to_camel_case("-webkit-box"), "WebkitBox");
        assert_eq!(to_camel_case("a-"), "a-");
    }
}
