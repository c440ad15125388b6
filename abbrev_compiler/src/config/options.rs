//! Expansion options and per-call configuration
//!
//! [`Options`] carries every recognized option with its default. Callers
//! override options with a map of dotted keys (`"output.selfClosingStyle"`)
//! or nested tables, which is the shape TOML files naturally produce.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::logging::codes::{self, Code};
use crate::snippets::SnippetCache;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for option '{key}': {message}")]
    InvalidOption { key: String, message: String },

    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unable to read configuration file '{path}': {message}")]
    Read { path: String, message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> Code {
        match self {
            ConfigError::InvalidOption { .. } | ConfigError::Toml(_) => {
                codes::config::INVALID_CONFIG
            }
            ConfigError::Read { .. } => codes::config::CONFIG_READ_FAILURE,
        }
    }

    pub fn severity(&self) -> codes::Severity {
        codes::get_severity(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

// ============================================================================
// OPTION ENUMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxType {
    #[default]
    Markup,
    Stylesheet,
}

impl SyntaxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyntaxType::Markup => "markup",
            SyntaxType::Stylesheet => "stylesheet",
        }
    }

    /// Dialect used when none is given
    pub fn default_syntax(&self) -> &'static str {
        match self {
            SyntaxType::Markup => "html",
            SyntaxType::Stylesheet => "css",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "markup" => Some(SyntaxType::Markup),
            "stylesheet" => Some(SyntaxType::Stylesheet),
            _ => None,
        }
    }
}

/// Letter case applied to tag and attribute names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringCase {
    #[default]
    #[serde(rename = "")]
    Preserve,
    Upper,
    Lower,
}

impl StringCase {
    pub fn apply(&self, value: &str) -> String {
        match self {
            StringCase::Preserve => value.to_string(),
            StringCase::Upper => value.to_uppercase(),
            StringCase::Lower => value.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeQuotes {
    Single,
    #[default]
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfClosingStyle {
    #[default]
    Html,
    Xhtml,
    Xml,
}

impl SelfClosingStyle {
    /// Text placed before `>` of a self-closing tag
    pub fn marker(&self) -> &'static str {
        match self {
            SelfClosingStyle::Html => "",
            SelfClosingStyle::Xhtml => " /",
            SelfClosingStyle::Xml => "/",
        }
    }
}

// ============================================================================
// OPTION GROUPS
// ============================================================================

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn string_map(items: &[(&str, &str)]) -> HashMap<String, String> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputOptions {
    pub indent: String,
    pub base_indent: String,
    pub newline: String,
    pub tag_case: StringCase,
    pub attribute_case: StringCase,
    pub attribute_quotes: AttributeQuotes,
    pub format: bool,
    pub format_leaf_node: bool,
    /// Tags whose children are not indented
    pub format_skip: Vec<String>,
    /// Tags that always put their content on separate lines
    pub format_force: Vec<String>,
    /// Number of adjacent inline siblings that forces line breaks; 0 disables
    pub inline_break: usize,
    pub compact_boolean: bool,
    pub boolean_attributes: Vec<String>,
    pub reverse_attributes: bool,
    pub self_closing_style: SelfClosingStyle,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            base_indent: String::new(),
            newline: "\n".to_string(),
            tag_case: StringCase::Preserve,
            attribute_case: StringCase::Preserve,
            attribute_quotes: AttributeQuotes::Double,
            format: true,
            format_leaf_node: false,
            format_skip: strings(&["html"]),
            format_force: strings(&["body"]),
            inline_break: 3,
            compact_boolean: false,
            boolean_attributes: strings(&[
                "contenteditable",
                "seamless",
                "async",
                "autofocus",
                "autoplay",
                "checked",
                "controls",
                "defer",
                "disabled",
                "formnovalidate",
                "hidden",
                "ismap",
                "loop",
                "multiple",
                "muted",
                "novalidate",
                "readonly",
                "required",
                "reversed",
                "selected",
                "typemustmatch",
            ]),
            reverse_attributes: false,
            self_closing_style: SelfClosingStyle::Html,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkupOptions {
    /// Upgrade `<a>` href from inserted URL or e-mail text
    pub href: bool,
    /// Output name mapping; a `name*` key applies to multiple-valued attributes
    pub attributes: HashMap<String, String>,
    /// Object prefix for single-token attribute values (`styles.foo`)
    pub value_prefix: HashMap<String, String>,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            href: true,
            attributes: HashMap::new(),
            value_prefix: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentOptions {
    pub enabled: bool,
    /// Attributes whose presence turns comments on for an element
    pub trigger: Vec<String>,
    pub before: String,
    pub after: String,
}

impl Default for CommentOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            trigger: strings(&["id", "class"]),
            before: String::new(),
            after: "\n<!-- /[#ID][.CLASS] -->".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BemOptions {
    pub enabled: bool,
    pub element: String,
    pub modifier: String,
}

impl Default for BemOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            element: "__".to_string(),
            modifier: "_".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JsxOptions {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StylesheetOptions {
    /// Keywords available to every property
    pub keywords: Vec<String>,
    /// Properties whose numbers never receive a unit
    pub unitless: Vec<String>,
    pub short_hex: bool,
    pub between: String,
    pub after: String,
    pub int_unit: String,
    pub float_unit: String,
    pub unit_aliases: HashMap<String, String>,
    pub json: bool,
    pub json_double_quotes: bool,
    pub fuzzy_search_min_score: f64,
    /// Drop nodes whose partial match could not be resolved
    pub strict_match: bool,
}

impl Default for StylesheetOptions {
    fn default() -> Self {
        Self {
            keywords: strings(&["auto", "inherit", "unset", "none"]),
            unitless: strings(&[
                "z-index",
                "line-height",
                "opacity",
                "font-weight",
                "zoom",
                "flex",
                "flex-grow",
                "flex-shrink",
            ]),
            short_hex: true,
            between: ": ".to_string(),
            after: ";".to_string(),
            int_unit: "px".to_string(),
            float_unit: "em".to_string(),
            unit_aliases: string_map(&[("e", "em"), ("p", "%"), ("x", "ex"), ("r", "rem")]),
            json: false,
            json_double_quotes: false,
            fuzzy_search_min_score: 0.0,
            strict_match: false,
        }
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub inline_elements: Vec<String>,
    pub output: OutputOptions,
    pub markup: MarkupOptions,
    pub comment: CommentOptions,
    pub bem: BemOptions,
    pub jsx: JsxOptions,
    pub stylesheet: StylesheetOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            inline_elements: strings(&[
                "a", "abbr", "acronym", "applet", "b", "basefont", "bdo", "big", "br", "button",
                "cite", "code", "del", "dfn", "em", "font", "i", "iframe", "img", "input", "ins",
                "kbd", "label", "map", "object", "q", "s", "samp", "select", "small", "span",
                "strike", "strong", "sub", "sup", "textarea", "tt", "u", "var",
            ]),
            output: OutputOptions::default(),
            markup: MarkupOptions::default(),
            comment: CommentOptions::default(),
            bem: BemOptions::default(),
            jsx: JsxOptions::default(),
            stylesheet: StylesheetOptions::default(),
        }
    }
}

impl Options {
    /// Returns a copy with `overrides` applied on top
    ///
    /// Keys may be dotted paths (`"stylesheet.intUnit"`) or nested objects;
    /// nested objects merge key by key instead of replacing the whole group.
    pub fn with_overrides(&self, overrides: &OptionOverrides) -> Result<Options, ConfigError> {
        if overrides.is_empty() {
            return Ok(self.clone());
        }

        let mut tree = serde_json::to_value(self).map_err(|e| ConfigError::InvalidOption {
            key: String::new(),
            message: e.to_string(),
        })?;

        for (key, value) in overrides {
            let path: Vec<&str> = key.split('.').collect();
            merge_at_path(&mut tree, &path, value);
        }

        serde_json::from_value(tree).map_err(|e| ConfigError::InvalidOption {
            key: overrides.keys().cloned().collect::<Vec<_>>().join(", "),
            message: e.to_string(),
        })
    }

    pub fn is_inline(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.inline_elements.iter().any(|n| *n == lower)
    }
}

/// Raw option overrides, keyed by dotted option path
pub type OptionOverrides = Map<String, Value>;

fn merge_at_path(target: &mut Value, path: &[&str], value: &Value) {
    let Some((head, rest)) = path.split_first() else {
        merge_value(target, value);
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        let slot = map.entry(head.to_string()).or_insert(Value::Null);
        merge_at_path(slot, rest, value);
    }
}

fn merge_value(target: &mut Value, value: &Value) {
    match (target, value) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, item) in incoming {
                let path: Vec<&str> = key.split('.').collect();
                let slot = existing.entry(path[0].to_string()).or_insert(Value::Null);
                merge_at_path(slot, &path[1..], item);
            }
        }
        (slot, _) => *slot = value.clone(),
    }
}

// ============================================================================
// SNIPPET TABLE
// ============================================================================

/// Insertion-ordered snippet dictionary
///
/// Stylesheet matching breaks score ties by position, so the order in which
/// snippets were declared is part of their meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnippetTable {
    entries: Vec<(String, String)>,
}

impl SnippetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from static pairs, splitting `a|b` alias keys
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut table = Self::new();
        for (key, value) in pairs {
            table.insert_aliased(key, value);
        }
        table
    }

    /// Inserts `value` under every `|`-separated name of `key`
    pub fn insert_aliased(&mut self, key: &str, value: &str) {
        for name in key.split('|') {
            self.insert(name, value);
        }
    }

    /// Replaces in place when the key exists, appends otherwise
    pub fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn extend(&mut self, other: &SnippetTable) {
        for (key, value) in &other.entries {
            self.insert(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SnippetTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SnippetTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = SnippetTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of snippet abbreviations to snippet bodies")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<SnippetTable, M::Error> {
                let mut table = SnippetTable::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    table.insert_aliased(&key, &value);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

// ============================================================================
// OUTPUT HOOKS
// ============================================================================

/// Renders a tabstop; the default outputs the placeholder text only
pub trait FieldHook: Send + Sync {
    fn field(&self, index: usize, placeholder: &str) -> String;
}

/// Post-processes every plain text chunk pushed to the output
pub trait TextHook: Send + Sync {
    fn text(&self, text: &str) -> String;
}

#[derive(Clone, Default)]
pub struct OutputHooks {
    pub field: Option<Arc<dyn FieldHook>>,
    pub text: Option<Arc<dyn TextHook>>,
}

impl OutputHooks {
    pub fn field(&self, index: usize, placeholder: &str) -> String {
        match &self.field {
            Some(hook) => hook.field(index, placeholder),
            None => placeholder.to_string(),
        }
    }

    pub fn text(&self, text: &str) -> String {
        match &self.text {
            Some(hook) => hook.text(text),
            None => text.to_string(),
        }
    }
}

impl fmt::Debug for OutputHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputHooks")
            .field("field", &self.field.is_some())
            .field("text", &self.text.is_some())
            .finish()
    }
}

/// Field hook producing editor tabstops: `${1:placeholder}`
#[derive(Debug, Clone, Copy, Default)]
pub struct TabstopFields;

impl FieldHook for TabstopFields {
    fn field(&self, index: usize, placeholder: &str) -> String {
        if placeholder.is_empty() {
            format!("${{{}}}", index)
        } else {
            format!("${{{}:{}}}", index, placeholder)
        }
    }
}

// ============================================================================
// CONFIG
// ============================================================================

/// Text inserted into the expanded abbreviation (a selection to wrap)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Single(String),
    Lines(Vec<String>),
}

/// Location the abbreviation is expanded in
///
/// For stylesheets `name` is a property name or one of the `@@` scopes; for
/// markup it is the parent tag name, with its attributes used by BEM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbbreviationContext {
    pub name: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl AbbreviationContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: HashMap::new(),
        }
    }
}

/// Caller-supplied configuration, merged with defaults by `resolve_config`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialConfig {
    #[serde(rename = "type")]
    pub syntax_type: Option<SyntaxType>,
    pub syntax: Option<String>,
    pub variables: HashMap<String, String>,
    pub snippets: SnippetTable,
    pub options: OptionOverrides,
    pub context: Option<AbbreviationContext>,
    pub text: Option<TextInput>,
    pub max_repeat: Option<usize>,
    /// Fixed lorem seed for reproducible output
    pub lorem_seed: Option<u64>,
    #[serde(skip)]
    pub hooks: OutputHooks,
    #[serde(skip)]
    pub cache: Option<Arc<SnippetCache>>,
}

impl PartialConfig {
    pub fn markup(syntax: &str) -> Self {
        Self {
            syntax_type: Some(SyntaxType::Markup),
            syntax: Some(syntax.to_string()),
            ..Self::default()
        }
    }

    pub fn stylesheet(syntax: &str) -> Self {
        Self {
            syntax_type: Some(SyntaxType::Stylesheet),
            syntax: Some(syntax.to_string()),
            ..Self::default()
        }
    }

    /// Sets one option by dotted key
    pub fn with_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// Data overrides for one syntax or syntax type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxOverrides {
    pub variables: HashMap<String, String>,
    pub snippets: SnippetTable,
    pub options: OptionOverrides,
}

/// Global overrides keyed by syntax type (`markup`) or syntax (`pug`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalConfig {
    pub entries: HashMap<String, SyntaxOverrides>,
}

impl GlobalConfig {
    pub fn get(&self, key: &str) -> Option<&SyntaxOverrides> {
        self.entries.get(key)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }
}

/// Fully resolved, read-only configuration of one expansion
#[derive(Debug, Clone)]
pub struct Config {
    pub syntax_type: SyntaxType,
    pub syntax: String,
    pub variables: HashMap<String, String>,
    pub snippets: SnippetTable,
    pub options: Options,
    pub context: Option<AbbreviationContext>,
    pub text: Option<TextInput>,
    pub max_repeat: Option<usize>,
    pub lorem_seed: Option<u64>,
    pub hooks: OutputHooks,
    pub cache: Option<Arc<SnippetCache>>,
}

impl Config {
    pub fn is_markup(&self) -> bool {
        self.syntax_type == SyntaxType::Markup
    }
}
