//! Configuration for the expansion engine
//!
//! Three layers: compile-time limits in [`constants`], environment-driven
//! preferences in [`runtime`], and per-call expansion options in
//! [`options`] merged by [`resolve`].

pub mod constants;
pub mod options;
pub mod resolve;
pub mod runtime;

pub use options::{
    AbbreviationContext, AttributeQuotes, BemOptions, CommentOptions, Config, ConfigError,
    FieldHook, GlobalConfig, JsxOptions, MarkupOptions, OptionOverrides, Options, OutputHooks,
    OutputOptions, PartialConfig, SelfClosingStyle, SnippetTable, StringCase, StylesheetOptions,
    SyntaxOverrides, SyntaxType, TabstopFields, TextHook, TextInput,
};
pub use resolve::resolve_config;
pub use runtime::{ExpansionPreferences, LoggingPreferences, RuntimeConfig};
