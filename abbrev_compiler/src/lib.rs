// Internal modules
pub mod config;
pub mod conversion;
pub mod extract;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod snippets;
pub mod syntax;
pub mod tokens;
pub mod transforms;
pub mod utils;

// Re-export key types for library consumers
pub use config::{Config, GlobalConfig, PartialConfig, SyntaxType};
pub use extract::{extract_abbreviation, ExtractOptions, ExtractedAbbreviation};
pub use pipeline::{
    expand, expand_abbreviation, parse_markup, parse_stylesheet, stringify_markup,
    stringify_stylesheet, ExpansionResult, PipelineError,
};
