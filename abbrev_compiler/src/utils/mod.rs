//! Shared primitive types used by the tokenizers, parsers and diagnostics.

pub mod span;

pub use span::{Position, SourceMap, Span, Spanned};
