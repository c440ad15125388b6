//! Source location tracking for abbreviations
//!
//! Abbreviations are single-line inputs, so positions are character offsets
//! with a derived 1-based column. Multi-line sources (snippet bodies, config
//! files) still get line tracking through [`SourceMap`].
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text, measured in characters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Character offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Position on the first line of a single-line input
    pub fn at(offset: usize) -> Self {
        Self {
            offset,
            line: 1,
            column: offset as u32 + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    /// Span between two character offsets of a single-line input
    pub fn from_offsets(start: usize, end: usize) -> Self {
        Self::new(Position::at(start), Position::at(end.max(start)))
    }

    /// Zero-width span at the given offset
    pub fn point(offset: usize) -> Self {
        Self::from_offsets(offset, offset)
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Get the source text for this span from a single-line input
    pub fn slice(&self, input: &str) -> String {
        input
            .chars()
            .skip(self.start.offset)
            .take(self.len())
            .collect()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A value with its source location
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    /// Value without a source location (synthesized tokens)
    pub fn synthetic(value: T) -> Self {
        Self {
            value,
            span: Span::default(),
        }
    }

    /// Synthesized values carry the default span, whose line is 0
    pub fn is_synthetic(&self) -> bool {
        self.span.start.line == 0
    }

    pub fn map<U, F>(self, f: F) -> Spanned<U>
    where
        F: FnOnce(T) -> U,
    {
        Spanned {
            value: f(self.value),
            span: self.span,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Spanned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Tracks line starts of a source text for position lookup and diagnostics
#[derive(Debug, Clone)]
pub struct SourceMap {
    pub source: String,
    /// Character offsets of line starts
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut line_starts = vec![0];
        for (offset, ch) in source.chars().enumerate() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Get the line and column for a character offset
    pub fn position_at(&self, offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i.saturating_sub(1));
        let column = offset - self.line_starts[line];
        Position::new(offset, (line + 1) as u32, (column + 1) as u32)
    }

    /// Get a line of text by line number (1-based)
    pub fn get_line(&self, line_num: u32) -> Option<String> {
        if line_num == 0 {
            return None;
        }
        self.source
            .split('\n')
            .nth((line_num - 1) as usize)
            .map(|line| line.trim_end_matches('\r').to_string())
    }

    /// Source echoed back with a dashed caret line pointing at `offset`
    pub fn caret_diagnostic(&self, message: &str, offset: usize) -> String {
        let position = self.position_at(offset);
        let line = self.get_line(position.line).unwrap_or_default();
        format!(
            "{}\n{}\n{}^",
            message,
            line,
            "-".repeat((position.column - 1) as usize)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_from_offsets_on_single_line() {
        let span = Span::from_offsets(3, 6);
        assert_eq!(span.start.column, 4);
        assert_eq!(span.len(), 3);
        assert_eq!(span.slice("ul>li*3"), "li*");
    }

    #[test]
    fn test_caret_diagnostic_points_at_offset() {
        let map = SourceMap::new("div[a=b");
        let text = map.caret_diagnostic("Unexpected character at 4", 3);
        assert_eq!(text, "Unexpected character at 4\ndiv[a=b\n---^");
    }

    #[test]
    fn test_position_lookup_across_lines() {
        let map = SourceMap::new("ul\nli*3");
        let pos = map.position_at(4);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 2);
        assert_eq!(map.get_line(2).as_deref(), Some("li*3"));
    }
}
