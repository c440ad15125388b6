//! Forward character scanner shared by both tokenizers

use super::error::ScannerError;
use crate::tokens::Field;

/// Character cursor over an abbreviation
///
/// Offsets are character indices, not byte indices. `start` marks the
/// beginning of the token being read so [`Scanner::current`] can return it.
#[derive(Debug, Clone)]
pub struct Scanner {
    chars: Vec<char>,
    pub start: usize,
    pub pos: usize,
    end: usize,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let end = chars.len();
        Self {
            chars,
            start: 0,
            pos: 0,
            end,
        }
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.end
    }

    pub fn peek(&self) -> Option<char> {
        self.char_at(self.pos)
    }

    /// Character at an absolute offset
    pub fn char_at(&self, pos: usize) -> Option<char> {
        if pos < self.end {
            self.chars.get(pos).copied()
        } else {
            None
        }
    }

    pub fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    pub fn eat(&mut self, expected: char) -> bool {
        self.eat_if(|ch| ch == expected)
    }

    pub fn eat_if(&mut self, predicate: impl Fn(char) -> bool) -> bool {
        match self.peek() {
            Some(ch) if predicate(ch) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Consumes characters while `predicate` holds; true if any were consumed
    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) -> bool {
        let start = self.pos;
        while !self.eof() && self.eat_if(&predicate) {}
        self.pos != start
    }

    pub fn back_up(&mut self, n: usize) {
        self.pos = self.pos.saturating_sub(n);
    }

    /// Text between `start` and `pos`
    pub fn current(&self) -> String {
        self.substring(self.start, self.pos)
    }

    pub fn substring(&self, from: usize, to: usize) -> String {
        let to = to.min(self.chars.len());
        if from >= to {
            return String::new();
        }
        self.chars[from..to].iter().collect()
    }

    pub fn source(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end == 0
    }

    // ========================================================================
    // FIELDS
    // ========================================================================

    /// Reads `${1:placeholder}` or `${variable}` at the current position
    ///
    /// Leaves the position untouched when the input doesn't start with `${`.
    pub fn consume_field(&mut self) -> Result<Option<Field>, ScannerError> {
        let start = self.pos;
        if !(self.eat('$') && self.eat('{')) {
            self.pos = start;
            return Ok(None);
        }

        self.start = self.pos;
        let mut index = None;
        let mut name = String::new();

        if self.eat_while(is_number) {
            index = self.current().parse::<usize>().ok();
            if self.eat(':') {
                name = self.consume_placeholder()?;
            }
        } else if self.peek().is_some_and(is_alpha) {
            name = self.consume_placeholder()?;
        }

        if self.eat('}') {
            Ok(Some(Field { index, name }))
        } else {
            Err(self.expecting_brace())
        }
    }

    /// Placeholder text up to the unmatched `}`; may be empty
    fn consume_placeholder(&mut self) -> Result<String, ScannerError> {
        let mut stack = Vec::new();
        self.start = self.pos;

        while !self.eof() {
            if self.eat('{') {
                stack.push(self.pos);
            } else if self.eat('}') {
                if stack.pop().is_none() {
                    self.pos -= 1;
                    break;
                }
            } else {
                self.pos += 1;
            }
        }

        if let Some(open) = stack.pop() {
            self.pos = open;
            return Err(self.expecting_brace());
        }

        Ok(self.current())
    }

    // ========================================================================
    // ERRORS
    // ========================================================================

    pub fn unexpected_character(&self) -> ScannerError {
        ScannerError::UnexpectedCharacter {
            pos: self.pos,
            input: self.source(),
        }
    }

    pub fn expecting_brace(&self) -> ScannerError {
        ScannerError::ExpectingBrace {
            pos: self.pos,
            input: self.source(),
        }
    }
}

// ============================================================================
// CHARACTER CLASSES
// ============================================================================

pub fn is_number(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// ASCII letter, either case
pub fn is_alpha(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

pub fn is_alpha_word(ch: char) -> bool {
    ch == '_' || is_alpha(ch)
}

pub fn is_alpha_numeric_word(ch: char) -> bool {
    is_number(ch) || is_alpha_word(ch)
}

pub fn is_umlaut(ch: char) -> bool {
    matches!(ch, 'Ä' | 'Ö' | 'Ü' | 'ä' | 'ö' | 'ü')
}

/// Space, tab or non-breaking space
pub fn is_white_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\u{a0}')
}

/// White space or line break
pub fn is_space(ch: char) -> bool {
    is_white_space(ch) || ch == '\n' || ch == '\r'
}

pub fn is_quote(ch: char) -> bool {
    ch == '\'' || ch == '"'
}
