//! Backward character scanner
//!
//! Reads a line right to left. `pos` points just past the character that
//! [`BackwardScanner::peek`] returns, so a scanner at `start` has nothing
//! left to read.

#[derive(Debug, Clone)]
pub struct BackwardScanner {
    chars: Vec<char>,
    /// Left limit of the scan
    pub start: usize,
    pub pos: usize,
}

impl BackwardScanner {
    pub fn new(text: &str, start: usize) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let pos = chars.len();
        Self {
            chars,
            start: start.min(pos),
            pos,
        }
    }

    /// At the start of the scanned range
    pub fn sol(&self) -> bool {
        self.pos <= self.start
    }

    /// Character left of `pos`
    pub fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Character at `pos - 1 + offset`; `offset` may look right of the cursor
    pub fn peek_at(&self, offset: isize) -> Option<char> {
        let index = (self.pos as isize) - 1 + offset;
        if index < 0 {
            return None;
        }
        self.chars.get(index as usize).copied()
    }

    /// Returns the character left of `pos` and steps over it
    pub fn previous(&mut self) -> Option<char> {
        if self.sol() {
            return None;
        }
        self.pos -= 1;
        self.chars.get(self.pos).copied()
    }

    pub fn consume(&mut self, expected: char) -> bool {
        self.consume_if(|ch| ch == expected)
    }

    pub fn consume_if(&mut self, predicate: impl Fn(char) -> bool) -> bool {
        if self.sol() {
            return false;
        }
        match self.peek() {
            Some(ch) if predicate(ch) => {
                self.pos -= 1;
                true
            }
            _ => false,
        }
    }

    /// True if anything was consumed
    pub fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> bool {
        let start = self.pos;
        while self.consume_if(&predicate) {}
        self.pos < start
    }

    /// Quoted string ending at `pos`; restores the position on failure
    pub fn consume_quoted(&mut self) -> bool {
        let start = self.pos;
        if let Some(quote) = self.previous().filter(|ch| is_quote(*ch)) {
            while !self.sol() {
                if self.previous() == Some(quote) && self.peek() != Some('\\') {
                    return true;
                }
            }
        }
        self.pos = start;
        false
    }

    /// `open ... close` pair ending at `pos`
    pub fn consume_pair(&mut self, close: char, open: char) -> bool {
        let start = self.pos;
        if self.consume(close) {
            while !self.sol() {
                if self.consume(open) {
                    return true;
                }
                self.pos -= 1;
            }
        }
        self.pos = start;
        false
    }

    /// Every character of `sequence`, matched right to left
    pub fn consume_sequence(&mut self, sequence: &[char]) -> bool {
        let start = self.pos;
        let mut consumed = false;
        for (i, ch) in sequence.iter().enumerate().rev() {
            if self.sol() || !self.consume(*ch) {
                break;
            }
            consumed = i == 0;
        }
        if !consumed {
            self.pos = start;
        }
        consumed
    }

    /// Text between two offsets
    pub fn substring(&self, from: usize, to: usize) -> String {
        let to = to.min(self.chars.len());
        if from >= to {
            return String::new();
        }
        self.chars[from..to].iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

pub fn is_quote(ch: char) -> bool {
    ch == '"' || ch == '\''
}

pub fn is_white_space(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

pub fn is_open_bracket(ch: char) -> bool {
    matches!(ch, '{' | '(' | '[')
}

pub fn is_close_bracket(ch: char) -> bool {
    matches!(ch, '}' | ')' | ']')
}

/// Closing counterpart of an opening bracket
pub fn bracket_pair(open: char) -> Option<char> {
    match open {
        '[' => Some(']'),
        '(' => Some(')'),
        '{' => Some('}'),
        _ => None,
    }
}
