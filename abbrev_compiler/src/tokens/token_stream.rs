//! Cursor over a token list
//!
//! Both parsers read tokens through [`TokenScanner`]: `start` marks the
//! first token of the construct being read and [`TokenScanner::slice`]
//! returns it, mirroring how the character scanner returns `current()`.

use crate::utils::Spanned;

#[derive(Debug, Clone)]
pub struct TokenScanner<'a, T> {
    tokens: &'a [Spanned<T>],
    pub start: usize,
    pub pos: usize,
}

impl<'a, T> TokenScanner<'a, T> {
    pub fn new(tokens: &'a [Spanned<T>]) -> Self {
        Self {
            tokens,
            start: 0,
            pos: 0,
        }
    }

    pub fn peek(&self) -> Option<&'a Spanned<T>> {
        self.tokens.get(self.pos)
    }

    pub fn peek_ahead(&self, n: usize) -> Option<&'a Spanned<T>> {
        self.tokens.get(self.pos + n)
    }

    pub fn token_at(&self, index: usize) -> Option<&'a Spanned<T>> {
        self.tokens.get(index)
    }

    pub fn next(&mut self) -> Option<&'a Spanned<T>> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    pub fn readable(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Advances past the next token if it satisfies `test`
    pub fn consume(&mut self, test: impl Fn(&T) -> bool) -> bool {
        match self.peek() {
            Some(token) if test(&token.value) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Tokens between `start` and `pos`
    pub fn current(&self) -> &'a [Spanned<T>] {
        self.slice(self.start, self.pos)
    }

    pub fn slice(&self, from: usize, to: usize) -> &'a [Spanned<T>] {
        let to = to.min(self.tokens.len());
        if from >= to {
            return &[];
        }
        &self.tokens[from..to]
    }

    /// Character offset of the next token, if any
    pub fn offset(&self) -> Option<usize> {
        self.peek().map(|token| token.span.start.offset)
    }

    pub fn save_position(&self) -> usize {
        self.pos
    }

    pub fn restore_position(&mut self, saved: usize) {
        self.pos = saved;
    }

    pub fn remaining_count(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
