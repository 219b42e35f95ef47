//! Peek/commit cursor over an immutable string.
//!
//! The cursor keeps two offsets: the committed position `pos` and the
//! lookahead position `peek`. Peeking moves `peek` ahead without consuming;
//! [`Cursor::commit`] consumes everything up to `peek`. A stack of saved
//! positions lets matchers tentatively consume input and roll back.
//!
//! All offsets are **byte** offsets into the source, always on a `char`
//! boundary. Characters are decoded whole, never byte by byte.

/// A position/lookahead cursor with an explicit save/rollback stack.
///
/// Invariant: `pos <= peek <= text.len()`.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    peek: usize,
    saved: Vec<usize>,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            peek: 0,
            saved: Vec::new(),
        }
    }

    /// The full text the cursor runs over.
    pub fn source(&self) -> &'a str {
        self.text
    }

    /// Committed position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Lookahead position.
    pub fn lookahead(&self) -> usize {
        self.peek
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Uncommitted text from `pos` to the end. Does not move the cursor.
    pub fn remainder(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Return the character at the lookahead position and step over it.
    ///
    /// Returns `None` at end of input, leaving the lookahead where it is.
    pub fn peek_char(&mut self) -> Option<char> {
        let ch = self.text[self.peek..].chars().next()?;
        self.peek += ch.len_utf8();
        Some(ch)
    }

    /// Move the lookahead forward by `n` bytes.
    ///
    /// Clamped to the end of input, and rounded up to the next `char`
    /// boundary so the lookahead never splits a character.
    pub fn peek_n(&mut self, n: usize) {
        let mut target = self.peek.saturating_add(n).min(self.text.len());
        while !self.text.is_char_boundary(target) {
            target += 1;
        }
        self.peek = target;
    }

    /// Move the lookahead to the next `target` at or after `pos`.
    ///
    /// Returns `false` and leaves the lookahead unchanged if there is none.
    pub fn seek(&mut self, target: char) -> bool {
        match self.remainder().find(target) {
            Some(offset) => {
                self.peek = self.pos + offset;
                true
            }
            None => false,
        }
    }

    /// Consume and return the text between `pos` and the lookahead.
    ///
    /// If the lookahead has not moved past `pos`, one character is consumed,
    /// so a commit always makes progress. Returns `""` at end of input.
    pub fn commit(&mut self) -> &'a str {
        if self.is_eof() {
            self.peek = self.pos;
            return "";
        }

        let mut end = self.peek.min(self.text.len());
        if end == self.pos
            && let Some(ch) = self.text[self.pos..].chars().next()
        {
            end += ch.len_utf8();
        }

        let consumed = &self.text[self.pos..end];
        self.pos = end;
        self.peek = end;
        consumed
    }

    /// Abandon a probe: reset the lookahead back to `pos`.
    pub fn restore_peek(&mut self) {
        self.peek = self.pos;
    }

    /// Push the committed position onto the save stack.
    pub fn save(&mut self) {
        self.saved.push(self.pos);
    }

    /// Pop the save stack and restore `pos` (and the lookahead) to it.
    ///
    /// Returns how many bytes had been consumed since the matching
    /// [`Cursor::save`]. With an empty stack nothing moves and 0 is returned.
    pub fn rollback(&mut self) -> usize {
        let Some(saved) = self.saved.pop() else {
            return 0;
        };
        let advanced = self.pos - saved;
        self.pos = saved;
        self.peek = saved;
        advanced
    }
}
