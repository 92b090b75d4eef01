use std::ops::Range;

use crate::htmlchar::HtmlByte;

/// Byte cursor over the tokenizer's buffered input.
///
/// Every lookahead returns `None` when it runs into the end of the buffer, meaning
/// "cannot decide yet, wait for more input".
pub struct CharIter<'a> {
    pub(crate) pos: usize,
    pub(crate) text: &'a str,
}

impl<'a> CharIter<'a> {
    pub fn new(text: &'a str) -> Self {
        CharIter { pos: 0, text }
    }

    /// Get the current position as an index in the underlying string slice
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// If the iterator has more elements
    pub fn has_next(&self) -> bool {
        self.pos < self.text.len()
    }

    /// Get the byte at `pos` without moving
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    /// Get the current byte without advancing the iterator
    pub fn peek_byte(&self) -> Option<u8> {
        self.byte_at(self.pos)
    }

    /// Advance the iterator by n
    pub fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.text.len());
    }

    /// Test if a specified byte slice starts at the current iterator position
    pub fn test(&self, test: &[u8]) -> bool {
        self.text.as_bytes()[self.pos..].starts_with(test)
    }

    /// True if the rest of the buffer is a proper prefix of `test`, i.e. more input could still make
    /// [test](CharIter::test) succeed.
    pub fn could_become(&self, test: &[u8]) -> bool {
        let rest = &self.text.as_bytes()[self.pos..];
        rest.len() < test.len() && test.starts_with(rest)
    }

    /// Absolute index of the next occurrence of `needle` at or after the current position
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        self.find_from(self.pos, needle)
    }

    pub fn find_from(&self, from: usize, needle: &[u8]) -> Option<usize> {
        let haystack = self.text.as_bytes().get(from..)?;
        haystack.windows(needle.len())
            .position(|window| window == needle)
            .map(|offset| from + offset)
    }

    /// Advance the iterator while the current byte is a whitespace.
    /// Returns `None` if the end of the buffer was reached.
    pub fn skip_spaces(&mut self) -> Option<()> {
        while self.peek_byte()?.is_html_whitespace() {
            self.pos += 1; // every whitespace is one byte long
        }
        Some(())
    }

    /// Consume bytes while `accept` holds. Returns `None` if that runs to the end of the buffer.
    pub fn consume_while(&mut self, accept: impl Fn(&u8) -> bool) -> Option<&'a str> {
        let start = self.pos;
        while accept(&self.peek_byte()?) {
            self.pos += 1;
        }
        Some(&self.text[start..self.pos])
    }

    /// Consume everything up to `delimiter` and step over it.
    pub fn consume_until(&mut self, delimiter: &[u8]) -> Option<&'a str> {
        let end = self.find(delimiter)?;
        let consumed = &self.text[self.pos..end];
        self.pos = end + delimiter.len();
        Some(consumed)
    }

    pub fn slice(&self, range: Range<usize>) -> &'a str {
        &self.text[range]
    }

    /// Everything from the current position to the end of the buffer
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }
}
