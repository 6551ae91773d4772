//! Character-level access to the input.
//!
//! The cursor is just a byte offset into the source, so saving and restoring it for
//! lookahead is a copy.
use crate::commands::get_command;

/// A position in the input together with the input itself.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'source> {
    input: &'source str,
    pos: usize,
}

impl<'source> Cursor<'source> {
    pub(crate) fn new(input: &'source str) -> Self {
        Cursor { input, pos: 0 }
    }

    /// Byte offset of the next character.
    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Go back to a position previously obtained from [`Cursor::pos`].
    #[inline]
    pub(crate) fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    #[inline]
    fn rest(&self) -> &'source str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    #[inline]
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'source str {
        self.input.get(start..end).unwrap_or_default()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[inline]
    pub(crate) fn read_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consume `ch` if it is the next character.
    #[inline]
    pub(crate) fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    /// Skip whitespace and `%` comments.
    pub(crate) fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.pos += ch.len_utf8();
                }
                Some('%') => {
                    let rest = self.rest().as_bytes();
                    self.pos += memchr::memchr(b'\n', rest).unwrap_or(rest.len());
                }
                _ => break,
            }
        }
    }

    /// Read a command name after the backslash has been consumed.
    ///
    /// A name is either a run of ASCII letters or a single other character. A following
    /// `*` belongs to the name only if the starred command exists, so in `\phi*` it stays
    /// behind as an operator. Returns the empty string at the end of the input.
    pub(crate) fn read_command_name(&mut self) -> &'source str {
        let start = self.pos;
        let letters = self
            .rest()
            .bytes()
            .take_while(u8::is_ascii_alphabetic)
            .count();
        if letters > 0 {
            self.pos += letters;
            if self.peek() == Some('*') && get_command(self.slice(start, self.pos + 1)).is_some() {
                self.pos += 1;
            }
        } else {
            // Always read at least one character.
            self.read_char();
        }
        self.slice(start, self.pos)
    }

    /// Consume a backslash command and return its name, if one starts at the cursor.
    pub(crate) fn read_command(&mut self) -> Option<&'source str> {
        if !self.eat('\\') {
            return None;
        }
        Some(self.read_command_name())
    }

    /// The name of the command starting at the cursor, without consuming anything.
    pub(crate) fn peek_command(&self) -> Option<&'source str> {
        let mut lookahead = *self;
        lookahead.read_command()
    }

    /// Consume a run of ASCII digits.
    pub(crate) fn read_digits(&mut self) -> &'source str {
        let start = self.pos;
        self.pos += self
            .rest()
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        self.slice(start, self.pos)
    }

    /// Consume a run of apostrophes and return how many there were.
    pub(crate) fn read_primes(&mut self) -> usize {
        let count = self.rest().bytes().take_while(|&b| b == b'\'').count();
        self.pos += count;
        count
    }

    /// Consume everything up to the next `ch`, which is consumed too.
    ///
    /// Returns `None` (and consumes the rest of the input) if `ch` never appears.
    pub(crate) fn read_until(&mut self, ch: char) -> Option<&'source str> {
        let rest = self.rest();
        match rest.find(ch) {
            Some(offset) => {
                self.pos += offset + ch.len_utf8();
                Some(&rest[..offset])
            }
            None => {
                self.pos = self.input.len();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names() {
        let mut cursor = Cursor::new(r"frac{1}");
        assert_eq!(cursor.read_command_name(), "frac");
        assert_eq!(cursor.peek(), Some('{'));

        let mut cursor = Cursor::new(r"operatorname*{x}");
        assert_eq!(cursor.read_command_name(), "operatorname*");

        let mut cursor = Cursor::new(r"phi*\psi");
        assert_eq!(cursor.read_command_name(), "phi");
        assert_eq!(cursor.peek(), Some('*'));

        let mut cursor = Cursor::new(r"\x");
        assert_eq!(cursor.read_command_name(), "\\");
        assert_eq!(cursor.pos(), 1);

        let mut cursor = Cursor::new("");
        assert_eq!(cursor.read_command_name(), "");
    }

    #[test]
    fn peek_command_does_not_consume() {
        let cursor = Cursor::new(r"\right)");
        assert_eq!(cursor.peek_command(), Some("right"));
        assert_eq!(cursor.pos(), 0);
        assert_eq!(Cursor::new("x").peek_command(), None);
    }

    #[test]
    fn whitespace_and_comments() {
        let mut cursor = Cursor::new("  % comment\n\t x");
        cursor.skip_whitespace();
        assert_eq!(cursor.peek(), Some('x'));

        let mut cursor = Cursor::new("% only a comment");
        cursor.skip_whitespace();
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.pos(), 16);
    }

    #[test]
    fn digits_primes_and_reset() {
        let mut cursor = Cursor::new("123''x");
        assert_eq!(cursor.read_digits(), "123");
        let saved = cursor.pos();
        assert_eq!(cursor.read_primes(), 2);
        assert_eq!(cursor.read_char(), Some('x'));
        cursor.reset(saved);
        assert_eq!(cursor.peek(), Some('\''));
    }

    #[test]
    fn read_until_missing() {
        let mut cursor = Cursor::new("ab}c");
        assert_eq!(cursor.read_until('}'), Some("ab"));
        assert_eq!(cursor.peek(), Some('c'));
        let mut cursor = Cursor::new("abc");
        assert_eq!(cursor.read_until('}'), None);
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn multibyte() {
        let mut cursor = Cursor::new("αβ");
        assert_eq!(cursor.read_char(), Some('α'));
        assert_eq!(cursor.pos(), 2);
    }
}
