// src/core/scan.rs
// Forward-only cursor over one line of text. The squad/roster scanners are built on it.

#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self { Self { s, i: 0 } }

    /// Byte offset into the original string.
    #[inline] pub fn pos(&self) -> usize { self.i }
    #[inline] pub fn is_eof(&self) -> bool { self.i >= self.s.len() }
    #[inline] pub fn rest(&self) -> &'a str { &self.s[self.i..] }
    #[inline] pub fn peek(&self) -> Option<char> { self.rest().chars().next() }

    #[inline]
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.i += ch.len_utf8();
        Some(ch)
    }

    /// Consume `ch` if it is next.
    pub fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) { self.i += ch.len_utf8(); true } else { false }
    }

    /// Consume the longest run matching `pred`; returns it (possibly empty).
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.i;
        while let Some(ch) = self.peek() {
            if !pred(ch) { break; }
            self.i += ch.len_utf8();
        }
        &self.s[start..self.i]
    }

    pub fn skip_ws(&mut self) {
        self.eat_while(char::is_whitespace);
    }
}
