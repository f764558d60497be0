/// A cursor for hand-over-hand markup parsing with position tracking.
///
/// Tag structure is plain ASCII, so matching works on bytes; text spans
/// between tags are taken as whole `&str` slices, which keeps multi-byte
/// characters intact without ever indexing into them.
#[derive(Clone)]
pub(crate) struct Cursor<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Current byte position, for error messages.
    pub(crate) fn pos(&self) -> usize {
        self.i
    }

    /// True if at end of input.
    pub(crate) fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Checks if the remaining input starts with `pat`.
    pub(crate) fn starts_with(&self, pat: &str) -> bool {
        self.s.as_bytes()[self.i..].starts_with(pat.as_bytes())
    }

    /// Consumes `pat` if the remaining input starts with it.
    pub(crate) fn eat(&mut self, pat: &str) -> bool {
        if self.starts_with(pat) {
            self.i += pat.len();
            true
        } else {
            false
        }
    }

    /// Skips over ASCII whitespace.
    pub(crate) fn skip_whitespace(&mut self) {
        while self
            .s
            .as_bytes()
            .get(self.i)
            .is_some_and(|b| b.is_ascii_whitespace())
        {
            self.i += 1;
        }
    }

    /// Takes the longest prefix of bytes satisfying `keep`.
    pub(crate) fn take_while(&mut self, keep: impl Fn(u8) -> bool) -> &'a str {
        let start = self.i;
        while self.s.as_bytes().get(self.i).copied().is_some_and(&keep) {
            self.i += 1;
        }
        &self.s[start..self.i]
    }

    /// Takes everything up to (not including) `stop`, or to end of input.
    pub(crate) fn take_until(&mut self, stop: u8) -> &'a str {
        let start = self.i;
        while self
            .s
            .as_bytes()
            .get(self.i)
            .is_some_and(|&b| b != stop)
        {
            self.i += 1;
        }
        &self.s[start..self.i]
    }
}
