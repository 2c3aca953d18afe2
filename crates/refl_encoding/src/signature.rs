//! Method signature splitting.
//!
//! A method's full type encoding lists the return type followed by every
//! argument type, each optionally trailed by a stack-frame offset:
//!
//! ```text
//! v24@0:8@16        -> return "v", arguments ["@", ":", "@"]
//! @"NSString"16@0:8 -> return "@\"NSString\"", arguments ["@", ":"]
//! ```
//!
//! Splitting walks the grammar with a byte cursor. Offsets are discarded.
//! Aggregate bodies are skipped by bracket depth, not parsed. A malformed
//! tail ends the split early; splitting never fails.

use crate::Qualifiers;

/// A method signature split into its element encodings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature<'a> {
    /// Encoding of the return type (empty if the signature was empty).
    pub return_type: &'a str,
    /// Encodings of every argument, including any implicit ones, in order.
    pub arguments: Vec<&'a str>,
}

impl Signature<'_> {
    /// Number of arguments, including any implicit ones.
    #[inline]
    pub fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    /// Encoding of the argument at `index`.
    #[inline]
    pub fn argument(&self, index: usize) -> Option<&str> {
        self.arguments.get(index).copied()
    }
}

/// Split a full method type encoding into return and argument encodings.
pub fn split(signature: &str) -> Signature<'_> {
    let mut cursor = Cursor::new(signature);
    let mut elements = Vec::new();

    while !cursor.is_eof() {
        let start = cursor.pos();
        cursor.eat_type();
        if cursor.pos() == start {
            break;
        }
        elements.push(cursor.slice_from(start));
        cursor.eat_offset();
    }

    let mut elements = elements.into_iter();
    Signature {
        return_type: elements.next().unwrap_or_default(),
        arguments: elements.collect(),
    }
}

/// Byte cursor over an encoding. `current()` reads `0` past the end.
struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    #[inline]
    fn current(&self) -> u8 {
        self.source.as_bytes().get(self.pos).copied().unwrap_or(0)
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    #[inline]
    fn pos(&self) -> usize {
        self.pos
    }

    /// Advance past the current character (whole UTF-8 sequence).
    fn advance(&mut self) {
        let width = self
            .source
            .get(self.pos..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8);
        self.pos = (self.pos + width).min(self.source.len());
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    fn slice_from(&self, start: usize) -> &'a str {
        self.source.get(start..self.pos).unwrap_or_default()
    }

    /// Consume one complete element type, including its qualifiers.
    fn eat_type(&mut self) {
        // Pointers nest without bound, so walk them iteratively.
        loop {
            self.eat_while(|b| Qualifiers::from_prefix(b).is_some());
            if self.current() == b'^' {
                self.pos += 1;
            } else {
                break;
            }
        }

        match self.current() {
            0 if self.is_eof() => {}
            b'{' => self.eat_balanced(b'{', b'}'),
            b'(' => self.eat_balanced(b'(', b')'),
            b'[' => self.eat_balanced(b'[', b']'),
            b'@' => {
                self.pos += 1;
                match self.current() {
                    b'"' => {
                        self.pos += 1;
                        self.eat_while(|b| b != b'"');
                        if self.current() == b'"' {
                            self.pos += 1;
                        }
                    }
                    b'?' => {
                        self.pos += 1;
                        if self.current() == b'<' {
                            self.eat_balanced(b'<', b'>');
                        }
                    }
                    _ => {}
                }
            }
            b'b' => {
                self.pos += 1;
                self.eat_while(|b| b.is_ascii_digit());
            }
            _ => self.advance(),
        }
    }

    /// Consume from an opening bracket through its matching close.
    ///
    /// An unterminated body consumes the rest of the input.
    fn eat_balanced(&mut self, open: u8, close: u8) {
        let mut depth = 0usize;
        while !self.is_eof() {
            let b = self.current();
            self.pos += 1;
            if b == open {
                depth += 1;
            } else if b == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return;
                }
            }
        }
    }

    /// Consume a signed frame offset, if present.
    fn eat_offset(&mut self) {
        if matches!(self.current(), b'+' | b'-') {
            self.pos += 1;
        }
        self.eat_while(|b| b.is_ascii_digit());
    }
}
