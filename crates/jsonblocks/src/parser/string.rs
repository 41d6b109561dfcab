//! String and escape decoding.

use super::{Lexed, Parse};
use crate::{
    allocator::{Allocator, Scratch},
    error::{ErrorKind, ParseError},
    event::Sink,
    input::Refill,
};

impl<R, S, A> Parse<'_, R, S, A>
where
    R: Refill + ?Sized,
    S: Sink,
    A: Allocator,
{
    /// Decode a double-quoted string into `out`.
    ///
    /// Literal bytes are copied as-is; escape sequences are validated but
    /// copied raw (interpreting them is the sink's business). Raw
    /// backspace, form feed, line feed, carriage return, and tab inside
    /// the string are rejected even though their escaped forms are fine.
    pub(super) fn string(&mut self, out: &mut Scratch<A>) -> Result<Lexed, ParseError> {
        if self.cur.peek() != Some(b'"') {
            return Ok(Lexed::NotApplicable);
        }
        self.cur.bump()?;
        loop {
            match self.cur.peek() {
                None => return Err(self.cur.fail(ErrorKind::ExpectedQuote)),
                Some(b'"') => break,
                Some(b'\\') => self.escape(out)?,
                Some(c) => {
                    if matches!(c, 0x08 | 0x0C | b'\n' | b'\r' | b'\t') {
                        return Err(self.cur.fail(ErrorKind::ControlChar));
                    }
                    self.push_out(out, c)?;
                    self.cur.bump()?;
                }
            }
        }
        // Consuming the close quote tolerates end of stream.
        self.cur.bump()?;
        Ok(Lexed::Matched)
    }

    /// One escape sequence, starting at the backslash.
    fn escape(&mut self, out: &mut Scratch<A>) -> Result<(), ParseError> {
        self.push_out(out, b'\\')?;
        self.cur.bump()?;
        let body = match self.cur.peek() {
            Some(c @ (b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' | b'u')) => c,
            _ => return Err(self.cur.fail(ErrorKind::ExpectedEscape)),
        };
        self.push_out(out, body)?;
        self.cur.bump()?;
        if body == b'u' {
            for _ in 0..4 {
                match self.cur.peek() {
                    Some(h) if h.is_ascii_hexdigit() => {
                        self.push_out(out, h)?;
                        self.cur.bump()?;
                    }
                    _ => return Err(self.cur.fail(ErrorKind::ExpectedHexDigit)),
                }
            }
        }
        Ok(())
    }
}
