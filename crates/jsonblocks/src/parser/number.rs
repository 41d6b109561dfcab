//! Number lexing.
//!
//! The emitted value is the byte-exact source lexeme; no normalization
//! happens here.

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
    /// Lex a JSON number into `out`.
    ///
    /// `NotApplicable` is only possible before anything was consumed; a
    /// lone `-`, a leading zero followed by a digit, or a fraction or
    /// exponent without digits are hard errors.
    pub(super) fn number(&mut self, out: &mut Scratch<A>) -> Result<Lexed, ParseError> {
        let Some(mut first) = self.cur.peek() else {
            return Ok(Lexed::NotApplicable);
        };
        if first == b'-' {
            self.push_out(out, b'-')?;
            self.cur.bump()?;
            first = match self.cur.peek() {
                Some(c) if c.is_ascii_digit() => c,
                _ => return Err(self.cur.fail(ErrorKind::ExpectedDigit)),
            };
        } else if !first.is_ascii_digit() {
            return Ok(Lexed::NotApplicable);
        }
        if first == b'0' {
            self.push_out(out, b'0')?;
            self.cur.bump()?;
            if self.cur.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(self.cur.fail(ErrorKind::BadInput));
            }
        } else {
            self.copy_digits(out)?;
        }
        if self.cur.peek() == Some(b'.') {
            self.push_out(out, b'.')?;
            self.cur.bump()?;
            if self.copy_digits(out)? == 0 {
                return Err(self.cur.fail(ErrorKind::ExpectedDigit));
            }
        }
        if let Some(e @ (b'e' | b'E')) = self.cur.peek() {
            self.push_out(out, e)?;
            self.cur.bump()?;
            if let Some(sign @ (b'+' | b'-')) = self.cur.peek() {
                self.push_out(out, sign)?;
                self.cur.bump()?;
            }
            if self.copy_digits(out)? == 0 {
                return Err(self.cur.fail(ErrorKind::ExpectedDigit));
            }
        }
        Ok(Lexed::Matched)
    }

    /// Copy a run of decimal digits, returning how many were consumed.
    fn copy_digits(&mut self, out: &mut Scratch<A>) -> Result<usize, ParseError> {
        let mut n = 0;
        while let Some(c) = self.cur.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            self.push_out(out, c)?;
            self.cur.bump()?;
            n += 1;
        }
        Ok(n)
    }
}
