//! Fixed-literal matching for `true`, `false`, and `null`.

use super::{Lexed, Parse};
use crate::{
    allocator::Allocator,
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
    /// Match `lit` character by character.
    ///
    /// Only the first character can reject without consuming: once it
    /// matches, every other literal is ruled out, so any later divergence
    /// is a hard error. A full match followed by an alphanumeric (as in
    /// `trueX`) is also rejected.
    pub(super) fn literal(&mut self, lit: &'static [u8]) -> Result<Lexed, ParseError> {
        if self.cur.peek() != lit.first().copied() {
            return Ok(Lexed::NotApplicable);
        }
        for &expected in lit {
            match self.cur.peek() {
                Some(c) if c == expected => self.cur.bump()?,
                Some(_) => return Err(self.cur.fail(ErrorKind::BadLiteral)),
                None => return Err(self.cur.fail(ErrorKind::BadInput)),
            }
        }
        if self.cur.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return Err(self.cur.fail(ErrorKind::BadLiteral));
        }
        Ok(Lexed::Matched)
    }
}
