//! Pull-based input: the refill capability and the cursor that drives it.

use alloc::vec::Vec;

use crate::error::{ErrorKind, ParseError};

/// Supplies the parser with the next chunk of input once the current chunk
/// is exhausted.
///
/// The engine invokes [`refill`](Refill::refill) only when it has consumed
/// every byte of the current chunk, and treats the call as opaque and
/// potentially slow. `Ok(None)` and `Ok(Some(&[]))` both signal end of
/// input. An `Err` aborts the parse and is surfaced from the entry point
/// unchanged.
///
/// The returned slice only has to stay valid until the next `refill` call:
/// the engine copies it into its own chunk buffer before asking for more,
/// so an implementation is free to reuse its backing storage.
pub trait Refill {
    /// Produce the next chunk of input, or `None` when the stream ends.
    fn refill(&mut self) -> Result<Option<&[u8]>, ErrorKind>;
}

/// Refill source for input that is already complete in memory.
///
/// Always reports end of input; pair it with the initial buffer passed to
/// [`parse_with`](crate::parse_with).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMoreInput;

impl Refill for NoMoreInput {
    fn refill(&mut self) -> Result<Option<&[u8]>, ErrorKind> {
        Ok(None)
    }
}

/// Adapts an iterator of byte chunks into a [`Refill`] source.
///
/// Handy for feeding a parse from anything that can be cut into pieces:
///
/// ```
/// use jsonblocks::Chunks;
///
/// let mut src = Chunks::new(["[1,", "2]"].into_iter().map(str::as_bytes));
/// ```
#[derive(Debug)]
pub struct Chunks<I: Iterator> {
    iter: I,
    current: Option<I::Item>,
}

impl<I: Iterator> Chunks<I> {
    /// Wrap `chunks`; each item becomes one refill.
    pub fn new<T>(chunks: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: chunks.into_iter(),
            current: None,
        }
    }
}

impl<I> Refill for Chunks<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    fn refill(&mut self) -> Result<Option<&[u8]>, ErrorKind> {
        self.current = self.iter.next();
        Ok(self.current.as_ref().map(AsRef::as_ref))
    }
}

/// One-chunk-at-a-time view over the input stream.
///
/// Owns the single live chunk. Invariant: after construction and after
/// every [`bump`](Cursor::bump), either `peek` has a byte to report or end
/// of input has been latched, so `peek` itself never performs I/O.
pub(crate) struct Cursor<'r, R: ?Sized> {
    src: &'r mut R,
    chunk: Vec<u8>,
    pos: usize,
    offset: usize,
    line: usize,
    column: usize,
    eof: bool,
}

impl<'r, R: Refill + ?Sized> Cursor<'r, R> {
    /// Start reading from `initial`, or from the first refill when absent.
    pub(crate) fn new(initial: Option<&[u8]>, src: &'r mut R) -> Result<Self, ParseError> {
        let mut cur = Self {
            src,
            chunk: Vec::new(),
            pos: 0,
            offset: 0,
            line: 1,
            column: 1,
            eof: false,
        };
        if let Some(buf) = initial {
            cur.chunk.extend_from_slice(buf);
        }
        cur.ensure()?;
        Ok(cur)
    }

    /// The current byte, or `None` at end of input.
    pub(crate) fn peek(&self) -> Option<u8> {
        self.chunk.get(self.pos).copied()
    }

    /// Consume the current byte, refilling as needed. A no-op at end of
    /// input.
    pub(crate) fn bump(&mut self) -> Result<(), ParseError> {
        if let Some(&b) = self.chunk.get(self.pos) {
            self.pos += 1;
            self.offset += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.ensure()?;
        }
        Ok(())
    }

    /// Consume JSON whitespace (space, tab, line feed, carriage return).
    pub(crate) fn skip_ws(&mut self) -> Result<(), ParseError> {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.bump()?;
        }
        Ok(())
    }

    /// Attach the current position to `kind`.
    pub(crate) fn fail(&self, kind: ErrorKind) -> ParseError {
        ParseError {
            kind,
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    fn ensure(&mut self) -> Result<(), ParseError> {
        while self.pos == self.chunk.len() && !self.eof {
            match self.src.refill() {
                Ok(Some(next)) if !next.is_empty() => {
                    self.chunk.clear();
                    self.chunk.extend_from_slice(next);
                    self.pos = 0;
                }
                Ok(_) => self.eof = true,
                Err(kind) => return Err(self.fail(kind)),
            }
        }
        Ok(())
    }
}
