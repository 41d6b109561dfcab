//! The allocation capability and the growable scratch buffer built on it.
//!
//! All storage for decoded names and values is obtained through a
//! caller-supplied [`Allocator`], never through a built-in one. Allocations
//! are tagged with a [`Purpose`] so a caller can route member names, scalar
//! values, and block header names to different arenas.

use alloc::vec::Vec;

use crate::error::ErrorKind;

/// Fixed increment by which scratch buffers grow.
pub(crate) const GROW_STEP: usize = 256;

/// What a buffer is being allocated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// An object member name.
    MemberName,
    /// A scalar value (number lexeme or decoded string).
    Value,
    /// A field name held in a block's header table.
    HeaderName,
}

/// Capability for obtaining, growing, and releasing byte buffers.
///
/// The engine asks for storage in [`GROW_STEP`]-sized steps and hands every
/// buffer back through [`release`](Allocator::release) exactly once, on
/// every exit path. A minimal single-shot implementation (fixed budget, no
/// reuse, no-op release) is legal; once it refuses a request the parse
/// aborts with [`ErrorKind::AllocFailed`].
pub trait Allocator {
    /// The buffer handle; its full slice length is its usable capacity.
    type Buf: AsRef<[u8]> + AsMut<[u8]>;

    /// Allocate a buffer of at least `min` bytes, or grow `prev` to that
    /// size, preserving its contents. Returning `None`, or a buffer
    /// smaller than `min`, is an allocation failure. Ownership of `prev`
    /// transfers either way; on failure the allocator reclaims it.
    fn grow(&mut self, purpose: Purpose, prev: Option<Self::Buf>, min: usize) -> Option<Self::Buf>;

    /// Take back a buffer previously handed out by
    /// [`grow`](Allocator::grow).
    fn release(&mut self, purpose: Purpose, buf: Self::Buf);
}

/// Default allocator backed by the global heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapAllocator;

impl Allocator for HeapAllocator {
    type Buf = Vec<u8>;

    fn grow(&mut self, _purpose: Purpose, prev: Option<Vec<u8>>, min: usize) -> Option<Vec<u8>> {
        let mut buf = prev.unwrap_or_default();
        if buf.len() < min {
            buf.resize(min, 0);
        }
        Some(buf)
    }

    fn release(&mut self, _purpose: Purpose, _buf: Vec<u8>) {}
}

/// Growable output buffer owned by whichever production is decoding into
/// it.
///
/// Storage is only acquired on the first byte that needs it, so a
/// production that turns out not to apply usually releases nothing. The
/// owner must call [`release`](Scratch::release) on every exit path.
pub(crate) struct Scratch<A: Allocator> {
    purpose: Purpose,
    buf: Option<A::Buf>,
    len: usize,
}

impl<A: Allocator> Scratch<A> {
    pub(crate) fn new(purpose: Purpose) -> Self {
        Self {
            purpose,
            buf: None,
            len: 0,
        }
    }

    /// Append one byte, growing through the allocator on overflow.
    pub(crate) fn push(&mut self, alloc: &mut A, byte: u8) -> Result<(), ErrorKind> {
        let cap = self.buf.as_ref().map_or(0, |b| b.as_ref().len());
        if self.len == cap {
            let min = cap + GROW_STEP;
            match alloc.grow(self.purpose, self.buf.take(), min) {
                Some(grown) if grown.as_ref().len() >= min => self.buf = Some(grown),
                Some(short) => {
                    alloc.release(self.purpose, short);
                    return Err(ErrorKind::AllocFailed);
                }
                None => return Err(ErrorKind::AllocFailed),
            }
        }
        let Some(buf) = self.buf.as_mut() else {
            return Err(ErrorKind::AllocFailed);
        };
        buf.as_mut()[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    /// The bytes written so far.
    pub(crate) fn bytes(&self) -> &[u8] {
        self.buf.as_ref().map_or(&[], |b| &b.as_ref()[..self.len])
    }

    /// Hand the backing storage back to the allocator.
    pub(crate) fn release(self, alloc: &mut A) {
        if let Some(buf) = self.buf {
            alloc.release(self.purpose, buf);
        }
    }
}
