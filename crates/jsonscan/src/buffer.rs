//! Sliding byte window between a byte source and the lexers.
//!
//! The storage is a single `Vec<u8>` whose length is the allocated capacity.
//! Three offsets partition it:
//!
//! ```text
//! 0        start            end               data.len()
//! |consumed|     window      |      spare      |
//! ```
//!
//! Bytes in `start..end` have been fetched and not yet released. Releasing
//! from the front only moves `start`; the consumed prefix is reclaimed lazily
//! by [`SlidingBuffer::grow`], which shifts the window to the front before it
//! considers reallocating. Both operations keep offsets relative to `start`
//! stable, so a token being measured survives any number of grows.

use alloc::{collections::TryReserveError, vec, vec::Vec};

use crate::debug;

#[derive(Debug, Default)]
pub(crate) struct SlidingBuffer {
    data: Vec<u8>,
    start: usize,
    end: usize,
    /// Total number of bytes ever released from the front.
    consumed: usize,
}

impl SlidingBuffer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            ..Self::default()
        }
    }

    /// Fetched bytes that have not been released.
    #[inline]
    pub(crate) fn window(&self) -> &[u8] {
        &self.data[self.start..self.end]
    }

    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.end - self.start
    }

    /// Allocated bytes past the end of the window.
    #[inline]
    pub(crate) fn spare(&self) -> usize {
        self.data.len() - self.end
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Absolute stream offset of the first window byte.
    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.consumed
    }

    /// Marks the first `n` window bytes as consumed.
    #[inline]
    pub(crate) fn release_front(&mut self, n: usize) {
        debug_assert!(n <= self.remaining(), "released past the window");
        self.start += n;
        self.consumed += n;
        if self.start == self.end {
            // Nothing to preserve, so the whole storage is free again.
            self.start = 0;
            self.end = 0;
        }
    }

    /// Hands the last `n` window bytes back to the spare region.
    #[inline]
    pub(crate) fn release_back(&mut self, n: usize) {
        debug_assert!(n <= self.remaining(), "released past the window");
        self.end -= n;
    }

    /// Extends the window by `additional` bytes and returns them for filling.
    ///
    /// The returned bytes hold stale data; the caller gives back whatever it
    /// did not overwrite with [`release_back`](Self::release_back).
    pub(crate) fn grow(&mut self, additional: usize) -> Result<&mut [u8], TryReserveError> {
        if self.spare() < additional {
            self.compact();
        }
        if self.spare() < additional {
            let needed = self.end + additional;
            let target = needed.max(self.data.len() * 2);
            self.data.try_reserve_exact(target - self.data.len())?;
            self.data.resize(target, 0);
            debug!(capacity = target, window = self.remaining(), "grew scan buffer");
        }
        let from = self.end;
        self.end += additional;
        Ok(&mut self.data[from..self.end])
    }

    /// Moves the window to the start of the storage.
    fn compact(&mut self) {
        if self.start == 0 {
            return;
        }
        self.data.copy_within(self.start..self.end, 0);
        self.end -= self.start;
        self.start = 0;
    }

    #[cfg(any(test, feature = "fuzzing"))]
    pub(crate) fn check_invariants(&self, cursor: usize) {
        assert!(self.start + cursor <= self.end, "cursor past window end");
        assert!(self.end <= self.data.len(), "window past capacity");
    }
}
