use core::convert::Infallible;

use crate::ByteSource;

/// An in-memory [`ByteSource`] that hands out at most `chunk_size` bytes per
/// read.
///
/// Useful without `std`, and for checking that a consumer does not depend on
/// how its input happens to be split.
///
/// ```rust
/// use jsonscan::{ChunkedSource, Scanner};
///
/// let mut scanner = Scanner::new(ChunkedSource::new(b"[10, 20]", 1));
/// let mut count = 0;
/// while scanner.next().is_some() {
///     count += 1;
/// }
/// assert_eq!(count, 5);
/// ```
#[derive(Debug, Clone)]
pub struct ChunkedSource<'a> {
    data: &'a [u8],
    chunk_size: usize,
}

impl<'a> ChunkedSource<'a> {
    /// Serves `data` in pieces of at most `chunk_size` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    #[must_use]
    pub fn new(data: &'a [u8], chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be positive");
        Self { data, chunk_size }
    }

    /// Bytes not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        self.data
    }
}

impl ByteSource for ChunkedSource<'_> {
    type Error = Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.chunk_size).min(self.data.len());
        let (head, tail) = self.data.split_at(n);
        buf[..n].copy_from_slice(head);
        self.data = tail;
        Ok(n)
    }
}
