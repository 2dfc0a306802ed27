/// A sequential, blocking source of bytes.
///
/// This is the only capability the scanner needs from its input: fill a
/// caller supplied region and report how much was written. `Ok(0)` for a
/// non-empty `buf` means the source is exhausted. There is no seeking and no
/// peeking; the scanner does its own buffering.
///
/// With the `std` feature every [`std::io::Read`] is a `ByteSource`.
/// [`ChunkedSource`](crate::ChunkedSource) covers in-memory input without
/// `std`.
pub trait ByteSource {
    /// Error reported by a failed read.
    type Error;

    /// Reads up to `buf.len()` bytes into `buf`, returning the count read.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the read fails. The scanner records the
    /// first such error and never reads again.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

#[cfg(feature = "std")]
impl<R: std::io::Read + ?Sized> ByteSource for R {
    type Error = std::io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            match std::io::Read::read(self, buf) {
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                result => return result,
            }
        }
    }
}
