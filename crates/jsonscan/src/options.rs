/// Configuration for a [`Scanner`](crate::Scanner).
///
/// # Examples
///
/// ```rust
/// use jsonscan::{Scanner, ScannerOptions};
///
/// let options = ScannerOptions {
///     read_size: 64 * 1024,
///     max_buffer_len: Some(1 << 20),
///     ..Default::default()
/// };
/// let scanner = Scanner::with_options(&b"[]"[..], options);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerOptions {
    /// Preferred number of bytes per read from the source.
    ///
    /// Small refills are rounded up to this size to amortize the per-read
    /// cost of the source. Zero is treated as one.
    ///
    /// # Default
    ///
    /// `1024`
    pub read_size: usize,

    /// Bytes of buffer storage allocated up front.
    ///
    /// # Default
    ///
    /// `0`: the first read allocates.
    pub initial_capacity: usize,

    /// Longest token the scanner may buffer.
    ///
    /// A token longer than this many bytes stops the scanner with
    /// [`ScanError::BufferLimit`](crate::ScanError::BufferLimit). The window
    /// may hold one byte more than the limit, the lookahead that finds where
    /// a number ends.
    ///
    /// # Default
    ///
    /// `None`: unbounded.
    pub max_buffer_len: Option<usize>,
}

impl ScannerOptions {
    /// Read size used when none is configured.
    pub const DEFAULT_READ_SIZE: usize = 1024;
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            read_size: Self::DEFAULT_READ_SIZE,
            initial_capacity: 0,
            max_buffer_len: None,
        }
    }
}
