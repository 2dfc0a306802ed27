use thiserror::Error;

/// Why the scanner stopped producing tokens.
///
/// `E` is the [`ByteSource`](crate::ByteSource) error type. Only the first
/// error is kept; see [`Scanner::error`](crate::Scanner::error).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError<E> {
    /// The source has no more bytes. Not a failure on its own: every token
    /// that was complete before the end has been returned.
    #[error("end of stream")]
    EndOfStream,
    /// The source failed to read.
    #[error("read failed: {0}")]
    Source(E),
    /// The bytes at `offset` do not form a JSON token.
    #[error("{kind} at byte {offset}")]
    Malformed {
        /// What was wrong with the token.
        kind: Malformed,
        /// Stream offset of the first byte of the token.
        offset: usize,
    },
    /// A single token needs more than `limit` buffered bytes.
    #[error("token does not fit in the {limit} byte buffer limit")]
    BufferLimit {
        /// The configured [`ScannerOptions::max_buffer_len`](crate::ScannerOptions::max_buffer_len).
        limit: usize,
    },
    /// The buffer could not be grown.
    #[error("failed to grow the scan buffer by {requested} bytes")]
    OutOfMemory {
        /// Size of the failed request.
        requested: usize,
    },
}

impl<E> ScanError<E> {
    /// `true` for [`ScanError::EndOfStream`].
    #[must_use]
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }

    /// The malformation kind, if this is a lexical error.
    #[must_use]
    pub fn malformed(&self) -> Option<Malformed> {
        match self {
            Self::Malformed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Lexical errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Malformed {
    /// A token starting with `t`, `f` or `n` is not `true`, `false` or `null`.
    #[error("invalid literal")]
    Literal,
    /// The stream ended inside a string.
    #[error("unterminated string")]
    UnterminatedString,
    /// The bytes do not match the JSON number grammar.
    #[error("invalid number")]
    Number,
    /// The byte cannot start any token.
    #[error("unexpected byte 0x{0:02x}")]
    UnexpectedByte(u8),
}
