//! Scanner: owner of the byte source, the sliding buffer and the sticky
//! error.
//!
//! Each call to [`Scanner::next_token`] releases the previous token, skips
//! whitespace, and dispatches on the first significant byte. Punctuation and
//! literals are decided from a bounded prefix; strings and numbers are
//! measured by their lexers, refilling the window whenever a token runs off
//! its end.
//!
//! Invariants
//! - `cursor` counts window bytes that belong to the token being measured or
//!   to the token last returned; it never exceeds the window length.
//! - Only the first error is kept. An `EndOfStream` hit while reading the
//!   tail of a token gives way to the lexical error that the truncation
//!   causes.
//! - Any error other than `EndOfStream` stops the scanner: no further reads,
//!   no further tokens.

use core::fmt;

use bstr::BStr;

use crate::{
    ByteSource, Malformed, ScanError, ScannerOptions, Token, TokenKind,
    buffer::SlidingBuffer,
    debug,
    lexer::{NumberLexer, Step, StringLexer},
    trace,
};


const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// A streaming JSON tokenizer over a [`ByteSource`].
///
/// Tokens are slices of the scanner's own buffer: no allocation happens once
/// the buffer has grown to fit the largest token. The borrow checker ties
/// every token to the call that produced it, so a token cannot be held
/// across the next call.
///
/// ```rust
/// use jsonscan::{Malformed, ScanError, Scanner, TokenKind};
///
/// let mut scanner = Scanner::new(&b"[1.5, nul]"[..]);
/// assert_eq!(scanner.next_token().map(|t| t.kind), Some(TokenKind::ArrayStart));
/// assert_eq!(scanner.next(), Some(&b"1.5"[..]));
/// assert_eq!(scanner.next(), Some(&b","[..]));
/// assert_eq!(scanner.next(), None);
/// assert_eq!(
///     scanner.error().and_then(ScanError::malformed),
///     Some(Malformed::Literal)
/// );
/// ```
pub struct Scanner<R: ByteSource> {
    source: R,
    buffer: SlidingBuffer,
    cursor: usize,
    error: Option<ScanError<R::Error>>,
    options: ScannerOptions,
}

impl<R> fmt::Debug for Scanner<R>
where
    R: ByteSource + fmt::Debug,
    R::Error: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("source", &self.source)
            .field("buffered", &BStr::new(self.buffered()))
            .field("offset", &self.offset())
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<R: ByteSource> Scanner<R> {
    /// Creates a scanner with default options.
    pub fn new(source: R) -> Self {
        Self::with_options(source, ScannerOptions::default())
    }

    /// Creates a scanner with the given options.
    pub fn with_options(source: R, options: ScannerOptions) -> Self {
        Self {
            source,
            buffer: SlidingBuffer::with_capacity(options.initial_capacity),
            cursor: 0,
            error: None,
            options,
        }
    }

    /// Returns the bytes of the next token.
    ///
    /// `None` means the stream ended or the scanner failed; [`error`]
    /// tells which.
    ///
    /// [`error`]: Self::error
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&[u8]> {
        self.next_token().map(|token| token.bytes)
    }

    /// Returns the next token with its kind and stream offset.
    ///
    /// `None` means the stream ended or the scanner failed; [`error`]
    /// tells which.
    ///
    /// [`error`]: Self::error
    pub fn next_token(&mut self) -> Option<Token<'_>> {
        self.release();
        if self.is_halted() {
            return None;
        }

        let first = self.skip_whitespace()?;
        let offset = self.buffer.offset();
        let measured = match TokenKind::from_leading_byte(first) {
            None => Err(Malformed::UnexpectedByte(first)),
            Some(kind) => match kind {
                TokenKind::String => self.lex_string(),
                TokenKind::Number => self.lex_number(),
                TokenKind::True | TokenKind::False | TokenKind::Null => self.lex_literal(kind),
                _ => Ok(1),
            }
            .map(|len| (kind, len)),
        };

        match measured {
            Ok((kind, len)) => {
                if let Some(limit) = self.options.max_buffer_len.filter(|&limit| len > limit) {
                    self.cursor = 0;
                    self.record(ScanError::BufferLimit { limit });
                    return None;
                }
                self.cursor = len;
                #[cfg(any(test, feature = "fuzzing"))]
                self.check_invariants();
                Some(Token {
                    kind,
                    bytes: &self.buffer.window()[..len],
                    offset,
                })
            }
            Err(kind) => {
                // The failed token is not returned; leave it buffered.
                self.cursor = 0;
                self.record(ScanError::Malformed { kind, offset });
                None
            }
        }
    }

    /// The first error recorded, if any.
    ///
    /// After [`next`](Self::next) returns `None` this is
    /// [`ScanError::EndOfStream`] for a clean end, or the reason scanning
    /// stopped.
    pub fn error(&self) -> Option<&ScanError<R::Error>> {
        self.error.as_ref()
    }

    /// Stream offset of the first byte after the last returned token.
    pub fn offset(&self) -> usize {
        self.buffer.offset() + self.cursor
    }

    /// Bytes read from the source but not yet returned as tokens.
    pub fn buffered(&self) -> &[u8] {
        &self.buffer.window()[self.cursor..]
    }

    /// The options this scanner was built with.
    pub fn options(&self) -> &ScannerOptions {
        &self.options
    }

    /// The underlying source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Returns the source. Bytes in [`buffered`](Self::buffered) are lost.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Releases the last token's bytes.
    fn release(&mut self) {
        self.buffer.release_front(self.cursor);
        self.cursor = 0;
    }

    fn is_halted(&self) -> bool {
        self.error.as_ref().is_some_and(|e| !e.is_end_of_stream())
    }

    fn record(&mut self, error: ScanError<R::Error>) {
        let replace = match &self.error {
            None => true,
            Some(ScanError::EndOfStream) => !error.is_end_of_stream(),
            Some(_) => false,
        };
        if replace {
            debug!(
                offset = self.buffer.offset(),
                end_of_stream = error.is_end_of_stream(),
                malformed = ?error.malformed(),
                "recorded scan error"
            );
            self.error = Some(error);
        }
    }

    /// Drops leading whitespace and returns the first significant byte, which
    /// is left at the start of the window.
    fn skip_whitespace(&mut self) -> Option<u8> {
        loop {
            let window = self.buffer.window();
            if let Some(pos) = window.iter().position(|&b| !is_whitespace(b)) {
                let first = window[pos];
                self.buffer.release_front(pos);
                return Some(first);
            }
            let skipped = window.len();
            self.buffer.release_front(skipped);
            if self.fetch_more(0) == 0 {
                return None;
            }
        }
    }

    fn lex_literal(&mut self, kind: TokenKind) -> Result<usize, Malformed> {
        let expected = kind.literal().ok_or(Malformed::Literal)?;
        self.ensure(expected.len());
        if self.buffer.window().starts_with(expected) {
            Ok(expected.len())
        } else {
            Err(Malformed::Literal)
        }
    }

    fn lex_string(&mut self) -> Result<usize, Malformed> {
        let mut lexer = StringLexer::new();
        self.cursor = 1;
        loop {
            match lexer.feed(&self.buffer.window()[self.cursor..]) {
                Step::Done(n) => return Ok(self.cursor + n),
                Step::NeedMore => self.cursor = self.buffer.remaining(),
                Step::Reject => return Err(Malformed::UnterminatedString),
            }
            if self.fetch_more(0) == 0 {
                return Err(Malformed::UnterminatedString);
            }
        }
    }

    fn lex_number(&mut self) -> Result<usize, Malformed> {
        let mut lexer = NumberLexer::new();
        self.cursor = 0;
        loop {
            match lexer.feed(&self.buffer.window()[self.cursor..]) {
                Step::Done(n) => return Ok(self.cursor + n),
                Step::NeedMore => self.cursor = self.buffer.remaining(),
                Step::Reject => return Err(Malformed::Number),
            }
            if self.fetch_more(0) == 0 {
                // Only a clean end of stream can finish a number; after a
                // failed read the digits seen so far may be a prefix.
                return if lexer.accepts_end() && !self.is_halted() {
                    Ok(self.cursor)
                } else {
                    Err(Malformed::Number)
                };
            }
        }
    }

    /// Reads until the window holds `n` bytes or the source stops.
    fn ensure(&mut self, n: usize) {
        while self.buffer.remaining() < n {
            if self.fetch_more(n - self.buffer.remaining()) == 0 {
                break;
            }
        }
    }

    /// Reads more bytes into the window and returns how many arrived.
    ///
    /// `0` means nothing more will arrive; the reason is in `self.error`.
    fn fetch_more(&mut self, requested: usize) -> usize {
        if self.error.is_some() {
            return 0;
        }

        let read_size = self.options.read_size.max(1);
        let window_len = self.buffer.remaining();
        let spare = self.buffer.spare();
        let mut len = if requested == 0 || (requested < read_size && spare == 0) {
            read_size
        } else {
            requested.min(read_size.max(window_len * 2))
        };
        len = len.max(spare);

        if let Some(limit) = self.options.max_buffer_len {
            // One byte past the limit tells whether a token of exactly
            // `limit` bytes ends there.
            let room = limit.saturating_add(1).saturating_sub(window_len);
            if room == 0 {
                self.record(ScanError::BufferLimit { limit });
                return 0;
            }
            len = len.min(room);
        }

        let tail = match self.buffer.grow(len) {
            Ok(tail) => tail,
            Err(_) => {
                self.record(ScanError::OutOfMemory { requested: len });
                return 0;
            }
        };
        let read = match self.source.read(tail) {
            Ok(read) => read.min(len),
            Err(err) => {
                self.buffer.release_back(len);
                self.record(ScanError::Source(err));
                return 0;
            }
        };
        self.buffer.release_back(len - read);
        trace!(requested, len, read, "fetched");

        if read == 0 {
            self.record(ScanError::EndOfStream);
        }
        read
    }

    #[cfg(any(test, feature = "fuzzing"))]
    fn check_invariants(&self) {
        self.buffer.check_invariants(self.cursor);
    }
}
