//! A streaming lexical scanner for JSON byte streams.
//!
//! [`Scanner`] pulls bytes from a [`ByteSource`] into a reusable sliding
//! buffer and hands out one token at a time as a slice of that buffer. It
//! does not build values, decode escapes or check nesting: every token is
//! delimited and, for literals and numbers, checked against the exact JSON
//! grammar, and the interpretation of the bytes is left to the caller.
//!
//! ```rust
//! use jsonscan::{ScanError, Scanner};
//!
//! let mut scanner = Scanner::new(&br#"{"a": [1, true]}"#[..]);
//! let mut tokens = Vec::new();
//! while let Some(token) = scanner.next() {
//!     tokens.push(String::from_utf8(token.to_vec()).unwrap());
//! }
//! assert_eq!(tokens, ["{", "\"a\"", ":", "[", "1", ",", "true", "]", "}"]);
//! assert!(matches!(scanner.error(), Some(ScanError::EndOfStream)));
//! ```
//!
//! A token borrows the scanner, so it cannot outlive the next call to
//! [`Scanner::next`]; copy it with `to_vec` if it has to be kept.

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
#[allow(unused_imports)]
pub(crate) use {debug, trace};

mod buffer;
mod chunked;
mod error;
mod lexer;
mod options;
mod scanner;
mod source;
mod token;

pub use chunked::ChunkedSource;
pub use error::{Malformed, ScanError};
pub use options::ScannerOptions;
pub use scanner::Scanner;
pub use source::ByteSource;
pub use token::{Token, TokenKind};
