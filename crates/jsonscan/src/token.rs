use alloc::vec::Vec;
use core::fmt;

use bstr::BStr;

/// Lexical class of a token, decided by its first byte.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// A quoted string, quotes and escapes included.
    String,
    /// A number.
    Number,
}

impl TokenKind {
    /// Classifies the byte a token starts with, or `None` if no token can
    /// start with it.
    #[must_use]
    pub const fn from_leading_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            b'{' => Self::ObjectStart,
            b'}' => Self::ObjectEnd,
            b'[' => Self::ArrayStart,
            b']' => Self::ArrayEnd,
            b':' => Self::Colon,
            b',' => Self::Comma,
            b't' => Self::True,
            b'f' => Self::False,
            b'n' => Self::Null,
            b'"' => Self::String,
            b'-' | b'0'..=b'9' => Self::Number,
            _ => return None,
        })
    }

    /// `true` for the six single-byte punctuation tokens.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            Self::ObjectStart
                | Self::ObjectEnd
                | Self::ArrayStart
                | Self::ArrayEnd
                | Self::Colon
                | Self::Comma
        )
    }

    /// The exact spelling of a literal token.
    #[must_use]
    pub const fn literal(self) -> Option<&'static [u8]> {
        match self {
            Self::True => Some(b"true"),
            Self::False => Some(b"false"),
            Self::Null => Some(b"null"),
            _ => None,
        }
    }
}

/// A token borrowed from the scanner's buffer.
///
/// Valid until the next call on the scanner; use [`Token::to_vec`] to keep
/// the bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Lexical class.
    pub kind: TokenKind,
    /// Raw token bytes. Strings keep their quotes and escape sequences.
    pub bytes: &'a [u8],
    /// Stream offset of the first byte.
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// Token length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`: every token has at least one byte.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Stream offset one past the last byte.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.bytes.len()
    }

    /// The bytes as a byte string, for display.
    #[must_use]
    pub fn as_bstr(&self) -> &'a BStr {
        BStr::new(self.bytes)
    }

    /// Copies the token bytes out of the scanner's buffer.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("kind", &self.kind)
            .field("bytes", &self.as_bstr())
            .field("offset", &self.offset)
            .finish()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}
