//! Incremental recognizers for the two variable-length tokens.
//!
//! Both are fed successive slices of the window and remember just enough
//! state to resume where the previous slice ended, so the scanner can refill
//! its buffer in the middle of a token without rescanning.

mod number;
mod string;

pub(crate) use number::NumberLexer;
pub(crate) use string::StringLexer;

/// What happened after feeding one more slice into a recognizer?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Every byte extended the token; it may continue in the next slice.
    NeedMore,
    /// The token ends after this many bytes of the slice.
    Done(usize),
    /// The bytes cannot form a token.
    Reject,
}
