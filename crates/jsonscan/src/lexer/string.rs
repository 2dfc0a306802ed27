use super::Step;

/// Finds the closing quote of a string token.
///
/// The scanner feeds the bytes after the opening quote. A backslash makes
/// the next byte inert, whatever it is; escape payloads are not validated.
#[derive(Debug, Default)]
pub(crate) struct StringLexer {
    escaped: bool,
}

impl StringLexer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns `Done(n)` with `n` counting the closing quote.
    pub(crate) fn feed(&mut self, bytes: &[u8]) -> Step {
        let mut pos = 0;
        while pos < bytes.len() {
            if self.escaped {
                self.escaped = false;
                pos += 1;
                continue;
            }
            let Some(hit) = bytes[pos..]
                .iter()
                .position(|&b| b == b'"' || b == b'\\')
            else {
                return Step::NeedMore;
            };
            pos += hit;
            if bytes[pos] == b'"' {
                return Step::Done(pos + 1);
            }
            self.escaped = true;
            pos += 1;
        }
        Step::NeedMore
    }
}
