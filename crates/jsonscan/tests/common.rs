#![allow(missing_docs, dead_code)]

use std::io;

use jsonscan::{ScanError, Scanner, ScannerOptions, TokenKind};
use quickcheck::{Arbitrary, Gen};
use serde_json::{Map, Number, Value};

/// An `io::Read` that never returns more than `chunk` bytes per call.
pub struct ChunkReader<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl<'a> ChunkReader<'a> {
    pub fn new(data: &'a [u8], chunk: usize) -> Self {
        Self {
            data,
            chunk: chunk.max(1),
        }
    }
}

impl io::Read for ChunkReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.chunk).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// An owned copy of one scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanned {
    pub kind: TokenKind,
    pub offset: usize,
    pub bytes: Vec<u8>,
}

/// Scans all of `input`, `chunk` bytes per read, and returns the tokens with
/// the error the scanner stopped on.
pub fn scan(
    input: &[u8],
    chunk: usize,
    options: ScannerOptions,
) -> (Vec<Scanned>, Option<ScanError<io::Error>>) {
    let mut scanner = Scanner::with_options(ChunkReader::new(input, chunk), options);
    let mut tokens = Vec::new();
    while let Some(token) = scanner.next_token() {
        tokens.push(Scanned {
            kind: token.kind,
            offset: token.offset,
            bytes: token.to_vec(),
        });
    }
    let error = match scanner.error() {
        None => None,
        Some(ScanError::EndOfStream) => Some(ScanError::EndOfStream),
        Some(ScanError::Malformed { kind, offset }) => Some(ScanError::Malformed {
            kind: *kind,
            offset: *offset,
        }),
        Some(other) => panic!("unexpected scanner error: {other}"),
    };
    (tokens, error)
}

/// Tokens of a document, derived from the value rather than from its text.
pub fn reference_tokens(value: &Value) -> Vec<Vec<u8>> {
    fn walk(value: &Value, out: &mut Vec<Vec<u8>>) {
        match value {
            Value::Array(items) => {
                out.push(b"[".to_vec());
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(b",".to_vec());
                    }
                    walk(item, out);
                }
                out.push(b"]".to_vec());
            }
            Value::Object(map) => {
                out.push(b"{".to_vec());
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push(b",".to_vec());
                    }
                    out.push(serde_json::to_vec(key).unwrap());
                    out.push(b":".to_vec());
                    walk(item, out);
                }
                out.push(b"}".to_vec());
            }
            scalar => out.push(serde_json::to_vec(scalar).unwrap()),
        }
    }

    let mut out = Vec::new();
    walk(value, &mut out);
    out
}

/// A random JSON document.
#[derive(Debug, Clone)]
pub struct Doc(pub Value);

impl Arbitrary for Doc {
    fn arbitrary(g: &mut Gen) -> Self {
        fn number(g: &mut Gen) -> Value {
            if bool::arbitrary(g) {
                Value::Number(i64::arbitrary(g).into())
            } else {
                let mut value = f64::arbitrary(g);
                while !value.is_finite() {
                    value = f64::arbitrary(g);
                }
                Number::from_f64(value).map_or(Value::Null, Value::Number)
            }
        }

        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            let choices = if depth == 0 { 4 } else { 6 };
            match usize::arbitrary(g) % choices {
                0 => Value::Null,
                1 => Value::Bool(bool::arbitrary(g)),
                2 => number(g),
                3 => Value::String(String::arbitrary(g)),
                4 => {
                    let len = usize::arbitrary(g) % 4;
                    Value::Array((0..len).map(|_| gen_val(g, depth - 1)).collect())
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    let mut map = Map::new();
                    for _ in 0..len {
                        map.insert(String::arbitrary(g), gen_val(g, depth - 1));
                    }
                    Value::Object(map)
                }
            }
        }

        let depth = usize::arbitrary(g) % 4;
        Doc(gen_val(g, depth))
    }
}

pub fn quickcheck_tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}
