#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonscan::{ChunkedSource, ScanError, Scanner, ScannerOptions};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 3; // chunk size, read size, buffer limit

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r"];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Mostly lets libFuzzer mutate; every tenth run writes a fresh header and a
/// well-formed document instead.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if max_size < HEADER {
        return fuzzer_mutate(data, size, max_size);
    }
    if size < HEADER || seed % 10 == 0 {
        let header = with_rng(|rng| rng.next_u32().to_le_bytes());
        data[..HEADER].copy_from_slice(&header[..HEADER]);

        let mut prefix = HEADER;
        prefix += append_whitespace(&mut data[prefix..], max_size - prefix);
        prefix += append_value(&mut data[prefix..], size.max(16), max_size - prefix);
        prefix += append_whitespace(&mut data[prefix..], max_size - prefix);
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        let n = rng.random_range(0..=limit.min(4));
        for byte in &mut buf[..n] {
            *byte = WS_TABLE[rng.random_range(0..WS_TABLE.len())][0];
        }
        n
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");
    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
        };
        Ok(ArbitraryValue(value))
    }
}

fn scan(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let chunk_size = usize::from(data[0]) + 1;
    let read_size = usize::from(data[1]) + 1;
    // Zero means unbounded; anything else caps the buffer at 8..=2047 bytes.
    let max_buffer_len = (data[2] != 0).then(|| usize::from(data[2]) * 8);
    let input = &data[HEADER..];

    let mut scanner = Scanner::with_options(
        ChunkedSource::new(input, chunk_size),
        ScannerOptions {
            read_size,
            max_buffer_len,
            ..ScannerOptions::default()
        },
    );

    let mut end = 0;
    while let Some(token) = scanner.next_token() {
        assert!(token.offset >= end, "tokens overlap");
        assert!(
            input[end..token.offset]
                .iter()
                .all(|b| b" \t\r\n".contains(b)),
            "skipped a non-whitespace byte"
        );
        assert_eq!(token.bytes, &input[token.offset..token.end()]);
        end = token.end();
    }

    let error = scanner.error().expect("scanner stopped without an error");
    assert!(
        !matches!(error, ScanError::Source(_) | ScanError::OutOfMemory { .. }),
        "unexpected error: {error}"
    );
    if let ScanError::BufferLimit { limit } = *error {
        // The token that stopped the scanner is still buffered.
        assert!(
            scanner.buffered().len() > limit,
            "token within the limit rejected"
        );
    } else if serde_json::from_slice::<Value>(input).is_ok() {
        assert!(
            error.is_end_of_stream(),
            "valid document rejected: {error}"
        );
    }
    assert!(scanner.next_token().is_none(), "scanner resumed after stopping");
}

fuzz_target!(|data: &[u8]| scan(data));
