#![allow(missing_docs)]

use std::io::{self, Cursor, Read};

use jsonscan::{ChunkedSource, Malformed, ScanError, Scanner, ScannerOptions, TokenKind};
use rstest::rstest;

mod common;

use common::{ChunkReader, scan};

#[test]
fn reads_from_std_readers() {
    let mut scanner = Scanner::new(Cursor::new(br#"{"k": null}"#.to_vec()));
    let mut seen = Vec::new();
    while let Some(token) = scanner.next() {
        seen.push(token.to_vec());
    }
    let expected: [&[u8]; 5] = [b"{", b"\"k\"", b":", b"null", b"}"];
    assert_eq!(seen, expected.map(<[u8]>::to_vec));
    assert!(matches!(scanner.error(), Some(ScanError::EndOfStream)));
}

#[test]
fn tokens_outlive_the_scanner_once_copied() {
    let kept = {
        let mut scanner = Scanner::new(&b"[\"a\\\"b\", -0.5e+3]"[..]);
        let mut kept = Vec::new();
        while let Some(token) = scanner.next_token() {
            kept.push((token.kind, token.to_vec()));
        }
        kept
    };
    assert_eq!(
        kept,
        vec![
            (TokenKind::ArrayStart, b"[".to_vec()),
            (TokenKind::String, br#""a\"b""#.to_vec()),
            (TokenKind::Comma, b",".to_vec()),
            (TokenKind::Number, b"-0.5e+3".to_vec()),
            (TokenKind::ArrayEnd, b"]".to_vec()),
        ]
    );
}

#[rstest]
#[case::bad_literal(b"[tru]", 1, Malformed::Literal, 1)]
#[case::open_string(br#"{"key"#, 1, Malformed::UnterminatedString, 1)]
#[case::bare_point(b"[1.]", 1, Malformed::Number, 1)]
#[case::bare_minus(b"- 1", 0, Malformed::Number, 0)]
#[case::stray_byte(b"[1, @]", 3, Malformed::UnexpectedByte(b'@'), 4)]
fn malformed_input_is_not_end_of_stream(
    #[case] input: &[u8],
    #[case] tokens_before: usize,
    #[case] kind: Malformed,
    #[case] offset: usize,
    #[values(1, 4, 1024)] chunk: usize,
) {
    let (tokens, error) = scan(input, chunk, ScannerOptions::default());
    assert_eq!(tokens.len(), tokens_before);
    match error {
        Some(ScanError::Malformed { kind: k, offset: o }) => {
            assert_eq!((k, o), (kind, offset));
        }
        other => panic!("expected a malformed token, got {other:?}"),
    }
}

#[test]
fn io_errors_surface_as_source_errors() {
    let reader = Cursor::new(b"[1, 2".to_vec()).chain(FailingReader);
    let mut scanner = Scanner::with_options(
        reader,
        ScannerOptions {
            read_size: 2,
            ..ScannerOptions::default()
        },
    );
    let mut count = 0;
    while scanner.next().is_some() {
        count += 1;
    }
    // The trailing `2` is cut off by the failure, not by a clean end.
    assert_eq!(count, 3);

    let error = scanner.error().expect("scanner stopped without an error");
    assert!(matches!(error, ScanError::Source(e) if e.kind() == io::ErrorKind::BrokenPipe));
    assert_eq!(error.to_string(), "read failed: pipe closed");
    assert_eq!(scanner.next(), None);
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }
}

#[test]
fn into_inner_returns_the_unread_source() {
    let mut scanner = Scanner::with_options(
        ChunkReader::new(b"true false", 1),
        ScannerOptions {
            read_size: 1,
            ..ScannerOptions::default()
        },
    );
    assert_eq!(scanner.next(), Some(&b"true"[..]));
    assert_eq!(scanner.offset(), 4);

    let mut rest = Vec::new();
    scanner.into_inner().read_to_end(&mut rest).unwrap();
    // Literals are matched without lookahead, so nothing past them was read.
    assert_eq!(rest, b" false");
}

#[test]
fn chunked_source_matches_std_reader() {
    let input = br#"{"values": [1, 2.5, -3e9], "ok": true, "none": null}"#;
    let (expected, _) = scan(input, 1024, ScannerOptions::default());

    for chunk in [1, 2, 5, 64] {
        let mut scanner = Scanner::new(ChunkedSource::new(input, chunk));
        let mut tokens = Vec::new();
        while let Some(token) = scanner.next_token() {
            tokens.push((token.kind, token.offset, token.to_vec()));
        }
        assert_eq!(tokens.len(), expected.len(), "chunk size {chunk}");
        for ((kind, offset, bytes), reference) in tokens.iter().zip(&expected) {
            assert_eq!(*kind, reference.kind);
            assert_eq!(*offset, reference.offset);
            assert_eq!(*bytes, reference.bytes);
        }
        assert!(scanner.get_ref().remaining().is_empty());
    }
}

#[test]
fn debug_output_shows_buffered_bytes() {
    let mut scanner = Scanner::new(ChunkedSource::new(b"[1] ", 16));
    scanner.next();
    insta::assert_snapshot!(
        format!("{scanner:?}"),
        @r#"Scanner { source: ChunkedSource { data: [], chunk_size: 16 }, buffered: "1] ", offset: 1, error: None, .. }"#
    );
}

#[cfg(feature = "serde")]
#[test]
fn token_kinds_serialize_by_name() {
    let kinds = [TokenKind::ObjectStart, TokenKind::Number, TokenKind::Null];
    assert_eq!(
        serde_json::to_string(&kinds).unwrap(),
        r#"["ObjectStart","Number","Null"]"#
    );
}
