//! Charset-aware text decoding for response bodies.
//!
//! Bodies are decoded incrementally in [`COPY_BUFFER_SIZE`] chunks and the
//! result is the concatenation of the body's lines with their terminators
//! (`\n`, `\r`, `\r\n`) removed. That is the same text a line-by-line reader
//! produces when it appends each line without a separator, so every CR and LF
//! character is dropped.
//!
//! Charset names follow the IANA registry. `encoding_rs` implements the
//! WHATWG table, which folds `ISO-8859-1` and `US-ASCII` into windows-1252 and
//! reads bare `UTF-16` as little-endian, so those names are resolved here
//! before falling back to the WHATWG labels.

use std::io::{self, Read};

use encoding_rs::{CoderResult, Decoder, Encoding, UTF_16BE};

use super::constants::COPY_BUFFER_SIZE;

const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso8859_1",
    "iso_8859_1",
    "iso_8859-1",
    "iso_8859-1:1987",
    "iso88591",
    "iso-ir-100",
    "latin1",
    "l1",
    "cp819",
    "ibm819",
    "ibm-819",
    "csisolatin1",
    "8859_1",
    "819",
];

const ASCII_LABELS: &[&str] = &[
    "us-ascii",
    "ascii",
    "ansi_x3.4-1968",
    "ansi_x3.4-1986",
    "iso646-us",
    "iso_646.irv:1991",
    "iso-ir-6",
    "cp367",
    "ibm367",
    "csascii",
    "us",
    "646",
];

const UTF16_LABELS: &[&str] = &["utf-16", "utf16", "unicode", "unicodebig"];

/// A resolved text charset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Charset {
    /// ISO-8859-1: each byte is the code point of the same value.
    Latin1,
    /// US-ASCII: bytes above 0x7F are malformed.
    Ascii,
    /// UTF-16 whose byte-order mark picks the endianness; big-endian without one.
    Utf16,
    /// Any other charset, by its WHATWG label.
    Whatwg(&'static Encoding),
}

/// Looks up a charset by name (`UTF-8`, `ISO-8859-1`, `gbk`, ...), ignoring
/// case and surrounding whitespace.
pub(crate) fn resolve_charset(label: &str) -> Option<Charset> {
    let name = label.trim().to_ascii_lowercase();
    if LATIN1_LABELS.contains(&name.as_str()) {
        Some(Charset::Latin1)
    } else if ASCII_LABELS.contains(&name.as_str()) {
        Some(Charset::Ascii)
    } else if UTF16_LABELS.contains(&name.as_str()) {
        Some(Charset::Utf16)
    } else {
        Encoding::for_label(name.as_bytes()).map(Charset::Whatwg)
    }
}

/// Drains `reader`, decoding with `charset` and joining lines.
///
/// Malformed sequences become U+FFFD. Outside of UTF-16 a byte-order mark is
/// kept as U+FEFF rather than sniffed, so the configured charset always wins.
pub(crate) fn decode_joined_lines<R: Read + ?Sized>(
    reader: &mut R,
    charset: Charset,
) -> io::Result<String> {
    match charset {
        Charset::Latin1 => decode_bytes(reader, char::from),
        Charset::Ascii => decode_bytes(reader, |b| {
            if b.is_ascii() {
                char::from(b)
            } else {
                char::REPLACEMENT_CHARACTER
            }
        }),
        Charset::Utf16 => decode_with(reader, UTF_16BE.new_decoder()),
        Charset::Whatwg(encoding) => decode_with(reader, encoding.new_decoder_without_bom_handling()),
    }
}

/// Single-byte charsets map every byte on its own, so no decoder state is needed.
fn decode_bytes<R, F>(reader: &mut R, map: F) -> io::Result<String>
where
    R: Read + ?Sized,
    F: Fn(u8) -> char,
{
    let mut raw = [0u8; COPY_BUFFER_SIZE];
    let mut text = String::new();
    loop {
        let n = match reader.read(&mut raw) {
            Ok(0) => return Ok(text),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        text.extend(
            raw[..n]
                .iter()
                .map(|&b| map(b))
                .filter(|c| !matches!(c, '\r' | '\n')),
        );
    }
}

fn decode_with<R: Read + ?Sized>(reader: &mut R, mut decoder: Decoder) -> io::Result<String> {
    let mut raw = [0u8; COPY_BUFFER_SIZE];
    let mut chunk = String::with_capacity(
        decoder
            .max_utf8_buffer_length(COPY_BUFFER_SIZE)
            .unwrap_or(COPY_BUFFER_SIZE * 3),
    );
    let mut text = String::new();

    loop {
        let n = match reader.read(&mut raw) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let last = n == 0;

        let mut input = &raw[..n];
        loop {
            let (result, consumed, _had_errors) = decoder.decode_to_string(input, &mut chunk, last);
            input = &input[consumed..];
            push_without_terminators(&mut text, &chunk);
            chunk.clear();
            if matches!(result, CoderResult::InputEmpty) {
                break;
            }
        }

        if last {
            return Ok(text);
        }
    }
}

fn push_without_terminators(text: &mut String, chunk: &str) {
    text.extend(chunk.chars().filter(|c| !matches!(c, '\r' | '\n')));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8], label: &str) -> String {
        let charset = resolve_charset(label).unwrap();
        decode_joined_lines(&mut &bytes[..], charset).unwrap()
    }

    #[test]
    fn test_line_terminators_of_every_kind_are_dropped() {
        assert_eq!(decode(b"one\r\ntwo\rthree\nfour\n", "UTF-8"), "onetwothreefour");
    }

    #[test]
    fn test_blank_lines_contribute_nothing() {
        assert_eq!(decode(b"\n\n a \n\r\n", "utf-8"), " a ");
    }

    #[test]
    fn test_empty_body_decodes_to_empty_string() {
        assert_eq!(decode(b"", "UTF-8"), "");
    }

    #[test]
    fn test_multibyte_sequence_split_across_chunks() {
        let mut body = vec![b'a'; COPY_BUFFER_SIZE - 1];
        body.extend_from_slice("é中".as_bytes());
        let text = decode(&body, "UTF-8");
        assert!(text.ends_with("é中"), "tail was: {:?}", &text[text.len() - 8..]);
        assert_eq!(text.chars().count(), COPY_BUFFER_SIZE + 1);
    }

    #[test]
    fn test_single_byte_charset_decodes() {
        assert_eq!(decode(&[0x63, 0x61, 0x66, 0xE9], "ISO-8859-1"), "café");
    }

    #[test]
    fn test_latin1_maps_every_byte_to_same_code_point() {
        let all: Vec<u8> = (0x80..=0xFF).collect();
        let expected: String = (0x80..=0xFFu32).filter_map(char::from_u32).collect();
        assert_eq!(decode(&all, "ISO-8859-1"), expected);
        assert_eq!(decode(&[0x80, 0x9F], "latin1"), "\u{80}\u{9F}");
    }

    #[test]
    fn test_windows_1252_label_still_uses_windows_table() {
        assert_eq!(decode(&[0x80], "windows-1252"), "€");
    }

    #[test]
    fn test_us_ascii_replaces_high_bytes() {
        assert_eq!(decode(&[b'a', 0xE9, 0x80, b'z'], "US-ASCII"), "a\u{FFFD}\u{FFFD}z");
        assert_eq!(decode(b"plain\r\n", "ascii"), "plain");
    }

    #[test]
    fn test_utf16_without_mark_is_big_endian() {
        assert_eq!(decode(&[0x00, 0x41, 0x00, 0x0A, 0x00, 0x42], "UTF-16"), "AB");
    }

    #[test]
    fn test_utf16_mark_selects_endianness_and_is_removed() {
        assert_eq!(decode(&[0xFE, 0xFF, 0x00, 0x41], "utf-16"), "A");
        assert_eq!(decode(&[0xFF, 0xFE, 0x41, 0x00], "UTF-16"), "A");
    }

    #[test]
    fn test_explicit_utf16_endianness_labels_keep_their_order() {
        assert_eq!(decode(&[0x41, 0x00], "UTF-16LE"), "A");
        assert_eq!(decode(&[0x00, 0x41], "UTF-16BE"), "A");
    }

    #[test]
    fn test_malformed_utf8_is_replaced() {
        assert_eq!(decode(&[b'o', 0xFF, b'k'], "UTF-8"), "o\u{FFFD}k");
    }

    #[test]
    fn test_resolve_charset_is_case_and_space_insensitive() {
        assert_eq!(
            resolve_charset(" utf-8 "),
            Some(Charset::Whatwg(encoding_rs::UTF_8))
        );
        assert_eq!(resolve_charset(" Iso-8859-1"), Some(Charset::Latin1));
        assert_eq!(resolve_charset("US-ASCII "), Some(Charset::Ascii));
        assert_eq!(resolve_charset("UTF-16"), Some(Charset::Utf16));
        assert!(resolve_charset("x-not-a-charset").is_none());
    }

    #[test]
    fn test_read_error_propagates() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
            }
        }

        let err = decode_joined_lines(&mut Broken, Charset::Whatwg(encoding_rs::UTF_8)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        let err = decode_joined_lines(&mut Broken, Charset::Latin1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
    }
}
