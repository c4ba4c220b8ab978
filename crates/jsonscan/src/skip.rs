//! Skipping values without materializing them.

use core::ops::Range;

use crate::{
    error::ScanError,
    literal::{decode_false, decode_null, decode_true},
    macros::trace,
    number::skip_number,
    token::skip_blank,
};

/// Byte span of a skipped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Offset of the first byte of the value, after any whitespace.
    pub start: usize,
    /// Offset just past the last byte of the value.
    pub end: usize,
}

impl Span {
    /// Length of the value text in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The value text within `src`.
    ///
    /// # Panics
    ///
    /// If `src` is not the buffer the span was produced from and is shorter
    /// than `end`.
    #[must_use]
    pub fn slice<'a>(&self, src: &'a [u8]) -> &'a [u8] {
        &src[self.start..self.end]
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// Skips a string starting at the opening quote at `pos`.
///
/// Returns the offset just past the closing quote and the offset of the
/// first backslash seen, if any. A backslash always skips the byte after it;
/// whether the escape is legal is left to [`crate::unescape`].
///
/// # Errors
///
/// - `Eof` if fewer than two bytes remain at `pos` or the closing quote is
///   never found.
/// - `InvalidChar` if the byte at `pos` is not `"`.
pub fn skip_string(src: &[u8], pos: usize) -> Result<(usize, Option<usize>), ScanError> {
    if pos + 1 >= src.len() {
        return Err(ScanError::eof(src));
    }
    if src[pos] != b'"' {
        return Err(ScanError::invalid_char(pos));
    }

    let mut escape = None;
    let mut i = pos + 1;
    while let Some(&c) = src.get(i) {
        match c {
            b'\\' => {
                escape.get_or_insert(i);
                i += 2;
            }
            b'"' => return Ok((i + 1, escape)),
            _ => i += 1,
        }
    }
    Err(ScanError::eof(src))
}

/// Skips a balanced `open ... close` pair starting at `pos`.
///
/// Delimiters inside quoted strings are ignored, and the byte after any
/// backslash is skipped unconditionally. Serves both objects and arrays.
///
/// # Errors
///
/// - `Eof` if fewer than two bytes remain at `pos`.
/// - `InvalidChar` at `pos` if the byte there is not `open`, or if the
///   buffer ends before the nesting closes.
pub fn skip_pair(src: &[u8], pos: usize, open: u8, close: u8) -> Result<usize, ScanError> {
    if pos + 1 >= src.len() {
        return Err(ScanError::eof(src));
    }
    if src[pos] != open {
        return Err(ScanError::invalid_char(pos));
    }

    let mut depth = 1usize;
    let mut in_quote = false;
    let mut i = pos + 1;
    while let Some(&c) = src.get(i) {
        if c == b'\\' {
            i += 2;
            continue;
        }
        if c == b'"' {
            in_quote = !in_quote;
        } else if !in_quote {
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(i + 1);
                }
            }
        }
        i += 1;
    }
    Err(ScanError::invalid_char(pos))
}

/// Skips the next value after any whitespace at `pos`.
///
/// Objects and arrays are skipped as balanced pairs without validating their
/// members; scalars are checked by their skipper or decoder.
///
/// # Errors
///
/// Whatever the selected skipper reports; `InvalidChar` if the next byte
/// cannot start a value; `Eof` if only whitespace remains.
pub fn skip_value(src: &[u8], pos: usize) -> Result<Span, ScanError> {
    let start = skip_blank(src, pos)?;
    let end = match src[start] {
        b'n' => decode_null(src, start),
        b't' => decode_true(src, start),
        b'f' => decode_false(src, start),
        b'"' => skip_string(src, start).map(|(end, _)| end),
        b'{' => skip_pair(src, start, b'{', b'}'),
        b'[' => skip_pair(src, start, b'[', b']'),
        b'-' | b'+' | b'0'..=b'9' => skip_number(src, start),
        _ => Err(ScanError::invalid_char(start)),
    }
    .inspect_err(|err| trace!("skip_value from {start} failed: {err}"))?;
    Ok(Span { start, end })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::error::ErrorKind;

    #[rstest]
    #[case(br#""""#, 2, None)]
    #[case(br#""abc","#, 5, None)]
    #[case(br#""a\"b""#, 6, Some(2))]
    #[case(br#""ab\\\n""#, 8, Some(3))]
    #[case(b"\"caf\xc3\xa9\"", 7, None)]
    fn skips_strings(#[case] src: &[u8], #[case] end: usize, #[case] escape: Option<usize>) {
        assert_eq!(skip_string(src, 0), Ok((end, escape)));
    }

    #[rstest]
    #[case(b"\"", ErrorKind::Eof)]
    #[case(b"\"abc", ErrorKind::Eof)]
    #[case(b"\"abc\\", ErrorKind::Eof)]
    #[case(b"\"abc\\\"", ErrorKind::Eof)]
    #[case(b"abc", ErrorKind::InvalidChar)]
    fn string_errors(#[case] src: &[u8], #[case] kind: ErrorKind) {
        assert_eq!(skip_string(src, 0).unwrap_err().kind, kind);
    }

    #[test]
    fn escape_validity_is_not_checked() {
        assert_eq!(skip_string(br#""\q""#, 0), Ok((4, Some(1))));
    }

    #[test]
    fn pair_ignores_delimiters_inside_strings() {
        let src = br#"{"a":"}"}"#;
        assert_eq!(skip_pair(src, 0, b'{', b'}'), Ok(src.len()));

        let src = br#"[1,"]",[2,"[["]] , 3"#;
        assert_eq!(skip_pair(src, 0, b'[', b']'), Ok(16));
    }

    #[test]
    fn pair_respects_escaped_quotes() {
        let src = br#"{"a\"}":1}x"#;
        assert_eq!(skip_pair(src, 0, b'{', b'}'), Ok(10));
    }

    #[test]
    fn pair_counts_nesting() {
        let src = b"{\"a\":{\"b\":{}},\"c\":[{}]} ";
        assert_eq!(skip_pair(src, 0, b'{', b'}'), Ok(src.len() - 1));
    }

    #[test]
    fn unbalanced_pair_is_invalid() {
        let err = skip_pair(b" [[1,2]", 1, b'[', b']').unwrap_err();
        assert_eq!(err, ScanError::invalid_char(1));
        assert_eq!(skip_pair(b"[", 0, b'[', b']').unwrap_err().kind, ErrorKind::Eof);
        assert_eq!(skip_pair(b"{}", 0, b'[', b']').unwrap_err().kind, ErrorKind::InvalidChar);
    }

    #[rstest]
    #[case(b"null", "null")]
    #[case(b"  true ,", "true")]
    #[case(b"\tfalse]", "false")]
    #[case(b" -1.5e3,", "-1.5e3")]
    #[case(b"\"x\\\"y\" :", "\"x\\\"y\"")]
    #[case(b"\n{\"k\": [1, {\"z\": null}]}, 1", "{\"k\": [1, {\"z\": null}]}")]
    #[case(b"[[], {}, \"]\"] ", "[[], {}, \"]\"]")]
    fn skip_value_spans_exactly_the_value(#[case] src: &[u8], #[case] text: &str) {
        let span = skip_value(src, 0).unwrap();
        assert_eq!(span.slice(src), text.as_bytes());
        assert_eq!(span.len(), text.len());
    }

    #[rstest]
    #[case(b"", ErrorKind::Eof, 0)]
    #[case(b"  ", ErrorKind::Eof, 2)]
    #[case(b" ,", ErrorKind::InvalidChar, 1)]
    #[case(b" }", ErrorKind::InvalidChar, 1)]
    #[case(b"nul", ErrorKind::Eof, 3)]
    #[case(b"nulL", ErrorKind::InvalidChar, 0)]
    #[case(b" 1.2.3", ErrorKind::InvalidChar, 4)]
    fn skip_value_errors(#[case] src: &[u8], #[case] kind: ErrorKind, #[case] offset: usize) {
        assert_eq!(skip_value(src, 0), Err(ScanError::new(kind, offset)));
    }
}
