//! Decoding the next value into a typed descriptor.

use alloc::{borrow::Cow, vec::Vec};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bstr::BStr;

use crate::{
    error::{ErrorKind, ScanError},
    literal::{decode_false, decode_null, decode_true},
    macros::trace,
    number::{decode_float64, decode_int64},
    skip::skip_string,
    token::skip_blank,
    unescape::unescape_from,
};

/// What [`decode_value`] found.
///
/// Containers are not skipped: `Object` and `Array` only report that one was
/// opened, and the returned offset points just past the opening delimiter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JsonState {
    /// `null`
    Null,
    /// `true`
    True,
    /// `false`
    False,
    /// An integer that fits in `i64`.
    Integer(i64),
    /// Any other number. Values beyond the range of `f64` decode to an
    /// infinity of the same sign.
    Double(f64),
    /// A string. `start` is the first content byte, just past the opening
    /// quote. `escape` is the offset of the first backslash; when it is
    /// `None` the content can be sliced from the buffer as is.
    String {
        /// Offset of the first content byte.
        start: usize,
        /// Offset of the first backslash, if any.
        escape: Option<usize>,
    },
    /// An object was opened.
    Object,
    /// An array was opened.
    Array,
}

fn decode_number(src: &[u8], pos: usize) -> Result<(usize, JsonState), ScanError> {
    match decode_int64(src, pos) {
        Ok(n) if !n.overflow => return Ok((n.end, JsonState::Integer(n.value))),
        Ok(_) => trace!("integer at {pos} is out of range, decoding as double"),
        Err(err) if err.kind == ErrorKind::InvalidNumberFormat => {
            trace!("number at {pos} has a fraction or exponent, decoding as double");
        }
        Err(err) => return Err(err),
    }

    let n = decode_float64(src, pos)?;
    let value = match (n.overflow, src[pos]) {
        (false, _) => n.value,
        (true, b'-') => f64::NEG_INFINITY,
        (true, _) => f64::INFINITY,
    };
    Ok((n.end, JsonState::Double(value)))
}

/// Skips whitespace at `pos` and decodes the value that follows.
///
/// Numbers are tried as integers first and fall back to doubles when a
/// fraction or exponent is present or the integer does not fit.
///
/// # Errors
///
/// `Eof` if only whitespace remains, `InvalidChar` if the next byte cannot
/// start a value, and otherwise whatever the selected decoder reports.
pub fn decode_value(src: &[u8], pos: usize) -> Result<(usize, JsonState), ScanError> {
    let pos = skip_blank(src, pos)?;
    match src[pos] {
        b'n' => decode_null(src, pos).map(|end| (end, JsonState::Null)),
        b't' => decode_true(src, pos).map(|end| (end, JsonState::True)),
        b'f' => decode_false(src, pos).map(|end| (end, JsonState::False)),
        b'"' => skip_string(src, pos).map(|(end, escape)| {
            (
                end,
                JsonState::String {
                    start: pos + 1,
                    escape,
                },
            )
        }),
        b'{' => Ok((pos + 1, JsonState::Object)),
        b'[' => Ok((pos + 1, JsonState::Array)),
        b'-' | b'+' | b'0'..=b'9' => decode_number(src, pos),
        _ => Err(ScanError::invalid_char(pos)),
    }
    .inspect_err(|err| trace!("decode_value from {pos} failed: {err}"))
}

/// Decodes the string whose opening quote is at `pos`.
///
/// Without escapes the content is borrowed straight from `src`; otherwise it
/// is unescaped into an owned buffer.
///
/// # Errors
///
/// As [`skip_string`]; `InvalidChar` at the offending byte if an escape is
/// malformed.
pub fn decode_string(src: &[u8], pos: usize) -> Result<(usize, Cow<'_, BStr>), ScanError> {
    let (end, escape) = skip_string(src, pos)?;
    match escape {
        None => Ok((end, Cow::Borrowed(BStr::new(&src[pos + 1..end - 1])))),
        Some(at) => unescape_from(&src[pos..end], at - pos)
            .map(|text| (end, Cow::Owned(text)))
            .map_err(|err| ScanError::invalid_char(pos + err.offset)),
    }
}

/// Decodes a base64 string at `pos` into bytes.
///
/// # Errors
///
/// As [`decode_string`]; `InvalidChar` at the first content byte if the
/// text is not valid standard base64.
pub fn decode_binary(src: &[u8], pos: usize) -> Result<(usize, Vec<u8>), ScanError> {
    let (end, text) = decode_string(src, pos)?;
    let text: &[u8] = &text;
    STANDARD
        .decode(text)
        .map(|bytes| (end, bytes))
        .map_err(|_| ScanError::invalid_char(pos + 1))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b"null", 4, JsonState::Null)]
    #[case(b" true", 5, JsonState::True)]
    #[case(b"false,", 5, JsonState::False)]
    #[case(b"42", 2, JsonState::Integer(42))]
    #[case(b"-7]", 2, JsonState::Integer(-7))]
    #[case(b"{\"a\":1}", 1, JsonState::Object)]
    #[case(b"\n[1]", 2, JsonState::Array)]
    #[case(b"\"ab\"", 4, JsonState::String { start: 1, escape: None })]
    #[case(b" \"a\\nb\"", 7, JsonState::String { start: 2, escape: Some(3) })]
    fn decodes_values(#[case] src: &[u8], #[case] end: usize, #[case] state: JsonState) {
        assert_eq!(decode_value(src, 0), Ok((end, state)));
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn fraction_falls_back_to_double() {
        assert_eq!(decode_value(b"3.14", 0), Ok((4, JsonState::Double(3.14))));
        assert_eq!(decode_value(b"-1e2 ", 0), Ok((4, JsonState::Double(-100.0))));
    }

    #[test]
    fn oversized_integer_falls_back_to_double() {
        let src = b"99999999999999999999";
        assert_eq!(decode_value(src, 0), Ok((20, JsonState::Double(1e20))));
    }

    #[test]
    fn oversized_double_is_infinite() {
        assert_eq!(
            decode_value(b"-1e999", 0),
            Ok((6, JsonState::Double(f64::NEG_INFINITY)))
        );
    }

    #[rstest]
    #[case(b"", ErrorKind::Eof, 0)]
    #[case(b"  nope", ErrorKind::InvalidChar, 2)]
    #[case(b"tru", ErrorKind::Eof, 3)]
    #[case(b"]", ErrorKind::InvalidChar, 0)]
    #[case(b"\"abc", ErrorKind::Eof, 4)]
    #[case(b"-", ErrorKind::Eof, 1)]
    #[case(b"1.2.3", ErrorKind::InvalidChar, 0)]
    fn decode_errors(#[case] src: &[u8], #[case] kind: ErrorKind, #[case] offset: usize) {
        assert_eq!(decode_value(src, 0), Err(ScanError::new(kind, offset)));
    }

    #[test]
    fn plain_strings_are_borrowed() {
        let src = br#"["hello", 1]"#;
        let (end, text) = decode_string(src, 1).unwrap();
        assert_eq!(end, 8);
        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!(&*text, "hello");
    }

    #[test]
    fn escaped_strings_are_owned() {
        let src = br#"{"k":"a\tb\u00e9"}"#;
        let (end, text) = decode_string(src, 5).unwrap();
        assert_eq!(end, 17);
        assert!(matches!(text, Cow::Owned(_)));
        assert_eq!(&*text, "a\tb\u{e9}");
    }

    #[rstest]
    #[case(b"[\"\x01\\n\"]", 2)]
    #[case(b"[\"\\n\x01\"]", 4)]
    #[case(b"[\"ab\x1f\\t\"]", 4)]
    fn control_bytes_in_escaped_strings_are_rejected(#[case] src: &[u8], #[case] offset: usize) {
        assert_eq!(decode_string(src, 1), Err(ScanError::invalid_char(offset)));
    }

    #[test]
    fn bad_escape_reports_absolute_offset() {
        let src = br#"[ "ok\x" ]"#;
        assert_eq!(decode_string(src, 2), Err(ScanError::invalid_char(5)));
    }

    #[test]
    fn decodes_binary() {
        assert_eq!(
            decode_binary(br#""aGVsbG8=""#, 0),
            Ok((10, b"hello".to_vec()))
        );
        assert_eq!(
            decode_binary(br#" "not base64!" "#, 1),
            Err(ScanError::invalid_char(2))
        );
    }
}
