//! Number scanning.
//!
//! Two separate concerns live here. [`skip_number`] is the authority on
//! whether a span is syntactically a JSON number. [`decode_int64`] and
//! [`decode_float64`] only extract a candidate span and convert it; they are
//! looser about grammar and exist so values can be decoded in place.
//!
//! Overflow is not a scan failure. A decoder that consumed a well-formed span
//! whose value does not fit reports the end offset with a zero value and
//! `overflow` set, leaving the policy to the caller.

use crate::error::{ErrorKind, ScanError};

/// A decoded number together with the offset just past its text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number<T> {
    /// Offset to resume scanning at.
    pub end: usize,
    /// The decoded value, or zero when `overflow` is set.
    pub value: T,
    /// The span was consumed but its value is out of range for `T`.
    pub overflow: bool,
}

impl<T> Number<T> {
    const fn new(end: usize, value: T) -> Self {
        Self {
            end,
            value,
            overflow: false,
        }
    }
}

impl<T: Default> Number<T> {
    fn overflowed(end: usize) -> Self {
        Self {
            end,
            value: T::default(),
            overflow: true,
        }
    }
}

#[inline]
const fn is_number_char(c: u8) -> bool {
    matches!(c, b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E')
}

/// Consumes an optional `-` and returns the offset after it.
#[inline]
fn skip_sign(src: &[u8], pos: usize) -> Result<usize, ScanError> {
    match src.get(pos) {
        None => Err(ScanError::eof(src)),
        Some(b'-') if pos + 1 >= src.len() => Err(ScanError::eof(src)),
        Some(b'-') => Ok(pos + 1),
        Some(_) => Ok(pos),
    }
}

/// Decodes a signed 64-bit integer starting at `pos`.
///
/// Consumes an optional `-` and the longest run of digits after it.
///
/// # Errors
///
/// - `InvalidNumberFormat` (at the marker) if the digits are followed by
///   `.`, `e` or `E`: the span is a float and should be retried with
///   [`decode_float64`].
/// - `InvalidChar` if there are no digits.
/// - `Eof` if the buffer ends at `pos` or right after the sign.
pub fn decode_int64(src: &[u8], pos: usize) -> Result<Number<i64>, ScanError> {
    let start = skip_sign(src, pos)?;
    let negative = start != pos;

    let end = start
        + src[start..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();

    if let Some(b'.' | b'e' | b'E') = src.get(end) {
        return Err(ScanError::new(ErrorKind::InvalidNumberFormat, end));
    }
    if end == start {
        return Err(ScanError::invalid_char(end));
    }

    let mut acc: i64 = 0;
    for &c in &src[start..end] {
        let digit = i64::from(c - b'0');
        let next = acc.checked_mul(10).and_then(|v| {
            if negative {
                v.checked_sub(digit)
            } else {
                v.checked_add(digit)
            }
        });
        match next {
            Some(v) => acc = v,
            None => return Ok(Number::overflowed(end)),
        }
    }
    Ok(Number::new(end, acc))
}

/// Decodes a double starting at `pos`.
///
/// Consumes an optional `-` and then the longest run of digits, signs,
/// `.`, `e` and `E`, and parses that span with standard double-precision
/// rounding. The span is not grammar-checked beyond what the float parser
/// itself rejects.
///
/// # Errors
///
/// `Eof` if the buffer ends at `pos` or right after the sign;
/// `InvalidChar` (at `pos`) if the span does not parse.
pub fn decode_float64(src: &[u8], pos: usize) -> Result<Number<f64>, ScanError> {
    let start = skip_sign(src, pos)?;
    let end = start
        + src[start..]
            .iter()
            .take_while(|&&c| is_number_char(c))
            .count();

    let value = core::str::from_utf8(&src[pos..end])
        .ok()
        .and_then(|text| text.parse::<f64>().ok())
        .ok_or(ScanError::invalid_char(pos))?;

    if value.is_infinite() {
        Ok(Number::overflowed(end))
    } else {
        Ok(Number::new(end, value))
    }
}

/// Validates a JSON number at `pos` and returns the offset just past it.
///
/// Grammar: optional `-`, one or more digits, an optional `.` followed by
/// at least one digit, then an optional `e`/`E` with an optional sign and at
/// least one digit. Leading zeros are not rejected.
///
/// # Errors
///
/// `InvalidChar` at the offending byte for a grammar violation, `Eof` when
/// the buffer ends while a digit is still required.
pub fn skip_number(src: &[u8], pos: usize) -> Result<usize, ScanError> {
    if pos >= src.len() {
        return Err(ScanError::eof(src));
    }
    let digits = if src[pos] == b'-' { pos + 1 } else { pos };

    let mut pointer = false;
    let mut exponent = false;
    let mut last_is_digit = false;
    let mut need_digit = true;

    let mut i = digits;
    while let Some(&c) = src.get(i) {
        match c {
            b'0'..=b'9' => {
                last_is_digit = true;
                need_digit = false;
            }
            b'+' | b'-' if i > digits && matches!(src[i - 1], b'e' | b'E') => {
                last_is_digit = false;
                need_digit = true;
            }
            _ if need_digit => return Err(ScanError::invalid_char(i)),
            b'.' => {
                if !last_is_digit || pointer || exponent {
                    return Err(ScanError::invalid_char(i));
                }
                pointer = true;
                last_is_digit = false;
                need_digit = true;
            }
            b'e' | b'E' => {
                if !last_is_digit || exponent {
                    return Err(ScanError::invalid_char(i));
                }
                exponent = true;
                last_is_digit = false;
                need_digit = true;
            }
            b'+' | b'-' => return Err(ScanError::invalid_char(i)),
            _ => break,
        }
        i += 1;
    }

    if need_digit {
        return Err(ScanError::eof(src));
    }
    Ok(i)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b"0", 0)]
    #[case(b"42", 42)]
    #[case(b"-17,", -17)]
    #[case(b"9223372036854775807", i64::MAX)]
    #[case(b"-9223372036854775808", i64::MIN)]
    #[case(b"007]", 7)]
    fn decodes_integers(#[case] src: &[u8], #[case] expected: i64) {
        let n = decode_int64(src, 0).unwrap();
        assert_eq!(n.value, expected);
        assert!(!n.overflow);
        assert!(n.end == src.len() || !src[n.end].is_ascii_digit());
    }

    #[test]
    fn integer_overflow_is_not_a_scan_failure() {
        let src = b"99999999999999999999";
        let n = decode_int64(src, 0).unwrap();
        assert_eq!(n.end, src.len());
        assert_eq!(n.value, 0);
        assert!(n.overflow);

        let n = decode_int64(b"[-9223372036854775809]", 1).unwrap();
        assert_eq!(n.end, 21);
        assert!(n.overflow);
    }

    #[rstest]
    #[case(b"3.14", 1)]
    #[case(b"1e5", 1)]
    #[case(b"-2E3", 2)]
    fn fraction_or_exponent_asks_for_float(#[case] src: &[u8], #[case] marker: usize) {
        let err = decode_int64(src, 0).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidNumberFormat);
        assert_eq!(err.offset, marker);
    }

    #[rstest]
    #[case(b"", ErrorKind::Eof)]
    #[case(b"-", ErrorKind::Eof)]
    #[case(b"-x", ErrorKind::InvalidChar)]
    #[case(b"+1", ErrorKind::InvalidChar)]
    #[case(b"x", ErrorKind::InvalidChar)]
    fn integer_errors(#[case] src: &[u8], #[case] kind: ErrorKind) {
        assert_eq!(decode_int64(src, 0).unwrap_err().kind, kind);
    }

    #[rstest]
    #[case(b"2.75", 2.75)]
    #[case(b"-0.5}", -0.5)]
    #[case(b"1e3", 1000.0)]
    #[case(b"2.5E-1", 0.25)]
    #[case(b"12", 12.0)]
    fn decodes_floats(#[case] src: &[u8], #[case] expected: f64) {
        let n = decode_float64(src, 0).unwrap();
        assert!((n.value - expected).abs() < f64::EPSILON);
        assert!(!n.overflow);
    }

    #[test]
    fn float_overflow_is_reported() {
        let n = decode_float64(b"1e400 ", 0).unwrap();
        assert_eq!(n.end, 5);
        assert!(n.overflow);
        assert!(n.value.abs() < f64::EPSILON);

        // underflow rounds to zero and is not an overflow
        let n = decode_float64(b"1e-400", 0).unwrap();
        assert!(!n.overflow);
    }

    #[test]
    fn float_span_is_not_grammar_checked() {
        assert_eq!(
            decode_float64(b"1.2.3", 0).unwrap_err(),
            ScanError::invalid_char(0)
        );
        assert_eq!(decode_float64(b"-", 0).unwrap_err().kind, ErrorKind::Eof);
    }

    #[rstest]
    #[case(b"0", 1)]
    #[case(b"-12", 3)]
    #[case(b"1.5,", 3)]
    #[case(b"1e10]", 4)]
    #[case(b"1E+2", 4)]
    #[case(b"-1.25e-3 ", 8)]
    #[case(b"00012", 5)]
    fn skips_valid_numbers(#[case] src: &[u8], #[case] end: usize) {
        assert_eq!(skip_number(src, 0), Ok(end));
    }

    #[rstest]
    #[case(b"1.2.3", ErrorKind::InvalidChar, 3)]
    #[case(b"1e", ErrorKind::Eof, 2)]
    #[case(b"1e+", ErrorKind::Eof, 3)]
    #[case(b"1.", ErrorKind::Eof, 2)]
    #[case(b"-", ErrorKind::Eof, 1)]
    #[case(b"", ErrorKind::Eof, 0)]
    #[case(b"1.e5", ErrorKind::InvalidChar, 2)]
    #[case(b".5", ErrorKind::InvalidChar, 0)]
    #[case(b"-.5", ErrorKind::InvalidChar, 1)]
    #[case(b"+1", ErrorKind::InvalidChar, 0)]
    #[case(b"1+2", ErrorKind::InvalidChar, 1)]
    #[case(b"1e5e2", ErrorKind::InvalidChar, 3)]
    #[case(b"1e5.2", ErrorKind::InvalidChar, 3)]
    #[case(b"1ex", ErrorKind::InvalidChar, 2)]
    #[case(b"1e+-2", ErrorKind::InvalidChar, 3)]
    fn rejects_malformed_numbers(
        #[case] src: &[u8],
        #[case] kind: ErrorKind,
        #[case] offset: usize,
    ) {
        assert_eq!(skip_number(src, 0), Err(ScanError::new(kind, offset)));
    }
}
