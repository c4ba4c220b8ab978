//! Decoding of escaped string spans.
//!
//! Handles `\"`, `\\`, `\/`, `\b`, `\f`, `\n`, `\r`, `\t` and `\uXXXX`.
//! A high surrogate immediately followed by a `\u` low surrogate is combined
//! into one scalar; any surrogate left unpaired decodes to U+FFFD. Raw
//! control bytes are rejected. Other bytes, including invalid UTF-8, are
//! copied through untouched.

use alloc::vec::Vec;

use bstr::BString;

use crate::error::{UnescapeError, UnescapeErrorKind};

const REPLACEMENT: char = '\u{FFFD}';

/// Convert a single ASCII hex digit into its 0..=15 value.
#[inline]
fn hex_val(c: u8) -> Option<u16> {
    match c {
        b'0'..=b'9' => Some(u16::from(c - b'0')),
        b'a'..=b'f' => Some(u16::from(c - b'a') + 10),
        b'A'..=b'F' => Some(u16::from(c - b'A') + 10),
        _ => None,
    }
}

/// Reads the four hex digits of a `\u` escape whose backslash is at `at`.
fn read_u16(body: &[u8], at: usize) -> Option<u16> {
    let digits = body.get(at + 2..at + 6)?;
    digits
        .iter()
        .try_fold(0u16, |acc, &c| Some((acc << 4) | hex_val(c)?))
}

const fn is_high_surrogate(code: u16) -> bool {
    matches!(code, 0xD800..=0xDBFF)
}

const fn is_low_surrogate(code: u16) -> bool {
    matches!(code, 0xDC00..=0xDFFF)
}

/// Decodes the `\u` escape at `at`. Returns the character and how many
/// bytes of `body` it used (6, or 12 for a surrogate pair).
fn decode_unicode(body: &[u8], at: usize) -> Result<(char, usize), UnescapeErrorKind> {
    let code = read_u16(body, at).ok_or(UnescapeErrorKind::InvalidUnicode)?;

    if is_high_surrogate(code) {
        let low = match body.get(at + 6..at + 8) {
            Some(b"\\u") => read_u16(body, at + 6).filter(|&c| is_low_surrogate(c)),
            _ => None,
        };
        return Ok(match low {
            Some(low) => {
                let scalar =
                    0x10000 + ((u32::from(code) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                (char::from_u32(scalar).unwrap_or(REPLACEMENT), 12)
            }
            None => (REPLACEMENT, 6),
        });
    }

    Ok((char::from_u32(u32::from(code)).unwrap_or(REPLACEMENT), 6))
}

/// Decodes a complete quoted string span, quotes included.
///
/// # Errors
///
/// Returns an [`UnescapeError`] with an offset relative to `quoted` if the
/// span is not delimited by quotes, contains a bad escape or a raw control
/// byte, or has an unescaped quote before its end.
pub fn unescape(quoted: &[u8]) -> Result<BString, UnescapeError> {
    unescape_from(quoted, 1)
}

/// As [`unescape`], but the caller promises `quoted[1..first_escape]` holds
/// no backslash or quote, so that prefix is only checked for control bytes.
pub(crate) fn unescape_from(quoted: &[u8], first_escape: usize) -> Result<BString, UnescapeError> {
    let err = |kind, offset| UnescapeError { kind, offset };

    if quoted.first() != Some(&b'"') {
        return Err(err(UnescapeErrorKind::Unterminated, 0));
    }
    if quoted.len() < 2 || quoted.last() != Some(&b'"') {
        return Err(err(UnescapeErrorKind::Unterminated, quoted.len()));
    }

    // Work on the content between the quotes; offsets are shifted back by
    // one when reported.
    let body = &quoted[1..quoted.len() - 1];
    let mut out = Vec::with_capacity(body.len());
    let mut i = first_escape.clamp(1, quoted.len() - 1) - 1;
    if let Some(at) = body[..i].iter().position(|&c| c < 0x20) {
        return Err(err(UnescapeErrorKind::ControlCharacter, at + 1));
    }
    out.extend_from_slice(&body[..i]);

    while i < body.len() {
        let run = body[i..]
            .iter()
            .position(|&c| c == b'\\' || c == b'"' || c < 0x20)
            .unwrap_or(body.len() - i);
        out.extend_from_slice(&body[i..i + run]);
        i += run;

        let Some(&c) = body.get(i) else { break };
        match c {
            b'"' => return Err(err(UnescapeErrorKind::Unterminated, i + 1)),
            b'\\' => {}
            _ => return Err(err(UnescapeErrorKind::ControlCharacter, i + 1)),
        }

        let simple = match body.get(i + 1) {
            Some(b'"') => b'"',
            Some(b'\\') => b'\\',
            Some(b'/') => b'/',
            Some(b'b') => 0x08,
            Some(b'f') => 0x0C,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(b'u') => {
                let (ch, used) = decode_unicode(body, i).map_err(|kind| err(kind, i + 1))?;
                let mut tmp = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
                i += used;
                continue;
            }
            Some(_) => return Err(err(UnescapeErrorKind::InvalidEscape, i + 1)),
            // the backslash escaped the closing quote
            None => return Err(err(UnescapeErrorKind::Unterminated, quoted.len())),
        };
        out.push(simple);
        i += 2;
    }

    Ok(BString::from(out))
}
