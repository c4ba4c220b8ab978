//! Fixed-literal decoders for `null`, `true` and `false`.

use crate::error::ScanError;

const NULL: &[u8] = b"null";
const TRUE: &[u8] = b"true";
const FALSE: &[u8] = b"false";

#[inline]
fn decode_literal(src: &[u8], pos: usize, literal: &[u8]) -> Result<usize, ScanError> {
    let end = pos + literal.len();
    match src.get(pos..end) {
        None => Err(ScanError::eof(src)),
        Some(window) if window == literal => Ok(end),
        Some(_) => Err(ScanError::invalid_char(pos)),
    }
}

/// Matches `null` at `pos` and returns the offset just past it.
///
/// # Errors
///
/// `Eof` if fewer than four bytes remain, `InvalidChar` on mismatch.
pub fn decode_null(src: &[u8], pos: usize) -> Result<usize, ScanError> {
    decode_literal(src, pos, NULL)
}

/// Matches `true` at `pos`.
///
/// # Errors
///
/// As [`decode_null`].
pub fn decode_true(src: &[u8], pos: usize) -> Result<usize, ScanError> {
    decode_literal(src, pos, TRUE)
}

/// Matches `false` at `pos`.
///
/// # Errors
///
/// As [`decode_null`], with a five byte window.
pub fn decode_false(src: &[u8], pos: usize) -> Result<usize, ScanError> {
    decode_literal(src, pos, FALSE)
}
