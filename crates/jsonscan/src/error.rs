use thiserror::Error;

/// The kind of failure a scanning function can report.
///
/// Each kind has a stable numeric code, see [`ErrorKind::code`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Input ended before a complete token or value was recognized.
    #[error("unexpected end of input")]
    Eof,
    /// A byte violates the grammar expected at the current position.
    #[error("invalid character")]
    InvalidChar,
    /// An integer was followed by a fraction or exponent marker. Callers
    /// retry the same span as a float.
    #[error("invalid number format")]
    InvalidNumberFormat,
}

impl ErrorKind {
    /// The positive error code for this kind.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            ErrorKind::Eof => 1,
            ErrorKind::InvalidChar => 2,
            ErrorKind::InvalidNumberFormat => 6,
        }
    }

    /// Inverse of [`ErrorKind::code`]. Accepts either sign.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code.unsigned_abs() {
            1 => Some(ErrorKind::Eof),
            2 => Some(ErrorKind::InvalidChar),
            6 => Some(ErrorKind::InvalidNumberFormat),
            _ => None,
        }
    }
}

/// A scan failure: what went wrong and the byte offset where scanning
/// stopped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("{kind} at offset {offset}")]
pub struct ScanError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Byte offset into the scanned buffer.
    pub offset: usize,
}

impl ScanError {
    pub(crate) const fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// End of input; the offset is always the buffer length.
    pub(crate) const fn eof(src: &[u8]) -> Self {
        Self::new(ErrorKind::Eof, src.len())
    }

    pub(crate) const fn invalid_char(offset: usize) -> Self {
        Self::new(ErrorKind::InvalidChar, offset)
    }

    /// The negative sentinel form of this error, for callers that keep the
    /// "offset or negative code" convention in their own inner loops.
    #[must_use]
    pub const fn code(&self) -> i32 {
        -self.kind.code()
    }
}

/// Why an escaped string span could not be decoded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnescapeErrorKind {
    /// A backslash followed by a byte that names no escape.
    #[error("invalid escape sequence")]
    InvalidEscape,
    /// A `\u` escape without four hex digits.
    #[error("invalid unicode escape")]
    InvalidUnicode,
    /// A raw byte below 0x20 inside the string.
    #[error("control character in string")]
    ControlCharacter,
    /// Missing opening or closing quote, or a quote before the end.
    #[error("unterminated string")]
    Unterminated,
}

/// Failure from [`crate::unescape`]. The offset is relative to the start of
/// the quoted span that was passed in.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at offset {offset}")]
pub struct UnescapeError {
    /// What went wrong.
    pub kind: UnescapeErrorKind,
    /// Byte offset into the quoted span.
    pub offset: usize,
}
