//! One-token lookahead: whitespace skipping and byte classification.

use crate::error::ScanError;

/// Lexical kind of the next unconsumed JSON token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenState {
    /// `n`
    Null,
    /// `t`
    True,
    /// `f`
    False,
    /// A digit, `-` or `+`.
    Number,
    /// `"`
    String,
    /// `{`
    Obj,
    /// `[`
    Arr,
    /// `}`
    EndObj,
    /// `]`
    EndArr,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// Any byte that cannot start a token.
    Invalid,
}

impl TokenState {
    /// Classifies the byte that starts a token.
    #[must_use]
    pub const fn classify(byte: u8) -> Self {
        match byte {
            b'{' => TokenState::Obj,
            b'[' => TokenState::Arr,
            b'"' => TokenState::String,
            b'-' | b'+' | b'0'..=b'9' => TokenState::Number,
            b'n' => TokenState::Null,
            b't' => TokenState::True,
            b'f' => TokenState::False,
            b',' => TokenState::Comma,
            b':' => TokenState::Colon,
            b']' => TokenState::EndArr,
            b'}' => TokenState::EndObj,
            _ => TokenState::Invalid,
        }
    }

    /// Whether this token begins a value (as opposed to a delimiter).
    #[must_use]
    pub const fn starts_value(self) -> bool {
        matches!(
            self,
            TokenState::Null
                | TokenState::True
                | TokenState::False
                | TokenState::Number
                | TokenState::String
                | TokenState::Obj
                | TokenState::Arr
        )
    }
}

#[inline]
pub(crate) const fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Skips JSON whitespace starting at `pos` and returns the offset of the
/// first non-blank byte.
///
/// # Errors
///
/// `Eof` if the buffer ends before a non-blank byte.
#[inline]
pub fn skip_blank(src: &[u8], pos: usize) -> Result<usize, ScanError> {
    let mut i = pos;
    while let Some(&c) = src.get(i) {
        if !is_blank(c) {
            return Ok(i);
        }
        i += 1;
    }
    Err(ScanError::eof(src))
}

/// Skips whitespace and classifies the next token without consuming it.
///
/// Returns the post-whitespace offset and its [`TokenState`]. A byte that
/// cannot start any token is reported as [`TokenState::Invalid`], not as an
/// error.
///
/// # Errors
///
/// `Eof` if only whitespace remains.
pub fn peek(src: &[u8], pos: usize) -> Result<(usize, TokenState), ScanError> {
    let pos = skip_blank(src, pos)?;
    Ok((pos, TokenState::classify(src[pos])))
}
