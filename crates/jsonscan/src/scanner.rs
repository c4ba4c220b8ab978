//! A cursor over one buffer.
//!
//! The free functions in this crate take `(src, pos)` and hand back a new
//! offset. [`Scanner`] keeps that pair together so a caller walking a
//! document does not have to thread offsets by hand. Every method either
//! succeeds and moves the cursor, or fails and leaves it where it was.
//!
//! ```rust
//! use jsonscan::{JsonState, Scanner, TokenState};
//!
//! let mut s = Scanner::new(br#" {"skip": [1, 2, {"x": "}"}], "id": 7} "#);
//! s.expect(TokenState::Obj)?;
//! let mut id = None;
//! loop {
//!     let key = s.decode_string()?;
//!     s.expect(TokenState::Colon)?;
//!     if &*key == "id" {
//!         id = Some(s.decode_value()?);
//!     } else {
//!         s.skip_value()?;
//!     }
//!     if !s.next_item(TokenState::EndObj)? {
//!         break;
//!     }
//! }
//! assert_eq!(id, Some(JsonState::Integer(7)));
//! assert!(s.is_finished());
//! # Ok::<(), jsonscan::ScanError>(())
//! ```

use alloc::borrow::Cow;

use bstr::BStr;

use crate::{
    error::ScanError,
    skip::{Span, skip_value},
    token::{TokenState, peek, skip_blank},
    value::{JsonState, decode_string, decode_value},
};

/// A buffer and a position in it.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'src> {
    src: &'src [u8],
    pos: usize,
}

impl<'src> Scanner<'src> {
    /// Starts at the beginning of `src`.
    #[must_use]
    pub const fn new(src: &'src [u8]) -> Self {
        Self { src, pos: 0 }
    }

    /// Starts at `pos`, e.g. to resume a scan whose offset was stored.
    #[must_use]
    pub const fn with_position(src: &'src [u8], pos: usize) -> Self {
        Self { src, pos }
    }

    /// Offset of the next unscanned byte.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// The whole buffer being scanned.
    #[must_use]
    pub const fn source(&self) -> &'src [u8] {
        self.src
    }

    /// Unscanned input, including any leading whitespace.
    #[must_use]
    pub fn remaining(&self) -> &'src [u8] {
        self.src.get(self.pos..).unwrap_or_default()
    }

    /// Classifies the next token without moving.
    ///
    /// # Errors
    ///
    /// `Eof` if only whitespace remains.
    pub fn peek(&self) -> Result<TokenState, ScanError> {
        peek(self.src, self.pos).map(|(_, token)| token)
    }

    /// Whether only whitespace remains.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        skip_blank(self.src, self.pos).is_err()
    }

    /// Moves past the next token, which must be `token`.
    ///
    /// Delimiters and container openers are consumed as one byte, so
    /// `expect(TokenState::Obj)` enters the object. Scalars are skipped
    /// whole.
    ///
    /// # Errors
    ///
    /// `InvalidChar` at the token if it is of a different kind, or whatever
    /// skipping the value reports.
    pub fn expect(&mut self, token: TokenState) -> Result<(), ScanError> {
        let (pos, found) = peek(self.src, self.pos)?;
        if found != token || found == TokenState::Invalid {
            return Err(ScanError::invalid_char(pos));
        }
        match token {
            TokenState::Null
            | TokenState::True
            | TokenState::False
            | TokenState::Number
            | TokenState::String => {
                self.skip_value()?;
            }
            _ => self.pos = pos + 1,
        }
        Ok(())
    }

    /// Inside a container, after a member: consumes a `,` and returns `true`,
    /// or consumes `end` and returns `false`.
    ///
    /// # Errors
    ///
    /// `InvalidChar` if the next token is neither.
    pub fn next_item(&mut self, end: TokenState) -> Result<bool, ScanError> {
        let (pos, found) = peek(self.src, self.pos)?;
        let more = match found {
            TokenState::Comma => true,
            _ if found == end => false,
            _ => return Err(ScanError::invalid_char(pos)),
        };
        self.pos = pos + 1;
        Ok(more)
    }

    /// Skips the next value. See [`skip_value`](crate::skip_value).
    ///
    /// # Errors
    ///
    /// As [`skip_value`](crate::skip_value).
    pub fn skip_value(&mut self) -> Result<Span, ScanError> {
        let span = skip_value(self.src, self.pos)?;
        self.pos = span.end;
        Ok(span)
    }

    /// Decodes the next value. See [`decode_value`](crate::decode_value).
    ///
    /// # Errors
    ///
    /// As [`decode_value`](crate::decode_value).
    pub fn decode_value(&mut self) -> Result<JsonState, ScanError> {
        let (end, state) = decode_value(self.src, self.pos)?;
        self.pos = end;
        Ok(state)
    }

    /// Decodes the next value, which must be a string.
    ///
    /// # Errors
    ///
    /// As [`decode_string`](crate::decode_string), after skipping
    /// whitespace.
    pub fn decode_string(&mut self) -> Result<Cow<'src, BStr>, ScanError> {
        let start = skip_blank(self.src, self.pos)?;
        let (end, text) = decode_string(self.src, start)?;
        self.pos = end;
        Ok(text)
    }
}
