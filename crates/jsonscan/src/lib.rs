//! Offset-based JSON scanning.
//!
//! Every function takes a byte buffer and an offset and returns the offset to
//! resume at, so a caller can peek at the next token, jump over a whole
//! subtree, or decode a scalar in place without building a parse tree. The
//! input is never copied except when a string contains escapes.
//!
//! ```rust
//! use jsonscan::{JsonState, TokenState, decode_value, peek, skip_value};
//!
//! let src = br#"  {"big": [1, 2, 3]}, 42"#;
//! assert_eq!(peek(src, 0), Ok((2, TokenState::Obj)));
//!
//! let span = skip_value(src, 0)?;
//! assert_eq!(span.slice(src), br#"{"big": [1, 2, 3]}"#);
//!
//! let (_, comma) = peek(src, span.end)?;
//! assert_eq!(comma, TokenState::Comma);
//! assert_eq!(decode_value(src, span.end + 1), Ok((src.len(), JsonState::Integer(42))));
//! # Ok::<(), jsonscan::ScanError>(())
//! ```
//!
//! Failures carry an [`ErrorKind`] and the byte offset where scanning
//! stopped. Nothing here allocates except [`decode_string`] on escaped
//! input, [`decode_binary`] and the quoting functions.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod macros;

mod error;
mod literal;
mod number;
mod options;
mod quote;
mod scanner;
mod skip;
mod token;
mod unescape;
mod value;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, ScanError, UnescapeError, UnescapeErrorKind};
pub use literal::{decode_false, decode_null, decode_true};
pub use number::{Number, decode_float64, decode_int64, skip_number};
pub use options::QuoteOptions;
pub use quote::{Escape, PortableEscaper, Progress, quote, quote_binary, quote_with};
pub use scanner::Scanner;
pub use skip::{Span, skip_pair, skip_string, skip_value};
pub use token::{TokenState, peek, skip_blank};
pub use unescape::unescape;
pub use value::{JsonState, decode_binary, decode_string, decode_value};
