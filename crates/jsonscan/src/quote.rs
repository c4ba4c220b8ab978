//! Quoting strings for re-serialization.
//!
//! Escaping can expand the input by up to six times, so the output cannot be
//! sized up front without a scan. Instead the escaper works in passes against
//! whatever free space the output has. Each pass reports how many bytes it
//! wrote and how much input is left; the driver grows the output by doubling
//! and calls again with the unconsumed suffix. An escape unit is never split
//! across passes.

use alloc::vec::Vec;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::{macros::trace, options::QuoteOptions};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Smallest growth step of the output buffer; larger than any escape unit.
const MIN_GROWTH: usize = 16;

/// Most output bytes a single input byte can expand to.
const MAX_EXPANSION: usize = 6;

const LINE_SEPARATOR: &[u8] = "\u{2028}".as_bytes();
const PARAGRAPH_SEPARATOR: &[u8] = "\u{2029}".as_bytes();

/// Result of one escaping pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes written to the output slice.
    pub written: usize,
    /// Trailing input bytes that were not consumed. Zero means the pass
    /// finished the input.
    pub remaining: usize,
}

impl Progress {
    /// The whole input was escaped.
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        self.remaining == 0
    }
}

/// One pass of the chunked escaping protocol.
///
/// Implementations escape as much of `src` as fits into `dst`, never writing
/// a partial escape unit, and report what they did. They must not write the
/// surrounding quotes. Any implementation can be driven by [`quote_with`].
pub trait Escape {
    /// Escapes a prefix of `src` into `dst`.
    fn escape(&self, src: &[u8], dst: &mut [u8]) -> Progress;
}

/// Byte-at-a-time escaper with no platform requirements.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortableEscaper {
    options: QuoteOptions,
}

/// A single escape unit: up to six output bytes for `used` input bytes.
struct Unit {
    bytes: [u8; 6],
    len: usize,
    used: usize,
}

impl Unit {
    const fn short(c: u8) -> Self {
        Self {
            bytes: [b'\\', c, 0, 0, 0, 0],
            len: 2,
            used: 1,
        }
    }

    const fn unicode(code: u16, used: usize) -> Self {
        Self {
            bytes: [
                b'\\',
                b'u',
                HEX[(code >> 12) as usize & 0xF],
                HEX[(code >> 8) as usize & 0xF],
                HEX[(code >> 4) as usize & 0xF],
                HEX[code as usize & 0xF],
            ],
            len: 6,
            used,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl PortableEscaper {
    /// An escaper applying `options`.
    #[must_use]
    pub const fn new(options: QuoteOptions) -> Self {
        Self { options }
    }

    #[inline]
    const fn is_special(&self, c: u8) -> bool {
        match c {
            0x00..=0x1F | b'"' | b'\\' => true,
            b'<' | b'>' | b'&' | 0xE2 => self.options.escape_html,
            _ => false,
        }
    }

    /// Escape unit for the special byte at the head of `src`, or `None` if it
    /// turns out to be copied verbatim.
    fn unit(&self, src: &[u8]) -> Option<Unit> {
        let c = src[0];
        Some(match c {
            b'"' => Unit::short(b'"'),
            b'\\' => Unit::short(b'\\'),
            0x08 => Unit::short(b'b'),
            0x0C => Unit::short(b'f'),
            b'\n' => Unit::short(b'n'),
            b'\r' => Unit::short(b'r'),
            b'\t' => Unit::short(b't'),
            0x00..=0x1F | b'<' | b'>' | b'&' => Unit::unicode(u16::from(c), 1),
            _ if src.starts_with(LINE_SEPARATOR) => Unit::unicode(0x2028, 3),
            _ if src.starts_with(PARAGRAPH_SEPARATOR) => Unit::unicode(0x2029, 3),
            _ => return None,
        })
    }
}

impl Escape for PortableEscaper {
    fn escape(&self, src: &[u8], dst: &mut [u8]) -> Progress {
        let mut i = 0;
        let mut o = 0;

        while i < src.len() {
            let run = src[i..]
                .iter()
                .position(|&c| self.is_special(c))
                .unwrap_or(src.len() - i);
            let n = run.min(dst.len() - o);
            dst[o..o + n].copy_from_slice(&src[i..i + n]);
            i += n;
            o += n;
            if n < run || i == src.len() {
                break;
            }

            let unit = self.unit(&src[i..]);
            let (bytes, used) = match &unit {
                Some(unit) => (unit.as_bytes(), unit.used),
                None => (&src[i..=i], 1),
            };
            if dst.len() - o < bytes.len() {
                break;
            }
            dst[o..o + bytes.len()].copy_from_slice(bytes);
            o += bytes.len();
            i += used;
        }

        Progress {
            written: o,
            remaining: src.len() - i,
        }
    }
}

/// Appends `val` to `buf` as a quoted JSON string, driving `escaper` with
/// the grow-and-retry protocol.
///
/// The existing contents of `buf` are left untouched. The buffer's capacity
/// doubles each time a pass runs out of room, so the number of passes is
/// logarithmic in the output size.
pub fn quote_with<E: Escape + ?Sized>(escaper: &E, buf: &mut Vec<u8>, val: &[u8]) {
    buf.push(b'"');
    if val.is_empty() {
        buf.push(b'"');
        return;
    }

    let mut rest = val;
    loop {
        let len = buf.len();
        // Expose spare capacity as writable bytes for this pass, but no more
        // than the rest of the input could ever need.
        let room = (buf.capacity() - len).min(rest.len().saturating_mul(MAX_EXPANSION));
        buf.resize(len + room, 0);
        let progress = escaper.escape(rest, &mut buf[len..]);
        buf.truncate(len + progress.written);

        if progress.is_satisfied() {
            break;
        }
        rest = &rest[rest.len() - progress.remaining..];

        let capacity = buf.capacity();
        buf.reserve_exact(capacity.max(MIN_GROWTH));
        trace!(
            "quote: {} bytes left, capacity {capacity} -> {}",
            progress.remaining,
            buf.capacity()
        );
    }

    buf.push(b'"');
}

/// Appends `val` to `buf` as a quoted, escaped JSON string.
///
/// ```rust
/// let mut out = b"[".to_vec();
/// jsonscan::quote(&mut out, "tab\there".as_bytes());
/// assert_eq!(out, br#"["tab\there""#);
/// ```
pub fn quote(buf: &mut Vec<u8>, val: &[u8]) {
    quote_with(&PortableEscaper::default(), buf, val);
}

/// Appends `bytes` to `buf` as a quoted standard base64 string.
pub fn quote_binary(buf: &mut Vec<u8>, bytes: &[u8]) {
    let encoded = STANDARD.encode(bytes);
    buf.reserve(encoded.len() + 2);
    buf.push(b'"');
    buf.extend_from_slice(encoded.as_bytes());
    buf.push(b'"');
}
