/// Configuration for string quoting.
///
/// # Examples
///
/// ```rust
/// use jsonscan::{PortableEscaper, QuoteOptions, quote_with};
///
/// let escaper = PortableEscaper::new(QuoteOptions { escape_html: true });
/// let mut out = Vec::new();
/// quote_with(&escaper, &mut out, b"<b>");
/// assert_eq!(out, br#""\u003cb\u003e""#);
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteOptions {
    /// Whether to escape characters that are significant inside HTML.
    ///
    /// When `true`, `<`, `>` and `&` are written as `\u003c`, `\u003e` and
    /// `\u0026`, and the line and paragraph separators U+2028 and U+2029 as
    /// `\u2028` and `\u2029`, so the output can be embedded in a `<script>`
    /// block.
    ///
    /// # Default
    ///
    /// `false`
    pub escape_html: bool,
}
