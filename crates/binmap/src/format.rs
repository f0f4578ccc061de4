//! Map format detection.
//!
//! Maps also circulate as XML and JSON mirrors of the binary layout. Those are
//! handled by other tools. Callers can use detection to route buffers; the
//! decoder only consults it to explain a packet that failed to decode.

/// The container a map buffer appears to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapFormat {
    /// A framed binary packet.
    Binary,
    /// An XML mirror (`<map ...>`).
    Xml,
    /// A JSON mirror.
    Json,
}

impl MapFormat {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Guess the format of a map buffer.
///
/// Text mirrors must be valid UTF-8 and start, after an optional BOM and
/// whitespace, with `<`, `{` or `[`. Compressed packets are never valid UTF-8
/// in practice, so a compressed map whose header byte happens to be `{` is
/// still reported as binary. Small uncompressed packets can look like text,
/// which is why [`Decoder`](crate::Decoder) tries the packet first.
#[must_use]
pub fn detect_format(data: &[u8]) -> MapFormat {
    let text = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let Ok(text) = std::str::from_utf8(text) else {
        return MapFormat::Binary;
    };

    match text.trim_start().as_bytes().first() {
        Some(b'<') => MapFormat::Xml,
        Some(b'{' | b'[') => MapFormat::Json,
        _ => MapFormat::Binary,
    }
}
