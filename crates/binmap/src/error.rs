//! Error types for decoding operations.

use std::fmt;

/// Errors that can occur while decoding a BIN map.
///
/// Every variant is fatal: the format has no resynchronization points, so a
/// decode that fails part-way cannot be salvaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A read ran past the end of the buffer.
    TruncatedInput {
        context: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// The packet payload could not be inflated.
    CorruptPacket { detail: String },
    /// A field asked for a presence flag after the mask ran dry.
    MaskExhausted {
        field: &'static str,
        consumed: usize,
        offset: usize,
    },
    /// The decode finished with presence flags left over.
    MaskNotDrained { remaining: usize, offset: usize },
    /// A string field did not hold valid UTF-8.
    InvalidUtf8 {
        context: &'static str,
        offset: usize,
    },
    /// The input is a map mirror format that this crate does not decode.
    UnsupportedFormat { format: &'static str },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedInput {
                context,
                offset,
                needed,
                available,
            } => {
                write!(
                    f,
                    "truncated input in {context} at offset {offset}: needed {needed} bytes, {available} available"
                )
            }
            Self::CorruptPacket { detail } => write!(f, "corrupt packet: {detail}"),
            Self::MaskExhausted {
                field,
                consumed,
                offset,
            } => {
                write!(
                    f,
                    "optional mask exhausted at {field} (offset {offset}) after {consumed} flags"
                )
            }
            Self::MaskNotDrained { remaining, offset } => {
                write!(
                    f,
                    "optional mask has {remaining} unconsumed flags at offset {offset}"
                )
            }
            Self::InvalidUtf8 { context, offset } => {
                write!(f, "invalid utf-8 in {context} at offset {offset}")
            }
            Self::UnsupportedFormat { format } => {
                write!(f, "unsupported map format: {format}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
