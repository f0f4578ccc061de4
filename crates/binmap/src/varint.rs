//! Variable-width array length decoding.

use crate::cursor::ByteCursor;
use crate::error::DecodeResult;

/// Largest length the three-width encoding can carry (22 bits).
pub const MAX_ARRAY_LENGTH: usize = (1 << 22) - 1;

/// Read an array, string or record-count length.
///
/// The high bits of the first byte select the width:
///
/// - `0xxxxxxx`: 7-bit length in the low bits.
/// - `10xxxxxx yyyyyyyy`: 14-bit length, low 6 bits then one byte.
/// - `11xxxxxx yyyyyyyy yyyyyyyy`: 22-bit length, low 6 bits then a
///   big-endian `u16`.
///
/// # Errors
///
/// Returns [`TruncatedInput`](crate::DecodeError::TruncatedInput) if the
/// buffer ends before the selected width is complete.
pub fn read_array_length(
    cursor: &mut ByteCursor<'_>,
    context: &'static str,
) -> DecodeResult<usize> {
    let first = cursor.read_u8(context)?;

    if first & 0x80 == 0 {
        return Ok(usize::from(first & 0x7F));
    }

    let high = usize::from(first & 0x3F);
    if first & 0x40 == 0 {
        let low = usize::from(cursor.read_u8(context)?);
        Ok((high << 8) | low)
    } else {
        let low = usize::from(cursor.read_u16(context)?);
        Ok((high << 16) | low)
    }
}
