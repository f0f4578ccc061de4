//! Length-prefixed primitive readers.
//!
//! Strings and arrays share the array-length prefix from [`crate::varint`].

use crate::cursor::{ByteCursor, IntByteOrder};
use crate::error::{DecodeError, DecodeResult};
use crate::mask::OptionalMask;
use crate::records::Decode;
use crate::varint::read_array_length;

/// Read a length-prefixed UTF-8 string.
pub fn read_string(cursor: &mut ByteCursor<'_>, context: &'static str) -> DecodeResult<String> {
    let len = read_array_length(cursor, context)?;
    let offset = cursor.offset();
    let bytes = cursor.take(len, context)?;

    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| DecodeError::InvalidUtf8 { context, offset })
}

/// Read `len` fixed-width values after a length prefix.
fn read_fixed_array<T, const W: usize>(
    cursor: &mut ByteCursor<'_>,
    context: &'static str,
    convert: fn([u8; W]) -> T,
) -> DecodeResult<Vec<T>> {
    let len = read_array_length(cursor, context)?;
    let bytes = cursor.take(len * W, context)?;

    Ok(bytes
        .chunks_exact(W)
        .map(|chunk| {
            let mut raw = [0u8; W];
            raw.copy_from_slice(chunk);
            convert(raw)
        })
        .collect())
}

/// Pick the integer decoder for the cursor's configured byte order.
macro_rules! int_order {
    ($cursor:expr, $ty:ty) => {
        match $cursor.int_order() {
            IntByteOrder::Big => <$ty>::from_be_bytes,
            IntByteOrder::Little => <$ty>::from_le_bytes,
            IntByteOrder::Native => <$ty>::from_ne_bytes,
        }
    };
}

/// Read a length-prefixed array of `i16` in the cursor's integer byte order.
pub fn read_i16_array(
    cursor: &mut ByteCursor<'_>,
    context: &'static str,
) -> DecodeResult<Vec<i16>> {
    let convert: fn([u8; 2]) -> i16 = int_order!(cursor, i16);
    read_fixed_array(cursor, context, convert)
}

/// Read a length-prefixed array of `i32` in the cursor's integer byte order.
pub fn read_i32_array(
    cursor: &mut ByteCursor<'_>,
    context: &'static str,
) -> DecodeResult<Vec<i32>> {
    let convert: fn([u8; 4]) -> i32 = int_order!(cursor, i32);
    read_fixed_array(cursor, context, convert)
}

/// Read a length-prefixed array of `i64` in the cursor's integer byte order.
pub fn read_i64_array(
    cursor: &mut ByteCursor<'_>,
    context: &'static str,
) -> DecodeResult<Vec<i64>> {
    let convert: fn([u8; 8]) -> i64 = int_order!(cursor, i64);
    read_fixed_array(cursor, context, convert)
}

/// Read a length-prefixed array of big-endian `f32`.
pub fn read_f32_array(
    cursor: &mut ByteCursor<'_>,
    context: &'static str,
) -> DecodeResult<Vec<f32>> {
    read_fixed_array(cursor, context, f32::from_be_bytes)
}

/// Read a length-prefixed array of records, decoding each element with `decode`.
///
/// All elements share `mask`, so their optional flags are taken in element
/// order.
pub fn read_array_with<T, F>(
    cursor: &mut ByteCursor<'_>,
    mask: &mut OptionalMask,
    context: &'static str,
    mut decode: F,
) -> DecodeResult<Vec<T>>
where
    F: FnMut(&mut ByteCursor<'_>, &mut OptionalMask) -> DecodeResult<T>,
{
    let len = read_array_length(cursor, context)?;
    // Every record is at least one byte, so this bounds a bogus length.
    let mut items = Vec::with_capacity(len.min(cursor.remaining()));
    for _ in 0..len {
        items.push(decode(cursor, mask)?);
    }
    Ok(items)
}

/// Read a length-prefixed array of `T` records.
pub fn read_object_array<T: Decode>(
    cursor: &mut ByteCursor<'_>,
    mask: &mut OptionalMask,
    context: &'static str,
) -> DecodeResult<Vec<T>> {
    read_array_with(cursor, mask, context, T::decode)
}
