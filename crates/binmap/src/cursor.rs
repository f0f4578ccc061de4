//! Byte cursor with fixed-width big-endian reads.

use glam::{Vec2, Vec3, Vec4};

use crate::error::{DecodeError, DecodeResult};

/// Byte order used for integer-array primitives.
///
/// Scalars, floats and length prefixes are always big-endian. Only the
/// `i16`/`i32`/`i64` array primitives are configurable, since their order has
/// not been confirmed against captured maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntByteOrder {
    /// Most significant byte first, like the rest of the format.
    #[default]
    Big,
    /// Least significant byte first.
    Little,
    /// Whatever the host uses.
    Native,
}

/// A read offset over a borrowed byte buffer.
///
/// Every read either advances the offset by exactly the bytes it consumed or
/// fails with [`DecodeError::TruncatedInput`] without advancing.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
    int_order: IntByteOrder,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            int_order: IntByteOrder::default(),
        }
    }

    /// Set the byte order used by integer-array reads.
    #[must_use]
    pub fn with_int_order(mut self, int_order: IntByteOrder) -> Self {
        self.int_order = int_order;
        self
    }

    #[must_use]
    pub fn int_order(&self) -> IntByteOrder {
        self.int_order
    }

    /// Current read offset from the start of the buffer.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume the next `len` bytes.
    pub fn take(&mut self, len: usize, context: &'static str) -> DecodeResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(DecodeError::TruncatedInput {
                context,
                offset: self.offset,
                needed: len,
                available: self.remaining(),
            });
        }

        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Consume the next `N` bytes as a fixed-size array.
    pub fn read_bytes<const N: usize>(&mut self, context: &'static str) -> DecodeResult<[u8; N]> {
        let bytes = self.take(N, context)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&mut self, context: &'static str) -> DecodeResult<u8> {
        Ok(self.read_bytes::<1>(context)?[0])
    }

    pub fn read_u16(&mut self, context: &'static str) -> DecodeResult<u16> {
        Ok(u16::from_be_bytes(self.read_bytes(context)?))
    }

    pub fn read_u32(&mut self, context: &'static str) -> DecodeResult<u32> {
        Ok(u32::from_be_bytes(self.read_bytes(context)?))
    }

    pub fn read_i32(&mut self, context: &'static str) -> DecodeResult<i32> {
        Ok(i32::from_be_bytes(self.read_bytes(context)?))
    }

    pub fn read_f32(&mut self, context: &'static str) -> DecodeResult<f32> {
        Ok(f32::from_be_bytes(self.read_bytes(context)?))
    }

    pub fn read_f64(&mut self, context: &'static str) -> DecodeResult<f64> {
        Ok(f64::from_be_bytes(self.read_bytes(context)?))
    }

    pub fn read_vec2(&mut self, context: &'static str) -> DecodeResult<Vec2> {
        let [x, y] = self.read_f32s(context)?;
        Ok(Vec2::new(x, y))
    }

    pub fn read_vec3(&mut self, context: &'static str) -> DecodeResult<Vec3> {
        let [x, y, z] = self.read_f32s(context)?;
        Ok(Vec3::new(x, y, z))
    }

    pub fn read_vec4(&mut self, context: &'static str) -> DecodeResult<Vec4> {
        let [x, y, z, w] = self.read_f32s(context)?;
        Ok(Vec4::new(x, y, z, w))
    }

    /// Read `N` consecutive floats, all-or-nothing.
    fn read_f32s<const N: usize>(&mut self, context: &'static str) -> DecodeResult<[f32; N]> {
        let bytes = self.take(N * 4, context)?;
        let mut out = [0.0; N];
        for (value, chunk) in out.iter_mut().zip(bytes.chunks_exact(4)) {
            *value = f32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(out)
    }
}
