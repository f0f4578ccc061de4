//! Fixture encoders for building BIN map byte streams in tests.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use glam::{Vec2, Vec3, Vec4};

/// Encode a length in the narrowest of the three array-length widths.
pub(crate) fn encode_array_length(len: usize) -> Vec<u8> {
    assert!(len < (1 << 22), "length {len} does not fit in 22 bits");

    if len < 0x80 {
        vec![len as u8]
    } else if len < (1 << 14) {
        vec![0x80 | (len >> 8) as u8, len as u8]
    } else {
        vec![0xC0 | (len >> 16) as u8, (len >> 8) as u8, len as u8]
    }
}

/// Pack presence flags MSB-first; absent fields set their bit.
fn pack_flags(flags: &[bool], bytes: usize) -> Vec<u8> {
    let mut out = vec![0u8; bytes];
    for (i, present) in flags.iter().enumerate() {
        if !present {
            out[i / 8] |= 0x80 >> (i % 8);
        }
    }
    out
}

/// Encode a short-form mask. The header carries 5 bits and `extra` bytes
/// follow; unused trailing bits are padded as present.
pub(crate) fn encode_short_mask(flags: &[bool], extra: usize) -> Vec<u8> {
    assert!(extra <= 3);
    assert!(flags.len() <= 5 + 8 * extra);

    // Pad the flags to a whole number of bytes with three leading selector
    // bits, then overwrite the selector.
    let mut padded = vec![true; 3];
    padded.extend_from_slice(flags);
    let mut out = pack_flags(&padded, 1 + extra);
    out[0] = (out[0] & 0x1F) | ((extra as u8) << 5);
    out
}

/// Encode a long-form mask holding `flags.len()` bits rounded up to bytes.
pub(crate) fn encode_long_mask(flags: &[bool]) -> Vec<u8> {
    let bytes = flags.len().div_ceil(8);
    let mut out = if bytes < 0x40 {
        vec![0x80 | bytes as u8]
    } else {
        vec![0xC0 | (bytes >> 16) as u8, (bytes >> 8) as u8, bytes as u8]
    };
    out.extend(pack_flags(flags, bytes));
    out
}

/// Wrap `payload` in a packet header, compressing it if asked.
pub(crate) fn frame_packet(payload: &[u8], compress: bool) -> Vec<u8> {
    let body = if compress {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(payload).unwrap();
        encoder.finish().unwrap()
    } else {
        payload.to_vec()
    };

    let len = body.len();
    let mut out = if len < (1 << 14) {
        let flag = if compress { 0x40 } else { 0x00 };
        vec![flag | (len >> 8) as u8, len as u8]
    } else {
        assert!(compress, "long packets are always compressed");
        let mut header = vec![0x80 | (len >> 24) as u8];
        header.extend_from_slice(&(len as u32).to_be_bytes()[1..]);
        header
    };
    out.extend(body);
    out
}

/// Builder for record payloads in wire order.
#[derive(Debug, Default)]
pub(crate) struct StreamWriter {
    buf: Vec<u8>,
}

impl StreamWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub(crate) fn u32(&mut self, v: u32) -> &mut Self {
        self.bytes(&v.to_be_bytes())
    }

    pub(crate) fn i32(&mut self, v: i32) -> &mut Self {
        self.bytes(&v.to_be_bytes())
    }

    pub(crate) fn f32(&mut self, v: f32) -> &mut Self {
        self.bytes(&v.to_be_bytes())
    }

    pub(crate) fn f64(&mut self, v: f64) -> &mut Self {
        self.bytes(&v.to_be_bytes())
    }

    pub(crate) fn vec2(&mut self, v: Vec2) -> &mut Self {
        self.f32(v.x).f32(v.y)
    }

    pub(crate) fn vec3(&mut self, v: Vec3) -> &mut Self {
        self.f32(v.x).f32(v.y).f32(v.z)
    }

    pub(crate) fn vec4(&mut self, v: Vec4) -> &mut Self {
        self.f32(v.x).f32(v.y).f32(v.z).f32(v.w)
    }

    pub(crate) fn length(&mut self, len: usize) -> &mut Self {
        self.bytes(&encode_array_length(len))
    }

    pub(crate) fn string(&mut self, s: &str) -> &mut Self {
        self.length(s.len()).bytes(s.as_bytes())
    }

    pub(crate) fn finish(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }
}
