//! Packet framing and payload inflation.
//!
//! A packet is a 2- or 4-byte header followed by its payload:
//!
//! - `0cxxxxxx yyyyyyyy`: 14-bit payload length, `c` is the compression flag.
//! - `1xxxxxxx yyyyyyyy yyyyyyyy yyyyyyyy`: 31-bit payload length, always
//!   compressed.
//!
//! Compressed payloads are zlib streams.

use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};

/// A framed packet with its payload ready for record decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Payload length as declared by the header (compressed size if compressed).
    pub declared_len: usize,
    /// Whether the payload was zlib-compressed on the wire.
    pub compressed: bool,
    /// The inner buffer: the payload, inflated if it was compressed.
    pub payload: Vec<u8>,
}

/// Parsed packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    pub declared_len: usize,
    pub compressed: bool,
}

impl PacketHeader {
    /// Read a packet header, leaving the cursor at the first payload byte.
    pub fn read(cursor: &mut ByteCursor<'_>) -> DecodeResult<Self> {
        let first = cursor.read_u8("packet header")?;

        if first & 0x80 == 0 {
            let high = usize::from(first & 0x3F);
            let low = usize::from(cursor.read_u8("packet header")?);
            Ok(Self {
                declared_len: (high << 8) | low,
                compressed: first & 0x40 != 0,
            })
        } else {
            let [b0, b1, b2] = cursor.read_bytes::<3>("packet header")?;
            let len = u32::from_be_bytes([first & 0x7F, b0, b1, b2]);
            Ok(Self {
                declared_len: len as usize,
                compressed: true,
            })
        }
    }
}

/// Read one packet from the cursor.
///
/// Consumes exactly the header and the declared payload; anything after it
/// (padding, further packets) is left unread. `max_inflated_len` bounds the
/// size of an inflated payload.
pub fn read_packet(
    cursor: &mut ByteCursor<'_>,
    max_inflated_len: Option<usize>,
) -> DecodeResult<Packet> {
    let start = cursor.offset();
    let header = PacketHeader::read(cursor)?;
    let body = cursor.take(header.declared_len, "packet payload")?;

    let payload = if header.compressed {
        inflate(body, max_inflated_len)?
    } else {
        body.to_vec()
    };

    tracing::debug!(
        offset = start,
        declared_len = header.declared_len,
        compressed = header.compressed,
        payload_len = payload.len(),
        "framed packet"
    );

    Ok(Packet {
        declared_len: header.declared_len,
        compressed: header.compressed,
        payload,
    })
}

/// Inflate a zlib stream.
fn inflate(body: &[u8], max_len: Option<usize>) -> DecodeResult<Vec<u8>> {
    // zlib typically achieves 2-4x on map data.
    let mut inflated = Vec::with_capacity(body.len().saturating_mul(3));
    let mut decoder = ZlibDecoder::new(body);

    let read = match max_len {
        // Read one byte past the limit so an oversized payload is detected.
        Some(max) => {
            let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
            decoder.by_ref().take(limit).read_to_end(&mut inflated)
        }
        None => decoder.read_to_end(&mut inflated),
    };
    read.map_err(|e| DecodeError::CorruptPacket {
        detail: e.to_string(),
    })?;

    match max_len {
        Some(max) if inflated.len() > max => Err(DecodeError::CorruptPacket {
            detail: format!("inflated payload exceeds {max} bytes"),
        }),
        _ => Ok(inflated),
    }
}

/// Iterator over consecutive packets in one buffer.
///
/// Stops after the buffer is exhausted, or after yielding the first error.
#[derive(Debug)]
pub struct Packets<'a> {
    cursor: ByteCursor<'a>,
    max_inflated_len: Option<usize>,
    failed: bool,
}

impl<'a> Packets<'a> {
    #[must_use]
    pub fn new(data: &'a [u8], max_inflated_len: Option<usize>) -> Self {
        Self {
            cursor: ByteCursor::new(data),
            max_inflated_len,
            failed: false,
        }
    }
}

impl Iterator for Packets<'_> {
    type Item = DecodeResult<Packet>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor.is_empty() {
            return None;
        }

        let packet = read_packet(&mut self.cursor, self.max_inflated_len);
        self.failed = packet.is_err();
        Some(packet)
    }
}
