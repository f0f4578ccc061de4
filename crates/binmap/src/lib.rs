//! Decode Alternativa BIN map packets into typed scene records.
//!
//! A BIN map is a single framed, usually zlib-compressed packet. Its payload
//! starts with a null-mask that says which optional fields are present,
//! followed by the map's records in a fixed order. Every optional field in
//! the whole record tree takes its presence flag from that one mask, so the
//! decoders must walk the schema in exactly the order it was written.
//!
//! # Design principles
//!
//! - **Synchronous**: No async, no threading primitives
//! - **Pure**: A decode owns its cursor and mask; nothing is shared between calls
//! - **Decode-only**: Writing maps and the XML/JSON mirrors live elsewhere
//!
//! # Example
//!
//! ```ignore
//! let bytes = std::fs::read("map.bin")?;
//! let map = binmap::decode(&bytes)?;
//!
//! for prop in &map.static_geometry {
//!     println!("{} at {}", prop.name, prop.position);
//! }
//! ```

pub mod cursor;
mod error;
pub mod format;
pub mod map;
pub mod mask;
pub mod packet;
pub mod primitives;
pub mod records;
pub mod varint;

#[cfg(test)]
mod testing;

pub use cursor::{ByteCursor, IntByteOrder};
pub use error::{DecodeError, DecodeResult};
pub use format::{MapFormat, detect_format};
pub use map::{BinMap, DecodeOptions, Decoder};
pub use mask::{MaskPolicy, MaskTraceEntry, OptionalMask};
pub use packet::{Packet, Packets, read_packet};
pub use records::{
    Atlas, AtlasRect, Batch, CollisionBox, CollisionGeometry, CollisionPlane, CollisionTriangle,
    Decode, Material, Prop, ScalarParameter, SpawnPoint, TextureParameter, Vector2Parameter,
    Vector3Parameter, Vector4Parameter,
};

/// Decode a framed map packet with default options.
pub fn decode(data: &[u8]) -> DecodeResult<BinMap> {
    Decoder::default().decode(data)
}

/// Decode a framed map packet with custom options.
pub fn decode_with_options(data: &[u8], options: &DecodeOptions) -> DecodeResult<BinMap> {
    Decoder::new(options.clone()).decode(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{encode_short_mask, frame_packet};

    fn empty_map() -> Vec<u8> {
        // Five padding flags: atlases, batches and spawn points present but empty.
        let mut payload = encode_short_mask(&[], 0);
        payload.extend_from_slice(&[0; 11]);
        frame_packet(&payload, true)
    }

    #[test]
    fn test_decode_with_options() {
        let options = DecodeOptions::new().with_mask_policy(MaskPolicy::AllowBytePadding);
        let map = decode_with_options(&empty_map(), &options).unwrap();

        assert_eq!(map.atlases, Some(Vec::new()));
        assert_eq!(map.batches, Some(Vec::new()));
        assert_eq!(map.spawn_points, Some(Vec::new()));
        assert_eq!(map.prop_count(), 0);
    }

    #[test]
    fn test_decode_defaults_are_strict() {
        assert_eq!(
            decode(&empty_map()),
            Err(DecodeError::MaskNotDrained {
                remaining: 2,
                offset: 12,
            })
        );
    }

    #[test]
    fn test_output_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BinMap>();
        assert_send_sync::<Decoder>();
        assert_send_sync::<DecodeError>();
    }
}
