//! Top-level map decoding.

use crate::cursor::{ByteCursor, IntByteOrder};
use crate::error::{DecodeError, DecodeResult};
use crate::format::{MapFormat, detect_format};
use crate::mask::{MaskPolicy, MaskTraceEntry, OptionalMask};
use crate::packet::read_packet;
use crate::primitives::read_object_array;
use crate::records::{
    Atlas, Batch, CollisionGeometry, Decode, Material, Prop, SpawnPoint, read_optional,
};

/// Default cap on an inflated packet payload (256 MiB).
pub const DEFAULT_MAX_INFLATED_LEN: usize = 256 * 1024 * 1024;

/// A decoded map.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BinMap {
    pub atlases: Option<Vec<Atlas>>,
    pub batches: Option<Vec<Batch>>,
    /// Collision inside the gaming zone.
    pub collision_geometry: CollisionGeometry,
    pub collision_geometry_outside_gaming_zone: CollisionGeometry,
    pub materials: Vec<Material>,
    pub spawn_points: Option<Vec<SpawnPoint>>,
    pub static_geometry: Vec<Prop>,
}

impl BinMap {
    /// Find a material by its ID.
    #[must_use]
    pub fn material(&self, id: u32) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn prop_count(&self) -> usize {
        self.static_geometry.len()
    }
}

impl Decode for BinMap {
    fn decode(cursor: &mut ByteCursor<'_>, mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            atlases: read_optional(cursor, mask, "BinMap.atlases", |c, m| {
                read_object_array(c, m, "BinMap.atlases")
            })?,
            batches: read_optional(cursor, mask, "BinMap.batches", |c, m| {
                read_object_array(c, m, "BinMap.batches")
            })?,
            collision_geometry: CollisionGeometry::decode(cursor, mask)?,
            collision_geometry_outside_gaming_zone: CollisionGeometry::decode(cursor, mask)?,
            materials: read_object_array(cursor, mask, "BinMap.materials")?,
            spawn_points: read_optional(cursor, mask, "BinMap.spawnPoints", |c, m| {
                read_object_array(c, m, "BinMap.spawnPoints")
            })?,
            static_geometry: read_object_array(cursor, mask, "BinMap.staticGeometry")?,
        })
    }
}

/// Decoder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Byte order of integer-array primitives.
    pub int_array_order: IntByteOrder,
    /// How undrained mask flags are treated.
    pub mask_policy: MaskPolicy,
    /// Record every mask pop for [`Decoder::decode_traced`].
    pub trace_mask: bool,
    /// Upper bound on an inflated payload; `None` disables the check.
    pub max_inflated_len: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            int_array_order: IntByteOrder::default(),
            mask_policy: MaskPolicy::default(),
            trace_mask: false,
            max_inflated_len: Some(DEFAULT_MAX_INFLATED_LEN),
        }
    }
}

impl DecodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_int_array_order(mut self, order: IntByteOrder) -> Self {
        self.int_array_order = order;
        self
    }

    #[must_use]
    pub fn with_mask_policy(mut self, policy: MaskPolicy) -> Self {
        self.mask_policy = policy;
        self
    }

    #[must_use]
    pub fn with_mask_trace(mut self, enabled: bool) -> Self {
        self.trace_mask = enabled;
        self
    }

    #[must_use]
    pub fn with_max_inflated_len(mut self, max: Option<usize>) -> Self {
        self.max_inflated_len = max;
        self
    }
}

/// Decodes framed map packets into [`BinMap`]s.
///
/// A decoder holds only its options; every decode call owns its own cursor
/// and mask, so one decoder can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    #[must_use]
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode a framed map packet.
    ///
    /// Bytes after the packet are ignored.
    pub fn decode(&self, data: &[u8]) -> DecodeResult<BinMap> {
        self.decode_traced(data).map(|(map, _)| map)
    }

    /// Decode a framed map packet, also returning the mask trace.
    ///
    /// The trace is empty unless [`DecodeOptions::trace_mask`] is set. If the
    /// packet fails to decode and the input looks like an XML or JSON mirror,
    /// the error is reported as [`DecodeError::UnsupportedFormat`].
    pub fn decode_traced(&self, data: &[u8]) -> DecodeResult<(BinMap, Vec<MaskTraceEntry>)> {
        self.decode_packet(data).map_err(|err| match detect_format(data) {
            MapFormat::Binary => err,
            format => {
                tracing::debug!(%err, format = format.name(), "input is a text mirror");
                DecodeError::UnsupportedFormat {
                    format: format.name(),
                }
            }
        })
    }

    fn decode_packet(&self, data: &[u8]) -> DecodeResult<(BinMap, Vec<MaskTraceEntry>)> {
        let mut outer = ByteCursor::new(data);
        let packet = read_packet(&mut outer, self.options.max_inflated_len)?;
        if !outer.is_empty() {
            tracing::debug!(trailing = outer.remaining(), "ignoring data after packet");
        }

        self.decode_payload(&packet.payload)
    }

    /// Decode an already unframed (and inflated) packet payload.
    pub fn decode_payload(&self, payload: &[u8]) -> DecodeResult<(BinMap, Vec<MaskTraceEntry>)> {
        let mut cursor = ByteCursor::new(payload).with_int_order(self.options.int_array_order);

        let mut mask = OptionalMask::read(&mut cursor)?;
        if self.options.trace_mask {
            mask = mask.with_trace();
        }

        let map = BinMap::decode(&mut cursor, &mut mask)?;
        let consumed = mask.consumed();
        let trace = mask.finish(self.options.mask_policy, cursor.offset())?;

        if !cursor.is_empty() {
            tracing::debug!(trailing = cursor.remaining(), "ignoring padding after map");
        }
        tracing::debug!(
            atlases = map.atlases.as_ref().map_or(0, Vec::len),
            batches = map.batches.as_ref().map_or(0, Vec::len),
            collision = map.collision_geometry.len(),
            collision_outside = map.collision_geometry_outside_gaming_zone.len(),
            materials = map.materials.len(),
            spawn_points = map.spawn_points.as_ref().map_or(0, Vec::len),
            props = map.static_geometry.len(),
            mask_flags = consumed,
            "decoded map"
        );

        Ok((map, trace))
    }
}
