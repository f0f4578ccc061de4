//! Spawn points.

use glam::Vec3;

use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::mask::OptionalMask;
use crate::records::Decode;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SpawnPoint {
    pub position: Vec3,
    pub rotation: Vec3,
    /// Engine-defined spawn category, kept as the raw wire value.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: u32,
}

impl Decode for SpawnPoint {
    fn decode(cursor: &mut ByteCursor<'_>, _mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            position: cursor.read_vec3("SpawnPoint.position")?,
            rotation: cursor.read_vec3("SpawnPoint.rotation")?,
            kind: cursor.read_u32("SpawnPoint.type")?,
        })
    }
}
