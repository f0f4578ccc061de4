//! Render batches.

use glam::Vec3;

use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::mask::OptionalMask;
use crate::primitives::read_string;
use crate::records::Decode;

/// A group of props drawn together with one material.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Batch {
    pub material_id: u32,
    pub name: String,
    pub position: Vec3,
    /// The member prop IDs, as stored on the wire.
    pub prop_ids: String,
}

impl Decode for Batch {
    fn decode(cursor: &mut ByteCursor<'_>, _mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            material_id: cursor.read_u32("Batch.materialID")?,
            name: read_string(cursor, "Batch.name")?,
            position: cursor.read_vec3("Batch.position")?,
            prop_ids: read_string(cursor, "Batch.propIDs")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StreamWriter;

    #[test]
    fn test_decode_batch() {
        let data = StreamWriter::new()
            .u32(3)
            .string("batch_3")
            .vec3(Vec3::new(100.0, 200.0, -50.0))
            .string("1 2 5")
            .finish();
        let mut cursor = ByteCursor::new(&data);

        let batch = Batch::decode(&mut cursor, &mut OptionalMask::default()).unwrap();
        assert_eq!(batch.material_id, 3);
        assert_eq!(batch.name, "batch_3");
        assert_eq!(batch.position, Vec3::new(100.0, 200.0, -50.0));
        assert_eq!(batch.prop_ids, "1 2 5");
        assert!(cursor.is_empty());
    }
}
