//! Placed static props.

use glam::Vec3;

use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::mask::OptionalMask;
use crate::primitives::read_string;
use crate::records::{Decode, read_optional};

/// A library mesh placed in the map.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Prop {
    pub group_name: Option<String>,
    pub id: u32,
    pub library_name: String,
    pub material_id: u32,
    pub name: String,
    pub position: Vec3,
    /// Euler rotation in radians.
    pub rotation: Option<Vec3>,
    pub scale: Option<Vec3>,
}

impl Prop {
    /// The rotation, or no rotation if the map omits it.
    #[must_use]
    pub fn rotation_or_default(&self) -> Vec3 {
        self.rotation.unwrap_or(Vec3::ZERO)
    }

    /// The scale, or unit scale if the map omits it.
    #[must_use]
    pub fn scale_or_default(&self) -> Vec3 {
        self.scale.unwrap_or(Vec3::ONE)
    }
}

impl Decode for Prop {
    fn decode(cursor: &mut ByteCursor<'_>, mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            group_name: read_optional(cursor, mask, "Prop.groupName", |c, _| {
                read_string(c, "Prop.groupName")
            })?,
            id: cursor.read_u32("Prop.ID")?,
            library_name: read_string(cursor, "Prop.libraryName")?,
            material_id: cursor.read_u32("Prop.materialID")?,
            name: read_string(cursor, "Prop.name")?,
            position: cursor.read_vec3("Prop.position")?,
            rotation: read_optional(cursor, mask, "Prop.rotation", |c, _| {
                c.read_vec3("Prop.rotation")
            })?,
            scale: read_optional(cursor, mask, "Prop.scale", |c, _| c.read_vec3("Prop.scale"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::read_object_array;
    use crate::testing::StreamWriter;

    #[test]
    fn test_decode_full_prop() {
        let data = StreamWriter::new()
            .string("Fences")
            .u32(42)
            .string("Land")
            .u32(3)
            .string("Fence_1")
            .vec3(Vec3::new(10.0, 20.0, 0.0))
            .vec3(Vec3::new(0.0, 0.0, 1.0))
            .vec3(Vec3::splat(2.0))
            .finish();
        let mut cursor = ByteCursor::new(&data);
        let mut mask = OptionalMask::from_flags([true; 3]);

        let prop = Prop::decode(&mut cursor, &mut mask).unwrap();
        assert_eq!(
            prop,
            Prop {
                group_name: Some("Fences".to_string()),
                id: 42,
                library_name: "Land".to_string(),
                material_id: 3,
                name: "Fence_1".to_string(),
                position: Vec3::new(10.0, 20.0, 0.0),
                rotation: Some(Vec3::new(0.0, 0.0, 1.0)),
                scale: Some(Vec3::splat(2.0)),
            }
        );
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_decode_minimal_prop() {
        let data = StreamWriter::new()
            .u32(1)
            .string("Land")
            .u32(0)
            .string("Rock")
            .vec3(Vec3::ZERO)
            .finish();
        let mut cursor = ByteCursor::new(&data);
        let mut mask = OptionalMask::from_flags([false; 3]);

        let prop = Prop::decode(&mut cursor, &mut mask).unwrap();
        assert_eq!(prop.group_name, None);
        assert_eq!(prop.rotation, None);
        assert_eq!(prop.scale, None);
        assert_eq!(prop.rotation_or_default(), Vec3::ZERO);
        assert_eq!(prop.scale_or_default(), Vec3::ONE);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_prop_array_takes_flags_in_element_order() {
        let mut w = StreamWriter::new();
        w.length(2);
        // First prop: rotation only.
        w.u32(1).string("L").u32(0).string("a").vec3(Vec3::ZERO).vec3(Vec3::Z);
        // Second prop: group and scale.
        w.string("g").u32(2).string("L").u32(0).string("b").vec3(Vec3::ONE).vec3(Vec3::ONE);
        let data = w.finish();

        let mut cursor = ByteCursor::new(&data);
        let mut mask = OptionalMask::from_flags([false, true, false, true, false, true]);
        let props: Vec<Prop> = read_object_array(&mut cursor, &mut mask, "test").unwrap();

        assert_eq!(props[0].rotation, Some(Vec3::Z));
        assert_eq!(props[0].scale, None);
        assert_eq!(props[1].group_name.as_deref(), Some("g"));
        assert_eq!(props[1].rotation, None);
        assert_eq!(props[1].scale, Some(Vec3::ONE));
        assert!(cursor.is_empty());
    }
}
