//! Collision primitives.
//!
//! Maps carry two [`CollisionGeometry`] sets: one for the playable area and
//! one for everything outside the gaming zone.

use glam::Vec3;

use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::mask::OptionalMask;
use crate::primitives::read_object_array;
use crate::records::Decode;

/// An oriented box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CollisionBox {
    pub position: Vec3,
    pub rotation: Vec3,
    pub size: Vec3,
}

/// A rectangle of `width` by `length`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CollisionPlane {
    pub length: f64,
    pub position: Vec3,
    pub rotation: Vec3,
    pub width: f64,
}

/// A triangle with local-space vertices.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CollisionTriangle {
    pub length: f64,
    pub position: Vec3,
    pub rotation: Vec3,
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
}

/// All collision primitives of one zone.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CollisionGeometry {
    pub boxes: Vec<CollisionBox>,
    pub planes: Vec<CollisionPlane>,
    pub triangles: Vec<CollisionTriangle>,
}

impl CollisionGeometry {
    /// Total number of primitives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len() + self.planes.len() + self.triangles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Decode for CollisionBox {
    fn decode(cursor: &mut ByteCursor<'_>, _mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            position: cursor.read_vec3("CollisionBox.position")?,
            rotation: cursor.read_vec3("CollisionBox.rotation")?,
            size: cursor.read_vec3("CollisionBox.size")?,
        })
    }
}

impl Decode for CollisionPlane {
    fn decode(cursor: &mut ByteCursor<'_>, _mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            length: cursor.read_f64("CollisionPlane.length")?,
            position: cursor.read_vec3("CollisionPlane.position")?,
            rotation: cursor.read_vec3("CollisionPlane.rotation")?,
            width: cursor.read_f64("CollisionPlane.width")?,
        })
    }
}

impl Decode for CollisionTriangle {
    fn decode(cursor: &mut ByteCursor<'_>, _mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            length: cursor.read_f64("CollisionTriangle.length")?,
            position: cursor.read_vec3("CollisionTriangle.position")?,
            rotation: cursor.read_vec3("CollisionTriangle.rotation")?,
            v0: cursor.read_vec3("CollisionTriangle.v0")?,
            v1: cursor.read_vec3("CollisionTriangle.v1")?,
            v2: cursor.read_vec3("CollisionTriangle.v2")?,
        })
    }
}

impl Decode for CollisionGeometry {
    fn decode(cursor: &mut ByteCursor<'_>, mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            boxes: read_object_array(cursor, mask, "CollisionGeometry.boxes")?,
            planes: read_object_array(cursor, mask, "CollisionGeometry.planes")?,
            triangles: read_object_array(cursor, mask, "CollisionGeometry.triangles")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::testing::StreamWriter;

    #[test]
    fn test_decode_empty_geometry() {
        let data = [0x00, 0x00, 0x00];
        let mut cursor = ByteCursor::new(&data);
        let geometry =
            CollisionGeometry::decode(&mut cursor, &mut OptionalMask::default()).unwrap();

        assert!(geometry.is_empty());
        assert_eq!(cursor.offset(), 3);
    }

    #[test]
    fn test_decode_geometry() {
        let mut w = StreamWriter::new();
        // One box.
        w.length(1)
            .vec3(Vec3::new(0.0, 0.0, 50.0))
            .vec3(Vec3::ZERO)
            .vec3(Vec3::new(500.0, 500.0, 100.0));
        // One plane.
        w.length(1)
            .f64(1000.0)
            .vec3(Vec3::ZERO)
            .vec3(Vec3::new(0.0, 0.0, 1.5))
            .f64(250.0);
        // Two triangles.
        w.length(2);
        for i in 0..2u8 {
            w.f64(10.0)
                .vec3(Vec3::splat(f32::from(i)))
                .vec3(Vec3::ZERO)
                .vec3(Vec3::X)
                .vec3(Vec3::Y)
                .vec3(Vec3::Z);
        }
        let data = w.finish();

        let mut cursor = ByteCursor::new(&data);
        let geometry =
            CollisionGeometry::decode(&mut cursor, &mut OptionalMask::default()).unwrap();

        assert_eq!(geometry.len(), 4);
        assert_eq!(geometry.boxes[0].size, Vec3::new(500.0, 500.0, 100.0));
        assert_eq!(geometry.planes[0].length, 1000.0);
        assert_eq!(geometry.planes[0].width, 250.0);
        assert_eq!(geometry.planes[0].rotation.z, 1.5);
        assert_eq!(geometry.triangles[1].position, Vec3::ONE);
        assert_eq!(geometry.triangles[1].v2, Vec3::Z);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_truncated_triangle() {
        let data = StreamWriter::new()
            .length(0)
            .length(0)
            .length(1)
            .f64(1.0)
            .vec3(Vec3::ZERO)
            .finish();
        let result =
            CollisionGeometry::decode(&mut ByteCursor::new(&data), &mut OptionalMask::default());

        assert!(matches!(
            result,
            Err(DecodeError::TruncatedInput {
                context: "CollisionTriangle.rotation",
                ..
            })
        ));
    }
}
