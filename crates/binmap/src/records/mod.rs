//! Record decoders.
//!
//! Each record reads its fields in wire order. Fields marked optional take a
//! presence flag from the shared [`OptionalMask`] immediately before they would
//! be read; absent fields decode as `None` and consume no bytes.

mod atlas;
mod batch;
mod collision;
mod material;
mod prop;
mod spawn;

pub use atlas::{Atlas, AtlasRect};
pub use batch::Batch;
pub use collision::{CollisionBox, CollisionGeometry, CollisionPlane, CollisionTriangle};
pub use material::{
    Material, ScalarParameter, TextureParameter, Vector2Parameter, Vector3Parameter,
    Vector4Parameter,
};
pub use prop::Prop;
pub use spawn::SpawnPoint;

use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::mask::OptionalMask;

/// A record with a fixed wire layout.
pub trait Decode: Sized {
    /// Decode one record, taking presence flags from `mask` for its optional
    /// fields and those of any nested records.
    fn decode(cursor: &mut ByteCursor<'_>, mask: &mut OptionalMask) -> DecodeResult<Self>;
}

/// Read an optional field: pop its flag, then read it only if present.
pub(crate) fn read_optional<'a, T>(
    cursor: &mut ByteCursor<'a>,
    mask: &mut OptionalMask,
    field: &'static str,
    read: impl FnOnce(&mut ByteCursor<'a>, &mut OptionalMask) -> DecodeResult<T>,
) -> DecodeResult<Option<T>> {
    if mask.pop(field, cursor.offset())? {
        read(cursor, mask).map(Some)
    } else {
        Ok(None)
    }
}
