//! Texture atlases.

use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::mask::OptionalMask;
use crate::primitives::{read_object_array, read_string};
use crate::records::Decode;

/// A packed texture atlas.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Atlas {
    pub height: i32,
    pub name: String,
    /// Padding in pixels between packed rectangles.
    pub padding: u32,
    pub rects: Vec<AtlasRect>,
    pub width: u32,
}

/// One texture's placement inside an [`Atlas`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AtlasRect {
    pub height: u32,
    /// Asset library the source texture lives in.
    pub library_name: String,
    pub name: String,
    pub width: u32,
    pub x: u32,
    pub y: u32,
}

impl Decode for AtlasRect {
    fn decode(cursor: &mut ByteCursor<'_>, _mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            height: cursor.read_u32("AtlasRect.height")?,
            library_name: read_string(cursor, "AtlasRect.libraryName")?,
            name: read_string(cursor, "AtlasRect.name")?,
            width: cursor.read_u32("AtlasRect.width")?,
            x: cursor.read_u32("AtlasRect.x")?,
            y: cursor.read_u32("AtlasRect.y")?,
        })
    }
}

impl Decode for Atlas {
    fn decode(cursor: &mut ByteCursor<'_>, mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            height: cursor.read_i32("Atlas.height")?,
            name: read_string(cursor, "Atlas.name")?,
            padding: cursor.read_u32("Atlas.padding")?,
            rects: read_object_array(cursor, mask, "Atlas.rects")?,
            width: cursor.read_u32("Atlas.width")?,
        })
    }
}
