//! Materials and their shader parameters.

use glam::{Vec2, Vec3, Vec4};

use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::mask::OptionalMask;
use crate::primitives::{read_object_array, read_string};
use crate::records::{Decode, read_optional};

/// A named float uniform.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScalarParameter {
    pub name: String,
    pub value: f32,
}

/// A named texture binding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TextureParameter {
    /// Library holding the texture; `None` means the map's own library.
    pub library_name: Option<String>,
    pub name: String,
    pub texture_name: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Vector2Parameter {
    pub name: String,
    pub value: Vec2,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Vector3Parameter {
    pub name: String,
    pub value: Vec3,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Vector4Parameter {
    pub name: String,
    pub value: Vec4,
}

/// A shader plus the parameters bound to it.
///
/// Only `texture_parameters` is always present; the other parameter lists are
/// `None` when the map omits them.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Material {
    pub id: u32,
    pub name: String,
    pub scalar_parameters: Option<Vec<ScalarParameter>>,
    pub shader: String,
    pub texture_parameters: Vec<TextureParameter>,
    pub vector2_parameters: Option<Vec<Vector2Parameter>>,
    pub vector3_parameters: Option<Vec<Vector3Parameter>>,
    pub vector4_parameters: Option<Vec<Vector4Parameter>>,
}

impl Material {
    /// Look up a texture binding by parameter name.
    #[must_use]
    pub fn texture(&self, name: &str) -> Option<&TextureParameter> {
        self.texture_parameters.iter().find(|p| p.name == name)
    }
}

impl Decode for ScalarParameter {
    fn decode(cursor: &mut ByteCursor<'_>, _mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            name: read_string(cursor, "ScalarParameter.name")?,
            value: cursor.read_f32("ScalarParameter.value")?,
        })
    }
}

impl Decode for TextureParameter {
    fn decode(cursor: &mut ByteCursor<'_>, mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            library_name: read_optional(cursor, mask, "TextureParameter.libraryName", |c, _| {
                read_string(c, "TextureParameter.libraryName")
            })?,
            name: read_string(cursor, "TextureParameter.name")?,
            texture_name: read_string(cursor, "TextureParameter.textureName")?,
        })
    }
}

impl Decode for Vector2Parameter {
    fn decode(cursor: &mut ByteCursor<'_>, _mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            name: read_string(cursor, "Vector2Parameter.name")?,
            value: cursor.read_vec2("Vector2Parameter.value")?,
        })
    }
}

impl Decode for Vector3Parameter {
    fn decode(cursor: &mut ByteCursor<'_>, _mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            name: read_string(cursor, "Vector3Parameter.name")?,
            value: cursor.read_vec3("Vector3Parameter.value")?,
        })
    }
}

impl Decode for Vector4Parameter {
    fn decode(cursor: &mut ByteCursor<'_>, _mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            name: read_string(cursor, "Vector4Parameter.name")?,
            value: cursor.read_vec4("Vector4Parameter.value")?,
        })
    }
}

impl Decode for Material {
    fn decode(cursor: &mut ByteCursor<'_>, mask: &mut OptionalMask) -> DecodeResult<Self> {
        Ok(Self {
            id: cursor.read_u32("Material.ID")?,
            name: read_string(cursor, "Material.name")?,
            scalar_parameters: read_optional(cursor, mask, "Material.scalarParameters", |c, m| {
                read_object_array(c, m, "Material.scalarParameters")
            })?,
            shader: read_string(cursor, "Material.shader")?,
            texture_parameters: read_object_array(cursor, mask, "Material.textureParameters")?,
            vector2_parameters: read_optional(cursor, mask, "Material.vector2Parameters", |c, m| {
                read_object_array(c, m, "Material.vector2Parameters")
            })?,
            vector3_parameters: read_optional(cursor, mask, "Material.vector3Parameters", |c, m| {
                read_object_array(c, m, "Material.vector3Parameters")
            })?,
            vector4_parameters: read_optional(cursor, mask, "Material.vector4Parameters", |c, m| {
                read_object_array(c, m, "Material.vector4Parameters")
            })?,
        })
    }
}
