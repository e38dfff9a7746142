//! Texture map slots of a material.

/// A texture map reference (`*MAP_* { ... }` block).
///
/// Only the path and the UV placement are stored; loading the image is
/// left to the consumer of the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    /// Bitmap path as written in the file (`*BITMAP`)
    pub path: String,

    /// UV offset (`*UVW_U_OFFSET`, `*UVW_V_OFFSET`)
    pub offset_u: f32,
    pub offset_v: f32,

    /// UV tiling (`*UVW_U_TILING`, `*UVW_V_TILING`)
    pub scale_u: f32,
    pub scale_v: f32,

    /// Rotation around the W axis (`*UVW_ANGLE`)
    pub rotation: f32,

    /// Blend amount (`*MAP_AMOUNT`)
    pub blend: f32,
}

impl Default for Texture {
    fn default() -> Self {
        Self {
            path: String::new(),
            offset_u: 0.0,
            offset_v: 0.0,
            scale_u: 1.0,
            scale_v: 1.0,
            rotation: 0.0,
            blend: 1.0,
        }
    }
}

impl Texture {
    /// Check if a bitmap path was assigned.
    pub fn is_set(&self) -> bool {
        !self.path.is_empty()
    }
}

/// The texture map slots a material carries, in storage order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Diffuse,
    Ambient,
    Specular,
    Opacity,
    Emissive,
    Bump,
    Shininess,
}

impl TextureSlot {
    /// Number of slots.
    pub const COUNT: usize = 7;

    /// All slots, in storage order.
    pub const ALL: [TextureSlot; Self::COUNT] = [
        TextureSlot::Diffuse,
        TextureSlot::Ambient,
        TextureSlot::Specular,
        TextureSlot::Opacity,
        TextureSlot::Emissive,
        TextureSlot::Bump,
        TextureSlot::Shininess,
    ];

    /// Position of this slot in `Material::textures`.
    pub fn index(self) -> usize {
        self as usize
    }
}
