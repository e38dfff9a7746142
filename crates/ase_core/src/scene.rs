//! Scene model produced by the ASE parser.
//!
//! A [`Scene`] is built once by a single parse pass and then handed to the
//! import pipeline, which is responsible for assembling nodes, generating
//! normals and resolving materials.

use ase_math::Vec3;

use crate::mesh::Mesh;
use crate::texture::{Texture, TextureSlot};

/// Shading model of a material (`*MATERIAL_SHADING`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShadingMode {
    Flat,
    #[default]
    Gouraud,
    Phong,
    Blinn,
    Wire,
}

/// A material from `*MATERIAL_LIST`, or a sub-material of one.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name (`*MATERIAL_NAME`)
    pub name: String,

    /// Ambient color (RGB, 0-1)
    pub ambient: Vec3,

    /// Diffuse color (RGB, 0-1)
    pub diffuse: Vec3,

    /// Specular color (RGB, 0-1)
    pub specular: Vec3,

    /// Emissive color, `*MATERIAL_SELFILLUM` broadcast to all channels
    pub emissive: Vec3,

    /// Shading model
    pub shading: ShadingMode,

    /// Specular exponent (`*MATERIAL_SHINE` scaled by 15)
    pub specular_exponent: f32,

    /// Opacity, stored as `1 - *MATERIAL_TRANSPARENCY`
    pub opacity: f32,

    /// Texture maps, indexed by [`TextureSlot`]
    pub textures: [Texture; TextureSlot::COUNT],

    /// Sub-materials (`*SUBMATERIAL`), addressed by index
    pub sub_materials: Vec<Material>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Vec3::ZERO,
            diffuse: Vec3::splat(0.6), // Grey default
            specular: Vec3::ZERO,
            emissive: Vec3::ZERO,
            shading: ShadingMode::Gouraud,
            specular_exponent: 0.0,
            opacity: 1.0,
            textures: Default::default(),
            sub_materials: Vec::new(),
        }
    }
}

impl Material {
    /// Create a new material with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get the texture in a slot.
    pub fn texture(&self, slot: TextureSlot) -> &Texture {
        &self.textures[slot.index()]
    }

    /// Get the texture in a slot for modification.
    pub fn texture_mut(&mut self, slot: TextureSlot) -> &mut Texture {
        &mut self.textures[slot.index()]
    }

    /// Check if this material uses any textures.
    pub fn has_textures(&self) -> bool {
        self.textures.iter().any(Texture::is_set)
    }
}

/// The parsed contents of one ASE file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Display name of the source (used in diagnostics)
    pub name: String,

    /// Format version from `*3DSMAX_ASCIIEXPORT`
    pub format_version: Option<u32>,

    /// Ambient light color (`*SCENE_AMBIENT_STATIC`)
    pub ambient: Option<Vec3>,

    /// Background color (`*SCENE_BACKGROUND_STATIC`)
    pub background: Option<Vec3>,

    /// Meshes, in source order
    pub meshes: Vec<Mesh>,

    /// Top-level materials, addressed by index
    pub materials: Vec<Material>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get the number of meshes.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Get the number of top-level materials.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Get the total number of faces across all meshes.
    pub fn total_face_count(&self) -> usize {
        self.meshes.iter().map(Mesh::face_count).sum()
    }

    /// Resolve the material a mesh references, if any.
    pub fn material_for(&self, mesh: &Mesh) -> Option<&Material> {
        mesh.material_index
            .and_then(|index| self.materials.get(index as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_defaults() {
        let mat = Material::new("Stone");
        assert_eq!(mat.name, "Stone");
        assert_eq!(mat.shading, ShadingMode::Gouraud);
        assert_eq!(mat.opacity, 1.0);
        assert!(!mat.has_textures());
        assert!(mat.sub_materials.is_empty());
    }

    #[test]
    fn test_material_texture_slots() {
        let mut mat = Material::default();
        mat.texture_mut(TextureSlot::Bump).path = "bump.png".to_string();

        assert!(mat.has_textures());
        assert_eq!(mat.texture(TextureSlot::Bump).path, "bump.png");
        assert!(!mat.texture(TextureSlot::Diffuse).is_set());
    }

    #[test]
    fn test_scene_material_lookup() {
        let mut scene = Scene::new("test");
        scene.materials.push(Material::new("First"));
        scene.materials.push(Material::new("Second"));

        let mut mesh = Mesh::new("Box01");
        assert!(scene.material_for(&mesh).is_none());

        mesh.material_index = Some(1);
        assert_eq!(scene.material_for(&mesh).map(|m| m.name.as_str()), Some("Second"));

        mesh.material_index = Some(7);
        assert!(scene.material_for(&mesh).is_none());
    }

    #[test]
    fn test_scene_counts() {
        let mut scene = Scene::new("test");
        let mut mesh = Mesh::new("a");
        mesh.faces = vec![Default::default(); 3];
        scene.meshes.push(mesh);
        scene.meshes.push(Mesh::new("b"));

        assert_eq!(scene.mesh_count(), 2);
        assert_eq!(scene.total_face_count(), 3);
        assert_eq!(scene.material_count(), 0);
    }
}
