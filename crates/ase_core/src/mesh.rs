//! Mesh geometry as declared by a `*GEOMOBJECT` block.
//!
//! Every list in a [`Mesh`] is addressed by the explicit index written in the
//! file. Lists are presized from their `*MESH_NUM*` declaration and filled by
//! index, so an entry that was never written keeps its default value.

use ase_math::{Matrix4x3, Vec3, Vec4};

/// Maximum number of texture coordinate channels a mesh can carry.
///
/// Channel 0 holds the base `*MESH_TVERTLIST`; `*MESH_MAPPINGCHANNEL n`
/// writes channel `n - 1`.
pub const MAX_TEXCOORD_CHANNELS: usize = 8;

/// A triangle from `*MESH_FACE_LIST`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Face {
    /// Index declared in the file (`*MESH_FACE <index>:`)
    pub index: u32,

    /// Vertex indices for the A, B and C corners
    pub indices: [u32; 3],

    /// Smoothing group bitmask (bit `g` set for group `g`)
    pub smoothing_groups: u32,

    /// Sub-material id from `*MESH_MTLID`
    pub material_id: u32,

    /// Texture coordinate indices, one triple per channel
    pub uv_indices: [[u32; 3]; MAX_TEXCOORD_CHANNELS],

    /// Vertex color indices from `*MESH_CFACE`
    pub color_indices: [u32; 3],
}

/// A mesh parsed from a `*GEOMOBJECT` block.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    /// Node name (`*NODE_NAME`)
    pub name: String,

    /// Node transform (`*NODE_TM`)
    pub transform: Matrix4x3,

    /// Vertex positions
    pub positions: Vec<Vec3>,

    /// Faces, indexed by their declared face index
    pub faces: Vec<Face>,

    /// Texture coordinates per channel (u, v, w)
    pub texcoords: [Vec<Vec3>; MAX_TEXCOORD_CHANNELS],

    /// Number of meaningful components per channel (2 or 3)
    pub uv_components: [u32; MAX_TEXCOORD_CHANNELS],

    /// Vertex colors (RGBA, alpha is always 1)
    pub vertex_colors: Vec<Vec4>,

    /// Vertex normals from `*MESH_VERTEXNORMAL`
    pub normals: Vec<Vec3>,

    /// Index into the scene material list (`*MATERIAL_REF`)
    pub material_index: Option<u32>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            name: String::new(),
            transform: Matrix4x3::IDENTITY,
            positions: Vec::new(),
            faces: Vec::new(),
            texcoords: Default::default(),
            uv_components: [2; MAX_TEXCOORD_CHANNELS],
            vertex_colors: Vec::new(),
            normals: Vec::new(),
            material_index: None,
        }
    }
}

impl Mesh {
    /// Create an empty mesh with a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of faces in the mesh.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has normals.
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Check if the mesh has vertex colors.
    pub fn has_vertex_colors(&self) -> bool {
        !self.vertex_colors.is_empty()
    }

    /// Number of texture coordinate channels holding data.
    pub fn texcoord_channel_count(&self) -> usize {
        self.texcoords.iter().filter(|c| !c.is_empty()).count()
    }

    /// Mark a channel as carrying a meaningful third (w) component.
    ///
    /// Promotion is permanent: there is no way back to two components.
    pub(crate) fn promote_to_uvw(&mut self, channel: usize) {
        if self.uv_components[channel] != 3 {
            log::debug!("Mesh {} channel {} uses 3 UV components", self.name, channel);
            self.uv_components[channel] = 3;
        }
    }
}
