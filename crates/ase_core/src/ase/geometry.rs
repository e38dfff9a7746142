//! `*GEOMOBJECT` states: node transform, mesh data and its element lists.

use ase_math::{Matrix4x3, Vec4};

use crate::mesh::{Face, Mesh, MAX_TEXCOORD_CHANNELS};

use super::error::AseResult;
use super::keyword::{Block, Keyword};
use super::parser::{presize, AseParser};

/// Smoothing groups are bits of a 32-bit mask.
const MAX_SMOOTHING_GROUPS: u32 = u32::BITS;

/// `*MESH_NUM*` declarations seen so far in one `*MESH` block.
#[derive(Clone, Copy, Debug, Default)]
struct DeclaredCounts {
    vertices: usize,
    faces: usize,
    texcoords: usize,
    texcoord_faces: usize,
    colors: usize,
    color_faces: usize,
}

impl AseParser<'_, '_> {
    pub(super) fn parse_geometry_object(&mut self) -> AseResult<Mesh> {
        let mut mesh = Mesh::default();
        self.parse_block(Block::GeometryObject, |p, keyword| {
            match keyword {
                Keyword::NodeName => mesh.name = p.parse_quoted_string(keyword)?,
                Keyword::NodeTm => {
                    if p.expect_open_brace() {
                        p.parse_node_transform(&mut mesh.transform)?;
                    }
                }
                Keyword::Mesh => {
                    if p.expect_open_brace() {
                        p.parse_mesh_data(&mut mesh)?;
                    }
                }
                Keyword::MaterialRef => mesh.material_index = p.parse_material_ref(),
                _ => {}
            }
            Ok(())
        })?;

        log::debug!(
            "Parsed mesh '{}': {} vertices, {} faces",
            mesh.name,
            mesh.vertex_count(),
            mesh.face_count()
        );
        Ok(mesh)
    }

    fn parse_material_ref(&mut self) -> Option<u32> {
        let value = self.parse_int();
        match u32::try_from(value) {
            Ok(index) => Some(index),
            Err(_) => {
                self.warn(format!("*MATERIAL_REF {} is not a valid material index", value));
                None
            }
        }
    }

    fn parse_node_transform(&mut self, transform: &mut Matrix4x3) -> AseResult<()> {
        self.parse_block(Block::NodeTransform, |p, keyword| {
            let row = match keyword {
                Keyword::TmRow0 => 0,
                Keyword::TmRow1 => 1,
                Keyword::TmRow2 => 2,
                Keyword::TmRow3 => 3,
                _ => return Ok(()),
            };
            transform.rows[row] = p.parse_float_triple();
            Ok(())
        })
    }

    fn parse_mesh_data(&mut self, mesh: &mut Mesh) -> AseResult<()> {
        let mut counts = DeclaredCounts::default();
        self.parse_block(Block::MeshData, |p, keyword| {
            match keyword {
                Keyword::MeshNumVertex => counts.vertices = p.parse_count(keyword),
                Keyword::MeshNumFaces => counts.faces = p.parse_count(keyword),
                Keyword::MeshNumTVertex => counts.texcoords = p.parse_count(keyword),
                Keyword::MeshNumTVFaces => counts.texcoord_faces = p.parse_count(keyword),
                Keyword::MeshNumCVertex => counts.colors = p.parse_count(keyword),
                Keyword::MeshNumCVFaces => counts.color_faces = p.parse_count(keyword),
                Keyword::MeshVertexList => {
                    if p.expect_open_brace() {
                        p.parse_vertex_list(counts.vertices, mesh)?;
                    }
                }
                Keyword::MeshFaceList => {
                    if p.expect_open_brace() {
                        p.parse_face_list(counts.faces, mesh)?;
                    }
                }
                Keyword::MeshTVertList => {
                    if p.expect_open_brace() {
                        p.parse_texcoord_list(counts.texcoords, 0, mesh)?;
                    }
                }
                Keyword::MeshTFaceList => {
                    if p.expect_open_brace() {
                        p.parse_texcoord_face_list(counts.texcoord_faces, 0, mesh)?;
                    }
                }
                Keyword::MeshCVertList => {
                    if p.expect_open_brace() {
                        p.parse_color_list(counts.colors, mesh)?;
                    }
                }
                Keyword::MeshCFaceList => {
                    if p.expect_open_brace() {
                        p.parse_color_face_list(counts.color_faces, mesh)?;
                    }
                }
                Keyword::MeshNormals => {
                    if p.expect_open_brace() {
                        p.parse_normal_list(mesh)?;
                    }
                }
                Keyword::MeshMappingChannel => p.parse_mapping_channel(mesh)?,
                Keyword::MaterialRef => mesh.material_index = p.parse_material_ref(),
                _ => {}
            }
            Ok(())
        })
    }

    /// `*MESH_MAPPINGCHANNEL n { ... }` fills texture channel `n - 1`.
    ///
    /// Channel 1 is the base channel and only comes from the mesh block
    /// itself, so indices below 2 are rejected along with indices past the
    /// last supported channel.
    fn parse_mapping_channel(&mut self, mesh: &mut Mesh) -> AseResult<()> {
        let declared = self.parse_int();
        let channel = match usize::try_from(declared) {
            Ok(n) if n < 2 => {
                self.warn(format!("Mapping channel has an invalid index {}. Skipping UV channel", declared));
                None
            }
            Ok(n) if n > MAX_TEXCOORD_CHANNELS => {
                self.warn(format!(
                    "Too many UV channels: channel {} exceeds the limit of {}. Skipping UV channel",
                    n, MAX_TEXCOORD_CHANNELS
                ));
                None
            }
            Ok(n) => Some(n - 1),
            Err(_) => {
                self.warn(format!("Mapping channel has an invalid index {}. Skipping UV channel", declared));
                None
            }
        };

        if !self.expect_open_brace() {
            return Ok(());
        }
        let Some(channel) = channel else {
            return self.skip_section();
        };

        let mut texcoords = 0;
        let mut texcoord_faces = 0;
        self.parse_block(Block::MappingChannel, |p, keyword| {
            match keyword {
                Keyword::MeshNumTVertex => texcoords = p.parse_count(keyword),
                Keyword::MeshNumTVFaces => texcoord_faces = p.parse_count(keyword),
                Keyword::MeshTVertList => {
                    if p.expect_open_brace() {
                        p.parse_texcoord_list(texcoords, channel, mesh)?;
                    }
                }
                Keyword::MeshTFaceList => {
                    if p.expect_open_brace() {
                        p.parse_texcoord_face_list(texcoord_faces, channel, mesh)?;
                    }
                }
                _ => {}
            }
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Element lists
    // ------------------------------------------------------------------

    fn parse_vertex_list(&mut self, count: usize, mesh: &mut Mesh) -> AseResult<()> {
        presize(&mut mesh.positions, count);
        self.parse_block(Block::VertexList, |p, _| {
            if let Some((index, position)) = p.parse_indexed_float_triple() {
                p.scatter(&mut mesh.positions, index, position, "Vertex");
            }
            Ok(())
        })
    }

    fn parse_face_list(&mut self, count: usize, mesh: &mut Mesh) -> AseResult<()> {
        presize(&mut mesh.faces, count);
        self.parse_block(Block::FaceList, |p, _| {
            let (index, face) = p.parse_face()?;
            p.scatter(&mut mesh.faces, index, face, "Face");
            Ok(())
        })
    }

    fn parse_texcoord_list(&mut self, count: usize, channel: usize, mesh: &mut Mesh) -> AseResult<()> {
        presize(&mut mesh.texcoords[channel], count);
        self.parse_block(Block::TexCoordList, |p, _| {
            if let Some((index, uvw)) = p.parse_indexed_float_triple() {
                let written = p.scatter(&mut mesh.texcoords[channel], index, uvw, "Texture coordinate");
                if written && uvw.z != 0.0 {
                    mesh.promote_to_uvw(channel);
                }
            }
            Ok(())
        })
    }

    /// `*MESH_TFACE` entries address faces, so they are bounded by both the
    /// declared count and the faces parsed so far.
    fn parse_texcoord_face_list(&mut self, count: usize, channel: usize, mesh: &mut Mesh) -> AseResult<()> {
        self.parse_block(Block::TexFaceList, |p, _| {
            if let Some((index, uv_indices)) = p.parse_indexed_long_triple() {
                let limit = count.min(mesh.faces.len());
                if let Some(face) = p.checked_index(index, limit, "Texture face") {
                    mesh.faces[face].uv_indices[channel] = uv_indices;
                }
            }
            Ok(())
        })
    }

    fn parse_color_list(&mut self, count: usize, mesh: &mut Mesh) -> AseResult<()> {
        // Unwritten colors are opaque black
        mesh.vertex_colors.resize(count, Vec4::W);
        self.parse_block(Block::ColorList, |p, _| {
            if let Some((index, rgb)) = p.parse_indexed_float_triple() {
                p.scatter(&mut mesh.vertex_colors, index, rgb.extend(1.0), "Vertex color");
            }
            Ok(())
        })
    }

    fn parse_color_face_list(&mut self, count: usize, mesh: &mut Mesh) -> AseResult<()> {
        self.parse_block(Block::ColorFaceList, |p, _| {
            if let Some((index, color_indices)) = p.parse_indexed_long_triple() {
                let limit = count.min(mesh.faces.len());
                if let Some(face) = p.checked_index(index, limit, "Color face") {
                    mesh.faces[face].color_indices = color_indices;
                }
            }
            Ok(())
        })
    }

    /// Vertex normals share the vertex indexing, face normals are ignored.
    fn parse_normal_list(&mut self, mesh: &mut Mesh) -> AseResult<()> {
        let count = mesh.positions.len();
        presize(&mut mesh.normals, count);
        self.parse_block(Block::NormalList, |p, _| {
            if let Some((index, normal)) = p.parse_indexed_float_triple() {
                p.scatter(&mut mesh.normals, index, normal, "Vertex normal");
            }
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Faces
    // ------------------------------------------------------------------

    /// One `*MESH_FACE` record:
    ///
    /// ```text
    /// *MESH_FACE 0: A: 0 B: 1 C: 2 AB: 1 BC: 1 CA: 0 *MESH_SMOOTHING 1,2 *MESH_MTLID 0
    /// ```
    ///
    /// Corner labels may come in any order. The edge visibility flags are
    /// not read.
    pub(super) fn parse_face(&mut self) -> AseResult<(i64, Face)> {
        if !self.cursor.skip_spaces() {
            return Err(self.syntax_error("Unable to parse *MESH_FACE element: unexpected end of line"));
        }
        let Some(index) = self.cursor.read_int() else {
            return Err(self.syntax_error("Unable to parse *MESH_FACE element: face index expected"));
        };
        self.expect_face_colon()?;

        let mut face = Face {
            index: u32::try_from(index).unwrap_or(u32::MAX),
            ..Default::default()
        };
        for _ in 0..3 {
            if !self.cursor.skip_spaces() {
                return Err(self.syntax_error(
                    "Unable to parse *MESH_FACE element: unexpected end of line, A, B or C expected",
                ));
            }
            let corner = match self.cursor.peek() {
                Some(b'A' | b'a') => 0,
                Some(b'B' | b'b') => 1,
                Some(b'C' | b'c') => 2,
                _ => {
                    return Err(self.syntax_error(
                        "Unable to parse *MESH_FACE element: unexpected character, A, B or C expected",
                    ))
                }
            };
            self.cursor.advance();
            self.expect_face_colon()?;

            if !self.cursor.skip_spaces() {
                return Err(self.syntax_error(
                    "Unable to parse *MESH_FACE element: unexpected end of line, vertex index expected",
                ));
            }
            match self.cursor.read_int() {
                Some(vertex) => face.indices[corner] = self.index_value(vertex, "*MESH_FACE vertex"),
                None => self.warn("Unable to parse *MESH_FACE element: vertex index expected"),
            }
        }

        if !self.cursor.skip_to_marker_on_line() {
            return Ok((index, face));
        }
        if self.eat_marker(Keyword::MeshSmoothing) {
            face.smoothing_groups = self.parse_smoothing_groups();
            if !self.cursor.skip_to_marker_on_line() {
                return Ok((index, face));
            }
        }
        if self.eat_marker(Keyword::MeshMtlId) {
            let material_id = self.parse_int();
            face.material_id = self.index_value(material_id, "*MESH_MTLID");
        }
        Ok((index, face))
    }

    fn expect_face_colon(&mut self) -> AseResult<()> {
        self.cursor.skip_spaces();
        if self.cursor.peek() != Some(b':') {
            return Err(self.syntax_error("Unable to parse *MESH_FACE element: ':' expected"));
        }
        self.cursor.advance();
        Ok(())
    }

    /// Comma separated group numbers, possibly none at all.
    fn parse_smoothing_groups(&mut self) -> u32 {
        let mut mask = 0u32;
        if !self.cursor.skip_spaces() {
            return mask;
        }
        while let Some(group) = self.cursor.read_int() {
            match u32::try_from(group) {
                Ok(g) if g < MAX_SMOOTHING_GROUPS => mask |= 1 << g,
                _ => self.warn(format!(
                    "Smoothing group {} is out of range (0..{}) and will be ignored",
                    group, MAX_SMOOTHING_GROUPS
                )),
            }
            self.cursor.skip_spaces();
            if self.cursor.peek() != Some(b',') {
                break;
            }
            self.cursor.advance();
            self.cursor.skip_spaces();
        }
        mask
    }
}
