//! Keyword markers and the block states that accept them.
//!
//! A marker is `*NAME` followed by whitespace, a line terminator or the end
//! of input. Names are matched case-sensitively and as a whole, so `*FOOX`
//! never matches `FOO`. Lookup is a binary search over a sorted table.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Keyword {
    AsciiExport,
    Bitmap,
    GeomObject,
    MapAmbient,
    MapAmount,
    MapBump,
    MapDiffuse,
    MapOpacity,
    MapSelfIllum,
    MapShine,
    MapSpecular,
    Material,
    MaterialAmbient,
    MaterialCount,
    MaterialDiffuse,
    MaterialList,
    MaterialName,
    MaterialRef,
    MaterialSelfIllum,
    MaterialShading,
    MaterialShine,
    MaterialSpecular,
    MaterialTransparency,
    Mesh,
    MeshCFace,
    MeshCFaceList,
    MeshCVertList,
    MeshFace,
    MeshFaceList,
    MeshMappingChannel,
    MeshMtlId,
    MeshNormals,
    MeshNumCVertex,
    MeshNumCVFaces,
    MeshNumFaces,
    MeshNumTVertex,
    MeshNumTVFaces,
    MeshNumVertex,
    MeshSmoothing,
    MeshTFace,
    MeshTFaceList,
    MeshTVert,
    MeshTVertList,
    MeshVertCol,
    MeshVertex,
    MeshVertexNormal,
    MeshVertexList,
    NodeName,
    NodeTm,
    NumSubMaterials,
    Scene,
    SceneAmbientStatic,
    SceneBackgroundStatic,
    SubMaterial,
    TmRow0,
    TmRow1,
    TmRow2,
    TmRow3,
    UvwAngle,
    UvwUOffset,
    UvwUTiling,
    UvwVOffset,
    UvwVTiling,
}

/// Marker names sorted by byte value.
const KEYWORDS: &[(&str, Keyword)] = &[
    ("3DSMAX_ASCIIEXPORT", Keyword::AsciiExport),
    ("BITMAP", Keyword::Bitmap),
    ("GEOMOBJECT", Keyword::GeomObject),
    ("MAP_AMBIENT", Keyword::MapAmbient),
    ("MAP_AMOUNT", Keyword::MapAmount),
    ("MAP_BUMP", Keyword::MapBump),
    ("MAP_DIFFUSE", Keyword::MapDiffuse),
    ("MAP_OPACITY", Keyword::MapOpacity),
    ("MAP_SELFILLUM", Keyword::MapSelfIllum),
    ("MAP_SHINE", Keyword::MapShine),
    ("MAP_SPECULAR", Keyword::MapSpecular),
    ("MATERIAL", Keyword::Material),
    ("MATERIAL_AMBIENT", Keyword::MaterialAmbient),
    ("MATERIAL_COUNT", Keyword::MaterialCount),
    ("MATERIAL_DIFFUSE", Keyword::MaterialDiffuse),
    ("MATERIAL_LIST", Keyword::MaterialList),
    ("MATERIAL_NAME", Keyword::MaterialName),
    ("MATERIAL_REF", Keyword::MaterialRef),
    ("MATERIAL_SELFILLUM", Keyword::MaterialSelfIllum),
    ("MATERIAL_SHADING", Keyword::MaterialShading),
    ("MATERIAL_SHINE", Keyword::MaterialShine),
    ("MATERIAL_SPECULAR", Keyword::MaterialSpecular),
    ("MATERIAL_TRANSPARENCY", Keyword::MaterialTransparency),
    ("MESH", Keyword::Mesh),
    ("MESH_CFACE", Keyword::MeshCFace),
    ("MESH_CFACELIST", Keyword::MeshCFaceList),
    ("MESH_CVERTLIST", Keyword::MeshCVertList),
    ("MESH_FACE", Keyword::MeshFace),
    ("MESH_FACE_LIST", Keyword::MeshFaceList),
    ("MESH_MAPPINGCHANNEL", Keyword::MeshMappingChannel),
    ("MESH_MTLID", Keyword::MeshMtlId),
    ("MESH_NORMALS", Keyword::MeshNormals),
    ("MESH_NUMCVERTEX", Keyword::MeshNumCVertex),
    ("MESH_NUMCVFACES", Keyword::MeshNumCVFaces),
    ("MESH_NUMFACES", Keyword::MeshNumFaces),
    ("MESH_NUMTVERTEX", Keyword::MeshNumTVertex),
    ("MESH_NUMTVFACES", Keyword::MeshNumTVFaces),
    ("MESH_NUMVERTEX", Keyword::MeshNumVertex),
    ("MESH_SMOOTHING", Keyword::MeshSmoothing),
    ("MESH_TFACE", Keyword::MeshTFace),
    ("MESH_TFACELIST", Keyword::MeshTFaceList),
    ("MESH_TVERT", Keyword::MeshTVert),
    ("MESH_TVERTLIST", Keyword::MeshTVertList),
    ("MESH_VERTCOL", Keyword::MeshVertCol),
    ("MESH_VERTEX", Keyword::MeshVertex),
    ("MESH_VERTEXNORMAL", Keyword::MeshVertexNormal),
    ("MESH_VERTEX_LIST", Keyword::MeshVertexList),
    ("NODE_NAME", Keyword::NodeName),
    ("NODE_TM", Keyword::NodeTm),
    ("NUMSUBMTLS", Keyword::NumSubMaterials),
    ("SCENE", Keyword::Scene),
    ("SCENE_AMBIENT_STATIC", Keyword::SceneAmbientStatic),
    ("SCENE_BACKGROUND_STATIC", Keyword::SceneBackgroundStatic),
    ("SUBMATERIAL", Keyword::SubMaterial),
    ("TM_ROW0", Keyword::TmRow0),
    ("TM_ROW1", Keyword::TmRow1),
    ("TM_ROW2", Keyword::TmRow2),
    ("TM_ROW3", Keyword::TmRow3),
    ("UVW_ANGLE", Keyword::UvwAngle),
    ("UVW_U_OFFSET", Keyword::UvwUOffset),
    ("UVW_U_TILING", Keyword::UvwUTiling),
    ("UVW_V_OFFSET", Keyword::UvwVOffset),
    ("UVW_V_TILING", Keyword::UvwVTiling),
];

impl Keyword {
    /// Look up a marker name (without the leading `*`).
    pub fn from_name(name: &[u8]) -> Option<Keyword> {
        KEYWORDS
            .binary_search_by(|(literal, _)| literal.as_bytes().cmp(name))
            .ok()
            .map(|i| KEYWORDS[i].1)
    }

    /// The marker name, without the leading `*`.
    pub fn name(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(_, keyword)| *keyword == self)
            .map_or("", |(literal, _)| *literal)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*{}", self.name())
    }
}

/// Parser states, one per nesting level of the format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Block {
    Top,
    Scene,
    MaterialList,
    Material,
    TextureMap,
    GeometryObject,
    NodeTransform,
    MeshData,
    MappingChannel,
    VertexList,
    FaceList,
    TexCoordList,
    TexFaceList,
    ColorList,
    ColorFaceList,
    NormalList,
}

impl Block {
    /// Markers this state handles. Anything else is skipped by brace counting.
    pub fn keywords(self) -> &'static [Keyword] {
        use Keyword::*;
        match self {
            Block::Top => &[AsciiExport, Scene, MaterialList, GeomObject],
            Block::Scene => &[SceneBackgroundStatic, SceneAmbientStatic],
            Block::MaterialList => &[MaterialCount, Material],
            Block::Material => &[
                MaterialName,
                MaterialAmbient,
                MaterialDiffuse,
                MaterialSpecular,
                MaterialShading,
                MaterialTransparency,
                MaterialSelfIllum,
                MaterialShine,
                MapDiffuse,
                MapAmbient,
                MapSpecular,
                MapOpacity,
                MapSelfIllum,
                MapBump,
                MapShine,
                NumSubMaterials,
                SubMaterial,
            ],
            Block::TextureMap => &[
                Bitmap, UvwUOffset, UvwVOffset, UvwUTiling, UvwVTiling, UvwAngle, MapAmount,
            ],
            Block::GeometryObject => &[NodeName, NodeTm, Mesh, MaterialRef],
            Block::NodeTransform => &[TmRow0, TmRow1, TmRow2, TmRow3],
            Block::MeshData => &[
                MeshNumVertex,
                MeshNumTVertex,
                MeshNumCVertex,
                MeshNumFaces,
                MeshNumTVFaces,
                MeshNumCVFaces,
                MeshVertexList,
                MeshFaceList,
                MeshTVertList,
                MeshTFaceList,
                MeshCVertList,
                MeshCFaceList,
                MeshNormals,
                MeshMappingChannel,
                MaterialRef,
            ],
            Block::MappingChannel => &[MeshNumTVertex, MeshNumTVFaces, MeshTVertList, MeshTFaceList],
            Block::VertexList => &[MeshVertex],
            Block::FaceList => &[MeshFace],
            Block::TexCoordList => &[MeshTVert],
            Block::TexFaceList => &[MeshTFace],
            Block::ColorList => &[MeshVertCol],
            Block::ColorFaceList => &[MeshCFace],
            Block::NormalList => &[MeshVertexNormal],
        }
    }

    pub fn accepts(self, keyword: Keyword) -> bool {
        self.keywords().contains(&keyword)
    }

    /// States that may end at end of input without their closing brace.
    pub fn tolerates_eof(self) -> bool {
        matches!(self, Block::Top | Block::GeometryObject)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Block::Top => "top level",
            Block::Scene => "*SCENE",
            Block::MaterialList => "*MATERIAL_LIST",
            Block::Material => "*MATERIAL",
            Block::TextureMap => "*MAP",
            Block::GeometryObject => "*GEOMOBJECT",
            Block::NodeTransform => "*NODE_TM",
            Block::MeshData => "*MESH",
            Block::MappingChannel => "*MESH_MAPPINGCHANNEL",
            Block::VertexList => "*MESH_VERTEX_LIST",
            Block::FaceList => "*MESH_FACE_LIST",
            Block::TexCoordList => "*MESH_TVERTLIST",
            Block::TexFaceList => "*MESH_TFACELIST",
            Block::ColorList => "*MESH_CVERTLIST",
            Block::ColorFaceList => "*MESH_CFACELIST",
            Block::NormalList => "*MESH_NORMALS",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted() {
        for pair in KEYWORDS.windows(2) {
            assert!(
                pair[0].0.as_bytes() < pair[1].0.as_bytes(),
                "{} must sort before {}",
                pair[0].0,
                pair[1].0
            );
        }
    }

    #[test]
    fn test_lookup_whole_name() {
        assert_eq!(Keyword::from_name(b"MESH"), Some(Keyword::Mesh));
        assert_eq!(Keyword::from_name(b"MESH_VERTEX"), Some(Keyword::MeshVertex));
        assert_eq!(Keyword::from_name(b"MESH_VERTEX_LIST"), Some(Keyword::MeshVertexList));
        assert_eq!(Keyword::from_name(b"MESH_FACENORMAL"), None);
        assert_eq!(Keyword::from_name(b"MESHX"), None);
        assert_eq!(Keyword::from_name(b"mesh"), None);
        assert_eq!(Keyword::from_name(b""), None);
    }

    #[test]
    fn test_every_keyword_round_trips() {
        for (literal, keyword) in KEYWORDS {
            assert_eq!(Keyword::from_name(literal.as_bytes()), Some(*keyword));
            assert_eq!(keyword.name(), *literal);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Keyword::MaterialShine.to_string(), "*MATERIAL_SHINE");
        assert_eq!(Block::FaceList.to_string(), "*MESH_FACE_LIST");
    }

    #[test]
    fn test_eof_tolerance() {
        assert!(Block::Top.tolerates_eof());
        assert!(Block::GeometryObject.tolerates_eof());
        assert!(!Block::Scene.tolerates_eof());
        assert!(!Block::MeshData.tolerates_eof());
        assert!(!Block::TextureMap.tolerates_eof());
    }

    #[test]
    fn test_block_acceptance() {
        assert!(Block::Top.accepts(Keyword::GeomObject));
        assert!(!Block::Top.accepts(Keyword::MeshVertex));
        assert!(Block::MappingChannel.accepts(Keyword::MeshTVertList));
        assert!(!Block::MappingChannel.accepts(Keyword::MeshVertexList));
    }
}
