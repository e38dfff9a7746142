//! ASE (3ds Max ASCII export) parser.
//!
//! Recursive descent with one state per nesting level of the format. Each
//! state runs the same loop ([`AseParser::parse_block`]): markers it knows
//! are dispatched to a handler that either reads a value inline or recurses
//! into a child state; everything else, unknown markers included, only feeds
//! the brace counter. A state returns with the cursor past its closing brace.
//!
//! # Supported Syntax
//!
//! - `*3DSMAX_ASCIIEXPORT 200`
//! - `*SCENE { *SCENE_BACKGROUND_STATIC r g b  *SCENE_AMBIENT_STATIC r g b }`
//! - `*MATERIAL_LIST { *MATERIAL_COUNT n  *MATERIAL i { ... } }`
//! - `*MAP_DIFFUSE { *BITMAP "path"  *UVW_U_OFFSET f ... }` and the other map slots
//! - `*GEOMOBJECT { *NODE_NAME "name"  *NODE_TM { ... }  *MESH { ... } }`

use ase_math::Vec3;

use crate::config::ParserConfig;
use crate::mesh::Mesh;
use crate::scene::{Material, Scene, ShadingMode};
use crate::texture::{Texture, TextureSlot};

use super::cursor::Cursor;
use super::diagnostics::{Diagnostic, DiagnosticSink, LogSink, Severity};
use super::error::{AseError, AseResult};
use super::keyword::{Block, Keyword};

/// Format version written by every known exporter.
pub const SUPPORTED_FORMAT_VERSION: i64 = 200;

/// `*MATERIAL_SHINE` is stored multiplied by this factor.
pub const SHININESS_SCALE: f32 = 15.0;

/// `*MATERIAL_SHADING` values. Anything else means Gouraud.
const SHADING_MODES: &[(&str, ShadingMode)] = &[
    ("Blinn", ShadingMode::Blinn),
    ("Phong", ShadingMode::Phong),
    ("Flat", ShadingMode::Flat),
    ("Wire", ShadingMode::Wire),
];

/// Sub-materials may not nest below this level.
const MAX_MATERIAL_LEVEL: usize = 1;

/// ASE parser over one immutable input buffer.
///
/// A parser performs exactly one pass: [`AseParser::parse`] consumes it.
pub struct AseParser<'a, 's> {
    pub(super) cursor: Cursor<'a>,
    name: &'a str,
    config: ParserConfig,
    sink: &'s mut dyn DiagnosticSink,
    /// Braces currently open across all states
    nesting: usize,
}

impl<'a, 's> AseParser<'a, 's> {
    /// Create a parser. `name` is only used in diagnostics.
    pub fn new(
        data: &'a [u8],
        name: &'a str,
        config: ParserConfig,
        sink: &'s mut dyn DiagnosticSink,
    ) -> Self {
        Self {
            cursor: Cursor::new(data),
            name,
            config,
            sink,
            nesting: 0,
        }
    }

    /// Parse the whole input into a scene.
    pub fn parse(mut self) -> AseResult<Scene> {
        log::debug!("Parsing ASE input {} ({} bytes)", self.name, self.cursor.remaining());

        let mut scene = Scene::new(self.name);
        self.parse_block(Block::Top, |p, keyword| {
            match keyword {
                Keyword::AsciiExport => {
                    let version = p.parse_int();
                    if version != SUPPORTED_FORMAT_VERSION {
                        p.warn(format!(
                            "Unknown file format version {}: *3DSMAX_ASCIIEXPORT should be {}. Continuing anyway",
                            version, SUPPORTED_FORMAT_VERSION
                        ));
                    }
                    scene.format_version = u32::try_from(version).ok();
                }
                Keyword::Scene => {
                    if p.expect_open_brace() {
                        p.parse_scene_block(&mut scene)?;
                    }
                }
                Keyword::MaterialList => {
                    if p.expect_open_brace() {
                        scene.materials = p.parse_material_list()?;
                    }
                }
                Keyword::GeomObject => {
                    let mesh = if p.expect_open_brace() {
                        p.parse_geometry_object()?
                    } else {
                        Mesh::default()
                    };
                    scene.meshes.push(mesh);
                }
                _ => {}
            }
            Ok(())
        })?;

        log::info!(
            "Parsed {} meshes and {} materials from {}",
            scene.mesh_count(),
            scene.material_count(),
            self.name
        );
        Ok(scene)
    }

    // ------------------------------------------------------------------
    // Block dispatch
    // ------------------------------------------------------------------

    /// Run the state loop of `block` until its closing brace.
    ///
    /// The opening brace must already be consumed. `handle` is called with
    /// the cursor just past a marker that `block` accepts.
    pub(super) fn parse_block<F>(&mut self, block: Block, mut handle: F) -> AseResult<()>
    where
        F: FnMut(&mut Self, Keyword) -> AseResult<()>,
    {
        // Braces of this state counted in `nesting`; the top level has none
        let own = usize::from(block != Block::Top);
        if own == 1 {
            self.open_brace()?;
        }
        let mut depth = 1usize;
        loop {
            match self.cursor.peek() {
                None => {
                    self.nesting -= depth - 1 + own;
                    if block.tolerates_eof() {
                        return Ok(());
                    }
                    let line = self.cursor.line();
                    return Err(self.fatal(AseError::UnexpectedEof {
                        line,
                        block: block.to_string(),
                    }));
                }
                Some(b'*') => {
                    if let Some(keyword) = self.match_keyword(block) {
                        handle(self, keyword)?;
                        continue;
                    }
                }
                Some(b'{') => {
                    depth += 1;
                    self.open_brace()?;
                }
                Some(b'}') => {
                    depth -= 1;
                    if depth > 0 || own == 1 {
                        self.nesting -= 1;
                    }
                    if depth == 0 {
                        self.cursor.advance();
                        self.cursor.skip_to_next_token();
                        return Ok(());
                    }
                }
                Some(_) => {}
            }
            self.cursor.advance();
        }
    }

    /// Consume the marker under the cursor if `block` accepts it.
    fn match_keyword(&mut self, block: Block) -> Option<Keyword> {
        let name = self.cursor.marker_name()?;
        let keyword = Keyword::from_name(name).filter(|&k| block.accepts(k))?;
        self.cursor.advance_by(name.len() + 1);
        Some(keyword)
    }

    /// Consume the marker under the cursor if it is exactly `keyword`.
    pub(super) fn eat_marker(&mut self, keyword: Keyword) -> bool {
        match self.cursor.marker_name() {
            Some(name) if Keyword::from_name(name) == Some(keyword) => {
                self.cursor.advance_by(name.len() + 1);
                true
            }
            _ => false,
        }
    }

    /// Consume the opening brace of a child block.
    ///
    /// Warns and returns false when something else comes first; the caller
    /// then does not enter the child state.
    pub(super) fn expect_open_brace(&mut self) -> bool {
        self.cursor.skip_whitespace();
        if self.cursor.peek() != Some(b'{') {
            self.warn("Unable to parse block: unexpected character, '{' expected");
            return false;
        }
        self.cursor.advance();
        self.cursor.skip_to_next_token();
        true
    }

    /// Skip a block whose opening brace was consumed, up to its closing brace.
    pub(super) fn skip_section(&mut self) -> AseResult<()> {
        self.open_brace()?;
        let mut depth = 1usize;
        loop {
            match self.cursor.peek() {
                None => {
                    self.nesting -= depth;
                    self.warn("Unable to skip block: unexpected end of input, '}' expected");
                    return Ok(());
                }
                Some(b'{') => {
                    depth += 1;
                    self.open_brace()?;
                }
                Some(b'}') => {
                    depth -= 1;
                    self.nesting -= 1;
                    if depth == 0 {
                        self.cursor.advance();
                        self.cursor.skip_to_next_token();
                        return Ok(());
                    }
                }
                Some(_) => {}
            }
            self.cursor.advance();
        }
    }

    fn open_brace(&mut self) -> AseResult<()> {
        self.nesting += 1;
        if self.nesting > self.config.max_nesting_depth {
            let line = self.cursor.line();
            return Err(self.fatal(AseError::NestingTooDeep {
                line,
                limit: self.config.max_nesting_depth,
            }));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Diagnostics and scatter writes
    // ------------------------------------------------------------------

    /// Report a warning at the current line. Parsing continues.
    pub(super) fn warn(&mut self, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            severity: Severity::Warning,
            line: self.cursor.line(),
            message: message.into(),
        };
        self.sink.report(self.name, &diagnostic);
    }

    /// Report a fatal error and hand it back for propagation.
    pub(super) fn fatal(&mut self, error: AseError) -> AseError {
        let diagnostic = Diagnostic {
            severity: Severity::Error,
            line: error.line(),
            message: error.detail(),
        };
        self.sink.report(self.name, &diagnostic);
        error
    }

    pub(super) fn syntax_error(&mut self, message: impl Into<String>) -> AseError {
        let line = self.cursor.line();
        self.syntax_error_at(line, message)
    }

    pub(super) fn syntax_error_at(&mut self, line: usize, message: impl Into<String>) -> AseError {
        self.fatal(AseError::Syntax {
            line,
            message: message.into(),
        })
    }

    /// Read a `*_COUNT` style declaration, clamped to the configured limit.
    pub(super) fn parse_count(&mut self, keyword: Keyword) -> usize {
        let declared = self.parse_int();
        let limit = self.config.max_element_count;
        match usize::try_from(declared) {
            Err(_) => {
                self.warn(format!("{} {} is negative, assuming 0", keyword, declared));
                0
            }
            Ok(count) if count > limit => {
                self.warn(format!("{} {} exceeds the limit of {}, clamping", keyword, count, limit));
                limit
            }
            Ok(count) => count,
        }
    }

    /// Validate an index against a presized length.
    ///
    /// Out-of-range indices are reported and yield `None`; the target is
    /// never resized.
    pub(super) fn checked_index(&mut self, index: i64, len: usize, what: &str) -> Option<usize> {
        match usize::try_from(index) {
            Ok(i) if i < len => Some(i),
            _ => {
                self.warn(format!(
                    "{} has an invalid index {} (declared count is {}). It will be ignored",
                    what, index, len
                ));
                None
            }
        }
    }

    /// Write `value` at `index` of a presized list. Returns false if dropped.
    pub(super) fn scatter<T>(&mut self, target: &mut [T], index: i64, value: T, what: &str) -> bool {
        match self.checked_index(index, target.len(), what) {
            Some(i) => {
                target[i] = value;
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Scene and material states
    // ------------------------------------------------------------------

    fn parse_scene_block(&mut self, scene: &mut Scene) -> AseResult<()> {
        self.parse_block(Block::Scene, |p, keyword| {
            match keyword {
                Keyword::SceneBackgroundStatic => scene.background = Some(p.parse_float_triple()),
                Keyword::SceneAmbientStatic => scene.ambient = Some(p.parse_float_triple()),
                _ => {}
            }
            Ok(())
        })
    }

    fn parse_material_list(&mut self) -> AseResult<Vec<Material>> {
        let mut materials = Vec::new();
        self.parse_block(Block::MaterialList, |p, keyword| {
            match keyword {
                Keyword::MaterialCount => {
                    let count = p.parse_count(keyword);
                    presize(&mut materials, count);
                }
                Keyword::Material => {
                    let index = p.parse_int();
                    let slot = p.checked_index(index, materials.len(), "Material");
                    if p.expect_open_brace() {
                        let material = p.parse_material(0)?;
                        if let Some(slot) = slot {
                            materials[slot] = material;
                        }
                    }
                }
                _ => {}
            }
            Ok(())
        })?;
        Ok(materials)
    }

    /// Parse a material body. `level` is 0 for `*MATERIAL`, 1 for `*SUBMATERIAL`.
    fn parse_material(&mut self, level: usize) -> AseResult<Material> {
        let mut material = Material::default();
        self.parse_block(Block::Material, |p, keyword| {
            if let Some(slot) = texture_slot(keyword) {
                if p.expect_open_brace() {
                    p.parse_texture_map(material.texture_mut(slot))?;
                }
                return Ok(());
            }

            match keyword {
                Keyword::MaterialName => material.name = p.parse_name()?,
                Keyword::MaterialAmbient => material.ambient = p.parse_float_triple(),
                Keyword::MaterialDiffuse => material.diffuse = p.parse_float_triple(),
                Keyword::MaterialSpecular => material.specular = p.parse_float_triple(),
                Keyword::MaterialShading => {
                    material.shading = p.parse_enum(SHADING_MODES, ShadingMode::Gouraud);
                }
                Keyword::MaterialTransparency => material.opacity = 1.0 - p.parse_float(),
                Keyword::MaterialSelfIllum => material.emissive = Vec3::splat(p.parse_float()),
                Keyword::MaterialShine => {
                    material.specular_exponent = p.parse_float() * SHININESS_SCALE;
                }
                Keyword::NumSubMaterials => {
                    let count = p.parse_count(keyword);
                    if level < MAX_MATERIAL_LEVEL {
                        presize(&mut material.sub_materials, count);
                    } else {
                        p.warn("Nested submaterials are not supported, *NUMSUBMTLS is ignored");
                    }
                }
                Keyword::SubMaterial => {
                    let index = p.parse_int();
                    if level >= MAX_MATERIAL_LEVEL {
                        p.warn("Nested submaterials are not supported, skipping *SUBMATERIAL");
                        if p.expect_open_brace() {
                            p.skip_section()?;
                        }
                        return Ok(());
                    }
                    let slot = p.checked_index(index, material.sub_materials.len(), "Submaterial");
                    if p.expect_open_brace() {
                        let sub_material = p.parse_material(level + 1)?;
                        if let Some(slot) = slot {
                            material.sub_materials[slot] = sub_material;
                        }
                    }
                }
                _ => {}
            }
            Ok(())
        })?;
        Ok(material)
    }

    /// Parse a `*MAP_*` body into `texture`. Omitted fields keep their value.
    fn parse_texture_map(&mut self, texture: &mut Texture) -> AseResult<()> {
        self.parse_block(Block::TextureMap, |p, keyword| {
            match keyword {
                Keyword::Bitmap => texture.path = p.parse_quoted_string(keyword)?,
                Keyword::UvwUOffset => texture.offset_u = p.parse_float(),
                Keyword::UvwVOffset => texture.offset_v = p.parse_float(),
                Keyword::UvwUTiling => texture.scale_u = p.parse_float(),
                Keyword::UvwVTiling => texture.scale_v = p.parse_float(),
                Keyword::UvwAngle => texture.rotation = p.parse_float(),
                Keyword::MapAmount => texture.blend = p.parse_float(),
                _ => {}
            }
            Ok(())
        })
    }
}

/// Texture slot addressed by a `*MAP_*` marker.
fn texture_slot(keyword: Keyword) -> Option<TextureSlot> {
    match keyword {
        Keyword::MapDiffuse => Some(TextureSlot::Diffuse),
        Keyword::MapAmbient => Some(TextureSlot::Ambient),
        Keyword::MapSpecular => Some(TextureSlot::Specular),
        Keyword::MapOpacity => Some(TextureSlot::Opacity),
        Keyword::MapSelfIllum => Some(TextureSlot::Emissive),
        Keyword::MapBump => Some(TextureSlot::Bump),
        Keyword::MapShine => Some(TextureSlot::Shininess),
        _ => None,
    }
}

/// Size a scatter target to its declared count.
pub(super) fn presize<T: Clone + Default>(target: &mut Vec<T>, count: usize) {
    target.resize(count, T::default());
}

/// Parse an ASE buffer with the default configuration, logging diagnostics.
pub fn parse_ase(data: &[u8], name: &str) -> AseResult<Scene> {
    let mut sink = LogSink;
    parse_ase_with(data, name, &ParserConfig::default(), &mut sink)
}

/// Parse an ASE buffer with an explicit configuration and diagnostics sink.
pub fn parse_ase_with(
    data: &[u8],
    name: &str,
    config: &ParserConfig,
    sink: &mut dyn DiagnosticSink,
) -> AseResult<Scene> {
    AseParser::new(data, name, config.clone(), sink).parse()
}
