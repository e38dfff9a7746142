//! ASE (3ds Max ASCII Scene Export) support.
//!
//! Parses the line-oriented `*MARKER value` format written by the 3ds Max
//! ASCII exporter into a [`Scene`](crate::scene::Scene).
//!
//! ## Supported Blocks
//!
//! - `*SCENE`: static ambient and background colors
//! - `*MATERIAL_LIST`: materials, one level of sub-materials, texture maps
//! - `*GEOMOBJECT`: node name, node transform, mesh data
//! - `*MESH`: vertices, faces, texture coordinates (8 channels), vertex
//!   colors, vertex normals
//!
//! ## Not Supported
//!
//! - Lights, cameras and helper objects (their blocks are skipped)
//! - Animation tracks
//! - Writing ASE files
//!
//! Malformed optional values produce warnings through a
//! [`DiagnosticSink`] and parsing continues. Broken required syntax aborts
//! the parse with an [`AseError`].
//!
//! # Example
//!
//! ```ignore
//! use ase_core::ase::parse_ase;
//!
//! let data = std::fs::read("model.ase")?;
//! let scene = parse_ase(&data, "model.ase")?;
//! println!("Loaded {} meshes, {} materials",
//!     scene.mesh_count(),
//!     scene.material_count());
//! ```

mod cursor;
mod diagnostics;
mod error;
mod geometry;
mod keyword;
mod parser;
mod values;

pub use diagnostics::*;
pub use error::*;
pub use parser::{parse_ase, parse_ase_with, AseParser, SHININESS_SCALE, SUPPORTED_FORMAT_VERSION};

#[cfg(test)]
pub(crate) mod test_support {
    use super::{parse_ase_with, AseResult, CollectingSink};
    use crate::config::ParserConfig;
    use crate::scene::Scene;

    /// Parse with the default config, keeping every diagnostic.
    pub fn parse_collecting(input: &str) -> (AseResult<Scene>, CollectingSink) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut sink = CollectingSink::new();
        let result = parse_ase_with(input.as_bytes(), "test.ase", &ParserConfig::default(), &mut sink);
        (result, sink)
    }
}
