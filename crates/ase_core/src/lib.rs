//! ASE Core - Scene model and 3ds Max ASCII export (ASE) parsing.
//!
//! This crate provides:
//!
//! - **Scene model**: `Scene`, `Material`, `Texture`, `Mesh`, `Face`
//! - **ASE support**: a tolerant, single-pass parser with line-tagged diagnostics
//!
//! # Example
//!
//! ```ignore
//! use ase_core::ase::parse_ase;
//!
//! let data = std::fs::read("scene.ase")?;
//! let scene = parse_ase(&data, "scene.ase")?;
//! for mesh in &scene.meshes {
//!     println!("{}: {} faces", mesh.name, mesh.face_count());
//! }
//! ```

pub mod ase;
pub mod config;
pub mod mesh;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use ase::{parse_ase, parse_ase_with, AseError, AseResult, DiagnosticSink};
pub use config::ParserConfig;
pub use mesh::{Face, Mesh, MAX_TEXCOORD_CHANNELS};
pub use scene::{Material, Scene, ShadingMode};
pub use texture::{Texture, TextureSlot};
