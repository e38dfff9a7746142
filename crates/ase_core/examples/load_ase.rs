//! Example: Load and inspect an ASE file.
//!
//! Run with: cargo run --example load_ase -- path/to/model.ase

use std::env;

use anyhow::{Context, Result};
use ase_core::ase::parse_ase;
use ase_core::TextureSlot;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_ase <path-to-ase-file>");
        println!("\nExample:");
        println!("  cargo run --example load_ase -- assets/model.ase");
        return Ok(());
    }

    let path = &args[1];
    println!("Loading ASE file: {}", path);

    let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path))?;
    let scene = parse_ase(&data, path).with_context(|| format!("Failed to parse {}", path))?;

    println!("\n=== Scene: {} ===", scene.name);
    if let Some(version) = scene.format_version {
        println!("Format version: {}", version);
    }
    println!("Meshes: {}", scene.mesh_count());
    println!("Materials: {}", scene.material_count());
    println!("Total faces: {}", scene.total_face_count());

    println!("\n--- Materials ---");
    for (i, material) in scene.materials.iter().enumerate() {
        println!(
            "  [{}] {} - {:?}, opacity {:.2}, {} sub-materials",
            i,
            material.name,
            material.shading,
            material.opacity,
            material.sub_materials.len()
        );
        let diffuse = material.texture(TextureSlot::Diffuse);
        if diffuse.is_set() {
            println!("       Diffuse map: {}", diffuse.path);
        }
    }

    println!("\n--- Meshes ---");
    for mesh in &scene.meshes {
        let pos = mesh.transform.translation();
        println!(
            "  {} - {} vertices, {} faces, {} UV channels",
            mesh.name,
            mesh.vertex_count(),
            mesh.face_count(),
            mesh.texcoord_channel_count()
        );
        println!("       Pivot: ({:.2}, {:.2}, {:.2})", pos.x, pos.y, pos.z);
        println!("       Has normals: {}", mesh.has_normals());
        if let Some(material) = scene.material_for(mesh) {
            println!("       Material: {}", material.name);
        }
    }

    Ok(())
}
