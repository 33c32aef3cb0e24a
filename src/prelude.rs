// src/prelude.rs
//! A convenient prelude re-exporting the common terrain types.

pub use crate::error::TerrainError;
pub use crate::export::{load_terrain, save_terrain, TerrainSnapshot};
pub use crate::import::{load_obj, parse_obj};
pub use crate::render::TerrainVisualizer;
pub use crate::shapes::{Collider, PrimitiveShape};
pub use crate::terrain::{
    HeightField, Mesh, MeshBuilder, NoiseGenerator, StructureRecord, Terrain,
};
