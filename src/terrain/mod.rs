pub mod coords;
pub mod generator;
pub mod heightfield;
pub mod mesh;
pub mod structure;

mod brush;

pub use coords::{GridPos, Vec3};
pub use generator::NoiseGenerator;
pub use heightfield::HeightField;
pub use mesh::{Mesh, MeshBuilder};
pub use structure::{StructureRecord, Terrain};

#[cfg(test)]
mod tests;
