// src/terrain/coords.rs

use serde::{Deserialize, Serialize};

/// A 3D point or direction, shared by meshes, colliders, and snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub(crate) fn to_vector(self) -> nalgebra::Vector3<f32> {
        nalgebra::Vector3::new(self.x, self.y, self.z)
    }
}

/// Grid indices on the XZ plane.
///
/// Signed so a brush center projected from world space may fall outside the
/// grid before the affected range is clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridPos {
    pub x: i32,
    pub z: i32,
}

impl GridPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}
