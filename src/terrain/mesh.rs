// src/terrain/mesh.rs

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::terrain::coords::Vec3;
use crate::terrain::heightfield::HeightField;

/// An indexed triangle mesh. Terrain meshes are a transient view derived
/// from a height field; imported and generated prop meshes use the same
/// container so they can share the export boundary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<[f32; 2]>,
}

impl Mesh {
    /// Axis-aligned bounds, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        let mut min = first;
        let mut max = first;
        for v in &self.vertices[1..] {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }
        Some((min, max))
    }

    /// Recomputes per-vertex normals by accumulating area-weighted face
    /// normals. Used for meshes whose source carries no normal channel.
    pub fn recompute_normals(&mut self) {
        let mut accumulated = vec![Vector3::zeros(); self.vertices.len()];
        for tri in &self.triangles {
            let [a, b, c] = tri.map(|i| i as usize);
            let pa = self.vertices[a].to_vector();
            let pb = self.vertices[b].to_vector();
            let pc = self.vertices[c].to_vector();
            // cross product length carries the face area weighting
            let face = (pb - pa).cross(&(pc - pa));
            accumulated[a] += face;
            accumulated[b] += face;
            accumulated[c] += face;
        }
        self.normals = accumulated
            .into_iter()
            .map(|n| {
                if n.norm() < 1e-8 {
                    Vec3::new(0.0, 1.0, 0.0)
                } else {
                    let n = n.normalize();
                    Vec3::new(n.x, n.y, n.z)
                }
            })
            .collect();
    }
}

/// Derives an indexed triangle mesh from a height field.
///
/// Stateless; callers rebuild after mutations whenever a fresh mesh is
/// needed, nothing is cached here.
pub struct MeshBuilder;

impl MeshBuilder {
    pub fn new() -> Self {
        Self
    }

    /// One vertex per grid cell in row-major order
    /// (`index = grid_z * grid_width + grid_x`), two triangles per interior
    /// quad with a fixed diagonal: `(v0, v1, v3)` then `(v0, v3, v2)`.
    ///
    /// Samples are stored in absolute world units, so the builder applies no
    /// further `height_scale` factor.
    pub fn build(&self, field: &HeightField) -> Mesh {
        let grid_width = field.grid_width();
        let grid_length = field.grid_length();
        let cell = 1.0 / field.resolution();

        let mut vertices = Vec::with_capacity(grid_width * grid_length);
        let mut normals = Vec::with_capacity(grid_width * grid_length);
        let mut uvs = Vec::with_capacity(grid_width * grid_length);
        for grid_z in 0..grid_length {
            for grid_x in 0..grid_width {
                let (world_x, world_z) = field.grid_to_world(grid_x, grid_z);
                vertices.push(Vec3::new(world_x, field.get(grid_x, grid_z), world_z));

                // central difference of the neighboring samples, clamped at
                // the borders
                let left = field.get(grid_x.saturating_sub(1), grid_z);
                let right = field.get((grid_x + 1).min(grid_width - 1), grid_z);
                let near = field.get(grid_x, grid_z.saturating_sub(1));
                let far = field.get(grid_x, (grid_z + 1).min(grid_length - 1));
                let normal = Vector3::new(left - right, 2.0 * cell, near - far).normalize();
                normals.push(Vec3::new(normal.x, normal.y, normal.z));

                uvs.push([
                    grid_x as f32 / (grid_width - 1).max(1) as f32,
                    grid_z as f32 / (grid_length - 1).max(1) as f32,
                ]);
            }
        }

        let mut triangles = Vec::with_capacity(2 * (grid_width - 1) * (grid_length - 1));
        for row in 0..grid_length - 1 {
            for col in 0..grid_width - 1 {
                let v0 = (row * grid_width + col) as u32;
                let v1 = v0 + 1;
                let v2 = ((row + 1) * grid_width + col) as u32;
                let v3 = v2 + 1;
                triangles.push([v0, v1, v3]);
                triangles.push([v0, v3, v2]);
            }
        }

        Mesh {
            vertices,
            triangles,
            normals,
            uvs,
        }
    }
}
