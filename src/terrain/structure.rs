// src/terrain/structure.rs

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::TerrainError;
use crate::shapes::Collider;
use crate::terrain::heightfield::HeightField;
use crate::terrain::mesh::MeshBuilder;

/// Provenance for a placed structure, retained so downstream importers can
/// rebuild ramps and platforms as discrete scene objects instead of only
/// baked heights. Records are append-only and never recomputed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StructureRecord {
    Platform {
        /// `[x, height, z]` of the platform center.
        center: [f32; 3],
        width: f32,
        length: f32,
    },
    Ramp {
        /// `[x, start_height, z]` of the ramp start.
        start: [f32; 3],
        /// `[x, end_height, z]` of the ramp end.
        end: [f32; 3],
        width: f32,
    },
}

/// A height field plus the ordered provenance of every placed structure.
#[derive(Clone, Debug)]
pub struct Terrain {
    pub field: HeightField,
    structures: Vec<StructureRecord>,
}

impl Terrain {
    pub fn new(
        width: f32,
        length: f32,
        resolution: f32,
        height_scale: f32,
    ) -> Result<Self, TerrainError> {
        Ok(Self::from_field(HeightField::new(
            width,
            length,
            resolution,
            height_scale,
        )?))
    }

    pub fn from_field(field: HeightField) -> Self {
        Self {
            field,
            structures: Vec::new(),
        }
    }

    pub(crate) fn from_parts(field: HeightField, structures: Vec<StructureRecord>) -> Self {
        Self { field, structures }
    }

    pub fn structures(&self) -> &[StructureRecord] {
        &self.structures
    }

    /// Blends a sloped ramp into the field along the segment from
    /// `(start_x, start_z)` to `(end_x, end_z)`, interpolating from
    /// `start_height` to `end_height`. Cells beyond the segment ends or
    /// farther than `width / 2` from the centerline are untouched; inside,
    /// a quadratic fade keeps the edges blended into the existing terrain.
    ///
    /// A zero-length segment or non-positive width is a no-op, as is a
    /// footprint that misses the grid entirely.
    #[allow(clippy::too_many_arguments)]
    pub fn add_ramp(
        &mut self,
        start_x: f32,
        start_z: f32,
        end_x: f32,
        end_z: f32,
        width: f32,
        start_height: f32,
        end_height: f32,
    ) {
        let delta = Vector2::new(end_x - start_x, end_z - start_z);
        let length = delta.norm();
        let half_width = width / 2.0;
        if length == 0.0 || !(half_width > 0.0) {
            return;
        }
        let dir = delta / length;

        let lo = self.field.world_to_grid(
            start_x.min(end_x) - half_width,
            start_z.min(end_z) - half_width,
        );
        let hi = self.field.world_to_grid(
            start_x.max(end_x) + half_width,
            start_z.max(end_z) + half_width,
        );
        let min_x = lo.x.max(0);
        let max_x = hi.x.min(self.field.grid_width as i32 - 1);
        let min_z = lo.z.max(0);
        let max_z = hi.z.min(self.field.grid_length as i32 - 1);
        if min_x > max_x || min_z > max_z {
            return;
        }

        let start = Vector2::new(start_x, start_z);
        let height_scale = self.field.height_scale;
        for grid_z in min_z..=max_z {
            for grid_x in min_x..=max_x {
                let (world_x, world_z) = self.field.grid_to_world(grid_x as usize, grid_z as usize);
                let point = Vector2::new(world_x, world_z);

                // project onto the segment; no end-cap extension
                let t = (point - start).dot(&dir) / length;
                if !(0.0..=1.0).contains(&t) {
                    continue;
                }
                let projected = start + delta * t;
                let distance = (point - projected).norm();
                if distance > half_width {
                    continue;
                }

                let ratio = distance / half_width;
                let weight = 1.0 - ratio * ratio;
                let target = start_height * (1.0 - t) + end_height * t;

                let idx = self.field.index(grid_x as usize, grid_z as usize);
                let old = self.field.heights[idx];
                self.field.heights[idx] =
                    (old * (1.0 - weight) + target * weight).clamp(0.0, height_scale);
            }
        }

        self.structures.push(StructureRecord::Ramp {
            start: [start_x, start_height, start_z],
            end: [end_x, end_height, end_z],
            width,
        });
    }

    /// Blends a flat platform of the given `height` into the field over an
    /// axis-aligned `width` × `length` rectangle centered on
    /// `(center_x, center_z)`. A fast linear fade confined to roughly the
    /// outer fifth of each half-extent softens the rim; platforms only ever
    /// raise terrain, never lower it.
    pub fn add_platform(&mut self, center_x: f32, center_z: f32, width: f32, length: f32, height: f32) {
        let half_width = width / 2.0;
        let half_length = length / 2.0;
        if !(half_width > 0.0) || !(half_length > 0.0) {
            return;
        }

        let lo = self
            .field
            .world_to_grid(center_x - half_width, center_z - half_length);
        let hi = self
            .field
            .world_to_grid(center_x + half_width, center_z + half_length);
        let min_x = lo.x.max(0);
        let max_x = hi.x.min(self.field.grid_width as i32 - 1);
        let min_z = lo.z.max(0);
        let max_z = hi.z.min(self.field.grid_length as i32 - 1);
        if min_x > max_x || min_z > max_z {
            return;
        }

        let height_scale = self.field.height_scale;
        for grid_z in min_z..=max_z {
            for grid_x in min_x..=max_x {
                let (world_x, world_z) = self.field.grid_to_world(grid_x as usize, grid_z as usize);
                let dx = (world_x - center_x).abs() / half_width;
                let dz = (world_z - center_z).abs() / half_length;
                if dx > 1.0 || dz > 1.0 {
                    continue;
                }

                let edge_factor =
                    ((1.0 - dx) * 5.0).min(1.0) * ((1.0 - dz) * 5.0).min(1.0);
                let idx = self.field.index(grid_x as usize, grid_z as usize);
                let old = self.field.heights[idx];
                let blended = old * (1.0 - edge_factor) + height * edge_factor;
                self.field.heights[idx] = old.max(blended).clamp(0.0, height_scale);
            }
        }

        self.structures.push(StructureRecord::Platform {
            center: [center_x, height, center_z],
            width,
            length,
        });
    }

    /// Full mesh collider for the current terrain surface.
    pub fn generate_collider(&self) -> Collider {
        let mesh = MeshBuilder::new().build(&self.field);
        Collider::Mesh {
            convex: false,
            vertices: mesh.vertices,
            triangles: mesh.triangles,
        }
    }
}
