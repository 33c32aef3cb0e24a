// src/terrain/heightfield.rs

use log::debug;

use crate::error::TerrainError;
use crate::terrain::coords::GridPos;

/// A rectangular field of height samples over the XZ plane.
///
/// The field is centered on the world origin: world X spans
/// `[-width/2, width/2]` and world Z spans `[-length/2, length/2]`. Samples
/// are stored row-major (`index = grid_z * grid_width + grid_x`) in absolute
/// world units and are kept inside `[0, height_scale]` by every mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    pub(crate) width: f32,
    pub(crate) length: f32,
    pub(crate) resolution: f32,
    pub(crate) height_scale: f32,
    pub(crate) grid_width: usize,
    pub(crate) grid_length: usize,
    pub(crate) heights: Vec<f32>,
}

impl HeightField {
    /// Allocates a zero-initialized field. Every dimension must be strictly
    /// positive; nothing is allocated on rejection.
    pub fn new(
        width: f32,
        length: f32,
        resolution: f32,
        height_scale: f32,
    ) -> Result<Self, TerrainError> {
        for (name, value) in [
            ("width", width),
            ("length", length),
            ("resolution", resolution),
            ("height_scale", height_scale),
        ] {
            // `!(v > 0)` also rejects NaN
            if !(value > 0.0) {
                return Err(TerrainError::InvalidParameter { name, value });
            }
        }

        let grid_width = (width * resolution) as usize + 1;
        let grid_length = (length * resolution) as usize + 1;
        debug!(
            "height field created: {width}x{length} at resolution {resolution}, \
             grid {grid_width}x{grid_length}"
        );

        Ok(Self {
            width,
            length,
            resolution,
            height_scale,
            grid_width,
            grid_length,
            heights: vec![0.0; grid_width * grid_length],
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    /// Grid points along the X axis.
    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    /// Grid points along the Z axis.
    pub fn grid_length(&self) -> usize {
        self.grid_length
    }

    /// Raw samples, row-major by grid Z.
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    #[inline]
    pub(crate) fn index(&self, grid_x: usize, grid_z: usize) -> usize {
        grid_z * self.grid_width + grid_x
    }

    #[inline]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0
            && (pos.x as usize) < self.grid_width
            && pos.z >= 0
            && (pos.z as usize) < self.grid_length
    }

    /// Maps a world-space point to grid indices. The result may lie outside
    /// the grid; see [`HeightField::in_bounds`].
    pub fn world_to_grid(&self, world_x: f32, world_z: f32) -> GridPos {
        GridPos {
            x: ((world_x + self.width / 2.0) * self.resolution).floor() as i32,
            z: ((world_z + self.length / 2.0) * self.resolution).floor() as i32,
        }
    }

    /// Inverse mapping: the world-space position of a grid point.
    pub fn grid_to_world(&self, grid_x: usize, grid_z: usize) -> (f32, f32) {
        (
            grid_x as f32 / self.resolution - self.width / 2.0,
            grid_z as f32 / self.resolution - self.length / 2.0,
        )
    }

    /// Height at a world-space point, `0.0` outside the grid (the terrain is
    /// treated as flat beyond its borders).
    pub fn sample(&self, world_x: f32, world_z: f32) -> f32 {
        let pos = self.world_to_grid(world_x, world_z);
        if self.in_bounds(pos) {
            self.heights[self.index(pos.x as usize, pos.z as usize)]
        } else {
            0.0
        }
    }

    /// Height at a grid point, `0.0` outside the grid.
    pub fn get(&self, grid_x: usize, grid_z: usize) -> f32 {
        if grid_x < self.grid_width && grid_z < self.grid_length {
            self.heights[self.index(grid_x, grid_z)]
        } else {
            0.0
        }
    }

    /// Stores a sample, clamped to `[0, height_scale]`. Out-of-bounds
    /// indices are a silent no-op.
    pub fn set(&mut self, grid_x: usize, grid_z: usize, value: f32) {
        if grid_x < self.grid_width && grid_z < self.grid_length {
            let idx = self.index(grid_x, grid_z);
            self.heights[idx] = value.clamp(0.0, self.height_scale);
        }
    }
}
