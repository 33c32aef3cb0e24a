// src/terrain/brush.rs
//
// Radial, falloff-weighted sculpting over a height field. All brushes take
// world-space centers but weight their effect by distance in *grid* space,
// so the effective footprint scales with the field's resolution.

use crate::terrain::heightfield::HeightField;

impl HeightField {
    /// Raises terrain around `(x, z)` with a linear falloff, strongest at
    /// the center. `strength` is expected in `[0, 1]`; each stroke moves a
    /// sample by at most `strength * 0.1`, sized for repeated interactive
    /// application.
    pub fn raise(&mut self, x: f32, z: f32, radius: f32, strength: f32) {
        self.displace(x, z, radius, strength, 1.0);
    }

    /// Mirror of [`HeightField::raise`], pushing terrain down.
    pub fn lower(&mut self, x: f32, z: f32, radius: f32, strength: f32) {
        self.displace(x, z, radius, strength, -1.0);
    }

    fn displace(&mut self, x: f32, z: f32, radius: f32, strength: f32, sign: f32) {
        let center = self.world_to_grid(x, z);
        let grid_radius = (radius * self.resolution) as i32;
        if grid_radius <= 0 {
            return;
        }

        let min_x = (center.x - grid_radius).max(0);
        let max_x = (center.x + grid_radius).min(self.grid_width as i32 - 1);
        let min_z = (center.z - grid_radius).max(0);
        let max_z = (center.z + grid_radius).min(self.grid_length as i32 - 1);

        let adjusted = strength * 0.1;
        for grid_z in min_z..=max_z {
            for grid_x in min_x..=max_x {
                let dx = (grid_x - center.x) as f32;
                let dz = (grid_z - center.z) as f32;
                let distance = (dx * dx + dz * dz).sqrt();
                if distance > grid_radius as f32 {
                    continue;
                }

                let falloff = 1.0 - distance / grid_radius as f32;
                let effect = adjusted * falloff;
                let idx = self.index(grid_x as usize, grid_z as usize);
                self.heights[idx] =
                    (self.heights[idx] + sign * effect).clamp(0.0, self.height_scale);
            }
        }
    }

    /// Blends each affected sample toward the mean of its 8 grid neighbors.
    ///
    /// Neighbor means are read from a snapshot of the pre-stroke grid, so
    /// traversal order cannot bias the result. Samples within one cell of
    /// the border are left untouched (their neighborhood would leave the
    /// grid).
    pub fn smooth(&mut self, x: f32, z: f32, radius: f32, strength: f32) {
        let center = self.world_to_grid(x, z);
        let grid_radius = (radius * self.resolution) as i32;
        if grid_radius <= 0 {
            return;
        }

        let min_x = (center.x - grid_radius).max(1);
        let max_x = (center.x + grid_radius).min(self.grid_width as i32 - 2);
        let min_z = (center.z - grid_radius).max(1);
        let max_z = (center.z + grid_radius).min(self.grid_length as i32 - 2);

        let snapshot = self.heights.clone();
        for grid_z in min_z..=max_z {
            for grid_x in min_x..=max_x {
                let dx = (grid_x - center.x) as f32;
                let dz = (grid_z - center.z) as f32;
                let distance = (dx * dx + dz * dz).sqrt();
                if distance > grid_radius as f32 {
                    continue;
                }

                let gx = grid_x as usize;
                let gz = grid_z as usize;
                let mut sum = 0.0;
                for nz in gz - 1..=gz + 1 {
                    for nx in gx - 1..=gx + 1 {
                        if nx == gx && nz == gz {
                            continue;
                        }
                        sum += snapshot[nz * self.grid_width + nx];
                    }
                }
                let mean = sum / 8.0;

                let falloff = 1.0 - distance / grid_radius as f32;
                let effect = strength * falloff;
                let idx = self.index(gx, gz);
                // blend of in-range values, stays in range by construction
                self.heights[idx] = self.heights[idx] * (1.0 - effect) + mean * effect;
            }
        }
    }

    /// Pulls the area around `(x, z)` toward the height of the exact center
    /// cell, read once before any mutation. Intensity is purely
    /// distance-driven (quadratic falloff); there is no strength parameter.
    /// A center outside the grid makes the stroke a no-op.
    pub fn flatten(&mut self, x: f32, z: f32, radius: f32) {
        let center = self.world_to_grid(x, z);
        if !self.in_bounds(center) {
            return;
        }
        let grid_radius = (radius * self.resolution) as i32;
        if grid_radius <= 0 {
            return;
        }

        let target = self.heights[self.index(center.x as usize, center.z as usize)];

        let min_x = (center.x - grid_radius).max(0);
        let max_x = (center.x + grid_radius).min(self.grid_width as i32 - 1);
        let min_z = (center.z - grid_radius).max(0);
        let max_z = (center.z + grid_radius).min(self.grid_length as i32 - 1);

        for grid_z in min_z..=max_z {
            for grid_x in min_x..=max_x {
                let dx = (grid_x - center.x) as f32;
                let dz = (grid_z - center.z) as f32;
                let distance = (dx * dx + dz * dz).sqrt();
                if distance > grid_radius as f32 {
                    continue;
                }

                let ratio = distance / grid_radius as f32;
                let falloff = 1.0 - ratio * ratio;
                let idx = self.index(grid_x as usize, grid_z as usize);
                self.heights[idx] = self.heights[idx] * (1.0 - falloff) + target * falloff;
            }
        }
    }
}
