// src/terrain/generator.rs

use noise::{NoiseFn, Perlin};

use crate::terrain::heightfield::HeightField;

/// Deterministic fractal-noise fill, used to seed a field with a starting
/// relief instead of a flat plane. Same seed, same field, same heights.
pub struct NoiseGenerator {
    noise: Perlin,
    base_frequency: f64,
    octaves: usize,
    persistence: f64,
    lacunarity: f64,
}

impl NoiseGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
            base_frequency: 0.05,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }

    /// Overwrites every sample with octave noise scaled into the field's
    /// `[0, height_scale]` range.
    pub fn fill(&self, field: &mut HeightField) {
        let height_scale = field.height_scale();
        for grid_z in 0..field.grid_length() {
            for grid_x in 0..field.grid_width() {
                let (world_x, world_z) = field.grid_to_world(grid_x, grid_z);
                let normalized = self.sample_height(world_x as f64, world_z as f64);
                field.set(grid_x, grid_z, (normalized * 0.5 + 0.5) * height_scale);
            }
        }
    }

    fn sample_height(&self, x: f64, z: f64) -> f32 {
        let mut amplitude = 1.0;
        let mut frequency = self.base_frequency;
        let mut noise_height = 0.0;
        let mut max_value = 0.0;

        for _ in 0..self.octaves {
            let sample_x = x * frequency;
            let sample_z = z * frequency;

            let perlin_value = self.noise.get([sample_x, sample_z]);
            noise_height += perlin_value * amplitude;

            max_value += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        (noise_height / max_value) as f32
    }
}
