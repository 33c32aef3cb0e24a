// src/render.rs

use std::collections::HashSet;
use std::path::Path;

use colorgrad::Gradient;
use image::{ImageBuffer, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use log::info;

use crate::error::TerrainError;
use crate::terrain::{HeightField, Mesh};

/// Offline raster views of a height field: a gradient-colored top-down
/// preview, a 16-bit grayscale heightmap, and a wireframe overlay of a
/// built mesh. Presentation only; nothing here feeds back into the grid.
pub struct TerrainVisualizer {
    gradient: Gradient,
}

impl TerrainVisualizer {
    pub fn new() -> Self {
        let gradient = colorgrad::CustomGradient::new()
            .colors(&[
                colorgrad::Color::new(0.0, 0.0, 0.5, 1.0),   // deep water
                colorgrad::Color::new(0.0, 0.0, 1.0, 1.0),   // shallow water
                colorgrad::Color::new(0.9, 0.9, 0.2, 1.0),   // beach
                colorgrad::Color::new(0.0, 0.6, 0.0, 1.0),   // grass
                colorgrad::Color::new(0.5, 0.3, 0.0, 1.0),   // mountain
                colorgrad::Color::new(1.0, 1.0, 1.0, 1.0),   // snow
            ])
            .domain(&[0.0, 0.3, 0.35, 0.4, 0.8, 1.0])
            .build()
            .unwrap();

        Self { gradient }
    }

    /// Top-down color view, `scale` pixels per grid sample, heights
    /// normalized by the field's height scale.
    pub fn color_image(&self, field: &HeightField, scale: u32) -> RgbImage {
        let scale = scale.max(1);
        let width = field.grid_width() as u32 * scale;
        let height = field.grid_length() as u32 * scale;
        ImageBuffer::from_fn(width, height, |px, pz| {
            let grid_x = (px / scale) as usize;
            let grid_z = (pz / scale) as usize;
            let normalized = field.get(grid_x, grid_z) / field.height_scale();
            let color = self.gradient.at(normalized as f64);
            Rgb([
                (color.r * 255.0) as u8,
                (color.g * 255.0) as u8,
                (color.b * 255.0) as u8,
            ])
        })
    }

    /// 16-bit grayscale heightmap, min–max normalized so the full sample
    /// range maps onto `0..=65535`. A flat field renders as black.
    pub fn heightmap_image(&self, field: &HeightField) -> ImageBuffer<Luma<u16>, Vec<u16>> {
        let heights = field.heights();
        let min = heights.iter().copied().fold(f32::INFINITY, f32::min);
        let max = heights.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        // the epsilon keeps a flat field from dividing by zero
        let range = max - min + 1e-6;

        ImageBuffer::from_fn(
            field.grid_width() as u32,
            field.grid_length() as u32,
            |px, pz| {
                let h = field.get(px as usize, pz as usize);
                Luma([(((h - min) / range) * 65535.0) as u16])
            },
        )
    }

    /// The color view with every unique mesh edge drawn over it.
    pub fn wireframe_image(&self, field: &HeightField, mesh: &Mesh, scale: u32) -> RgbImage {
        let scale = scale.max(1);
        let mut img = self.color_image(field, scale);
        let (img_w, img_h) = img.dimensions();

        // top-down projection: world XZ onto the pixel grid
        let project = |i: u32| {
            let v = &mesh.vertices[i as usize];
            let px = (v.x + field.width() / 2.0) * field.resolution() * scale as f32;
            let pz = (v.z + field.length() / 2.0) * field.resolution() * scale as f32;
            (
                px.clamp(0.0, img_w as f32 - 1.0),
                pz.clamp(0.0, img_h as f32 - 1.0),
            )
        };

        let mut edges: HashSet<(u32, u32)> = HashSet::new();
        for tri in &mesh.triangles {
            for &(a, b) in &[(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                edges.insert(if a < b { (a, b) } else { (b, a) });
            }
        }
        for &(a, b) in &edges {
            draw_line_segment_mut(&mut img, project(a), project(b), Rgb([255, 0, 0]));
        }
        img
    }

    pub fn save_color_image<P: AsRef<Path>>(
        &self,
        field: &HeightField,
        scale: u32,
        path: P,
    ) -> Result<(), TerrainError> {
        let path = path.as_ref();
        saved(self.color_image(field, scale).save(path), path)
    }

    pub fn save_heightmap_image<P: AsRef<Path>>(
        &self,
        field: &HeightField,
        path: P,
    ) -> Result<(), TerrainError> {
        let path = path.as_ref();
        saved(self.heightmap_image(field).save(path), path)
    }

    pub fn save_wireframe_image<P: AsRef<Path>>(
        &self,
        field: &HeightField,
        mesh: &Mesh,
        scale: u32,
        path: P,
    ) -> Result<(), TerrainError> {
        let path = path.as_ref();
        saved(self.wireframe_image(field, mesh, scale).save(path), path)
    }
}

impl Default for TerrainVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

fn saved(result: image::ImageResult<()>, path: &Path) -> Result<(), TerrainError> {
    result.map_err(|e| TerrainError::Export {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    info!("saved terrain view to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::MeshBuilder;

    fn field() -> HeightField {
        let mut field = HeightField::new(4.0, 4.0, 1.0, 10.0).unwrap();
        field.set(2, 2, 10.0);
        field.set(1, 1, 2.5);
        field
    }

    #[test]
    fn color_image_covers_the_grid() {
        let img = TerrainVisualizer::new().color_image(&field(), 3);
        assert_eq!(img.dimensions(), (15, 15));
    }

    #[test]
    fn heightmap_image_spans_the_full_range() {
        let img = TerrainVisualizer::new().heightmap_image(&field());
        let values: Vec<u16> = img.pixels().map(|p| p.0[0]).collect();
        assert_eq!(*values.iter().min().unwrap(), 0);
        // the tallest sample lands at (2, 2)
        assert!(img.get_pixel(2, 2).0[0] > 65000);
    }

    #[test]
    fn flat_field_renders_without_panicking() {
        let flat = HeightField::new(4.0, 4.0, 1.0, 10.0).unwrap();
        let img = TerrainVisualizer::new().heightmap_image(&flat);
        assert!(img.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn wireframe_matches_color_dimensions() {
        let field = field();
        let mesh = MeshBuilder::new().build(&field);
        let viz = TerrainVisualizer::new();
        let img = viz.wireframe_image(&field, &mesh, 2);
        assert_eq!(img.dimensions(), viz.color_image(&field, 2).dimensions());
    }
}
