// src/export/mod.rs
//
// The export boundary: a pull-based, read-only snapshot of terrain state in
// the wire shape consumed by downstream engine importers.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::TerrainError;
use crate::terrain::{HeightField, StructureRecord, Terrain};

/// A self-contained serialization of terrain state.
///
/// `heightmap` is indexed `heightmap[grid_x][grid_z]` and carries absolute
/// height values; consumers normalize by `height_scale` when resampling into
/// their native terrain resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainSnapshot {
    pub width: f32,
    pub length: f32,
    pub height_scale: f32,
    pub resolution: f32,
    pub heightmap: Vec<Vec<f32>>,
    pub terrain_objects: Vec<StructureRecord>,
}

impl Terrain {
    /// Pure, side-effect-free read of the current state.
    pub fn to_snapshot(&self) -> TerrainSnapshot {
        let field = &self.field;
        let heightmap = (0..field.grid_width())
            .map(|grid_x| {
                (0..field.grid_length())
                    .map(|grid_z| field.get(grid_x, grid_z))
                    .collect()
            })
            .collect();

        TerrainSnapshot {
            width: field.width(),
            length: field.length(),
            height_scale: field.height_scale(),
            resolution: field.resolution(),
            heightmap,
            terrain_objects: self.structures().to_vec(),
        }
    }

    /// Rebuilds a terrain from a snapshot, validating that the heightmap's
    /// dimensions match the grid derived from the stated extents. Samples
    /// are re-clamped on load so the height invariant survives hostile
    /// input. Nothing is committed on failure.
    pub fn from_snapshot(snapshot: &TerrainSnapshot) -> Result<Self, TerrainError> {
        let mut field = HeightField::new(
            snapshot.width,
            snapshot.length,
            snapshot.resolution,
            snapshot.height_scale,
        )
        .map_err(|e| TerrainError::Import {
            reason: e.to_string(),
        })?;

        if snapshot.heightmap.len() != field.grid_width() {
            return Err(TerrainError::Import {
                reason: format!(
                    "heightmap has {} columns, expected {}",
                    snapshot.heightmap.len(),
                    field.grid_width()
                ),
            });
        }
        for (grid_x, column) in snapshot.heightmap.iter().enumerate() {
            if column.len() != field.grid_length() {
                return Err(TerrainError::Import {
                    reason: format!(
                        "heightmap column {} has {} rows, expected {}",
                        grid_x,
                        column.len(),
                        field.grid_length()
                    ),
                });
            }
            for (grid_z, &height) in column.iter().enumerate() {
                field.set(grid_x, grid_z, height);
            }
        }

        Ok(Terrain::from_parts(field, snapshot.terrain_objects.clone()))
    }
}

/// Writes the terrain's snapshot as JSON. The in-memory terrain is never
/// touched by a failed export.
pub fn save_terrain<P: AsRef<Path>>(path: P, terrain: &Terrain) -> Result<(), TerrainError> {
    let path = path.as_ref();
    let snapshot = terrain.to_snapshot();
    let export_err = |reason: String| TerrainError::Export {
        path: path.display().to_string(),
        reason,
    };

    let file = File::create(path).map_err(|e| export_err(e.to_string()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &snapshot)
        .map_err(|e| export_err(e.to_string()))?;
    info!("exported terrain snapshot to {}", path.display());
    Ok(())
}

/// Reads a JSON snapshot back into a terrain.
pub fn load_terrain<P: AsRef<Path>>(path: P) -> Result<Terrain, TerrainError> {
    let path = path.as_ref();
    let import_err = |reason: String| TerrainError::Import {
        reason: format!("{}: {}", path.display(), reason),
    };

    let file = File::open(path).map_err(|e| import_err(e.to_string()))?;
    let snapshot: TerrainSnapshot =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| import_err(e.to_string()))?;
    let terrain = Terrain::from_snapshot(&snapshot)?;
    info!("loaded terrain snapshot from {}", path.display());
    Ok(terrain)
}
