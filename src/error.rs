// src/error.rs

use thiserror::Error;

/// Hard failures surfaced to the caller.
///
/// Soft conditions (a brush stroke centered off the grid, a zero-length
/// ramp) are absorbed as no-ops at the call site and never construct one
/// of these.
#[derive(Debug, Clone, Error)]
pub enum TerrainError {
    /// A constructor argument that must be positive was not.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    /// A mesh or terrain file could not be read or understood. No partial
    /// state is committed when this is returned.
    #[error("import failed: {reason}")]
    Import { reason: String },

    /// Writing a snapshot or raster view failed. The in-memory terrain is
    /// unaffected.
    #[error("export to {path} failed: {reason}")]
    Export { path: String, reason: String },
}
