// src/import/mod.rs
//
// The import boundary for external mesh assets.

pub mod obj;

pub use obj::{load_obj, parse_obj};
