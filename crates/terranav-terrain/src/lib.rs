//! Terrain collaborator: vertex grid, per-quad normals, and slope threshold.
#![forbid(unsafe_code)]

pub mod config;
pub mod generation;
pub mod heightfield;
pub mod source;

pub use config::{TerrainGenConfig, TerrainGenParams, TerrainMode};
pub use generation::generate_heightfield;
pub use heightfield::{Heightfield, TerrainError};
pub use source::TerrainSource;
