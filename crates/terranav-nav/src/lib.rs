//! Walkable-chunk partitioning of terrain heightfields.
//!
//! A heightfield's quads become [`GridNode`]s, which [`ChunkBuilder`] groups into
//! axis-aligned rectangular [`ChunkRegion`]s. The finished [`NavMeshIndex`] maps
//! every quad id to the region that owns it.
#![forbid(unsafe_code)]

pub mod builder;
pub mod config;
pub mod generator;
pub mod grid_node;
pub mod index;
pub mod overlay;
pub mod region;

pub use builder::{BuildStats, ChunkBuilder};
pub use config::NavConfig;
pub use generator::{NavError, NavMeshGenerator};
pub use grid_node::{GridNode, NodeId};
pub use index::NavMeshIndex;
pub use overlay::{BoundsOverlay, DebugBox};
pub use region::ChunkRegion;
