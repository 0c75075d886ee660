use std::collections::BTreeMap;

use hashbrown::HashMap;
use terranav_terrain::TerrainSource;

use crate::builder::BuildStats;
use crate::grid_node::NodeId;
use crate::region::ChunkRegion;

/// Finished partition: every quad id maps to exactly one region.
///
/// Regions are keyed by their seed id and iterate in ascending seed order.
#[derive(Debug, Default)]
pub struct NavMeshIndex {
    grid_width: usize,
    regions: BTreeMap<NodeId, ChunkRegion>,
    owner: HashMap<NodeId, NodeId>,
    stats: BuildStats,
}

impl NavMeshIndex {
    pub(crate) fn new(
        grid_width: usize,
        regions: BTreeMap<NodeId, ChunkRegion>,
        owner: HashMap<NodeId, NodeId>,
        stats: BuildStats,
    ) -> Self {
        Self {
            grid_width,
            regions,
            owner,
            stats,
        }
    }

    /// Region that owns quad `node`.
    pub fn region_for(&self, node: NodeId) -> Option<&ChunkRegion> {
        self.owner.get(&node).and_then(|r| self.regions.get(r))
    }

    pub fn region_id_for(&self, node: NodeId) -> Option<NodeId> {
        self.owner.get(&node).copied()
    }

    /// Region owning the quad at column `x`, row `z`.
    pub fn region_at(&self, x: usize, z: usize) -> Option<&ChunkRegion> {
        if x + 1 >= self.grid_width || z + 1 >= self.grid_width {
            return None;
        }
        self.region_for(x + z * self.grid_width)
    }

    /// Seed id of the region owning the quad at column `x`, row `z`.
    pub fn region_id_at(&self, x: usize, z: usize) -> Option<NodeId> {
        self.region_at(x, z).map(ChunkRegion::id)
    }

    /// Region by seed id.
    pub fn region(&self, id: NodeId) -> Option<&ChunkRegion> {
        self.regions.get(&id)
    }

    pub fn regions(&self) -> impl Iterator<Item = &ChunkRegion> {
        self.regions.values()
    }

    #[inline]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.owner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.owner.is_empty()
    }

    #[inline]
    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    #[inline]
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Re-derives every region's bounding volume from `terrain`.
    pub fn recompute_bounds<T>(&mut self, terrain: &T)
    where
        T: TerrainSource + ?Sized,
    {
        for region in self.regions.values_mut() {
            region.recompute_bounding_volume(terrain);
        }
    }
}
