use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use hashbrown::HashMap;
use terranav_terrain::TerrainSource;

use crate::config::NavConfig;
use crate::grid_node::{GridNode, NodeId};
use crate::index::NavMeshIndex;
use crate::region::ChunkRegion;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuildStats {
    pub regions: usize,
    pub nodes: usize,
    pub walkable_nodes: usize,
    /// Single unwalkable seeds.
    pub blocked_regions: usize,
    pub largest_region: usize,
    pub elapsed: Duration,
}

/// One-shot partitioner from terrain quads to rectangular regions.
///
/// Quads are scanned row-major; each quad still in the pool seeds a region,
/// which then alternately tries to claim the next column to its right and the
/// next row below it until neither fits. A grown strip is taken only if every
/// cell in it is unclaimed and walkable. Unwalkable seeds stay single cells.
pub struct ChunkBuilder<'a, T: TerrainSource + ?Sized> {
    terrain: &'a T,
    config: NavConfig,
    width: usize,
    quads: usize,
    pool: HashMap<NodeId, GridNode>,
    owner: HashMap<NodeId, NodeId>,
    regions: BTreeMap<NodeId, ChunkRegion>,
    strip: Vec<NodeId>,
}

impl<'a, T: TerrainSource + ?Sized> ChunkBuilder<'a, T> {
    pub fn new(terrain: &'a T, config: NavConfig) -> Self {
        let width = terrain.grid_width();
        let quads = terrain.quads_per_side();
        Self {
            terrain,
            config,
            width,
            quads,
            pool: HashMap::with_capacity(quads * quads),
            owner: HashMap::with_capacity(quads * quads),
            regions: BTreeMap::new(),
            strip: Vec::new(),
        }
    }

    pub fn build(mut self) -> NavMeshIndex {
        let started = Instant::now();
        self.fill_pool();

        for z in 0..self.quads {
            for x in 0..self.quads {
                let id = x + z * self.width;
                if let Some(seed) = self.pool.remove(&id) {
                    self.grow_from(seed);
                }
            }
        }
        debug_assert!(self.pool.is_empty(), "{} quads never claimed", self.pool.len());

        for region in self.regions.values_mut() {
            region.recompute_bounding_volume(self.terrain);
        }

        let stats = self.stats(started.elapsed());
        log::debug!(
            "nav chunks: {} regions over {} quads ({} walkable, {} blocked, largest {}) in {:?}",
            stats.regions,
            stats.nodes,
            stats.walkable_nodes,
            stats.blocked_regions,
            stats.largest_region,
            stats.elapsed
        );
        NavMeshIndex::new(self.width, self.regions, self.owner, stats)
    }

    fn fill_pool(&mut self) {
        let threshold = self.terrain.slope_threshold();
        for z in 0..self.quads {
            for x in 0..self.quads {
                let id = x + z * self.width;
                let mut node = GridNode::new(id, self.width);
                node.set_normal(self.terrain.quad_normal(x, z), threshold);
                self.pool.insert(id, node);
            }
        }
    }

    fn grow_from(&mut self, seed: GridNode) {
        let seed_id = seed.id();
        let walkable = seed.is_walkable();
        let mut region =
            ChunkRegion::from_seed(seed, self.width, self.config.bounds_padding, self.terrain);
        self.owner.insert(seed_id, seed_id);

        if walkable {
            loop {
                let grew_column = self.try_grow_column(&mut region);
                let grew_row = self.try_grow_row(&mut region);
                if !grew_column && !grew_row {
                    break;
                }
            }
        }
        log::trace!(
            "region {} -> {}x{} ({})",
            seed_id,
            region.width(),
            region.height(),
            if walkable { "walkable" } else { "blocked" }
        );
        self.regions.insert(seed_id, region);
    }

    fn try_grow_column(&mut self, region: &mut ChunkRegion) -> bool {
        let column = region.max_column() + 1;
        if column >= self.quads {
            return false;
        }
        let width = self.width;
        self.strip.clear();
        self.strip
            .extend((region.min_row()..=region.max_row()).map(|row| column + row * width));
        self.claim_strip(region)
    }

    fn try_grow_row(&mut self, region: &mut ChunkRegion) -> bool {
        let row = region.max_row() + 1;
        if row >= self.quads {
            return false;
        }
        let width = self.width;
        self.strip.clear();
        self.strip
            .extend((region.min_column()..=region.max_column()).map(|column| column + row * width));
        self.claim_strip(region)
    }

    // All-or-nothing: either every id in the strip moves into the region or none do.
    fn claim_strip(&mut self, region: &mut ChunkRegion) -> bool {
        let fits = self
            .strip
            .iter()
            .all(|id| self.pool.get(id).is_some_and(GridNode::is_walkable));
        if !fits {
            return false;
        }
        for id in self.strip.drain(..) {
            if let Some(node) = self.pool.remove(&id) {
                region.add_node(node, self.terrain, true);
                self.owner.insert(id, region.id());
            }
        }
        true
    }

    fn stats(&self, elapsed: Duration) -> BuildStats {
        let mut stats = BuildStats {
            regions: self.regions.len(),
            nodes: self.owner.len(),
            elapsed,
            ..BuildStats::default()
        };
        for region in self.regions.values() {
            if region.is_walkable() {
                stats.walkable_nodes += region.len();
            } else {
                stats.blocked_regions += 1;
            }
            stats.largest_region = stats.largest_region.max(region.len());
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terranav_geom::Vec3;
    use terranav_terrain::Heightfield;

    fn steep() -> Vec3 {
        Vec3::new(1.0, 0.2, 0.0)
    }

    fn threshold() -> f32 {
        30f32.to_radians()
    }

    fn region_sets(index: &NavMeshIndex) -> Vec<Vec<NodeId>> {
        index.regions().map(|r| r.node_ids().collect()).collect()
    }

    #[test]
    fn flat_two_by_two_is_one_region() {
        let hf = Heightfield::flat(3, 1.0, threshold()).unwrap();
        let index = ChunkBuilder::new(&hf, NavConfig::default()).build();
        assert_eq!(region_sets(&index), vec![vec![0, 1, 3, 4]]);
    }

    #[test]
    fn blocked_cell_splits_the_grid() {
        // Quad (1, 0) is too steep
        let hf = Heightfield::flat(3, 1.0, threshold())
            .unwrap()
            .with_quad_normal(1, 0, steep());
        let index = ChunkBuilder::new(&hf, NavConfig::default()).build();
        // Seed 0 cannot take column 1 (blocked), takes row 1 = {3}, then
        // column 1 over rows 0..=1 fails on id 1 and row 2 is off-grid.
        assert_eq!(region_sets(&index), vec![vec![0, 3], vec![1], vec![4]]);
        assert_eq!(index.region_for(1).map(|r| r.is_walkable()), Some(false));
    }

    #[test]
    fn column_is_preferred_before_row() {
        let hf = Heightfield::flat(4, 1.0, threshold())
            .unwrap()
            .with_quad_normal(0, 1, steep());
        let index = ChunkBuilder::new(&hf, NavConfig::default()).build();
        // Row 0 grows fully right; row 1 is blocked by (0, 1)
        assert_eq!(
            region_sets(&index),
            vec![vec![0, 1, 2], vec![4], vec![5, 6, 9, 10], vec![8]]
        );
    }

    #[test]
    fn unwalkable_seed_stays_single() {
        let mut hf = Heightfield::flat(3, 1.0, threshold()).unwrap();
        for (x, z) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            hf = hf.with_quad_normal(x, z, steep());
        }
        let index = ChunkBuilder::new(&hf, NavConfig::default()).build();
        assert_eq!(index.region_count(), 4);
        assert_eq!(index.stats().blocked_regions, 4);
        assert_eq!(index.stats().walkable_nodes, 0);
    }

    #[test]
    fn stats_summarize_the_partition() {
        let hf = Heightfield::flat(5, 1.0, threshold()).unwrap();
        let index = ChunkBuilder::new(&hf, NavConfig::default()).build();
        let stats = index.stats();
        assert_eq!(stats.regions, 1);
        assert_eq!(stats.nodes, 16);
        assert_eq!(stats.walkable_nodes, 16);
        assert_eq!(stats.largest_region, 16);
    }

    #[test]
    fn single_vertex_grid_yields_empty_index() {
        struct Dot;
        impl TerrainSource for Dot {
            fn grid_width(&self) -> usize {
                1
            }
            fn vertex_position(&self, _: usize) -> Vec3 {
                Vec3::ZERO
            }
            fn quad_normal(&self, _: usize, _: usize) -> Vec3 {
                Vec3::UP
            }
            fn slope_threshold(&self) -> f32 {
                1.0
            }
        }
        let index = ChunkBuilder::new(&Dot, NavConfig::default()).build();
        assert!(index.is_empty());
    }
}
