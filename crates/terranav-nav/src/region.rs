use std::collections::BTreeMap;
use std::sync::OnceLock;

use terranav_geom::Aabb;
use terranav_terrain::TerrainSource;

use crate::grid_node::{GridNode, NodeId};

/// A rectangle of grid nodes plus its world-space bounds.
///
/// While a region is grown through [`ChunkBuilder`](crate::ChunkBuilder) its ids
/// always form a contiguous rectangle whose top-left cell is `min_id` and whose
/// bottom-right cell is `max_id`. Removing nodes can break that shape.
#[derive(Debug)]
pub struct ChunkRegion {
    id: NodeId,
    grid_width: usize,
    padding: f32,
    nodes: BTreeMap<NodeId, GridNode>,
    min_id: Option<NodeId>,
    max_id: Option<NodeId>,
    // Lowest/highest corner height absorbed so far
    y_range: Option<(f32, f32)>,
    bounds: Aabb,
    width: OnceLock<usize>,
    height: OnceLock<usize>,
}

impl ChunkRegion {
    /// Empty region. `id` is the seed node's id; `grid_width` is vertices per side
    /// and must be non-zero, since rows and columns are derived by dividing by it.
    pub fn new(id: NodeId, grid_width: usize, padding: f32) -> Self {
        debug_assert!(grid_width > 0, "region on a zero-width grid");
        Self {
            id,
            grid_width,
            padding,
            nodes: BTreeMap::new(),
            min_id: None,
            max_id: None,
            y_range: None,
            bounds: Aabb::default(),
            width: OnceLock::new(),
            height: OnceLock::new(),
        }
    }

    /// Region holding only `seed`, with bounds left for a later recompute.
    pub fn from_seed<T>(seed: GridNode, grid_width: usize, padding: f32, terrain: &T) -> Self
    where
        T: TerrainSource + ?Sized,
    {
        let mut region = Self::new(seed.id(), grid_width, padding);
        region.add_node(seed, terrain, true);
        region
    }

    /// Inserts `node`. The caller guarantees no region already owns its id.
    ///
    /// When the node extends the region's extremes the bounds are recomputed,
    /// unless `defer_bounds_update` is set.
    pub fn add_node<T>(&mut self, node: GridNode, terrain: &T, defer_bounds_update: bool)
    where
        T: TerrainSource + ?Sized,
    {
        let id = node.id();
        debug_assert!(!self.nodes.contains_key(&id), "node {} added twice", id);

        let mut extended = false;
        if self.min_id.is_none_or(|m| id < m) {
            self.min_id = Some(id);
            extended = true;
        }
        if self.max_id.is_none_or(|m| id > m) {
            self.max_id = Some(id);
            extended = true;
        }
        if extended {
            self.width = OnceLock::new();
            self.height = OnceLock::new();
        }
        extended |= self.absorb_heights(&node, terrain);
        self.nodes.insert(id, node);

        if extended && !defer_bounds_update {
            self.refresh_bounds(terrain);
        }
    }

    /// Removes a node, returning it if it was owned.
    ///
    /// Extremes are re-derived from the remaining ids, so `min_id`/`max_id` stay
    /// the smallest and largest owned ids. Removing an extreme rebuilds the
    /// bounds from the nodes that remain; removing an inner node leaves them as
    /// they were, which still covers every remaining corner.
    pub fn remove_node<T>(&mut self, id: NodeId, terrain: &T) -> Option<GridNode>
    where
        T: TerrainSource + ?Sized,
    {
        let node = self.nodes.remove(&id)?;
        if self.min_id == Some(id) || self.max_id == Some(id) {
            self.min_id = self.nodes.keys().next().copied();
            self.max_id = self.nodes.keys().next_back().copied();
            self.width = OnceLock::new();
            self.height = OnceLock::new();
            self.recompute_bounding_volume(terrain);
        }
        Some(node)
    }

    /// Spans the top-left corner of `min_id` to the bottom-right corner of
    /// `max_id`, widened vertically to every owned corner height plus padding.
    ///
    /// Heights are re-read from `terrain` for every owned node, so this is
    /// O(n) and also valid after the terrain under the region has changed.
    pub fn recompute_bounding_volume<T>(&mut self, terrain: &T)
    where
        T: TerrainSource + ?Sized,
    {
        self.y_range = self
            .nodes
            .values()
            .map(|node| corner_heights(node, terrain))
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)));
        self.refresh_bounds(terrain);
    }

    // O(1): trusts the cached height range.
    fn refresh_bounds<T>(&mut self, terrain: &T)
    where
        T: TerrainSource + ?Sized,
    {
        let (Some(min_id), Some(max_id)) = (self.min_id, self.max_id) else {
            self.bounds = Aabb::default();
            return;
        };
        let top_left = terrain.vertex_position(min_id);
        let bottom_right = terrain.vertex_position(max_id + self.grid_width + 1);
        let mut bb = Aabb::from_corners(top_left, bottom_right);
        if let Some((lo, hi)) = self.y_range {
            bb.min.y = bb.min.y.min(lo);
            bb.max.y = bb.max.y.max(hi);
        }
        self.bounds = bb.expanded_y(self.padding);
    }

    fn absorb_heights<T>(&mut self, node: &GridNode, terrain: &T) -> bool
    where
        T: TerrainSource + ?Sized,
    {
        let (lo, hi) = corner_heights(node, terrain);
        match self.y_range {
            Some((cur_lo, cur_hi)) if lo >= cur_lo && hi <= cur_hi => false,
            Some((cur_lo, cur_hi)) => {
                self.y_range = Some((cur_lo.min(lo), cur_hi.max(hi)));
                true
            }
            None => {
                self.y_range = Some((lo, hi));
                true
            }
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    #[inline]
    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    #[inline]
    pub fn min_id(&self) -> Option<NodeId> {
        self.min_id
    }

    #[inline]
    pub fn max_id(&self) -> Option<NodeId> {
        self.max_id
    }

    pub fn min_row(&self) -> usize {
        self.min_id.map_or(0, |id| id / self.grid_width)
    }

    pub fn max_row(&self) -> usize {
        self.max_id.map_or(0, |id| id / self.grid_width)
    }

    pub fn min_column(&self) -> usize {
        self.min_id.map_or(0, |id| id % self.grid_width)
    }

    pub fn max_column(&self) -> usize {
        self.max_id.map_or(0, |id| id % self.grid_width)
    }

    /// Columns spanned.
    pub fn width(&self) -> usize {
        *self
            .width
            .get_or_init(|| (self.max_column() - self.min_column()) + 1)
    }

    /// Rows spanned.
    pub fn height(&self) -> usize {
        *self
            .height
            .get_or_init(|| (self.max_row() - self.min_row()) + 1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&GridNode> {
        self.nodes.get(&id)
    }

    /// Owned ids, ascending.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GridNode> {
        self.nodes.values()
    }

    pub fn is_walkable(&self) -> bool {
        self.nodes.values().all(GridNode::is_walkable)
    }
}

/// Lowest and highest of a node's four corner heights.
fn corner_heights<T>(node: &GridNode, terrain: &T) -> (f32, f32)
where
    T: TerrainSource + ?Sized,
{
    node.corners()
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &c| {
            let y = terrain.vertex_position(c).y;
            (lo.min(y), hi.max(y))
        })
}
