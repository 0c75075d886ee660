use terranav_geom::Vec3;

/// Read-only view of a sampled terrain grid.
///
/// The grid is `W x W` vertices (`W = grid_width()`), addressed by
/// `vertex_id = x + z * W`. Quads sit between vertices, so quad coordinates run
/// over `0..=W-2` on both axes and a quad's id is the id of its top-left vertex.
pub trait TerrainSource {
    /// Vertices per side.
    fn grid_width(&self) -> usize;

    fn vertex_position(&self, vertex_id: usize) -> Vec3;

    /// Surface normal of the quad whose top-left vertex is `(x, z)`.
    fn quad_normal(&self, x: usize, z: usize) -> Vec3;

    /// Maximum walkable steepness, in radians.
    fn slope_threshold(&self) -> f32;

    /// False until the grid has been produced.
    fn is_ready(&self) -> bool {
        true
    }

    #[inline]
    fn quads_per_side(&self) -> usize {
        self.grid_width().saturating_sub(1)
    }
}
