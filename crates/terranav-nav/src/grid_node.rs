use terranav_geom::Vec3;

/// Quad id, equal to the vertex id of the quad's top-left corner (`x + z * W`).
pub type NodeId = usize;

/// One terrain quad and its walkability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridNode {
    id: NodeId,
    corners: [NodeId; 4],
    x: usize,
    z: usize,
    normal: Vec3,
    steepness: f32,
    walkable: bool,
}

impl GridNode {
    /// Corner order: top-left, top-right, bottom-left, bottom-right.
    ///
    /// The node starts without a normal and is unwalkable until
    /// [`set_normal`](Self::set_normal) runs. `width` must be non-zero.
    pub fn new(top_left: NodeId, width: usize) -> Self {
        debug_assert!(width > 0, "grid node on a zero-width grid");
        Self {
            id: top_left,
            corners: [
                top_left,
                top_left + 1,
                top_left + width,
                top_left + width + 1,
            ],
            x: top_left % width,
            z: top_left / width,
            normal: Vec3::ZERO,
            steepness: std::f32::consts::FRAC_PI_2,
            walkable: false,
        }
    }

    /// Stores the normal and reclassifies the node against `slope_threshold`
    /// (radians). The only way steepness and walkability change.
    pub fn set_normal(&mut self, normal: Vec3, slope_threshold: f32) {
        self.normal = normal;
        self.steepness = normal.normalized().dot(Vec3::UP).clamp(-1.0, 1.0).acos();
        self.walkable = self.steepness <= slope_threshold;
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn corners(&self) -> [NodeId; 4] {
        self.corners
    }

    #[inline]
    pub fn top_left(&self) -> NodeId {
        self.corners[0]
    }

    #[inline]
    pub fn bottom_right(&self) -> NodeId {
        self.corners[3]
    }

    /// Column.
    #[inline]
    pub fn x(&self) -> usize {
        self.x
    }

    /// Row.
    #[inline]
    pub fn z(&self) -> usize {
        self.z
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Angle between the normal and world up, in radians.
    #[inline]
    pub fn steepness(&self) -> f32 {
        self.steepness
    }

    #[inline]
    pub fn is_walkable(&self) -> bool {
        self.walkable
    }
}
