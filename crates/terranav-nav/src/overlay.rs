use hashbrown::HashSet;
use terranav_geom::Aabb;

use crate::grid_node::NodeId;
use crate::index::NavMeshIndex;

/// A region volume for the renderer to outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugBox {
    pub region: NodeId,
    pub bounds: Aabb,
    pub walkable: bool,
}

/// Per-frame selection of region bounding boxes for debug drawing.
///
/// Drawing itself belongs to the renderer; this only decides which boxes to
/// hand over. Each region is emitted at most once between `begin_frame` calls.
#[derive(Debug, Default)]
pub struct BoundsOverlay {
    enabled: bool,
    drawn: HashSet<NodeId>,
}

impl BoundsOverlay {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            drawn: HashSet::new(),
        }
    }

    /// Flips visualization and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        log::info!(
            "nav bounds overlay {}",
            if self.enabled { "on" } else { "off" }
        );
        self.enabled
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn begin_frame(&mut self) {
        self.drawn.clear();
    }

    /// Boxes for regions passing `is_visible` (typically a frustum test) that
    /// have not been handed out yet this frame. Empty while disabled.
    pub fn visible_boxes<F>(&mut self, index: &NavMeshIndex, is_visible: F) -> Vec<DebugBox>
    where
        F: Fn(&Aabb) -> bool,
    {
        if !self.enabled {
            return Vec::new();
        }
        let mut out = Vec::new();
        for region in index.regions() {
            let bounds = region.bounds();
            if !is_visible(&bounds) || !self.drawn.insert(region.id()) {
                continue;
            }
            out.push(DebugBox {
                region: region.id(),
                bounds,
                walkable: region.is_walkable(),
            });
        }
        out
    }
}
