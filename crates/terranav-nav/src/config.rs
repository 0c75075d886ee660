use serde::Deserialize;

/// `[nav]` table.
#[derive(Clone, Debug, Deserialize)]
pub struct NavConfig {
    /// Vertical padding added above and below every region's bounding volume.
    #[serde(default = "default_bounds_padding")]
    pub bounds_padding: f32,
}

fn default_bounds_padding() -> f32 {
    1.0
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            bounds_padding: default_bounds_padding(),
        }
    }
}
