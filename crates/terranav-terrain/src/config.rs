use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
pub struct TerrainGenConfig {
    #[serde(default = "default_mode")]
    pub mode: TerrainMode,
    /// Vertices per side.
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_slope_threshold_deg")]
    pub slope_threshold_deg: f32,
    #[serde(default)]
    pub height: Height,
}

impl Default for TerrainGenConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            size: default_size(),
            cell_size: default_cell_size(),
            seed: default_seed(),
            slope_threshold_deg: default_slope_threshold_deg(),
            height: Height::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TerrainMode {
    Noise,
    Flat,
}

fn default_mode() -> TerrainMode {
    TerrainMode::Noise
}
fn default_size() -> usize {
    65
}
fn default_cell_size() -> f32 {
    1.0
}
fn default_seed() -> i32 {
    1337
}
fn default_slope_threshold_deg() -> f32 {
    35.0
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    #[serde(default = "default_height_freq")]
    pub frequency: f32,
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_octaves")]
    pub octaves: i32,
}
fn default_height_freq() -> f32 {
    0.02
}
fn default_amplitude() -> f32 {
    12.0
}
fn default_octaves() -> i32 {
    3
}
impl Default for Height {
    fn default() -> Self {
        Self {
            frequency: default_height_freq(),
            amplitude: default_amplitude(),
            octaves: default_octaves(),
        }
    }
}

// Flattened snapshot handed to the generator
#[derive(Clone, Debug)]
pub struct TerrainGenParams {
    pub mode: TerrainMode,
    pub size: usize,
    pub cell_size: f32,
    pub seed: i32,
    /// Radians.
    pub slope_threshold: f32,
    pub height_frequency: f32,
    pub height_amplitude: f32,
    pub height_octaves: i32,
}

impl Default for TerrainGenParams {
    fn default() -> Self {
        Self::from_config(&TerrainGenConfig::default())
    }
}

impl TerrainGenParams {
    pub fn from_config(cfg: &TerrainGenConfig) -> Self {
        Self {
            mode: cfg.mode,
            size: cfg.size,
            cell_size: cfg.cell_size,
            seed: cfg.seed,
            slope_threshold: cfg.slope_threshold_deg.to_radians(),
            height_frequency: cfg.height.frequency,
            height_amplitude: cfg.height.amplitude,
            height_octaves: cfg.height.octaves.max(1),
        }
    }
}

pub fn load_params_from_path(path: &Path) -> Result<TerrainGenParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: TerrainGenConfig = toml::from_str(&s)?;
    Ok(TerrainGenParams::from_config(&cfg))
}
