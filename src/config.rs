use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use terranav_nav::NavConfig;
use terranav_terrain::TerrainGenConfig;

/// Top-level config file: `[terrain]` and `[nav]` tables, both optional.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub terrain: TerrainGenConfig,
    #[serde(default)]
    pub nav: NavConfig,
}

pub fn load_config_from_path(path: &Path) -> Result<AppConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&s)?;
    Ok(cfg)
}

/// Missing file falls back to defaults; a malformed one is an error.
pub fn load_or_default(path: &Path) -> Result<AppConfig, Box<dyn Error>> {
    if !path.exists() {
        log::warn!("config {} not found; using defaults", path.display());
        return Ok(AppConfig::default());
    }
    let cfg = load_config_from_path(path)?;
    log::info!("loaded config from {}", path.display());
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use terranav_terrain::TerrainMode;

    #[test]
    fn both_tables_parse() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [terrain]
            size = 17
            mode = "flat"

            [nav]
            bounds_padding = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(cfg.terrain.size, 17);
        assert_eq!(cfg.terrain.mode, TerrainMode::Flat);
        assert_eq!(cfg.nav.bounds_padding, 0.25);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = load_or_default(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(cfg.terrain.size, 65);
        assert_eq!(cfg.nav.bounds_padding, 1.0);
    }

    #[test]
    fn shipped_demo_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/terranav.toml");
        let cfg = load_config_from_path(&path).unwrap();
        assert!(cfg.terrain.size >= 2);
    }
}
