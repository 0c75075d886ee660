use terranav_terrain::TerrainSource;

use crate::builder::ChunkBuilder;
use crate::config::NavConfig;
use crate::index::NavMeshIndex;

/// Owns the navigation index and builds it once on request.
#[derive(Debug, Default)]
pub struct NavMeshGenerator {
    config: NavConfig,
    index: Option<NavMeshIndex>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum NavError {
    MissingTerrain,
    TerrainNotReady { grid_width: usize },
}

impl NavMeshGenerator {
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            index: None,
        }
    }

    /// Builds the index from `terrain`, or returns the existing one untouched.
    ///
    /// Once a non-empty index exists further calls are no-ops and `terrain`
    /// is not consulted. Generation never runs partially: a missing or
    /// unfinished terrain fails before any node is created.
    pub fn generate(
        &mut self,
        terrain: Option<&dyn TerrainSource>,
    ) -> Result<&NavMeshIndex, NavError> {
        if self.is_generated() {
            log::debug!("nav index already generated; ignoring request");
        } else {
            self.index = Some(Self::build(terrain, &self.config)?);
        }
        Ok(self.index.get_or_insert_with(NavMeshIndex::default))
    }

    fn build(
        terrain: Option<&dyn TerrainSource>,
        config: &NavConfig,
    ) -> Result<NavMeshIndex, NavError> {
        let terrain = terrain.ok_or(NavError::MissingTerrain)?;
        let grid_width = terrain.grid_width();
        if !terrain.is_ready() || grid_width < 2 {
            return Err(NavError::TerrainNotReady { grid_width });
        }
        log::info!(
            "generating nav chunks for {}x{} quads",
            grid_width - 1,
            grid_width - 1
        );
        let index = ChunkBuilder::new(terrain, config.clone()).build();
        let stats = index.stats();
        log::info!(
            "nav chunks ready: {} regions, {} quads in {:?}",
            stats.regions,
            stats.nodes,
            stats.elapsed
        );
        Ok(index)
    }

    pub fn index(&self) -> Option<&NavMeshIndex> {
        self.index.as_ref()
    }

    pub fn index_mut(&mut self) -> Option<&mut NavMeshIndex> {
        self.index.as_mut()
    }

    pub fn is_generated(&self) -> bool {
        self.index.as_ref().is_some_and(|i| !i.is_empty())
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }
}

impl std::fmt::Display for NavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavError::MissingTerrain => write!(f, "no terrain available for nav generation"),
            NavError::TerrainNotReady { grid_width } => write!(
                f,
                "terrain grid not initialized (width {}, need at least 2)",
                grid_width
            ),
        }
    }
}

impl std::error::Error for NavError {}
