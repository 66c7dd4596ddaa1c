//! Named levels and navigation between them.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::map::{AuthoredLevel, Level, MapQuery, MazeLevel, MazeMap};
use crate::mapgen::derive_level_seed;
use crate::types::Pos;

pub const CORN_MAZE: &str = "corn";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LevelSpec {
    Maze(MazeLevel),
    Authored(AuthoredLevel),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub levels: BTreeMap<String, LevelSpec>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let corn = LevelSpec::Maze(MazeLevel::corn());
        Self { levels: BTreeMap::from([(CORN_MAZE.to_string(), corn)]) }
    }
}

impl CatalogConfig {
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

/// Where the player lands after a level change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arrival {
    pub level: String,
    pub start: Pos,
    pub from: Option<String>,
}

pub struct LevelCatalog {
    run_seed: u64,
    config: CatalogConfig,
    visits: BTreeMap<String, u32>,
    loaded: BTreeMap<String, Level>,
    current: Option<String>,
}

impl LevelCatalog {
    pub fn new(run_seed: u64, config: CatalogConfig) -> Self {
        Self {
            run_seed,
            config,
            visits: BTreeMap::new(),
            loaded: BTreeMap::new(),
            current: None,
        }
    }

    /// Enter `name`. Maze levels are generated afresh on every entry;
    /// authored levels are built on first entry and kept.
    pub fn navigate_to(&mut self, name: &str) -> Result<Arrival, LevelError> {
        let spec =
            self.config.levels.get(name).ok_or_else(|| LevelError::UnknownLevel(name.to_owned()))?;
        match spec {
            LevelSpec::Maze(maze) => {
                let visit = self.visits.get(name).copied().unwrap_or_default();
                let map = MazeMap::generate(derive_level_seed(self.run_seed, name, visit), maze)?;
                self.visits.insert(name.to_owned(), visit + 1);
                self.loaded.insert(name.to_owned(), Level::Maze(map));
            }
            LevelSpec::Authored(authored) => {
                if !self.loaded.contains_key(name) {
                    self.loaded.insert(name.to_owned(), Level::Authored(authored.build()?));
                }
            }
        }

        let level =
            self.loaded.get(name).ok_or_else(|| LevelError::UnknownLevel(name.to_owned()))?;
        let from = self.current.replace(name.to_owned());
        let start = level.player_start(from.as_deref());
        info!("entered level {name} from {from:?} at {start:?}");
        Ok(Arrival { level: name.to_owned(), start, from })
    }

    pub fn current(&self) -> Option<&Level> {
        self.current.as_deref().and_then(|name| self.loaded.get(name))
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// How many times a maze level has been generated.
    pub fn visits(&self, name: &str) -> u32 {
        self.visits.get(name).copied().unwrap_or_default()
    }
}
