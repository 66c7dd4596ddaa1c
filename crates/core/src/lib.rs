pub mod catalog;
pub mod error;
pub mod map;
pub mod mapgen;
pub mod movement;
pub mod types;

pub use catalog::{Arrival, CatalogConfig, LevelCatalog, LevelSpec};
pub use error::LevelError;
pub use map::{
    AuthoredLevel, AuthoredMap, Level, MapQuery, MazeLevel, MazeMap, OverlayLayer, SpaceGrid,
    Teleport, TileRegistry,
};
pub use mapgen::{MazeGenerator, Opening, Space, TileLayout};
pub use movement::{EntityMoved, Mover, Movers};
pub use types::*;
