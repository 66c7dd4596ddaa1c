use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::mapgen::compositor::block_origin;
use crate::mapgen::palette::{TEXTURE, TILE_SIZE, corn_registry};
use crate::mapgen::{MazeGenerator, Opening};
use crate::types::{Direction, Pos, Rect};

use super::{MapQuery, SpaceGrid, Teleport, TileRegistry};

/// Shape and exits of a generated maze level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeLevel {
    /// Cell rows.
    pub v_path_count: usize,
    /// Cell columns.
    pub h_path_count: usize,
    #[serde(default)]
    pub exit: Option<Opening>,
    #[serde(default)]
    pub exit_to: Option<String>,
    #[serde(default = "default_player_start")]
    pub player_start: Pos,
}

fn default_player_start() -> Pos {
    Pos { y: 2, x: 2 }
}

impl MazeLevel {
    /// The corn maze: 12 rows of 16 cells leaving south from the far corner.
    pub fn corn() -> Self {
        Self {
            v_path_count: 12,
            h_path_count: 16,
            exit: Some(Opening { x: 15, y: 11, side: Direction::South }),
            exit_to: Some("town".to_string()),
            player_start: default_player_start(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeMap {
    grid: SpaceGrid,
    registry: TileRegistry,
    teleports: Vec<Teleport>,
    player_start: Pos,
}

impl MazeMap {
    pub fn generate(seed: u64, level: &MazeLevel) -> Result<Self, LevelError> {
        let layout = MazeGenerator::new(seed, level.h_path_count, level.v_path_count)
            .with_opening(level.exit)
            .generate()?;

        let teleports: Vec<_> = level
            .exit
            .zip(level.exit_to.as_ref())
            .map(|(exit, to_level)| Teleport {
                region: exit_region(exit),
                to_level: to_level.clone(),
            })
            .into_iter()
            .collect();
        debug!("maze exits: {teleports:?}");

        Ok(Self {
            grid: SpaceGrid::freeze(layout),
            registry: corn_registry(),
            teleports,
            player_start: level.player_start,
        })
    }

    pub fn texture(&self) -> &str {
        TEXTURE
    }

    pub fn fingerprint(&self) -> u64 {
        self.grid.fingerprint()
    }
}

/// Pixel strip just inside the opening's side of its cell.
fn exit_region(exit: Opening) -> Rect {
    let (ox, oy) = block_origin(exit.x, exit.y);
    let (ox, oy) = (ox as i32, oy as i32);
    let (x, y, columns, rows) = match exit.side {
        Direction::North => (ox + 1, oy, 3, 1),
        Direction::South => (ox + 1, oy + 3, 3, 1),
        Direction::East => (ox + 3, oy + 1, 1, 3),
        Direction::West => (ox + 1, oy + 1, 1, 3),
    };
    let tile = TILE_SIZE as i32;
    Rect::new(x * tile, y * tile, columns * tile, rows * tile)
}

impl MapQuery for MazeMap {
    fn grid(&self) -> &SpaceGrid {
        &self.grid
    }

    fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    fn tile_width(&self) -> u32 {
        TILE_SIZE
    }

    fn tile_height(&self) -> u32 {
        TILE_SIZE
    }

    fn teleports(&self) -> &[Teleport] {
        &self.teleports
    }

    fn player_start(&self, _from_level: Option<&str>) -> Pos {
        self.player_start
    }
}
