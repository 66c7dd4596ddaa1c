//! Read-only query surface over frozen levels.

mod authored;
mod grid;
mod maze_map;
mod registry;

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::mapgen::Space;
use crate::types::{Point, Pos, Rect, TileId};

pub use authored::{AuthoredLevel, AuthoredMap, OverlayLayer};
pub use grid::{RowBounds, SpaceGrid};
pub use maze_map::{MazeLevel, MazeMap};
pub use registry::TileRegistry;

/// Pixel region that sends whoever stands in it to another level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teleport {
    pub region: Rect,
    pub to_level: String,
}

/// Queries shared by every level kind. Implementors provide the frozen grid,
/// the tile registry and spawn rules; everything else derives from those.
pub trait MapQuery {
    fn grid(&self) -> &SpaceGrid;
    fn registry(&self) -> &TileRegistry;
    fn tile_width(&self) -> u32;
    fn tile_height(&self) -> u32;
    fn teleports(&self) -> &[Teleport];

    /// Start tile when arriving from `from_level` (or from nowhere).
    fn player_start(&self, from_level: Option<&str>) -> Pos;

    fn width(&self) -> usize {
        self.grid().width()
    }

    fn height(&self) -> usize {
        self.grid().height()
    }

    fn pixel_size(&self) -> (u32, u32) {
        (self.width() as u32 * self.tile_width(), self.height() as u32 * self.tile_height())
    }

    fn space(&self, x: i32, y: i32) -> Option<&Space> {
        self.grid().space(x, y)
    }

    /// Tile containing a world pixel. Negative pixels map to negative tiles.
    fn tile_of(&self, point: Point) -> Pos {
        Pos {
            y: point.y.div_euclid(self.tile_height() as i32),
            x: point.x.div_euclid(self.tile_width() as i32),
        }
    }

    /// Pixel at the centre of a tile.
    fn entity_location(&self, tile: Pos) -> Point {
        let (tile_width, tile_height) = (self.tile_width() as i32, self.tile_height() as i32);
        Point { x: tile.x * tile_width + tile_width / 2, y: tile.y * tile_height + tile_height / 2 }
    }

    fn can_move_to(&self, point: Point) -> bool {
        let tile = self.tile_of(point);
        self.space(tile.x, tile.y).is_some_and(|space| space.can_walk)
    }

    fn overlays(&self, column: usize, draw_row: usize) -> impl Iterator<Item = &Space> {
        self.grid().overlays(column, draw_row)
    }

    fn overlay_rows(&self, start_row: usize, end_row: usize) -> RangeInclusive<usize> {
        self.grid().overlay_rows(start_row, end_row)
    }

    fn tile_rect(&self, id: TileId) -> Option<Rect> {
        self.registry().get(id)
    }

    fn check_teleport(&self, point: Point) -> Option<&str> {
        self.teleports()
            .iter()
            .find(|teleport| teleport.region.contains(point))
            .map(|teleport| teleport.to_level.as_str())
    }
}

/// The closed set of level kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Level {
    Maze(MazeMap),
    Authored(AuthoredMap),
}

impl Level {
    pub fn is_maze(&self) -> bool {
        matches!(self, Self::Maze(_))
    }

    pub fn texture(&self) -> &str {
        match self {
            Self::Maze(map) => map.texture(),
            Self::Authored(map) => map.texture(),
        }
    }
}

impl MapQuery for Level {
    fn grid(&self) -> &SpaceGrid {
        match self {
            Self::Maze(map) => map.grid(),
            Self::Authored(map) => map.grid(),
        }
    }

    fn registry(&self) -> &TileRegistry {
        match self {
            Self::Maze(map) => map.registry(),
            Self::Authored(map) => map.registry(),
        }
    }

    fn tile_width(&self) -> u32 {
        match self {
            Self::Maze(map) => map.tile_width(),
            Self::Authored(map) => map.tile_width(),
        }
    }

    fn tile_height(&self) -> u32 {
        match self {
            Self::Maze(map) => map.tile_height(),
            Self::Authored(map) => map.tile_height(),
        }
    }

    fn teleports(&self) -> &[Teleport] {
        match self {
            Self::Maze(map) => map.teleports(),
            Self::Authored(map) => map.teleports(),
        }
    }

    fn can_move_to(&self, point: Point) -> bool {
        match self {
            Self::Maze(map) => map.can_move_to(point),
            Self::Authored(map) => map.can_move_to(point),
        }
    }

    fn player_start(&self, from_level: Option<&str>) -> Pos {
        match self {
            Self::Maze(map) => map.player_start(from_level),
            Self::Authored(map) => map.player_start(from_level),
        }
    }
}
