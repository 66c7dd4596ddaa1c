//! Tile ids and atlas geometry for the corn-field terrain atlas.

use crate::map::TileRegistry;
use crate::types::{Rect, TileId};

pub const TILE_SIZE: u32 = 32;
pub const ATLAS_COLUMNS: u32 = 32;
pub const ATLAS_ROWS: u32 = 32;
pub const TEXTURE: &str = "gfx/terrain_atlas";

const fn atlas_tile(row: u32, column: u32) -> TileId {
    row * ATLAS_COLUMNS + column
}

pub const GRASS: TileId = atlas_tile(3, 22);
pub const GRASS_2: TileId = atlas_tile(5, 23);
pub const GRASS_3: TileId = atlas_tile(5, 22);
pub const GRASS_4: TileId = atlas_tile(5, 21);
pub const GRASS_TILES: [TileId; 4] = [GRASS, GRASS_2, GRASS_3, GRASS_4];

pub const DIRT_TRANSITION_W_N: TileId = atlas_tile(15, 6);
pub const DIRT_TRANSITION_E_N: TileId = atlas_tile(15, 7);
pub const DIRT_TRANSITION_W_S: TileId = atlas_tile(16, 6);
pub const DIRT_TRANSITION_E_S: TileId = atlas_tile(16, 7);

pub const DIRT_TRANSITION_SE: TileId = atlas_tile(17, 5);
pub const DIRT_TRANSITION_S: TileId = atlas_tile(17, 6);
pub const DIRT_TRANSITION_SW: TileId = atlas_tile(17, 7);
pub const DIRT_TRANSITION_E: TileId = atlas_tile(18, 5);
/// Impassable ground the corn grows on; also the border tile.
pub const DIRT_PLOWED: TileId = atlas_tile(18, 6);
pub const DIRT_TRANSITION_W: TileId = atlas_tile(18, 7);
pub const DIRT_TRANSITION_NE: TileId = atlas_tile(19, 5);
pub const DIRT_TRANSITION_N: TileId = atlas_tile(19, 6);
pub const DIRT_TRANSITION_NW: TileId = atlas_tile(19, 7);

/// Four variants of one growth sprite, keyed by which horizontal sides
/// continue into a neighbor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteSet {
    pub none: TileId,
    pub east: TileId,
    pub east_west: TileId,
    pub west: TileId,
}

impl SpriteSet {
    const fn atlas_row(row: u32) -> Self {
        Self {
            none: atlas_tile(row, 8),
            east: atlas_tile(row, 9),
            east_west: atlas_tile(row, 10),
            west: atlas_tile(row, 11),
        }
    }

    pub fn pick(&self, west: bool, east: bool) -> TileId {
        match (west, east) {
            (true, true) => self.east_west,
            (true, false) => self.west,
            (false, true) => self.east,
            (false, false) => self.none,
        }
    }
}

pub const CORN_BOTTOM: SpriteSet = SpriteSet::atlas_row(19);
pub const CORN_TOP_NEAR: SpriteSet = SpriteSet::atlas_row(18);
pub const CORN_TOP_FILL: SpriteSet = SpriteSet::atlas_row(17);
pub const CORN_TOP_FAR: SpriteSet = SpriteSet::atlas_row(16);

/// Multi-cell sprites appended after the uniform atlas scan, in id order.
pub const SPECIAL_TILES: [(&str, Rect); 11] = [
    ("tree_conifer", Rect::new(960, 0, 64, 160)),
    ("dome_bush_north", Rect::new(768, 384, 96, 96)),
    ("dome_bush_south", Rect::new(864, 284, 96, 96)),
    ("bridge_railings", Rect::new(512, 512, 96, 96)),
    ("easter_island_head", Rect::new(480, 384, 64, 96)),
    ("column", Rect::new(448, 384, TILE_SIZE as i32, 96)),
    ("column_ruin", Rect::new(608, 480, TILE_SIZE as i32, 96)),
    ("column_cracked", Rect::new(640, 480, TILE_SIZE as i32, 96)),
    ("tree_small", Rect::new(864, 928, 64, 96)),
    ("tree_large", Rect::new(928, 896, 96, 128)),
    ("birdbath", Rect::new(544, 284, TILE_SIZE as i32, 64)),
];

/// Id of the first special tile.
pub const FIRST_SPECIAL_TILE: TileId = ATLAS_COLUMNS * ATLAS_ROWS;

pub fn special_tile(name: &str) -> Option<TileId> {
    SPECIAL_TILES
        .iter()
        .position(|(special, _)| *special == name)
        .map(|index| FIRST_SPECIAL_TILE + index as TileId)
}

pub fn corn_registry() -> TileRegistry {
    let mut registry = TileRegistry::grid_scan(ATLAS_COLUMNS, ATLAS_ROWS, TILE_SIZE, TILE_SIZE);
    for (_, bounds) in SPECIAL_TILES {
        registry.push(bounds);
    }
    registry
}
