//! Projects a carved maze onto a grid of tiles, one 4×4 block per cell.

use rand_chacha::rand_core::Rng;

use crate::types::{Direction, TileId};

use super::maze::MazeGrid;
use super::model::{Space, TileLayout};
use super::palette::{
    DIRT_PLOWED, DIRT_TRANSITION_E, DIRT_TRANSITION_E_N, DIRT_TRANSITION_E_S, DIRT_TRANSITION_N,
    DIRT_TRANSITION_NE, DIRT_TRANSITION_NW, DIRT_TRANSITION_S, DIRT_TRANSITION_SE,
    DIRT_TRANSITION_SW, DIRT_TRANSITION_W, DIRT_TRANSITION_W_N, DIRT_TRANSITION_W_S, GRASS_TILES,
};
use super::seed::random_index;

pub const BLOCK_SIZE: usize = 4;

/// Grid size in spaces for a maze of `cell_width × cell_height` cells: one
/// block per cell, a closing column on the east and a border row on both ends.
pub fn layout_size(cell_width: usize, cell_height: usize) -> (usize, usize) {
    (cell_width * BLOCK_SIZE + 1, cell_height * BLOCK_SIZE + 2)
}

/// Top-left space of a cell's block.
pub fn block_origin(cell_x: usize, cell_y: usize) -> (usize, usize) {
    (cell_x * BLOCK_SIZE, 1 + cell_y * BLOCK_SIZE)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpenSides {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl OpenSides {
    pub fn of_cell(maze: &MazeGrid, x: usize, y: usize) -> Self {
        Self {
            north: maze.is_open(x, y, Direction::North),
            south: maze.is_open(x, y, Direction::South),
            east: maze.is_open(x, y, Direction::East),
            west: maze.is_open(x, y, Direction::West),
        }
    }

    pub fn any(self) -> bool {
        self.north || self.south || self.east || self.west
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

/// Corner tile for the given open state of the corner's vertical (north or
/// south) and horizontal (east or west) sides.
pub fn corner_tile(corner: Corner, vertical_open: bool, horizontal_open: bool) -> TileId {
    let (diagonal, along_vertical, along_horizontal, closed) = match corner {
        Corner::NorthWest => {
            (DIRT_TRANSITION_NW, DIRT_TRANSITION_W, DIRT_TRANSITION_N, DIRT_TRANSITION_W_N)
        }
        Corner::NorthEast => {
            (DIRT_TRANSITION_NE, DIRT_TRANSITION_E, DIRT_TRANSITION_N, DIRT_TRANSITION_E_N)
        }
        Corner::SouthWest => {
            (DIRT_TRANSITION_SW, DIRT_TRANSITION_W, DIRT_TRANSITION_S, DIRT_TRANSITION_W_S)
        }
        Corner::SouthEast => {
            (DIRT_TRANSITION_SE, DIRT_TRANSITION_E, DIRT_TRANSITION_S, DIRT_TRANSITION_E_S)
        }
    };
    match (vertical_open, horizontal_open) {
        (true, true) => diagonal,
        (true, false) => along_vertical,
        (false, true) => along_horizontal,
        (false, false) => closed,
    }
}

type Block = [[(TileId, bool); BLOCK_SIZE]; BLOCK_SIZE];

fn grass(rng: &mut impl Rng) -> TileId {
    GRASS_TILES[random_index(rng, GRASS_TILES.len())]
}

fn pick(open: bool, open_tile: TileId, closed_tile: TileId) -> TileId {
    if open { open_tile } else { closed_tile }
}

/// Tiles for one cell's block, indexed `[dy][dx]`. The north row and west
/// column are the cell's side of the passage to its neighbor; the 3×3
/// interior is the cell's clearing.
fn compose_block(open: OpenSides, rng: &mut impl Rng) -> Block {
    let blocked = (DIRT_PLOWED, false);
    if !open.any() {
        return [[blocked; BLOCK_SIZE]; BLOCK_SIZE];
    }

    let nw = corner_tile(Corner::NorthWest, open.north, open.west);
    let ne = corner_tile(Corner::NorthEast, open.north, open.east);
    let sw = corner_tile(Corner::SouthWest, open.south, open.west);
    let se = corner_tile(Corner::SouthEast, open.south, open.east);

    let mut block = [[blocked; BLOCK_SIZE]; BLOCK_SIZE];

    block[0][1] = (pick(open.north, DIRT_TRANSITION_W, DIRT_PLOWED), open.north);
    block[0][2] = (if open.north { grass(rng) } else { DIRT_PLOWED }, open.north);
    block[0][3] = (pick(open.north, DIRT_TRANSITION_E, DIRT_PLOWED), open.north);

    block[1][0] = (pick(open.west, DIRT_TRANSITION_N, DIRT_PLOWED), open.west);
    block[1][1] = (nw, true);
    block[1][2] = (if open.north { grass(rng) } else { DIRT_TRANSITION_N }, true);
    block[1][3] = (ne, true);

    block[2][0] = (if open.west { grass(rng) } else { DIRT_PLOWED }, open.west);
    block[2][1] = (if open.west { grass(rng) } else { DIRT_TRANSITION_W }, true);
    block[2][2] = (grass(rng), true);
    block[2][3] = (if open.east { grass(rng) } else { DIRT_TRANSITION_E }, true);

    block[3][0] = (pick(open.west, DIRT_TRANSITION_S, DIRT_PLOWED), open.west);
    block[3][1] = (sw, true);
    block[3][2] = (if open.south { grass(rng) } else { DIRT_TRANSITION_S }, true);
    block[3][3] = (se, true);

    block
}

fn is_border(layout: &TileLayout, x: usize, y: usize) -> bool {
    x == 0 || y == 0 || x == layout.width - 1 || y == layout.height - 1
}

/// Expand every maze cell into its block of spaces. `rng` only picks grass
/// variants; base tiles of every other kind depend on the maze alone.
pub fn compose(maze: &MazeGrid, rng: &mut impl Rng) -> TileLayout {
    let (width, height) = layout_size(maze.width(), maze.height());
    let spaces = (0..height)
        .flat_map(|y| (0..width).map(move |x| Space::new(x, y, DIRT_PLOWED, false)))
        .collect();
    let mut layout = TileLayout { width, height, spaces };

    for cell_y in 0..maze.height() {
        for cell_x in 0..maze.width() {
            let block = compose_block(OpenSides::of_cell(maze, cell_x, cell_y), rng);
            let (origin_x, origin_y) = block_origin(cell_x, cell_y);
            for (dy, row) in block.iter().enumerate() {
                for (dx, &(tile, can_walk)) in row.iter().enumerate() {
                    let space = layout.space_mut(origin_x + dx, origin_y + dy);
                    space.base_tile = tile;
                    space.can_walk = can_walk;
                }
            }
        }
    }

    for y in 0..height {
        for x in 0..width {
            if is_border(&layout, x, y) {
                let space = layout.space_mut(x, y);
                space.base_tile = DIRT_PLOWED;
                space.can_walk = false;
            }
        }
    }

    layout
}
