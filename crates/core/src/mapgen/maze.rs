//! Randomized depth-first wall carving over a grid of maze cells.

use log::debug;
use rand_chacha::rand_core::Rng;
use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::types::Direction;

use super::seed::random_index;

/// One logical cell. A `true` wall flag means the side is blocked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeCell {
    pub x: usize,
    pub y: usize,
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
    visited: bool,
}

impl MazeCell {
    fn new(x: usize, y: usize) -> Self {
        Self { x, y, north: true, south: true, east: true, west: true, visited: false }
    }

    pub fn has_wall(&self, side: Direction) -> bool {
        match side {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    fn clear_wall(&mut self, side: Direction) {
        match side {
            Direction::North => self.north = false,
            Direction::South => self.south = false,
            Direction::East => self.east = false,
            Direction::West => self.west = false,
        }
    }
}

/// The single side through which a level connects to the outside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opening {
    pub x: usize,
    pub y: usize,
    pub side: Direction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    width: usize,
    height: usize,
    cells: Vec<MazeCell>,
    opening: Option<Opening>,
}

impl MazeGrid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn opening(&self) -> Option<Opening> {
        self.opening
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&MazeCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(&self.cells[y * self.width + x])
    }

    /// Coordinates of the in-grid neighbor on `side`, if any.
    pub fn neighbor(&self, x: usize, y: usize, side: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = side.delta();
        let nx = x.checked_add_signed(dx as isize)?;
        let ny = y.checked_add_signed(dy as isize)?;
        (nx < self.width && ny < self.height).then_some((nx, ny))
    }

    /// Whether a side of a cell lets a path through: an interior side with
    /// its wall carved, or the declared opening.
    pub fn is_open(&self, x: usize, y: usize, side: Direction) -> bool {
        let Some(cell) = self.cell(x, y) else {
            return false;
        };
        if cell.has_wall(side) {
            return false;
        }
        self.neighbor(x, y, side).is_some() || self.opening == Some(Opening { x, y, side })
    }

    /// Number of carved wall pairs between neighboring cells.
    pub fn carved_edge_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                usize::from(!cell.east && cell.x + 1 < self.width)
                    + usize::from(!cell.south && cell.y + 1 < self.height)
            })
            .sum()
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

fn validate_opening(width: usize, height: usize, opening: Opening) -> Result<(), LevelError> {
    let faces_boundary = opening.x < width
        && opening.y < height
        && match opening.side {
            Direction::North => opening.y == 0,
            Direction::South => opening.y == height - 1,
            Direction::West => opening.x == 0,
            Direction::East => opening.x == width - 1,
        };
    if faces_boundary {
        Ok(())
    } else {
        Err(LevelError::InvalidOpening { x: opening.x, y: opening.y, side: opening.side })
    }
}

/// Carve a spanning-tree maze of `width × height` cells.
///
/// Each step looks at the cell on top of the stack, picks one of its
/// unvisited neighbors uniformly and carves the wall pair between them; a
/// cell without unvisited neighbors is popped. Every cell is visited exactly
/// once, so exactly `width * height - 1` wall pairs are carved.
pub fn generate_maze(
    width: usize,
    height: usize,
    opening: Option<Opening>,
    rng: &mut impl Rng,
) -> Result<MazeGrid, LevelError> {
    if width == 0 || height == 0 {
        return Err(LevelError::InvalidDimension { width, height });
    }
    if let Some(opening) = opening {
        validate_opening(width, height, opening)?;
    }

    let cells =
        (0..height).flat_map(|y| (0..width).map(move |x| MazeCell::new(x, y))).collect();
    let mut grid = MazeGrid { width, height, cells, opening };

    let mut stack = vec![(0_usize, 0_usize)];
    grid.cells[0].visited = true;
    let mut candidates = Vec::with_capacity(4);

    while let Some(&(x, y)) = stack.last() {
        candidates.clear();
        for side in Direction::CARVE_ORDER {
            if let Some((nx, ny)) = grid.neighbor(x, y, side)
                && !grid.cells[grid.index(nx, ny)].visited
            {
                candidates.push((side, nx, ny));
            }
        }

        if candidates.is_empty() {
            stack.pop();
            continue;
        }

        let (side, nx, ny) = candidates[random_index(rng, candidates.len())];
        let here = grid.index(x, y);
        let there = grid.index(nx, ny);
        grid.cells[here].clear_wall(side);
        grid.cells[there].clear_wall(side.opposite());
        grid.cells[there].visited = true;
        stack.push((nx, ny));
    }

    if let Some(opening) = opening {
        let index = grid.index(opening.x, opening.y);
        grid.cells[index].clear_wall(opening.side);
    }

    debug!(
        "carved {width}x{height} maze with {} passages, opening {:?}",
        grid.carved_edge_count(),
        opening
    );
    Ok(grid)
}
