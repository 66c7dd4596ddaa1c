//! Procedural maze level generation split into carve, compose and growth passes.

pub mod compositor;
pub mod growth;
pub mod maze;
pub mod model;
pub mod palette;

mod generator;
mod seed;

pub use generator::MazeGenerator;
pub use maze::{MazeCell, MazeGrid, Opening, generate_maze};
pub use model::{Space, TileLayout};

pub(crate) use seed::derive_level_seed;

use crate::error::LevelError;

pub fn generate_layout(
    seed: u64,
    cell_width: usize,
    cell_height: usize,
    opening: Option<Opening>,
) -> Result<TileLayout, LevelError> {
    MazeGenerator::new(seed, cell_width, cell_height).with_opening(opening).generate()
}
