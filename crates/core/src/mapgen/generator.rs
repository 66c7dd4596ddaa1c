//! Maze level orchestration that runs the carve, compose and growth passes.

use log::{debug, info};

use crate::error::LevelError;

use super::compositor::compose;
use super::growth::resolve;
use super::maze::{MazeGrid, Opening, generate_maze};
use super::model::TileLayout;
use super::seed::{COSMETIC_STREAM, STRUCTURE_STREAM, stream_rng};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGenerator {
    seed: u64,
    cell_width: usize,
    cell_height: usize,
    opening: Option<Opening>,
}

impl MazeGenerator {
    pub fn new(seed: u64, cell_width: usize, cell_height: usize) -> Self {
        Self { seed, cell_width, cell_height, opening: None }
    }

    pub fn with_opening(mut self, opening: Option<Opening>) -> Self {
        self.opening = opening;
        self
    }

    /// The wall graph for this seed. Only the structure stream is consumed,
    /// so the graph is the one `generate` lays out.
    pub fn carve(&self) -> Result<MazeGrid, LevelError> {
        let mut rng = stream_rng(self.seed, STRUCTURE_STREAM);
        generate_maze(self.cell_width, self.cell_height, self.opening, &mut rng)
    }

    pub fn generate(&self) -> Result<TileLayout, LevelError> {
        let maze = self.carve()?;
        let mut layout = compose(&maze, &mut stream_rng(self.seed, COSMETIC_STREAM));
        debug!("composed {}x{} spaces", layout.width, layout.height);

        resolve(&mut layout);
        info!(
            "generated {}x{} maze level (seed {:#018x}, {} walkable spaces)",
            self.cell_width,
            self.cell_height,
            self.seed,
            layout.spaces.iter().filter(|space| space.can_walk).count()
        );
        Ok(layout)
    }
}
