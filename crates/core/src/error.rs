use std::io;

use thiserror::Error;

use crate::types::Direction;

/// Failures surfaced while building or loading a level.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("maze dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: usize, height: usize },
    #[error("tile size must be positive, got {width}x{height}")]
    InvalidTileSize { width: u32, height: u32 },
    #[error("level {what} does not fit in pixel coordinates")]
    OutOfRange { what: &'static str },
    #[error("opening {side:?} of cell ({x}, {y}) does not face the maze boundary")]
    InvalidOpening { x: usize, y: usize, side: Direction },
    #[error("unknown level: {0}")]
    UnknownLevel(String),
    #[error("layer '{layer}' has {actual} tiles, expected {expected}")]
    TileCountMismatch { layer: &'static str, expected: usize, actual: usize },
    #[error("level description could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level I/O error: {0}")]
    Io(#[from] io::Error),
}
