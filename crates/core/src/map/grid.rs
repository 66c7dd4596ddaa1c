use std::ops::RangeInclusive;

use xxhash_rust::xxh3::xxh3_64;

use crate::mapgen::{Space, TileLayout};

/// Smallest and largest draw row among one row's spaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowBounds {
    pub min_overlay: usize,
    pub max_overlay: usize,
}

/// Frozen row-major space grid. Row bounds are computed once at freeze time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpaceGrid {
    layout: TileLayout,
    rows: Vec<RowBounds>,
}

impl SpaceGrid {
    pub fn freeze(layout: TileLayout) -> Self {
        let rows = layout
            .spaces
            .chunks(layout.width.max(1))
            .take(layout.height)
            .map(|row| RowBounds {
                min_overlay: row.iter().map(|space| space.overlay_y).min().unwrap_or_default(),
                max_overlay: row.iter().map(|space| space.overlay_y).max().unwrap_or_default(),
            })
            .collect();
        Self { layout, rows }
    }

    pub fn width(&self) -> usize {
        self.layout.width
    }

    pub fn height(&self) -> usize {
        self.layout.height
    }

    pub fn spaces(&self) -> &[Space] {
        &self.layout.spaces
    }

    pub fn space(&self, x: i32, y: i32) -> Option<&Space> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.layout.space(x, y)
    }

    pub fn row_bounds(&self, y: usize) -> Option<RowBounds> {
        self.rows.get(y).copied()
    }

    /// Spaces in `column` whose overlay is ordered at `draw_row`, top to bottom.
    pub fn overlays(&self, column: usize, draw_row: usize) -> impl Iterator<Item = &Space> {
        (0..self.layout.height)
            .filter_map(move |y| self.layout.space(column, y))
            .filter(move |space| space.overlay_y == draw_row)
    }

    /// Draw rows holding any overlay of the spaces in rows `start_row..=end_row`.
    /// The window is clamped to the grid; an empty window gives an empty range.
    pub fn overlay_rows(&self, start_row: usize, end_row: usize) -> RangeInclusive<usize> {
        let end_row = end_row.min(self.rows.len().saturating_sub(1));
        let Some(window) = self.rows.get(start_row..=end_row) else {
            return RangeInclusive::new(1, 0);
        };
        let min = window.iter().map(|bounds| bounds.min_overlay).min();
        let max = window.iter().map(|bounds| bounds.max_overlay).max();
        match (min, max) {
            (Some(min), Some(max)) => min..=max,
            _ => RangeInclusive::new(1, 0),
        }
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        self.layout.canonical_bytes()
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
