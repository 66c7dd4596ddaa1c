use crate::types::{Rect, TileId};

/// Append-only table from tile id to the tile's source rectangle in the
/// level's texture atlas. Ids are dense and assigned in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileRegistry {
    bounds: Vec<Rect>,
}

impl TileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry covering a `columns × rows` atlas of uniform tiles, scanned row by row.
    pub fn grid_scan(columns: u32, rows: u32, tile_width: u32, tile_height: u32) -> Self {
        let mut registry = Self::new();
        for row in 0..rows {
            for column in 0..columns {
                registry.push(Rect::new(
                    (column * tile_width) as i32,
                    (row * tile_height) as i32,
                    tile_width as i32,
                    tile_height as i32,
                ));
            }
        }
        registry
    }

    pub fn push(&mut self, bounds: Rect) -> TileId {
        let id = self.bounds.len() as TileId;
        self.bounds.push(bounds);
        id
    }

    pub fn get(&self, id: TileId) -> Option<Rect> {
        self.bounds.get(id as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}
