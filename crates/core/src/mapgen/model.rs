//! Tile-space data model shared by the layout passes and the map façade.

use crate::types::TileId;

/// One rendered tile position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Space {
    pub x: usize,
    pub y: usize,
    pub base_tile: TileId,
    pub can_walk: bool,
    /// Row at which the overlay is ordered against entities. Tall sprites
    /// are ordered with the row holding their visual base.
    pub overlay_y: usize,
    /// Growth drawn behind this tile's own sprite.
    pub overlay_tile1: Option<TileId>,
    /// This tile's own growth sprite.
    pub overlay_tile2: Option<TileId>,
}

impl Space {
    pub fn new(x: usize, y: usize, base_tile: TileId, can_walk: bool) -> Self {
        Self {
            x,
            y,
            base_tile,
            can_walk,
            overlay_y: y,
            overlay_tile1: None,
            overlay_tile2: None,
        }
    }

    /// Overlay sprites in paint order. The second is skipped when it repeats the first.
    pub fn overlay_sprites(&self) -> impl Iterator<Item = TileId> {
        let second = self.overlay_tile2.filter(|&tile| Some(tile) != self.overlay_tile1);
        self.overlay_tile1.into_iter().chain(second)
    }

    pub(crate) fn clear_overlays(&mut self) {
        self.overlay_y = self.y;
        self.overlay_tile1 = None;
        self.overlay_tile2 = None;
    }
}

/// Row-major space buffer written by the layout passes before it is frozen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileLayout {
    pub width: usize,
    pub height: usize,
    pub spaces: Vec<Space>,
}

impl TileLayout {
    pub fn space(&self, x: usize, y: usize) -> Option<&Space> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.spaces.get(y * self.width + x)
    }

    pub(crate) fn space_mut(&mut self, x: usize, y: usize) -> &mut Space {
        &mut self.spaces[y * self.width + x]
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.spaces.len() * 16);
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for space in &self.spaces {
            bytes.extend(space.base_tile.to_le_bytes());
            bytes.push(u8::from(space.can_walk));
            bytes.extend((space.overlay_y as u32).to_le_bytes());
            for overlay in [space.overlay_tile1, space.overlay_tile2] {
                bytes.extend(overlay.unwrap_or(u32::MAX).to_le_bytes());
            }
        }
        bytes
    }
}
