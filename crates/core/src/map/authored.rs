use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::mapgen::{Space, TileLayout};
use crate::types::{Point, Pos, Rect, TileId};

use super::{MapQuery, SpaceGrid, Teleport, TileRegistry};

const DEFAULT_TILE_SIZE: u32 = 32;

fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}

/// Decoration drawn over the base layer, ordered `elevation` rows below its
/// own row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayLayer {
    pub elevation: usize,
    pub tiles: Vec<Option<TileId>>,
}

/// Hand-authored level description as stored on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthoredLevel {
    pub width: usize,
    pub height: usize,
    #[serde(default = "default_tile_size")]
    pub tile_width: u32,
    #[serde(default = "default_tile_size")]
    pub tile_height: u32,
    pub texture: String,
    pub atlas_columns: u32,
    pub atlas_rows: u32,
    /// Row-major base tile ids.
    pub base: Vec<TileId>,
    #[serde(default)]
    pub overlay: Option<OverlayLayer>,
    pub spawn: Pos,
    /// Start tiles keyed by the level the player arrives from.
    #[serde(default)]
    pub spawns_from: BTreeMap<String, Pos>,
    #[serde(default)]
    pub teleports: Vec<Teleport>,
    /// Blocked pixel rectangles.
    #[serde(default)]
    pub walls: Vec<Rect>,
}

impl AuthoredLevel {
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        debug!("loading authored level from {}", path.display());
        Self::from_json_str(&text)
    }

    pub fn build(&self) -> Result<AuthoredMap, LevelError> {
        if self.width == 0 || self.height == 0 {
            return Err(LevelError::InvalidDimension { width: self.width, height: self.height });
        }
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(LevelError::InvalidTileSize {
                width: self.tile_width,
                height: self.tile_height,
            });
        }
        check_pixel_extent("width", self.width, self.tile_width)?;
        check_pixel_extent("height", self.height, self.tile_height)?;
        check_pixel_extent("atlas width", self.atlas_columns as usize, self.tile_width)?;
        check_pixel_extent("atlas height", self.atlas_rows as usize, self.tile_height)?;

        let expected = self
            .width
            .checked_mul(self.height)
            .ok_or(LevelError::OutOfRange { what: "tile count" })?;
        check_tile_count("base", expected, self.base.len())?;
        if let Some(overlay) = &self.overlay {
            check_tile_count("overlay", expected, overlay.tiles.len())?;
        }

        let spaces = self
            .base
            .iter()
            .enumerate()
            .map(|(index, &base_tile)| -> Result<Space, LevelError> {
                let (x, y) = (index % self.width, index / self.width);
                let mut space = Space::new(x, y, base_tile, self.is_walkable(x, y));
                if let Some(overlay) = &self.overlay
                    && let Some(tile) = overlay.tiles[index]
                {
                    space.overlay_tile1 = Some(tile);
                    space.overlay_y = y
                        .checked_add(overlay.elevation)
                        .ok_or(LevelError::OutOfRange { what: "overlay elevation" })?;
                }
                Ok(space)
            })
            .collect::<Result<_, LevelError>>()?;
        let layout = TileLayout { width: self.width, height: self.height, spaces };

        Ok(AuthoredMap {
            grid: SpaceGrid::freeze(layout),
            registry: TileRegistry::grid_scan(
                self.atlas_columns,
                self.atlas_rows,
                self.tile_width,
                self.tile_height,
            ),
            teleports: self.teleports.clone(),
            walls: self.walls.clone(),
            spawn: self.spawn,
            spawns_from: self.spawns_from.clone(),
            texture: self.texture.clone(),
            tile_width: self.tile_width,
            tile_height: self.tile_height,
        })
    }

    /// Grid summary of the walls: a space is open unless a wall covers its
    /// centre pixel. Pixel extents are checked before this runs.
    fn is_walkable(&self, x: usize, y: usize) -> bool {
        let centre = Point {
            x: (x as u32 * self.tile_width + self.tile_width / 2) as i32,
            y: (y as u32 * self.tile_height + self.tile_height / 2) as i32,
        };
        !self.walls.iter().any(|wall| wall.contains(centre))
    }
}

/// `tiles * tile_size` pixels must be addressable as `i32`.
fn check_pixel_extent(what: &'static str, tiles: usize, tile_size: u32) -> Result<(), LevelError> {
    u32::try_from(tiles)
        .ok()
        .and_then(|tiles| tiles.checked_mul(tile_size))
        .filter(|&pixels| i32::try_from(pixels).is_ok())
        .map(|_| ())
        .ok_or(LevelError::OutOfRange { what })
}

fn check_tile_count(layer: &'static str, expected: usize, actual: usize) -> Result<(), LevelError> {
    if expected == actual {
        Ok(())
    } else {
        Err(LevelError::TileCountMismatch { layer, expected, actual })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthoredMap {
    grid: SpaceGrid,
    registry: TileRegistry,
    teleports: Vec<Teleport>,
    walls: Vec<Rect>,
    spawn: Pos,
    spawns_from: BTreeMap<String, Pos>,
    texture: String,
    tile_width: u32,
    tile_height: u32,
}

impl AuthoredMap {
    pub fn texture(&self) -> &str {
        &self.texture
    }
}

impl MapQuery for AuthoredMap {
    fn grid(&self) -> &SpaceGrid {
        &self.grid
    }

    fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    fn tile_width(&self) -> u32 {
        self.tile_width
    }

    fn tile_height(&self) -> u32 {
        self.tile_height
    }

    fn teleports(&self) -> &[Teleport] {
        &self.teleports
    }

    /// Walls block the exact pixels they cover, not just whole tiles.
    fn can_move_to(&self, point: Point) -> bool {
        let tile = self.tile_of(point);
        self.space(tile.x, tile.y).is_some()
            && !self.walls.iter().any(|wall| wall.contains(point))
    }

    fn player_start(&self, from_level: Option<&str>) -> Pos {
        from_level.and_then(|name| self.spawns_from.get(name)).copied().unwrap_or(self.spawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Level;

    const TOWN: &str = r#"{
        "width": 4,
        "height": 3,
        "tile_width": 16,
        "tile_height": 16,
        "texture": "gfx/town",
        "atlas_columns": 8,
        "atlas_rows": 8,
        "base": [1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3],
        "overlay": { "elevation": 1, "tiles": [null, 9, null, null, null, null, null, null, null, null, null, 12] },
        "spawn": { "y": 1, "x": 1 },
        "spawns_from": { "corn": { "y": 2, "x": 3 } },
        "teleports": [ { "region": { "x": 48, "y": 0, "width": 16, "height": 16 }, "to_level": "corn" } ],
        "walls": [ { "x": 0, "y": 32, "width": 32, "height": 16 } ]
    }"#;

    fn town() -> AuthoredMap {
        AuthoredLevel::from_json_str(TOWN).expect("valid json").build().expect("valid level")
    }

    #[test]
    fn walls_block_spaces_whose_centre_they_cover() {
        let map = town();
        assert!(!map.space(0, 2).expect("in bounds").can_walk);
        assert!(!map.space(1, 2).expect("in bounds").can_walk);
        assert!(map.space(2, 2).expect("in bounds").can_walk);
        assert!(map.can_move_to(Point { x: 40, y: 40 }));
        assert!(!map.can_move_to(Point { x: 8, y: 40 }));
        assert!(!map.can_move_to(Point { x: 64, y: 8 }));
    }

    #[test]
    fn overlay_tiles_are_lifted_by_elevation() {
        let map = town();
        let space = map.space(1, 0).expect("in bounds");
        assert_eq!(space.overlay_tile1, Some(9));
        assert_eq!(space.overlay_y, 1);
        let ordered: Vec<_> = map.overlays(1, 1).map(|space| space.y).collect();
        assert_eq!(ordered, vec![0, 1]);
        assert_eq!(map.overlays(1, 1).filter_map(|space| space.overlay_tile1).count(), 1);
        assert_eq!(map.space(3, 2).expect("in bounds").overlay_y, 3);
        assert_eq!(map.space(0, 0).expect("in bounds").overlay_y, 0);
        assert_eq!(map.overlay_rows(0, 2), 0..=3);
    }

    #[test]
    fn start_depends_on_origin_level() {
        let map = town();
        assert_eq!(map.player_start(Some("corn")), Pos { y: 2, x: 3 });
        assert_eq!(map.player_start(Some("cellar")), Pos { y: 1, x: 1 });
        assert_eq!(map.player_start(None), Pos { y: 1, x: 1 });
    }

    #[test]
    fn teleport_regions_resolve_destination() {
        let map = town();
        assert_eq!(map.check_teleport(Point { x: 50, y: 3 }), Some("corn"));
        assert_eq!(map.check_teleport(Point { x: 47, y: 3 }), None);
    }

    #[test]
    fn registry_is_a_uniform_atlas_scan() {
        let map = town();
        assert_eq!(map.registry().len(), 64);
        assert_eq!(map.tile_rect(9), Some(Rect::new(16, 16, 16, 16)));
        assert_eq!(map.tile_rect(64), None);
        assert_eq!(map.pixel_size(), (64, 48));
    }

    #[test]
    fn mismatched_layers_are_rejected() {
        let mut level = AuthoredLevel::from_json_str(TOWN).expect("valid json");
        level.base.pop();
        let err = level.build().expect_err("short base layer");
        assert!(matches!(
            err,
            LevelError::TileCountMismatch { layer: "base", expected: 12, actual: 11 }
        ));

        let mut level = AuthoredLevel::from_json_str(TOWN).expect("valid json");
        if let Some(overlay) = level.overlay.as_mut() {
            overlay.tiles.push(None);
        }
        let err = level.build().expect_err("long overlay layer");
        assert!(matches!(err, LevelError::TileCountMismatch { layer: "overlay", .. }));
    }

    #[test]
    fn zero_tile_size_is_rejected() {
        let mut level = AuthoredLevel::from_json_str(TOWN).expect("valid json");
        level.tile_width = 0;
        let err = level.build().expect_err("zero tile width");
        assert!(matches!(err, LevelError::InvalidTileSize { width: 0, height: 16 }));

        level.tile_width = 16;
        level.tile_height = 0;
        assert!(matches!(level.build(), Err(LevelError::InvalidTileSize { height: 0, .. })));
    }

    #[test]
    fn oversized_values_are_rejected_instead_of_overflowing() {
        let mut level = AuthoredLevel::from_json_str(TOWN).expect("valid json");
        level.tile_width = u32::MAX;
        let err = level.build().expect_err("pixel width overflows");
        assert!(matches!(err, LevelError::OutOfRange { what: "width" }));

        let mut level = AuthoredLevel::from_json_str(TOWN).expect("valid json");
        if let Some(overlay) = level.overlay.as_mut() {
            overlay.elevation = usize::MAX;
        }
        let err = level.build().expect_err("draw row overflows");
        assert!(matches!(err, LevelError::OutOfRange { what: "overlay elevation" }));
    }

    #[test]
    fn walls_block_the_pixels_they_cover_inside_a_tile() {
        let level = AuthoredLevel {
            width: 2,
            height: 2,
            tile_width: 32,
            tile_height: 32,
            texture: "gfx/fence".to_string(),
            atlas_columns: 2,
            atlas_rows: 2,
            base: vec![0; 4],
            overlay: None,
            spawn: Pos { y: 1, x: 0 },
            spawns_from: BTreeMap::new(),
            teleports: Vec::new(),
            walls: vec![Rect::new(0, 0, 64, 15)],
        };
        let map = level.build().expect("valid level");

        assert!(map.space(0, 0).expect("in bounds").can_walk, "centre is left uncovered");
        assert!(!map.can_move_to(Point { x: 10, y: 5 }));
        assert!(!map.can_move_to(Point { x: 63, y: 14 }));
        assert!(map.can_move_to(Point { x: 10, y: 15 }));
        assert!(!map.can_move_to(Point { x: 10, y: 64 }));

        let level = Level::Authored(map);
        assert!(!level.can_move_to(Point { x: 10, y: 5 }));
        assert!(level.can_move_to(Point { x: 40, y: 40 }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = AuthoredLevel::from_json_str("{\"width\": 3").expect_err("truncated");
        assert!(matches!(err, LevelError::Parse(_)));
    }
}
