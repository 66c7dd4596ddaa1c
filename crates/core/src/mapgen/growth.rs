//! Corn growth overlay pass.
//!
//! Corn grows on every plowed space. A stalk is several tiles tall, so the
//! growth spills two rows above the top of each plowed run into the path.
//! Each column is scanned bottom-up through a small state machine that
//! classifies every space as a growth stage. A second pass then picks the
//! overlay sprites from the stage of each space and of its west and east
//! neighbors, and moves the draw row of tall stages down to the row holding
//! the stalk's base.

use crate::types::TileId;

use super::model::TileLayout;
use super::palette::{CORN_BOTTOM, CORN_TOP_FAR, CORN_TOP_FILL, CORN_TOP_NEAR, DIRT_PLOWED};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthState {
    Topped,
    Ending,
    Planted,
    Empty,
}

/// Growth stage of one space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthClass {
    Empty,
    Base,
    TopNear,
    TopFill,
    TopFar,
}

impl GrowthClass {
    /// Whether this stage's own sprite joins up with a neighbor of stage `other`.
    fn connects_to(self, other: GrowthClass) -> bool {
        match self {
            Self::Empty => false,
            Self::Base | Self::TopFar => other != Self::Empty,
            Self::TopNear => matches!(other, Self::TopFill | Self::TopNear),
            Self::TopFill => other == Self::TopFill,
        }
    }

    /// How many rows below its own row the stage is ordered for drawing.
    pub fn draw_row_offset(self) -> usize {
        match self {
            Self::TopFar => 2,
            Self::TopFill | Self::TopNear => 1,
            Self::Empty | Self::Base => 0,
        }
    }
}

/// Scans start in `Topped`, so plowed ground touching the bottom border is
/// already full-grown.
pub const INITIAL_STATE: GrowthState = GrowthState::Topped;

/// Grid edges read as full-grown neighbors.
const EDGE_CLASS: GrowthClass = GrowthClass::TopFill;

/// One step upward through a column: the class emitted for the current space
/// and the state carried to the space above it.
pub fn step(state: GrowthState, plowed: bool) -> (GrowthClass, GrowthState) {
    let grown = if plowed { GrowthState::Topped } else { GrowthState::Ending };
    match state {
        GrowthState::Topped => (GrowthClass::TopFill, grown),
        GrowthState::Ending => (GrowthClass::TopFar, GrowthState::Empty),
        GrowthState::Planted => (GrowthClass::TopNear, grown),
        GrowthState::Empty if plowed => (GrowthClass::Base, GrowthState::Planted),
        GrowthState::Empty => (GrowthClass::Empty, GrowthState::Empty),
    }
}

/// Classes for a column given bottom-up plowed flags, in the same order.
pub fn classify_column(plowed_bottom_up: impl IntoIterator<Item = bool>) -> Vec<GrowthClass> {
    let mut state = INITIAL_STATE;
    plowed_bottom_up
        .into_iter()
        .map(|plowed| {
            let (class, next) = step(state, plowed);
            state = next;
            class
        })
        .collect()
}

fn behind_sprite(west: GrowthClass, east: GrowthClass) -> Option<TileId> {
    [
        (GrowthClass::Base, CORN_BOTTOM),
        (GrowthClass::TopNear, CORN_TOP_NEAR),
        (GrowthClass::TopFar, CORN_TOP_FAR),
    ]
    .into_iter()
    .find(|&(class, _)| west == class || east == class)
    .map(|(class, sprites)| sprites.pick(west == class, east == class))
}

fn own_sprite(class: GrowthClass, west: GrowthClass, east: GrowthClass) -> Option<TileId> {
    let sprites = match class {
        GrowthClass::Empty => return None,
        GrowthClass::Base => CORN_BOTTOM,
        GrowthClass::TopNear => CORN_TOP_NEAR,
        GrowthClass::TopFill => CORN_TOP_FILL,
        GrowthClass::TopFar => CORN_TOP_FAR,
    };
    Some(sprites.pick(class.connects_to(west), class.connects_to(east)))
}

/// Growth classes for the whole layout, row-major.
pub fn classify(layout: &TileLayout) -> Vec<GrowthClass> {
    let mut classes = vec![GrowthClass::Empty; layout.width * layout.height];
    for x in 0..layout.width {
        let mut state = INITIAL_STATE;
        for y in (0..layout.height).rev() {
            let index = y * layout.width + x;
            let (class, next) = step(state, layout.spaces[index].base_tile == DIRT_PLOWED);
            classes[index] = class;
            state = next;
        }
    }
    classes
}

/// Assign overlay sprites and draw rows in place. Only base tiles are read,
/// so resolving an already resolved layout changes nothing.
pub fn resolve(layout: &mut TileLayout) {
    let classes = classify(layout);
    let width = layout.width;
    for y in 0..layout.height {
        for x in 0..width {
            let class = classes[y * width + x];
            let west = if x > 0 { classes[y * width + x - 1] } else { EDGE_CLASS };
            let east = if x + 1 < width { classes[y * width + x + 1] } else { EDGE_CLASS };

            let space = layout.space_mut(x, y);
            space.clear_overlays();
            if class != GrowthClass::Empty {
                space.overlay_tile1 = behind_sprite(west, east);
            }
            space.overlay_tile2 = own_sprite(class, west, east);
            space.overlay_y = y + class.draw_row_offset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::model::Space;
    use super::*;
    use GrowthClass::{Base, Empty, TopFar, TopFill, TopNear};

    /// Bottom-up flags for a column: `below` unplowed rows, a plowed run of
    /// `run` rows, then `above` unplowed rows.
    fn column(below: usize, run: usize, above: usize) -> Vec<bool> {
        let mut flags = vec![false; below];
        flags.extend(vec![true; run]);
        flags.extend(vec![false; above]);
        flags
    }

    #[test]
    fn plowed_run_of_one_grows_base_then_two_tops() {
        let classes = classify_column(column(3, 1, 4));
        assert_eq!(classes, vec![TopFill, TopFar, Empty, Base, TopNear, TopFar, Empty, Empty]);
    }

    #[test]
    fn plowed_run_of_two_reaches_full_height() {
        let classes = classify_column(column(3, 2, 4));
        assert_eq!(
            classes,
            vec![TopFill, TopFar, Empty, Base, TopNear, TopFill, TopFar, Empty, Empty]
        );
    }

    #[test]
    fn plowed_run_of_five_fills_between_base_and_tops() {
        let classes = classify_column(column(3, 5, 4));
        assert_eq!(classes.len(), 12);
        assert_eq!(&classes[..3], &[TopFill, TopFar, Empty]);
        assert_eq!(&classes[3..5], &[Base, TopNear]);
        assert_eq!(&classes[5..8], &[TopFill, TopFill, TopFill]);
        assert_eq!(&classes[8..], &[TopFill, TopFar, Empty, Empty]);
    }

    #[test]
    fn plowed_ground_at_the_bottom_edge_starts_full_grown() {
        let classes = classify_column([true, true, false, false, false]);
        assert_eq!(classes, vec![TopFill, TopFill, TopFill, TopFar, Empty]);
    }

    #[test]
    fn state_machine_transitions_match_table() {
        assert_eq!(step(GrowthState::Topped, true), (TopFill, GrowthState::Topped));
        assert_eq!(step(GrowthState::Topped, false), (TopFill, GrowthState::Ending));
        assert_eq!(step(GrowthState::Ending, true), (TopFar, GrowthState::Empty));
        assert_eq!(step(GrowthState::Ending, false), (TopFar, GrowthState::Empty));
        assert_eq!(step(GrowthState::Planted, true), (TopNear, GrowthState::Topped));
        assert_eq!(step(GrowthState::Planted, false), (TopNear, GrowthState::Ending));
        assert_eq!(step(GrowthState::Empty, true), (Base, GrowthState::Planted));
        assert_eq!(step(GrowthState::Empty, false), (Empty, GrowthState::Empty));
    }

    #[test]
    fn behind_sprite_prefers_base_then_near_then_far() {
        assert_eq!(behind_sprite(Base, TopNear), Some(CORN_BOTTOM.west));
        assert_eq!(behind_sprite(TopNear, Base), Some(CORN_BOTTOM.east));
        assert_eq!(behind_sprite(TopNear, TopNear), Some(CORN_TOP_NEAR.east_west));
        assert_eq!(behind_sprite(TopFill, TopFar), Some(CORN_TOP_FAR.east));
        assert_eq!(behind_sprite(TopFill, Empty), None);
    }

    #[test]
    fn own_sprite_suffix_follows_neighbor_compatibility() {
        assert_eq!(own_sprite(Base, TopFill, Empty), Some(CORN_BOTTOM.west));
        assert_eq!(own_sprite(Base, Empty, Empty), Some(CORN_BOTTOM.none));
        assert_eq!(own_sprite(TopNear, TopFill, TopNear), Some(CORN_TOP_NEAR.east_west));
        assert_eq!(own_sprite(TopNear, Base, TopFill), Some(CORN_TOP_NEAR.east));
        assert_eq!(own_sprite(TopFill, TopFill, TopNear), Some(CORN_TOP_FILL.west));
        assert_eq!(own_sprite(TopFar, Empty, Empty), Some(CORN_TOP_FAR.none));
        assert_eq!(own_sprite(TopFar, Empty, TopFill), Some(CORN_TOP_FAR.east));
        assert_eq!(own_sprite(TopFar, Base, TopFar), Some(CORN_TOP_FAR.east_west));
        assert_eq!(own_sprite(Empty, Base, Base), None);
    }

    fn strip(plowed: &[&[bool]]) -> TileLayout {
        let height = plowed.len();
        let width = plowed[0].len();
        let mut spaces = Vec::new();
        for (y, row) in plowed.iter().enumerate() {
            for (x, &is_plowed) in row.iter().enumerate() {
                let tile = if is_plowed { DIRT_PLOWED } else { 0 };
                spaces.push(Space::new(x, y, tile, !is_plowed));
            }
        }
        TileLayout { width, height, spaces }
    }

    #[test]
    fn resolve_shifts_draw_rows_of_tall_stages() {
        let mut layout =
            strip(&[&[false], &[false], &[false], &[true], &[false], &[false], &[false]]);
        resolve(&mut layout);
        let rows: Vec<_> = layout.spaces.iter().map(|space| space.overlay_y).collect();
        // top-down: Empty, TopFar, TopNear, Base, Empty, TopFar, TopFill
        assert_eq!(rows, vec![0, 3, 3, 3, 4, 7, 7]);
        assert_eq!(layout.spaces[0].overlay_tile2, None);
        assert_eq!(layout.spaces[1].overlay_tile2, Some(CORN_TOP_FAR.east_west));
    }

    #[test]
    fn resolve_ignores_prior_overlay_state() {
        let plowed: &[&[bool]] = &[
            &[true, true, true, true],
            &[false, false, true, false],
            &[false, true, true, false],
            &[false, false, false, false],
            &[true, true, true, true],
        ];
        let mut clean = strip(plowed);
        resolve(&mut clean);

        let mut stale = strip(plowed);
        for (index, space) in stale.spaces.iter_mut().enumerate() {
            space.overlay_y = space.y + 7 + index;
            space.overlay_tile1 = Some(900 + index as TileId);
            space.overlay_tile2 = (index % 2 == 0).then_some(7);
        }
        resolve(&mut stale);
        assert_eq!(stale, clean);

        resolve(&mut stale);
        assert_eq!(stale, clean);
    }

    #[test]
    fn draw_row_is_never_above_own_row() {
        let mut layout = strip(&[
            &[true, false, true],
            &[true, false, false],
            &[false, true, false],
            &[true, true, true],
        ]);
        resolve(&mut layout);
        for space in &layout.spaces {
            assert!(space.overlay_y >= space.y && space.overlay_y <= space.y + 2, "{space:?}");
        }
    }
}
