//! Pixel-stepped movers that walk a level and report their own moves.

use slotmap::SlotMap;

use crate::map::MapQuery;
use crate::types::{Direction, EntityId, Point};

/// Pixels covered per held direction per step.
pub const STEP_PIXELS: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mover {
    pub location: Point,
    pub facing: Direction,
}

/// A location change, handed back to whoever keeps a spatial index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityMoved {
    pub id: EntityId,
    pub from: Point,
    pub to: Point,
}

#[derive(Clone, Debug, Default)]
pub struct Movers {
    movers: SlotMap<EntityId, Mover>,
}

impl Movers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, location: Point, facing: Direction) -> EntityId {
        self.movers.insert(Mover { location, facing })
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Mover> {
        self.movers.remove(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Mover> {
        self.movers.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Mover)> {
        self.movers.iter()
    }

    pub fn len(&self) -> usize {
        self.movers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movers.is_empty()
    }

    /// Teleport a mover, e.g. to the start tile of a freshly entered level.
    pub fn place(&mut self, id: EntityId, location: Point) -> Option<EntityMoved> {
        let mover = self.movers.get_mut(id)?;
        let from = mover.location;
        mover.location = location;
        (from != location).then_some(EntityMoved { id, from, to: location })
    }

    /// Advance one step along the held directions. Each axis is tried on its
    /// own, horizontal first, so a blocked axis does not stop the other one.
    pub fn step(
        &mut self,
        id: EntityId,
        map: &impl MapQuery,
        heading: &[Direction],
    ) -> Option<EntityMoved> {
        let from = self.movers.get(id)?.location;
        let (dx, dy) = heading_delta(heading);

        let mut to = from;
        if dx != 0 {
            let target = Point { x: from.x + dx * STEP_PIXELS, y: from.y };
            if self.can_enter(id, map, from, target) {
                to = target;
            }
        }
        if dy != 0 {
            let target = Point { x: to.x, y: from.y + dy * STEP_PIXELS };
            if self.can_enter(id, map, to, target) {
                to = target;
            }
        }

        let mover = self.movers.get_mut(id)?;
        if let Some(facing) = facing_for(from, to) {
            mover.facing = facing;
        }
        mover.location = to;
        (from != to).then_some(EntityMoved { id, from, to })
    }

    fn can_enter(&self, id: EntityId, map: &impl MapQuery, from: Point, target: Point) -> bool {
        if !map.can_move_to(target) {
            return false;
        }
        let tile = map.tile_of(target);
        tile == map.tile_of(from)
            || !self
                .movers
                .iter()
                .any(|(other, mover)| other != id && map.tile_of(mover.location) == tile)
    }
}

fn heading_delta(heading: &[Direction]) -> (i32, i32) {
    let held = |direction: Direction| i32::from(heading.contains(&direction));
    (
        held(Direction::East) - held(Direction::West),
        held(Direction::South) - held(Direction::North),
    )
}

/// Horizontal facing wins on diagonal moves.
fn facing_for(from: Point, to: Point) -> Option<Direction> {
    if to.x < from.x {
        Some(Direction::West)
    } else if to.x > from.x {
        Some(Direction::East)
    } else if to.y < from.y {
        Some(Direction::North)
    } else if to.y > from.y {
        Some(Direction::South)
    } else {
        None
    }
}
