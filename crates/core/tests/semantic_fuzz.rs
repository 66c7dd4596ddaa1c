use maze_core::mapgen::palette::DIRT_PLOWED;
use maze_core::{Direction, MapQuery, MazeGenerator, MazeLevel, MazeMap, Movers, Pos};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn check_level_invariants(seed: u64, cell_width: usize, cell_height: usize) -> Result<(), String> {
    let generator = MazeGenerator::new(seed, cell_width, cell_height);
    let graph = generator.carve().map_err(|err| err.to_string())?;
    if graph.carved_edge_count() != cell_width * cell_height - 1 {
        return Err(format!("Invariant failed: not a spanning tree on seed {seed}"));
    }

    let level = MazeLevel {
        v_path_count: cell_height,
        h_path_count: cell_width,
        exit: None,
        exit_to: None,
        player_start: Pos { y: 2, x: 2 },
    };
    let map = MazeMap::generate(seed, &level).map_err(|err| err.to_string())?;
    if (map.width(), map.height()) != (4 * cell_width + 1, 4 * cell_height + 2) {
        return Err(format!("Invariant failed: grid size on seed {seed}"));
    }

    let draw_rows = map.overlay_rows(0, map.height() - 1);
    for space in map.grid().spaces() {
        if space.can_walk != (space.base_tile != DIRT_PLOWED) {
            return Err(format!("Invariant failed: walkability of {space:?} on seed {seed}"));
        }
        if space.overlay_y < space.y || space.overlay_y > space.y + 2 {
            return Err(format!("Invariant failed: draw row of {space:?} on seed {seed}"));
        }
        if !draw_rows.contains(&space.overlay_y) {
            return Err(format!("Invariant failed: draw row outside overlay rows on seed {seed}"));
        }
        if space.base_tile == DIRT_PLOWED && space.overlay_tile2.is_none() {
            return Err(format!("Invariant failed: bare plowed ground on seed {seed}"));
        }
        let on_border = space.x == 0
            || space.y == 0
            || space.x == map.width() - 1
            || space.y == map.height() - 1;
        if on_border && space.can_walk {
            return Err(format!("Invariant failed: walkable border on seed {seed}"));
        }
        if map.tile_rect(space.base_tile).is_none() {
            return Err(format!("Invariant failed: unregistered tile on seed {seed}"));
        }
    }
    Ok(())
}

fn run_random_walk(map_seed: u64, walk_seed: u64, steps: u32) -> Result<(), String> {
    let map = MazeMap::generate(map_seed, &MazeLevel::corn()).map_err(|err| err.to_string())?;
    let mut rng = ChaCha8Rng::seed_from_u64(walk_seed);
    let mut movers = Movers::new();
    let player = movers.spawn(map.entity_location(map.player_start(None)), Direction::South);

    let headings: [&[Direction]; 8] = [
        &[Direction::North],
        &[Direction::South],
        &[Direction::East],
        &[Direction::West],
        &[Direction::North, Direction::East],
        &[Direction::North, Direction::West],
        &[Direction::South, Direction::East],
        &[Direction::South, Direction::West],
    ];
    for _ in 0..steps {
        let heading = choose(&mut rng, &headings);
        if let Some(moved) = movers.step(player, &map, heading) {
            if !map.can_move_to(moved.to) {
                return Err(format!(
                    "Invariant failed: mover inside corn at {:?} on map_seed {map_seed}",
                    moved.to
                ));
            }
            let distance = moved.to.x.abs_diff(moved.from.x) + moved.to.y.abs_diff(moved.from.y);
            if distance == 0 || distance > 8 {
                return Err(format!(
                    "Invariant failed: step of {distance}px on map_seed {map_seed}"
                ));
            }
        }
    }
    Ok(())
}

#[test]
fn test_fuzz_generated_levels_hold_layout_invariants() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(64));
    let inputs = (any::<u64>(), 1_usize..=10, 1_usize..=10);

    runner
        .run(&inputs, |(seed, cell_width, cell_height)| {
            check_level_invariants(seed, cell_width, cell_height).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("generated levels should preserve layout invariants");
}

#[test]
fn test_fuzz_random_walks_stay_on_open_ground() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(16));
    let seeds = (any::<u64>(), any::<u64>());

    runner
        .run(&seeds, |(map_seed, walk_seed)| {
            run_random_walk(map_seed, walk_seed, 500).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("random walks should never enter plowed ground");
}
