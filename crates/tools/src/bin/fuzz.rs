use anyhow::{Result, bail};
use clap::Parser;
use log::{debug, info};
use maze_core::mapgen::palette::DIRT_PLOWED;
use maze_core::{Direction, MapQuery, MazeLevel, MazeMap, Movers, Opening};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of levels to generate
    #[arg(short, long, default_value_t = 200)]
    levels: u32,
    /// Random-walk steps per level
    #[arg(long, default_value_t = 500)]
    steps: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_level(rng: &mut ChaCha8Rng) -> MazeLevel {
    let rows = 1 + (rng.next_u64() % 12) as usize;
    let cols = 1 + (rng.next_u64() % 16) as usize;
    MazeLevel {
        v_path_count: rows,
        h_path_count: cols,
        exit: Some(Opening { x: cols - 1, y: rows - 1, side: Direction::South }),
        exit_to: Some("town".to_string()),
        ..MazeLevel::corn()
    }
}

fn check_layout(map: &MazeMap, seed: u64) -> Result<()> {
    let draw_rows = map.overlay_rows(0, map.height() - 1);
    for space in map.grid().spaces() {
        if space.can_walk != (space.base_tile != DIRT_PLOWED) {
            bail!("Invariant failed: walkability mismatch at {space:?} (seed {seed})");
        }
        if space.overlay_y < space.y || space.overlay_y > space.y + 2 {
            bail!("Invariant failed: draw row out of reach at {space:?} (seed {seed})");
        }
        if !draw_rows.contains(&space.overlay_y) {
            bail!("Invariant failed: overlay rows miss {space:?} (seed {seed})");
        }
        let on_border = space.x == 0
            || space.y == 0
            || space.x == map.width() - 1
            || space.y == map.height() - 1;
        if on_border && space.can_walk {
            bail!("Invariant failed: walkable border at {space:?} (seed {seed})");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Starting maze fuzz on seed {} for {} levels...", args.seed, args.levels);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let headings: [&[Direction]; 6] = [
        &[Direction::North],
        &[Direction::South],
        &[Direction::East],
        &[Direction::West],
        &[Direction::North, Direction::East],
        &[Direction::South, Direction::West],
    ];

    for _ in 0..args.levels {
        let level_seed = rng.next_u64();
        let level = random_level(&mut rng);
        let map = MazeMap::generate(level_seed, &level)?;
        debug!("level {}x{} seed {level_seed}", level.h_path_count, level.v_path_count);
        check_layout(&map, level_seed)?;

        let start = map.entity_location(map.player_start(None));
        if level.v_path_count * level.h_path_count > 1 && !map.can_move_to(start) {
            bail!("Invariant failed: start tile is blocked (seed {level_seed})");
        }
        let mut movers = Movers::new();
        let player = movers.spawn(start, Direction::South);
        for _ in 0..args.steps {
            if let Some(moved) = movers.step(player, &map, choose(&mut rng, &headings))
                && !map.can_move_to(moved.to)
            {
                bail!("Invariant failed: mover entered corn at {:?} (seed {level_seed})", moved.to);
            }
        }
    }

    info!("checked {} levels", args.levels);
    println!("Fuzzing completed successfully.");
    Ok(())
}
