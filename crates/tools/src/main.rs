use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use maze_core::{
    CatalogConfig, Direction, LevelCatalog, LevelSpec, MapQuery, MazeLevel, Opening, Pos,
};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Cell rows of the generated maze
    #[arg(long, default_value_t = 12)]
    rows: usize,
    /// Cell columns of the generated maze
    #[arg(long, default_value_t = 16)]
    cols: usize,
    /// Level catalog JSON; replaces the generated maze settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Level to enter
    #[arg(short, long, default_value = "corn")]
    level: String,
    /// Print a JSON summary instead of the ASCII map
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    level: &'a str,
    width: usize,
    height: usize,
    walkable: usize,
    start: Pos,
    exits: Vec<&'a str>,
    fingerprint: String,
}

fn catalog_config(args: &Args) -> Result<CatalogConfig> {
    if let Some(path) = &args.config {
        return CatalogConfig::load(path)
            .with_context(|| format!("Failed to load level catalog: {}", path.display()));
    }
    if args.rows == 0 || args.cols == 0 {
        bail!("maze needs at least one row and one column, got {}x{}", args.rows, args.cols);
    }
    let mut config = CatalogConfig::default();
    config.levels.insert(
        args.level.clone(),
        LevelSpec::Maze(MazeLevel {
            v_path_count: args.rows,
            h_path_count: args.cols,
            exit: Some(Opening { x: args.cols - 1, y: args.rows - 1, side: Direction::South }),
            ..MazeLevel::corn()
        }),
    );
    Ok(config)
}

fn render(map: &impl MapQuery, start: Pos) -> String {
    let mut out = String::with_capacity((map.width() + 1) * map.height());
    for y in 0..map.height() as i32 {
        for x in 0..map.width() as i32 {
            let tile = Pos { y, x };
            let glyph = if tile == start {
                '@'
            } else if map.check_teleport(map.entity_location(tile)).is_some() {
                'E'
            } else if map.space(x, y).is_some_and(|space| space.can_walk) {
                '.'
            } else {
                '#'
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut catalog = LevelCatalog::new(args.seed, catalog_config(&args)?);
    let arrival = catalog
        .navigate_to(&args.level)
        .with_context(|| format!("Failed to enter level: {}", args.level))?;
    let map = catalog.current().context("No level is active after navigation")?;
    info!("rendering {} ({}x{})", arrival.level, map.width(), map.height());

    if args.json {
        let summary = Summary {
            level: &arrival.level,
            width: map.width(),
            height: map.height(),
            walkable: map.grid().spaces().iter().filter(|space| space.can_walk).count(),
            start: arrival.start,
            exits: map.teleports().iter().map(|teleport| teleport.to_level.as_str()).collect(),
            fingerprint: format!("{:016x}", map.grid().fingerprint()),
        };
        println!("{}", serde_json::to_string_pretty(&summary).context("Failed to encode summary")?);
    } else {
        print!("{}", render(map, arrival.start));
        println!("Fingerprint: {:016x}", map.grid().fingerprint());
    }

    Ok(())
}
