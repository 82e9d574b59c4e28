//! Plan a path on a grid and print the map.
//!
//! Run: cargo run --bin astar -- --size 10 --from 0,0 --to 6,6 --block 1,1
//!  or: cargo run --bin astar -- --map demos/data/maze.txt --config demos/data/search.toml
//!
//! Exits 0 when a path is found, 1 when the destination is unreachable and
//! 2 on invalid input.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use gridstar_core::{Coord, Grid, parse_map};
use gridstar_paths::{AStar, DuplicatePolicy, Heuristic, Outcome, SearchConfig};
use log::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "astar")]
#[command(about = "A* path planning on an obstacle grid", long_about = None)]
struct Args {
    /// Grid rows
    #[arg(long, conflicts_with = "map")]
    rows: Option<i32>,

    /// Grid columns
    #[arg(long, conflicts_with = "map")]
    cols: Option<i32>,

    /// Square grid side; cannot be combined with --rows/--cols
    #[arg(long, conflicts_with_all = ["rows", "cols", "map"])]
    size: Option<i32>,

    /// Origin as ROW,COL
    #[arg(long, value_name = "R,C")]
    from: Option<Coord>,

    /// Destination as ROW,COL
    #[arg(long, value_name = "R,C")]
    to: Option<Coord>,

    /// Block a cell (repeatable)
    #[arg(long, value_name = "R,C")]
    block: Vec<Coord>,

    /// Text map: `.` free, `#` blocked, `O` origin, `X` destination. The
    /// map sets the grid size.
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// TOML search settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// manhattan, euclidean, octagonal or chebyshev
    #[arg(long, value_name = "NAME")]
    heuristic: Option<Heuristic>,

    /// Push a rediscovered cell only when its cost improves
    #[arg(long)]
    decrease_key: bool,

    /// Search even if an endpoint is blocked
    #[arg(long)]
    no_validate: bool,

    /// Do not mark the path on the printed map
    #[arg(long)]
    no_path: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Settings from a TOML file, plus whether the file set a grid size.
fn load_config(path: Option<&Path>) -> Result<(SearchConfig, bool)> {
    let Some(path) = path else {
        return Ok((SearchConfig::default(), false));
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let table: toml::Table =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    let sized = table.contains_key("rows") || table.contains_key("cols");
    let cfg = toml::Value::Table(table)
        .try_into::<SearchConfig>()
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok((cfg, sized))
}

/// Fold command-line overrides into the file (or default) settings.
fn resolve_config(args: &Args) -> Result<(SearchConfig, bool)> {
    let (mut cfg, sized) = load_config(args.config.as_deref())?;
    if let Some(n) = args.size {
        cfg.rows = n;
        cfg.cols = n;
    }
    if let Some(rows) = args.rows {
        cfg.rows = rows;
    }
    if let Some(cols) = args.cols {
        cfg.cols = cols;
    }
    if let Some(h) = args.heuristic {
        cfg.heuristic = h;
    }
    if args.decrease_key {
        cfg.duplicates = DuplicatePolicy::DecreaseKey;
    }
    if args.no_validate {
        cfg.validate_endpoints = false;
    }
    Ok((cfg, sized))
}

/// Build the engine described by `args`.
fn build(args: &Args) -> Result<AStar> {
    let (cfg, sized) = resolve_config(args)?;

    let (mut grid, mut origin, mut destination) = match &args.map {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading map {}", path.display()))?;
            let map = parse_map(&text).with_context(|| format!("parsing map {}", path.display()))?;
            debug!("map {} is {}", path.display(), map.grid.size());
            if sized && cfg.size() != map.grid.size() {
                warn!(
                    "ignoring config size {}: map {} is {}",
                    cfg.size(),
                    path.display(),
                    map.grid.size()
                );
            }
            (map.grid, map.origin, map.destination)
        }
        None => {
            let grid = Grid::new(cfg.rows, cfg.cols).context("creating grid")?;
            (grid, None, None)
        }
    };
    if args.from.is_some() {
        origin = args.from;
    }
    if args.to.is_some() {
        destination = args.to;
    }
    let origin = origin.ok_or_else(|| anyhow!("no origin: pass --from or an `O` in --map"))?;
    let destination =
        destination.ok_or_else(|| anyhow!("no destination: pass --to or an `X` in --map"))?;

    for &b in &args.block {
        grid.mark_inaccessible(b).with_context(|| format!("blocking {b}"))?;
    }

    let mut astar = AStar::with_grid(grid, origin, destination);
    astar.apply_config(&cfg);
    Ok(astar)
}

fn run(args: &Args) -> Result<bool> {
    let mut astar = build(args)?;
    let outcome = astar.run().context("search failed")?;
    let stats = astar.stats();
    info!(
        "expanded {} nodes, pushed {}, peak frontier {}",
        stats.expanded, stats.pushed, stats.peak_frontier
    );

    print!("{}", astar.render(!args.no_path));
    match outcome {
        Outcome::Succeeded(path) => {
            println!("path: {} cells", path.len());
            Ok(true)
        }
        Outcome::Exhausted => {
            eprintln!("no path from {} to {}", astar.origin(), astar.destination());
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
