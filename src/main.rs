//! AStar implementation
//!
//! This is a fairly basic AStar implementation over 2D grid maps.
//! Maps are YAML files of rows of cells (see gridmap), each loaded into a GridMap and solved from
//! its start to its goal.
//!
//! The A* implementation is mostly templated at its core: AStarState keeps the open and closed
//! waypoints, and relies on an implementation of an openlist to pick the next waypoint. A linear
//! scan one and a binary heap one are included.
//! It's generic over integer/NotNan<f32>/NotNan<f64> costs, grid maps use NotNan<f32>.
mod astar;
mod astarstate;
mod gridmap;
mod heapopen;
mod heuristic;
mod location;
mod mapfile;
mod search;
pub(crate) mod simpleclosed;
pub(crate) mod simpleopen;
mod waypoint;

use crate::gridmap::{Connectivity, GridMap, Map2D};
use crate::heuristic::Heuristic;
use crate::search::{OpenListKind, SearchConfig, Solution};
use clap::Parser;
use eyre::eyre;
use rayon::prelude::*;

/// Find the cheapest route from start (S) to goal (G) on each of the given grid maps.
#[derive(clap::Parser, Debug)]
struct Args {
    /// Map files, or directories to search for .yaml/.yml map files
    #[arg(required = true)]
    maps: Vec<String>,

    /// Which moves are allowed between cells
    #[arg(short, long, value_enum, default_value_t)]
    connectivity: Connectivity,

    /// Estimate of the remaining cost to the goal
    #[arg(short = 'H', long, value_enum, default_value_t)]
    heuristic: Heuristic,

    /// Give up on a map after this many expansions
    #[arg(short, long)]
    max_iterations: Option<usize>,

    /// Open list implementation
    #[arg(long, value_enum, default_value_t)]
    open_list: OpenListKind,

    /// More logging, repeat for even more. RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            connectivity: self.connectivity,
            heuristic: self.heuristic,
            open_list: self.open_list,
            max_iterations: self.max_iterations,
        }
    }
}

struct Outcome {
    map: GridMap,
    result: Result<Solution, astar::AStarError>,
    elapsed: std::time::Duration,
}

fn run(name: &str, data: &[u8], config: &SearchConfig) -> eyre::Result<Outcome> {
    let map = GridMap::from_yaml(name, data)?;
    log::debug!("{}: {}x{} map loaded", name, map.width(), map.height());

    let pathfinder_start = std::time::Instant::now();
    let result = search::solve(&map, config);
    Ok(Outcome {
        map,
        result,
        elapsed: pathfinder_start.elapsed(),
    })
}

fn report(outcome: &Outcome) -> bool {
    let ns_time = outcome.elapsed.as_nanos();
    println!(
        "{}: {} -> {}, pathfind: {} ns ({} ms)",
        outcome.map.name(),
        outcome.map.start(),
        outcome.map.goal(),
        ns_time,
        ns_time / 1000000
    );

    match &outcome.result {
        Ok(solution) => {
            log::info!(
                "{}: cost {:.2}, {} expanded, {} left open",
                outcome.map.name(),
                solution.cost(),
                solution.expanded,
                solution.open
            );
            for (i, (location, cost)) in solution.path.iter().enumerate() {
                println!("{} {} - {:.2}", i + 1, location, cost);
            }
            true
        }
        Err(e) => {
            log::error!("{}: {}", outcome.map.name(), e);
            false
        }
    }
}

fn main() -> eyre::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = args.search_config();
    log::debug!("{:?}", config);

    let now = std::time::Instant::now();
    let files = mapfile::MapFiles::new(&args.maps)?.collect::<Vec<_>>();
    if files.is_empty() {
        return Err(eyre!("no map files found in {:?}", args.maps));
    }

    // each map is searched on its own thread with its own state
    let outcomes = files
        .into_par_iter()
        .map(|file| file.and_then(|(name, data)| run(&name, &data, &config)))
        .collect::<Vec<_>>();
    log::info!("{} maps: {:.2} seconds", outcomes.len(), now.elapsed().as_secs_f32());

    let mut failed = 0;
    for outcome in &outcomes {
        let solved = match outcome {
            Ok(outcome) => report(outcome),
            Err(e) => {
                log::error!("{:#}", e);
                false
            }
        };
        if !solved {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(eyre!("{} of {} maps failed", failed, outcomes.len()));
    }

    Ok(())
}
