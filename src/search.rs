//! Route finding on a GridMap: picks the open list, converts the map's costs into an ordered cost
//! type and hands everything to astar.
use crate::astar::{astar, AStarError, OpenList};
use crate::astarstate::AStarState;
use crate::gridmap::{Connectivity, GridMap, Map2D};
use crate::heapopen::HeapOpenList;
use crate::heuristic::Heuristic;
use crate::location::Location;
use crate::simpleopen::SimpleOpenList;
use ordered_float::NotNan;

/// The cost type used on grid maps
pub type Cost = NotNan<f32>;

/// Which astar::OpenList implementation to search with
#[derive(clap::ValueEnum, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OpenListKind {
    /// binary heap, ties broken by insertion order
    #[default]
    Heap,
    /// linear scan of a hash map
    Scan,
}

#[derive(Debug, Copy, Clone, Default)]
pub struct SearchConfig {
    pub connectivity: Connectivity,
    pub heuristic: Heuristic,
    pub open_list: OpenListKind,
    /// give up after this many expansions
    pub max_iterations: Option<usize>,
}

/// Solution is a route from the map's start to its goal
#[derive(Debug, Clone)]
pub struct Solution {
    /// every location from start to goal inclusive, with the accumulated cost on arrival
    pub path: Vec<(Location, f32)>,
    /// number of waypoints that were closed
    pub expanded: usize,
    /// number of waypoints still open when the goal was reached
    pub open: usize,
}

impl Solution {
    pub fn cost(&self) -> f32 {
        self.path.last().map(|(_, c)| *c).unwrap_or(0.0)
    }
}

#[inline]
fn cost(value: f32) -> Cost {
    // cell costs and heuristic estimates are finite by construction
    NotNan::new(value).expect("grid costs are never NaN")
}

pub fn solve(map: &GridMap, config: &SearchConfig) -> Result<Solution, AStarError> {
    for endpoint in [map.start(), map.goal()] {
        if !map.is_passable(&endpoint) {
            return Err(AStarError::Unreachable(endpoint));
        }
    }

    match config.open_list {
        OpenListKind::Heap => {
            solve_with(AStarState::<_, Cost, HeapOpenList<Cost>>::new(map)?, config)
        }
        OpenListKind::Scan => {
            solve_with(AStarState::<_, Cost, SimpleOpenList<Cost>>::new(map)?, config)
        }
    }
}

fn solve_with<Open: OpenList<Cost>>(
    mut state: AStarState<'_, GridMap, Cost, Open>,
    config: &SearchConfig,
) -> Result<Solution, AStarError> {
    let map = state.get_map();
    let goal = map.goal();

    let found = astar(
        &mut state,
        map.start(),
        |l| *l == goal,
        |l| cost(config.heuristic.estimate(l, &goal)),
        |l| {
            map.neighbours(l, config.connectivity)
                .into_iter()
                .map(|(c, n)| (cost(c), n))
                .collect()
        },
        config.max_iterations,
    )?;

    let path = state
        .unwind(found)
        .into_iter()
        .filter_map(|id| state.get_waypoint(id))
        .map(|w| (w.location(), w.previous_cost().into_inner()))
        .collect();

    Ok(Solution {
        path,
        expanded: state.num_closed_waypoints(),
        open: state.num_open_waypoints(),
    })
}
