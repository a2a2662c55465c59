//! This implementation of A* is intended to be generic over the cost type and the open list, but is
//! in practice used with the GridMap data structures. The bookkeeping of open and closed waypoints
//! lives in AStarState, this module holds the seams and the search loop that drives it.
use crate::astar::AStarError::*;
use crate::astarstate::AStarState;
use crate::location::Location;
use crate::waypoint::{Waypoint, WaypointId};
use num::Zero;
use std::ops::Add;

/// OpenList is a general trait to allow templating of the frontier implementation for the
/// AStar algorithm. It maps each open Location to the arena entry currently holding it.
///
/// Which entry wins is decided by AStarState, an OpenList only has to remember the last one it
/// was given for a location and find the one with the lowest total cost.
pub trait OpenList<Cost> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, location: &Location) -> Option<WaypointId>;

    /// Insert the entry for `location`, replacing any existing one
    fn insert(&mut self, location: Location, id: WaypointId, total_cost: Cost);

    fn remove(&mut self, location: &Location) -> Option<WaypointId>;

    /// The entry with the lowest total cost, without removing it.
    /// Takes `&mut self` so that lazy implementations can discard stale entries on the way.
    fn peek_min(&mut self) -> Option<WaypointId>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AStarError {
    #[error("map must have a non-zero size, got {width}x{height}")]
    InvalidMap { width: i32, height: i32 },
    #[error("location {0} is not in the open list")]
    NotOpen(Location),
    #[error("location {0} is blocked or outside the map")]
    Unreachable(Location),
    #[error("gave up after {0} expansions")]
    IterationLimit(usize),
    #[error("no path found")]
    PathNotFound,
}

/// astar drives an AStarState from `start` until `is_goal` accepts the cheapest open waypoint.
///
/// Each step pops the open waypoint with the minimum total cost, admits every neighbour that is
/// not already closed and then closes the popped location. The goal waypoint itself is returned
/// while still open, use [`AStarState::unwind`] to recover the path.
///
/// `max_iterations` bounds the number of expansions, not the number of admitted waypoints.
pub fn astar<
    M,
    Open: OpenList<Cost>,
    Cost: Ord + Copy + Add<Output = Cost> + Zero,
    IsGoalFn: Fn(&Location) -> bool,
    HeuristicFn: Fn(&Location) -> Cost,
    GetNeighboursFn: Fn(&Location) -> Vec<(Cost, Location)>,
>(
    state: &mut AStarState<'_, M, Cost, Open>,
    start: Location,
    is_goal: IsGoalFn,
    heuristic: HeuristicFn,
    neighbours: GetNeighboursFn,
    max_iterations: Option<usize>,
) -> Result<WaypointId, AStarError> {
    state.add_open_waypoint(Waypoint::start(start, Cost::zero(), heuristic(&start)));

    let mut expanded = 0usize;
    while let Some(current) = state.get_min_open_waypoint() {
        let current_location = state[current].location();
        let current_cost = state[current].previous_cost();

        if is_goal(&current_location) {
            log::debug!("reached {current_location} after {expanded} expansions");
            return Ok(current);
        }

        if max_iterations.is_some_and(|limit| expanded >= limit) {
            return Err(IterationLimit(expanded));
        }
        expanded += 1;

        for (step_cost, neighbour) in neighbours(&current_location) {
            if state.is_location_closed(neighbour) {
                continue;
            }

            let previous_cost = current_cost + step_cost;
            state.add_open_waypoint(Waypoint::new(
                neighbour,
                previous_cost,
                previous_cost + heuristic(&neighbour),
                Some(current),
            ));
        }

        state.close_waypoint(current_location)?;
    }

    log::debug!("open list exhausted after {expanded} expansions");
    Err(PathNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gridmap::Map2D;
    use crate::heapopen::HeapOpenList;
    use crate::simpleopen::SimpleOpenList;

    /// unobstructed 4-connected square grid, unit step costs
    struct Square(i32);

    impl Map2D for Square {
        fn width(&self) -> i32 {
            self.0
        }

        fn height(&self) -> i32 {
            self.0
        }

        fn cell_cost(&self, location: &Location) -> Option<f32> {
            self.contains(location).then_some(1.0)
        }
    }

    impl Square {
        fn neighbours(&self, l: &Location) -> Vec<(u32, Location)> {
            [(1, 0), (-1, 0), (0, 1), (0, -1)]
                .into_iter()
                .map(|(dx, dy)| l.offset(dx, dy))
                .filter(|n| self.contains(n))
                .map(|n| (1, n))
                .collect()
        }
    }

    fn run<Open: OpenList<u32> + Default>() {
        let map = Square(3);
        let goal = Location::new(2, 2);
        let mut state = AStarState::<_, u32, Open>::with_open_list(&map, Open::default())
            .expect("valid map");

        let found = astar(
            &mut state,
            Location::new(0, 0),
            |l| *l == goal,
            |_| 0,
            |l| map.neighbours(l),
            None,
        )
        .expect("path exists");

        assert_eq!(state[found].location(), goal);
        assert_eq!(state[found].previous_cost(), 4);

        let path = state.unwind(found);
        assert_eq!(path.len(), 5);
        assert_eq!(state[path[0]].location(), Location::new(0, 0));
        assert!(state[path[0]].previous().is_none());
        // every step is a single unit move
        for pair in path.windows(2) {
            let (a, b) = (&state[pair[0]], &state[pair[1]]);
            assert_eq!(a.location().manhattan(&b.location()), 1);
            assert_eq!(a.previous_cost() + 1, b.previous_cost());
        }
    }

    #[test]
    fn uniform_cost_three_by_three_heap() {
        run::<HeapOpenList<u32>>();
    }

    #[test]
    fn uniform_cost_three_by_three_scan() {
        run::<SimpleOpenList<u32>>();
    }

    #[test]
    fn path_not_found_when_goal_is_off_the_grid() {
        let map = Square(3);
        let mut state = AStarState::<_, u32>::new(&map).unwrap();
        let r = astar(
            &mut state,
            Location::new(0, 0),
            |l| *l == Location::new(5, 5),
            |_| 0,
            |l| map.neighbours(l),
            None,
        );
        assert_eq!(r, Err(PathNotFound));
        assert_eq!(state.num_open_waypoints(), 0);
        assert_eq!(state.num_closed_waypoints(), 9);
    }

    #[test]
    fn iteration_limit() {
        let map = Square(10);
        let mut state = AStarState::<_, u32>::new(&map).unwrap();
        let r = astar(
            &mut state,
            Location::new(0, 0),
            |l| *l == Location::new(9, 9),
            |_| 0,
            |l| map.neighbours(l),
            Some(3),
        );
        assert_eq!(r, Err(IterationLimit(3)));
        assert_eq!(state.num_closed_waypoints(), 3);
    }

    #[test]
    fn start_is_goal() {
        let map = Square(3);
        let mut state = AStarState::<_, u32>::new(&map).unwrap();
        let found = astar(
            &mut state,
            Location::new(1, 1),
            |l| *l == Location::new(1, 1),
            |_| 0,
            |l| map.neighbours(l),
            None,
        )
        .unwrap();
        assert_eq!(state.unwind(found), vec![found]);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            NotOpen(Location::new(1, 2)).to_string(),
            "location (1, 2) is not in the open list"
        );
        assert_eq!(
            InvalidMap { width: 0, height: 3 }.to_string(),
            "map must have a non-zero size, got 0x3"
        );
    }
}
