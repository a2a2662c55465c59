use crate::astar::{AStarError, OpenList};
use crate::gridmap::Map2D;
use crate::heapopen::HeapOpenList;
use crate::location::Location;
use crate::simpleclosed::SimpleClosed;
use crate::waypoint::{Waypoint, WaypointId};
use std::ops::Index;

/// AStarState is the bookkeeping of an A* search over a map: the open waypoints that are still
/// candidates for expansion and the closed waypoints that are finished with.
///
/// Every Location moves through unseen -> open -> closed and never back. A Location is in at most
/// one of the two lists, and the Waypoint stored for a Location always has that Location.
///
/// All admitted waypoints live in an arena owned by the state, so `previous` links are handles into
/// the arena rather than references. Waypoints replaced in the open list stay in the arena (another
/// waypoint may already point at them) until the state is dropped.
pub struct AStarState<'m, M, Cost, Open = HeapOpenList<Cost>> {
    /// the map being navigated, only kept so it can be reported back
    map: &'m M,
    arena: Vec<Waypoint<Cost>>,
    open: Open,
    closed: SimpleClosed,
}

impl<'m, M: Map2D, Cost, Open: OpenList<Cost> + Default> AStarState<'m, M, Cost, Open> {
    pub fn new(map: &'m M) -> Result<Self, AStarError> {
        Self::with_open_list(map, Open::default())
    }
}

impl<'m, M: Map2D, Cost, Open: OpenList<Cost>> AStarState<'m, M, Cost, Open> {
    /// Rejects a map with no cells, there is nothing to navigate.
    ///
    /// This is the only check made when building the state. Misuse afterwards, such as closing a
    /// location that was never opened, is reported by the operation itself.
    pub fn with_open_list(map: &'m M, open: Open) -> Result<Self, AStarError> {
        if map.width() <= 0 || map.height() <= 0 {
            return Err(AStarError::InvalidMap {
                width: map.width(),
                height: map.height(),
            });
        }

        Ok(AStarState {
            map,
            arena: Vec::new(),
            open,
            closed: SimpleClosed::new(),
        })
    }
}

impl<'m, M, Cost, Open> AStarState<'m, M, Cost, Open>
where
    Cost: Ord + Copy,
    Open: OpenList<Cost>,
{
    /// Returns the map that the search is navigating
    #[inline]
    pub fn get_map(&self) -> &'m M {
        self.map
    }

    #[inline]
    pub fn num_open_waypoints(&self) -> usize {
        self.open.len()
    }

    #[inline]
    pub fn num_closed_waypoints(&self) -> usize {
        self.closed.len()
    }

    /// The open waypoint with the lowest total cost, or None if there are no open waypoints.
    ///
    /// Ties between equal total costs are broken however the open list chooses: HeapOpenList
    /// returns the earliest admitted, SimpleOpenList whichever its hash order meets first.
    pub fn get_min_open_waypoint(&mut self) -> Option<WaypointId> {
        if self.open.is_empty() {
            return None;
        }
        self.open.peek_min()
    }

    /// Adds a waypoint to the open list, or replaces the open waypoint already at its location.
    ///
    /// An existing entry is only replaced if the new waypoint has a strictly lower previous_cost.
    /// The comparison is on previous_cost and not total_cost: for the same location the heuristic
    /// part is the same, and with an inconsistent heuristic comparing totals would behave
    /// differently.
    ///
    /// Waypoints for a location that is already closed are refused.
    ///
    /// Returns true if the waypoint was stored.
    pub fn add_open_waypoint(&mut self, waypoint: Waypoint<Cost>) -> bool {
        let location = waypoint.location();

        if self.closed.contains(&location) {
            log::warn!("refusing to reopen closed location {location}");
            return false;
        }

        if let Some(existing) = self.open_waypoint(location) {
            if waypoint.previous_cost() >= existing.previous_cost() {
                return false;
            }
            log::trace!("relaxing {location}");
        }

        let total_cost = waypoint.total_cost();
        let id = self.push(waypoint);
        self.open.insert(location, id, total_cost);
        true
    }

    /// Moves the waypoint at `location` from the open list to the closed list.
    ///
    /// Closing a location that isn't open is an error and changes nothing.
    pub fn close_waypoint(&mut self, location: Location) -> Result<WaypointId, AStarError> {
        let id = self
            .open
            .remove(&location)
            .ok_or(AStarError::NotOpen(location))?;
        self.closed.insert(location, id);
        debug_assert!(!self.is_location_open(location));
        debug_assert_eq!(self.closed_waypoint(location).map(|w| w.location()), Some(location));
        log::trace!("closed {location}");
        Ok(id)
    }

    #[inline]
    pub fn is_location_closed(&self, location: Location) -> bool {
        self.closed.contains(&location)
    }

    #[inline]
    pub fn is_location_open(&self, location: Location) -> bool {
        self.open.get(&location).is_some()
    }

    pub fn open_waypoint(&self, location: Location) -> Option<&Waypoint<Cost>> {
        self.open.get(&location).map(|id| &self[id])
    }

    pub fn closed_waypoint(&self, location: Location) -> Option<&Waypoint<Cost>> {
        self.closed.get(&location).map(|id| &self[id])
    }

    #[inline]
    pub fn get_waypoint(&self, id: WaypointId) -> Option<&Waypoint<Cost>> {
        self.arena.get(usize::from(id))
    }

    /// The chain of waypoints from the start to `id` (inclusive), following `previous` links
    pub fn unwind(&self, id: WaypointId) -> Vec<WaypointId> {
        let mut r = id;
        let mut path = vec![r];

        while let Some(last) = self[r].previous() {
            path.push(last);
            r = last;
        }

        path.reverse();
        path
    }

    fn push(&mut self, waypoint: Waypoint<Cost>) -> WaypointId {
        let id = WaypointId(self.arena.len());
        self.arena.push(waypoint);
        id
    }
}

// Handles are only created by push, so an out-of-bounds id means it came from another state.
impl<M, Cost, Open> Index<WaypointId> for AStarState<'_, M, Cost, Open> {
    type Output = Waypoint<Cost>;

    fn index(&self, index: WaypointId) -> &Self::Output {
        &self.arena[usize::from(index)]
    }
}
