use crate::location::Location;

/// WaypointId is a newtype wrapper of the offset of a Waypoint in the AStarState arena.
/// It is only ever handed out by the arena that owns the waypoint, so a `previous` link can never
/// dangle: waypoints are never removed from the arena while the search state lives.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Hash)]
pub struct WaypointId(pub(crate) usize);

impl From<WaypointId> for usize {
    #[inline]
    fn from(value: WaypointId) -> Self {
        value.0
    }
}

/// Waypoint is a state discovered during the search: where we are, what it cost to get here
/// (previous_cost, the g-cost), the estimate through here to the goal (total_cost, the f-cost),
/// and which waypoint we came from.
///
/// Waypoints are never mutated once built. A cheaper route to the same location produces a new
/// Waypoint that replaces the open list entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint<Cost> {
    location: Location,
    previous_cost: Cost,
    total_cost: Cost,
    previous: Option<WaypointId>,
}

impl<Cost: Copy> Waypoint<Cost> {
    pub fn new(
        location: Location,
        previous_cost: Cost,
        total_cost: Cost,
        previous: Option<WaypointId>,
    ) -> Self {
        Waypoint {
            location,
            previous_cost,
            total_cost,
            previous,
        }
    }

    /// A waypoint with no predecessor
    pub fn start(location: Location, previous_cost: Cost, total_cost: Cost) -> Self {
        Self::new(location, previous_cost, total_cost, None)
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    #[inline]
    pub fn previous_cost(&self) -> Cost {
        self.previous_cost
    }

    #[inline]
    pub fn total_cost(&self) -> Cost {
        self.total_cost
    }

    #[inline]
    pub fn previous(&self) -> Option<WaypointId> {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let w = Waypoint::new(Location::new(1, 2), 3u32, 5u32, Some(WaypointId(7)));
        assert_eq!(w.location(), Location::new(1, 2));
        assert_eq!(w.previous_cost(), 3);
        assert_eq!(w.total_cost(), 5);
        assert_eq!(w.previous(), Some(WaypointId(7)));
        assert_eq!(usize::from(w.previous().unwrap()), 7);

        let s = Waypoint::start(Location::new(0, 0), 0u32, 4u32);
        assert!(s.previous().is_none());
    }
}
