use crate::location::Location;
use crate::waypoint::WaypointId;
use std::collections::HashMap;

/// SimpleClosed records the finished locations and the waypoint each was closed with.
/// Entries are only ever added.
#[derive(Debug, Default)]
pub struct SimpleClosed(HashMap<Location, WaypointId>);

impl SimpleClosed {
    pub fn new() -> Self {
        SimpleClosed(HashMap::new())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn contains(&self, location: &Location) -> bool {
        self.0.contains_key(location)
    }

    #[inline]
    pub fn get(&self, location: &Location) -> Option<WaypointId> {
        self.0.get(location).copied()
    }

    pub fn insert(&mut self, location: Location, id: WaypointId) {
        let prior = self.0.insert(location, id);
        debug_assert!(prior.is_none(), "{location} closed twice");
    }
}
