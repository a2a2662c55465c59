use crate::astar;
use crate::location::Location;
use crate::waypoint::WaypointId;
use std::collections::HashMap;

/// SimpleOpenList is a simplistic implementation of an astar::OpenList
/// It keeps one entry per Location in a HashMap and finds the minimum by scanning every entry,
/// which makes each pop O(n) in the size of the open list.
///
/// On equal total costs the first entry met in HashMap iteration order wins. That order is not
/// stable between runs, so neither is the choice. HeapOpenList is the deterministic alternative.
pub struct SimpleOpenList<Cost> {
    entries: HashMap<Location, (WaypointId, Cost)>,
}

impl<Cost> SimpleOpenList<Cost> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<Cost> Default for SimpleOpenList<Cost> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Cost: Ord + Copy> astar::OpenList<Cost> for SimpleOpenList<Cost> {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, location: &Location) -> Option<WaypointId> {
        self.entries.get(location).map(|(id, _)| *id)
    }

    fn insert(&mut self, location: Location, id: WaypointId, total_cost: Cost) {
        self.entries.insert(location, (id, total_cost));
    }

    fn remove(&mut self, location: &Location) -> Option<WaypointId> {
        self.entries.remove(location).map(|(id, _)| id)
    }

    fn peek_min(&mut self) -> Option<WaypointId> {
        // min_by_key keeps the first of several equal minimums
        self.entries
            .values()
            .min_by_key(|(_, cost)| *cost)
            .map(|(id, _)| *id)
    }
}
