/*
The open list as a priority queue.

Replacing or removing an entry in a BinaryHeap isn't possible, so the heap holds tickets and the
index says which ticket is current for each Location. A ticket whose id no longer matches the index
is stale and gets thrown away when it reaches the top.
*/
use crate::astar;
use crate::location::Location;
use crate::waypoint::WaypointId;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

/// Below this many tickets the heap is never compacted
const MIN_COMPACT_LEN: usize = 64;

/// HeapOpenList is an astar::OpenList backed by a BinaryHeap, giving O(log n) admission and pop.
///
/// Equal total costs are returned in the order they were inserted. A replacement counts as a new
/// insertion, so a relaxed entry queues behind entries of equal cost that were already open.
pub struct HeapOpenList<Cost> {
    ordering: BinaryHeap<Reverse<OpenTicket<Cost>>>,
    index: HashMap<Location, WaypointId>,
    next_seq: u64,
}

/// OpenTicket is an item in the heap.
/// Ordering is by total cost, then by insertion sequence. The sequence is unique, which keeps Ord
/// consistent with Eq.
#[derive(Debug, Clone)]
struct OpenTicket<Cost> {
    total_cost: Cost,
    seq: u64,
    location: Location,
    id: WaypointId,
}

impl<Cost: Ord> HeapOpenList<Cost> {
    pub fn new() -> Self {
        Self {
            ordering: BinaryHeap::new(),
            index: HashMap::new(),
            next_seq: 0,
        }
    }

    fn is_current(&self, ticket: &OpenTicket<Cost>) -> bool {
        self.index.get(&ticket.location) == Some(&ticket.id)
    }

    /// Drop every stale ticket once they outnumber the live ones
    fn compact(&mut self) {
        if self.ordering.len() < MIN_COMPACT_LEN || self.ordering.len() < 2 * self.index.len() {
            return;
        }

        let index = &self.index;
        self.ordering
            .retain(|Reverse(t)| index.get(&t.location) == Some(&t.id));
        log::trace!("compacted open heap to {} tickets", self.ordering.len());
    }
}

impl<Cost: Ord> Default for HeapOpenList<Cost> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Cost: Ord + Copy> astar::OpenList<Cost> for HeapOpenList<Cost> {
    fn len(&self) -> usize {
        self.index.len()
    }

    fn get(&self, location: &Location) -> Option<WaypointId> {
        self.index.get(location).copied()
    }

    fn insert(&mut self, location: Location, id: WaypointId, total_cost: Cost) {
        self.index.insert(location, id);
        self.ordering.push(Reverse(OpenTicket {
            total_cost,
            seq: self.next_seq,
            location,
            id,
        }));
        self.next_seq += 1;
        self.compact();
    }

    fn remove(&mut self, location: &Location) -> Option<WaypointId> {
        self.index.remove(location)
    }

    fn peek_min(&mut self) -> Option<WaypointId> {
        while let Some(Reverse(top)) = self.ordering.peek() {
            if self.is_current(top) {
                return Some(top.id);
            }
            self.ordering.pop();
        }
        None
    }
}

impl<Cost: Ord> Eq for OpenTicket<Cost> {}

impl<Cost: Ord> PartialEq for OpenTicket<Cost> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<Cost: Ord> Ord for OpenTicket<Cost> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_cost
            .cmp(&other.total_cost)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl<Cost: Ord> PartialOrd for OpenTicket<Cost> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astar::OpenList;

    #[test]
    fn pops_in_cost_then_insertion_order() {
        let mut open = HeapOpenList::new();
        open.insert(Location::new(0, 0), WaypointId(0), 5);
        open.insert(Location::new(1, 0), WaypointId(1), 3);
        open.insert(Location::new(2, 0), WaypointId(2), 3);

        let mut order = vec![];
        while let Some(id) = open.peek_min() {
            order.push(id);
            let location = Location::new(usize::from(id) as i32, 0);
            assert_eq!(open.remove(&location), Some(id));
        }
        assert_eq!(order, vec![WaypointId(1), WaypointId(2), WaypointId(0)]);
        assert!(open.is_empty());
    }

    #[test]
    fn replaced_entries_are_skipped() {
        let mut open = HeapOpenList::new();
        let l = Location::new(4, 4);
        open.insert(l, WaypointId(0), 1);
        open.insert(Location::new(5, 5), WaypointId(1), 2);
        // the old ticket for l is cheaper but stale
        open.insert(l, WaypointId(2), 10);

        assert_eq!(open.len(), 2);
        assert_eq!(open.peek_min(), Some(WaypointId(1)));
        open.remove(&Location::new(5, 5));
        assert_eq!(open.peek_min(), Some(WaypointId(2)));
    }

    #[test]
    fn compaction_keeps_live_entries() {
        let mut open = HeapOpenList::new();
        let l = Location::new(0, 0);
        for i in 0..500u64 {
            open.insert(l, WaypointId(i as usize), 1000 - i);
        }
        open.insert(Location::new(1, 1), WaypointId(500), 999);

        assert!(open.ordering.len() < 500);
        assert_eq!(open.len(), 2);
        assert_eq!(open.peek_min(), Some(WaypointId(499)));
    }
}
