use crate::location::Location;

/// Heuristic is the estimate of the remaining cost from a location to the goal.
///
/// All of these are admissible on a GridMap because no cell costs less than 1 to enter, as long
/// as the estimate matches the connectivity: manhattan overestimates when diagonal moves are
/// allowed.
#[derive(clap::ValueEnum, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// no estimate at all, the search degrades to uniform cost search (Dijkstra)
    Zero,
    Manhattan,
    /// straight line distance
    #[default]
    Euclidean,
    /// exact distance on an empty 8-connected grid
    Octile,
}

impl Heuristic {
    pub fn estimate(&self, from: &Location, to: &Location) -> f32 {
        match self {
            Heuristic::Zero => 0.0,
            Heuristic::Manhattan => from.manhattan(to) as f32,
            Heuristic::Euclidean => from.euclidean(to),
            Heuristic::Octile => {
                let (dx, dy) = from.delta(to);
                let (long, short) = (dx.max(dy) as f32, dx.min(dy) as f32);
                long + (std::f32::consts::SQRT_2 - 1.0) * short
            }
        }
    }
}
