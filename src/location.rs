use std::fmt::Display;

/// Location is a cell on a 2D grid. It's a plain value and is used as the key for both the open
/// and the closed lists, so equal coordinates always hash identically.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Hash, Default)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Location { x, y }
    }

    #[inline]
    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Location {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// absolute (dx, dy) between two locations
    #[inline]
    pub fn delta(&self, other: &Location) -> (u32, u32) {
        (self.x.abs_diff(other.x), self.y.abs_diff(other.y))
    }

    #[inline]
    pub fn manhattan(&self, other: &Location) -> u32 {
        let (dx, dy) = self.delta(other);
        dx + dy
    }

    #[inline]
    pub fn euclidean(&self, other: &Location) -> f32 {
        let (dx, dy) = self.delta(other);
        (dx as f32).hypot(dy as f32)
    }
}

impl From<(i32, i32)> for Location {
    fn from((x, y): (i32, i32)) -> Self {
        Location { x, y }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(l: &Location) -> u64 {
        let mut h = DefaultHasher::new();
        l.hash(&mut h);
        h.finish()
    }

    #[test]
    fn equal_coordinates_are_equal_and_hash_alike() {
        let a = Location::new(3, -7);
        let b = Location::from((3, -7));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn differing_in_either_coordinate_is_not_equal() {
        let a = Location::new(1, 2);
        assert_ne!(a, Location::new(2, 2));
        assert_ne!(a, Location::new(1, 3));
        // swapped coordinates are a different cell
        assert_ne!(a, Location::new(2, 1));
    }

    #[test]
    fn distances() {
        let a = Location::new(0, 0);
        let b = Location::new(3, -4);
        assert_eq!(a.manhattan(&b), 7);
        assert!((a.euclidean(&b) - 5.0).abs() < 1e-6);
        assert_eq!(a.offset(3, -4), b);
        assert_eq!(b.to_string(), "(3, -4)");
    }
}
