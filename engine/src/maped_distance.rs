use std::cmp::Ordering;

/// A movie (by dataset index) with its similarity to some query.
///
/// Ordered so that "greater" means "ranks first": a higher score wins,
/// and equal scores fall back to the lower dataset index.
#[derive(Debug, Clone, Copy)]
pub struct MapedDistance(pub usize, pub f64);

impl MapedDistance {
    pub fn index(&self) -> usize {
        self.0
    }

    pub fn dist(&self) -> f64 {
        self.1
    }
}

impl PartialEq for MapedDistance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MapedDistance {}

impl PartialOrd for MapedDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MapedDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist()
            .partial_cmp(&other.dist())
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.index().cmp(&self.index()))
    }
}
