use crate::maped_distance::MapedDistance;
use std::{cmp::Reverse, collections::BinaryHeap};

type MinHeap<T> = BinaryHeap<Reverse<T>>;

/// Keeps the `k` best ranked movies seen so far.
///
/// The worst kept entry sits on top of a min-heap, so every candidate is
/// compared against it and the heap never grows past `k`. Nothing is
/// reserved up front, `k` may be far larger than the candidate count.
pub struct Knn {
    k: usize,
    min_heap: MinHeap<MapedDistance>,
}

impl Knn {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            min_heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, candidate: MapedDistance) {
        if self.k == 0 {
            return;
        }

        if self.min_heap.len() < self.k {
            self.min_heap.push(Reverse(candidate));
        } else if let Some(Reverse(worst)) = self.min_heap.peek() {
            if candidate > *worst {
                self.min_heap.pop();
                self.min_heap.push(Reverse(candidate));
            }
        }
    }

    pub fn update<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = MapedDistance>,
    {
        for candidate in candidates {
            self.push(candidate);
        }
    }

    pub fn len(&self) -> usize {
        self.min_heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.min_heap.is_empty()
    }

    /// Best first
    pub fn into_vec(self) -> Vec<MapedDistance> {
        self.min_heap
            .into_sorted_vec()
            .into_iter()
            .map(|r| r.0)
            .collect()
    }
}
