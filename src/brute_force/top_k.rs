//! Bounded top-k tracking.
//!
//! Candidates are ordered by `(distance, index)`: ascending distance, ties
//! broken by the lower target index, NaN after every other value (including
//! +inf). The index makes every key unique, so the order is total.

use crate::types::{PointIndex, Scalar};
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::collections::BinaryHeap;

/// A selected neighbor: target index and its distance from the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor<T> {
    /// Index of the target point.
    pub index: PointIndex,
    /// Distance from the source point.
    pub distance: T,
}

impl<T: Scalar> Neighbor<T> {
    /// Create a new neighbor.
    pub fn new(index: PointIndex, distance: T) -> Self {
        Self { index, distance }
    }

    #[inline]
    pub(crate) fn key(&self) -> (OrderedFloat<T>, PointIndex) {
        (OrderedFloat(self.distance), self.index)
    }
}

/// A max-heap based top-k tracker.
///
/// Maintains the k smallest `(distance, index)` keys seen so far. The root is
/// the worst kept candidate, so a new candidate only has to beat the root.
#[derive(Debug, Clone)]
pub struct TopK<T: Scalar> {
    /// Max-heap of (distance, index) keys.
    heap: BinaryHeap<(OrderedFloat<T>, PointIndex)>,

    /// Maximum capacity.
    k: usize,
}

impl<T: Scalar> TopK<T> {
    /// Create a new top-k tracker.
    pub fn new(k: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(4096)),
            k,
        }
    }

    /// Get the current size.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest kept distance once the tracker is full.
    pub fn threshold(&self) -> Option<T> {
        if self.k > 0 && self.heap.len() >= self.k {
            self.heap.peek().map(|(d, _)| d.0)
        } else {
            None
        }
    }

    /// Offer a candidate. Returns true if it was kept.
    pub fn push(&mut self, index: PointIndex, distance: T) -> bool {
        if self.k == 0 {
            return false;
        }
        let key = (OrderedFloat(distance), index);
        if self.heap.len() < self.k {
            self.heap.push(key);
            return true;
        }
        match self.heap.peek_mut() {
            Some(mut worst) if key < *worst => {
                *worst = key;
                true
            }
            _ => false,
        }
    }

    /// Consume the tracker and return its neighbors in ascending order.
    pub fn into_sorted_vec(self) -> Vec<Neighbor<T>> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|(d, index)| Neighbor::new(index, d.0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(neighbors: &[Neighbor<f32>]) -> Vec<usize> {
        neighbors.iter().map(|n| n.index).collect()
    }

    #[test]
    fn test_top_k_basic() {
        let mut top_k = TopK::new(3);

        assert!(top_k.push(0, 5.0f32));
        assert!(top_k.push(1, 3.0));
        assert!(top_k.push(2, 7.0));

        assert_eq!(top_k.len(), 3);
        assert_eq!(top_k.threshold(), Some(7.0));

        // This should replace 7.0
        assert!(top_k.push(3, 4.0));
        assert_eq!(top_k.threshold(), Some(5.0));

        // This should not be added
        assert!(!top_k.push(4, 6.0));

        let results = top_k.into_sorted_vec();
        assert_eq!(indices(&results), vec![1, 3, 0]);
    }

    #[test]
    fn test_top_k_empty() {
        let top_k = TopK::<f64>::new(5);
        assert!(top_k.is_empty());
        assert_eq!(top_k.threshold(), None);
    }

    #[test]
    fn test_top_k_zero_capacity() {
        let mut top_k = TopK::new(0);
        assert!(!top_k.push(0, 1.0f32));
        assert!(!top_k.push(1, 0.0));
        assert!(top_k.is_empty());
        assert_eq!(top_k.threshold(), None);
        assert!(top_k.into_sorted_vec().is_empty());
    }

    #[test]
    fn test_top_k_tie_keeps_lower_index() {
        let mut top_k = TopK::new(1);
        assert!(top_k.push(4, 1.0f32));
        assert!(!top_k.push(7, 1.0));
        assert!(top_k.push(2, 1.0));
        assert_eq!(indices(&top_k.into_sorted_vec()), vec![2]);
    }
}
