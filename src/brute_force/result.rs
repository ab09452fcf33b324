//! Query results.

use super::top_k::Neighbor;
use crate::types::{PointIndex, Scalar};
use serde::Serialize;

/// Per-source neighbor lists returned by a kNN query.
///
/// Row `i` holds `min(k, M)` neighbors of source point `i` (one fewer when
/// the point itself was excluded), ascending by distance with ties broken
/// by the lower target index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborResult<T> {
    rows: Vec<Vec<Neighbor<T>>>,
}

impl<T: Scalar> NeighborResult<T> {
    pub(crate) fn from_rows(rows: Vec<Vec<Neighbor<T>>>) -> Self {
        Self { rows }
    }

    /// Number of source points.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no source points.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Neighbors of source point `i`.
    pub fn row(&self, i: usize) -> &[Neighbor<T>] {
        &self.rows[i]
    }

    /// Iterate over the neighbor lists in source order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[Neighbor<T>]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Target indices of the neighbors of source point `i`.
    pub fn indices(&self, i: usize) -> Vec<PointIndex> {
        self.rows[i].iter().map(|n| n.index).collect()
    }

    /// Distances of the neighbors of source point `i`.
    pub fn distances(&self, i: usize) -> Vec<T> {
        self.rows[i].iter().map(|n| n.distance).collect()
    }

    /// Total number of neighbors across all rows.
    pub fn total_neighbors(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Consume the result and return the raw rows.
    pub fn into_rows(self) -> Vec<Vec<Neighbor<T>>> {
        self.rows
    }
}

impl<'a, T: Scalar> IntoIterator for &'a NeighborResult<T> {
    type Item = &'a Vec<Neighbor<T>>;
    type IntoIter = std::slice::Iter<'a, Vec<Neighbor<T>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
