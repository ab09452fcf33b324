//! Per-row k-smallest selection.
//!
//! Every strategy sorts by the same strict total order as [`TopK`], so heap
//! and partition selection return identical neighbors in identical order.

use super::top_k::{Neighbor, TopK};
use crate::config::SelectionStrategy;
use crate::types::{PointIndex, Scalar};

/// Below this ratio of row length to k the heap beats quickselect.
const AUTO_PARTITION_RATIO: usize = 4;

/// Select the `k` smallest entries of `row`, ascending by `(distance, index)`.
///
/// `skip` removes one column from consideration (the diagonal when a point
/// set is searched against itself). `k >= row.len()` returns every remaining
/// entry, fully sorted.
pub fn select_k_smallest<T: Scalar>(
    row: &[T],
    k: usize,
    strategy: SelectionStrategy,
    skip: Option<PointIndex>,
) -> Vec<Neighbor<T>> {
    if k == 0 || row.is_empty() {
        return Vec::new();
    }

    match resolve_strategy(strategy, k, row.len()) {
        SelectionStrategy::Heap => select_heap(row, k, skip),
        _ => select_partition(row, k, skip),
    }
}

pub(crate) fn resolve_strategy(strategy: SelectionStrategy, k: usize, row_len: usize) -> SelectionStrategy {
    match strategy {
        SelectionStrategy::Auto if k.saturating_mul(AUTO_PARTITION_RATIO) >= row_len => {
            SelectionStrategy::Partition
        }
        SelectionStrategy::Auto => SelectionStrategy::Heap,
        other => other,
    }
}

fn select_heap<T: Scalar>(row: &[T], k: usize, skip: Option<PointIndex>) -> Vec<Neighbor<T>> {
    let mut top_k = TopK::new(k.min(row.len()));
    for (j, &d) in row.iter().enumerate() {
        if Some(j) == skip {
            continue;
        }
        top_k.push(j, d);
    }
    top_k.into_sorted_vec()
}

fn select_partition<T: Scalar>(row: &[T], k: usize, skip: Option<PointIndex>) -> Vec<Neighbor<T>> {
    let mut candidates: Vec<Neighbor<T>> = row
        .iter()
        .enumerate()
        .filter(|&(j, _)| Some(j) != skip)
        .map(|(j, &d)| Neighbor::new(j, d))
        .collect();

    if k < candidates.len() {
        candidates.select_nth_unstable_by_key(k, Neighbor::key);
        candidates.truncate(k);
    }
    candidates.sort_unstable_by_key(Neighbor::key);
    candidates
}
