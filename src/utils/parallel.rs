//! Parallel execution utilities.
//!
//! Rows of a distance matrix and rows of a top-k selection are independent,
//! so both are distributed per row. Results always come back in row order.

use rayon::prelude::*;

/// Minimum number of rows before parallelization is beneficial.
/// Below this threshold, sequential execution is faster due to reduced overhead.
pub const MIN_PARALLEL_ROWS: usize = 64;

/// Run `f(row_index, row)` over consecutive `row_len`-sized rows of `out`.
///
/// `row_len` must be non-zero.
pub fn for_each_row<T, F>(out: &mut [T], row_len: usize, parallel: bool, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    debug_assert!(row_len > 0);
    if parallel {
        out.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(i, row)| f(i, row));
    } else {
        out.chunks_mut(row_len)
            .enumerate()
            .for_each(|(i, row)| f(i, row));
    }
}

/// Map every row index in `0..rows` through `f`, preserving order.
pub fn map_rows<U, F>(rows: usize, parallel: bool, f: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    if parallel {
        (0..rows).into_par_iter().map(f).collect()
    } else {
        (0..rows).map(f).collect()
    }
}
