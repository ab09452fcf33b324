//! Many-to-many distance computations.
//!
//! Broadcasting `source` as `[N, 1, D]` against `target` as `[1, M, D]` is
//! expressed as a fused loop: every `(i, j)` entry subtracts, transforms and
//! reduces the two feature rows in one pass, so the `[N, M, D]` difference
//! tensor is never materialized.

use super::one_to_one::{L1Kernel, LinfKernel, MetricKernel, SquaredL2Kernel};
use super::{Closing, Metric};
use crate::data_format::{PointSet, PointSetRef};
use crate::error::{KnnError, Result};
use crate::types::Scalar;
use crate::utils::parallel::{for_each_row, MIN_PARALLEL_ROWS};
use tracing::trace;

/// Dense `[num_source, num_target]` distance matrix (row-major).
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix<T: Scalar> {
    data: Vec<T>,
    num_source: usize,
    num_target: usize,
}

impl<T: Scalar> DistanceMatrix<T> {
    /// Wrap a row-major buffer of `num_source * num_target` distances.
    pub fn from_raw(data: Vec<T>, num_source: usize, num_target: usize) -> Result<Self> {
        if data.len() != num_source * num_target {
            return Err(KnnError::ragged(format!(
                "distance buffer of length {} cannot be shaped [{}, {}]",
                data.len(),
                num_source,
                num_target
            )));
        }
        Ok(Self {
            data,
            num_source,
            num_target,
        })
    }

    /// Distance between source point `i` and target point `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[i * self.num_target + j]
    }

    /// All distances from source point `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        let start = i * self.num_target;
        &self.data[start..start + self.num_target]
    }

    /// Iterate over rows in source order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[T]> + '_ {
        let m = self.num_target;
        (0..self.num_source).map(move |i| &self.data[i * m..(i + 1) * m])
    }

    /// `(num_source, num_target)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.num_source, self.num_target)
    }

    /// Number of rows (source points).
    pub fn num_rows(&self) -> usize {
        self.num_source
    }

    /// Number of columns (target points).
    pub fn num_cols(&self) -> usize {
        self.num_target
    }

    /// Whether the matrix has no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the raw row-major data.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consume the matrix and return its row-major data.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }
}

/// Compute the full `[N, M]` distance matrix between two point sets.
///
/// Rows are spread over the rayon pool once `source` has at least
/// [`MIN_PARALLEL_ROWS`] points. Returns a zero-sized matrix when either set
/// is empty.
///
/// # Errors
///
/// `ShapeMismatch` when the two sets have different dimensionality.
pub fn pairwise_distances<T: Scalar>(
    source: &PointSet<T>,
    target: &PointSet<T>,
    metric: Metric,
) -> Result<DistanceMatrix<T>> {
    let source = source.view();
    let target = target.view();
    check_dimensions(&source, &target)?;
    Ok(compute_block(source, target, metric, source.len() >= MIN_PARALLEL_ROWS))
}

pub(crate) fn check_dimensions<T: Scalar>(
    source: &PointSetRef<'_, T>,
    target: &PointSetRef<'_, T>,
) -> Result<()> {
    if source.dimensionality() != target.dimensionality() {
        return Err(KnnError::shape_mismatch(
            source.dimensionality(),
            target.dimensionality(),
        ));
    }
    Ok(())
}

/// Distance matrix for a block of source rows against the full target set.
///
/// Dimensions must already have been checked.
pub(crate) fn compute_block<T: Scalar>(
    source: PointSetRef<'_, T>,
    target: PointSetRef<'_, T>,
    metric: Metric,
    parallel: bool,
) -> DistanceMatrix<T> {
    debug_assert_eq!(source.dimensionality(), target.dimensionality());

    let n = source.len();
    let m = target.len();
    let mut data = vec![T::zero(); n * m];

    trace!(rows = n, cols = m, %metric, parallel, "computing distance block");

    match metric {
        Metric::SquaredL2 | Metric::L2 => {
            fill_matrix::<T, SquaredL2Kernel>(source, target, &mut data, parallel)
        }
        Metric::L1 => fill_matrix::<T, L1Kernel>(source, target, &mut data, parallel),
        Metric::Linf => fill_matrix::<T, LinfKernel>(source, target, &mut data, parallel),
    }

    if metric.closing() == Closing::Sqrt {
        for d in data.iter_mut() {
            *d = metric.close(*d);
        }
    }

    DistanceMatrix {
        data,
        num_source: n,
        num_target: m,
    }
}

fn fill_matrix<T: Scalar, K: MetricKernel<T>>(
    source: PointSetRef<'_, T>,
    target: PointSetRef<'_, T>,
    out: &mut [T],
    parallel: bool,
) {
    let m = target.len();
    if m == 0 || source.is_empty() {
        return;
    }

    for_each_row(out, m, parallel, |i, row| {
        let Some(query) = source.point(i) else {
            return;
        };
        for (o, candidate) in row.iter_mut().zip(target.into_rows()) {
            *o = K::reduce(query, candidate);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(rows: Vec<Vec<f32>>) -> PointSet<f32> {
        PointSet::from_vecs(rows).unwrap()
    }

    #[test]
    fn test_pairwise_squared_l2() {
        let a = set(vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]);
        let b = set(vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ]);

        let result = pairwise_distances(&a, &b, Metric::SquaredL2).unwrap();

        assert_eq!(result.shape(), (2, 3));
        assert!((result.get(0, 0) - 0.0).abs() < 1e-6);
        assert!((result.get(0, 1) - 2.0).abs() < 1e-6);
        assert!((result.get(0, 2) - 2.0).abs() < 1e-6);
        assert!((result.get(1, 1) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_pairwise_l2_applies_sqrt() {
        let a = PointSet::from_vecs(vec![vec![0.0f64, 0.0]]).unwrap();
        let b = PointSet::from_vecs(vec![vec![3.0f64, 4.0], vec![6.0, 8.0]]).unwrap();

        let squared = pairwise_distances(&a, &b, Metric::SquaredL2).unwrap();
        let true_dist = pairwise_distances(&a, &b, Metric::L2).unwrap();

        assert_eq!(squared.row(0), &[25.0, 100.0]);
        assert_eq!(true_dist.row(0), &[5.0, 10.0]);
    }

    #[test]
    fn test_pairwise_l1_and_linf() {
        let a = PointSet::from_vecs(vec![vec![0.0f64, 0.0]]).unwrap();
        let b = PointSet::from_vecs(vec![vec![3.0f64, -4.0]]).unwrap();
        assert_eq!(pairwise_distances(&a, &b, Metric::L1).unwrap().get(0, 0), 7.0);
        assert_eq!(pairwise_distances(&a, &b, Metric::Linf).unwrap().get(0, 0), 4.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = set(vec![vec![0.0, 0.0]]);
        let b = set(vec![vec![0.0, 0.0, 0.0]]);
        let err = pairwise_distances(&a, &b, Metric::SquaredL2).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::ShapeMismatch);
    }

    #[test]
    fn test_empty_inputs_give_zero_sized_matrix() {
        let a = PointSet::<f32>::empty(2);
        let b = set(vec![vec![0.0, 0.0], vec![1.0, 1.0]]);

        let left = pairwise_distances(&a, &b, Metric::SquaredL2).unwrap();
        assert_eq!(left.shape(), (0, 2));
        assert!(left.is_empty());

        let right = pairwise_distances(&b, &a, Metric::SquaredL2).unwrap();
        assert_eq!(right.shape(), (2, 0));
        assert_eq!(right.row(1), &[] as &[f32]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let data: Vec<f32> = (0..300 * 5).map(|i| ((i * 37) % 101) as f32 / 7.0).collect();
        let points = PointSet::from_flat(data, 5).unwrap();

        for metric in Metric::ALL {
            let seq = compute_block(points.view(), points.view(), metric, false);
            let par = compute_block(points.view(), points.view(), metric, true);
            assert_eq!(seq, par, "metric {}", metric);
        }
    }

    #[test]
    fn test_from_raw_shape_check() {
        assert!(DistanceMatrix::from_raw(vec![0.0f32; 6], 2, 3).is_ok());
        assert!(DistanceMatrix::from_raw(vec![0.0f32; 5], 2, 3).is_err());
    }
}
