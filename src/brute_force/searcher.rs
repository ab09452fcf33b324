//! Brute-force kNN engine.
//!
//! Drives the distance matrix and the top-k selector. Source rows are
//! processed in blocks of `chunk_size` so peak memory is
//! `chunk_size * M` distances instead of `N * M`. Blocks are independent and
//! results are assembled in source order, so chunked, parallel and
//! sequential runs return identical neighbors.
//!
//! Rows are ranked on the distances that are returned, closing transform
//! included, so ties follow the lower-index rule on the reported values and
//! `search` agrees with `select(distance_matrix(..))`.

use super::result::NeighborResult;
use super::selection::{resolve_strategy, select_k_smallest};
use super::top_k::Neighbor;
use crate::config::{KnnConfig, NonFinitePolicy, SelfMatchPolicy};
use crate::data_format::{PointSet, PointSetRef};
use crate::distance_measures::{check_dimensions, compute_block, DistanceMatrix, Metric};
use crate::error::{KnnError, Result};
use crate::types::Scalar;
use crate::utils::parallel::map_rows;
use tracing::{debug, trace};

/// Exact k-nearest-neighbor search by exhaustive pairwise distances.
///
/// # Example
///
/// ```
/// use pairwise_knn::{BruteForceKnn, KnnConfig, PointSet};
///
/// let points = PointSet::from_vecs(vec![
///     vec![0.0f32, 0.0],
///     vec![1.0, 0.0],
///     vec![0.0, 1.0],
/// ])
/// .unwrap();
///
/// let knn = BruteForceKnn::new(KnnConfig::new(1)).unwrap();
/// let result = knn.search_self(&points).unwrap();
///
/// assert_eq!(result.indices(0), vec![1]);
/// assert_eq!(result.distances(0), vec![1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct BruteForceKnn {
    config: KnnConfig,
}

impl BruteForceKnn {
    /// Create a new engine, validating the configuration.
    pub fn new(config: KnnConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create an engine returning `k` neighbors with default settings.
    pub fn with_k(k: usize) -> Self {
        Self {
            config: KnnConfig::new(k),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &KnnConfig {
        &self.config
    }

    /// Get the distance metric.
    pub fn metric(&self) -> Metric {
        self.config.metric
    }

    /// Compute the full `[N, M]` distance matrix under the configured metric.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` on differing dimensionality, `NonFiniteInput` when the
    /// policy is `Reject` and either set holds NaN or an infinity.
    #[tracing::instrument(skip_all, fields(n = source.len(), m = target.len(), metric = %self.config.metric))]
    pub fn distance_matrix<T: Scalar>(
        &self,
        source: &PointSet<T>,
        target: &PointSet<T>,
    ) -> Result<DistanceMatrix<T>> {
        let (source, target) = (source.view(), target.view());
        self.check_inputs(&source, Some(&target))?;

        let parallel = self.config.use_parallel(source.len());
        debug!(parallel, "computing full distance matrix");
        Ok(compute_block(source, target, self.config.metric, parallel))
    }

    /// Reduce every row of a precomputed distance matrix to its k smallest
    /// entries.
    ///
    /// The matrix is taken as is: no column is excluded and no closing
    /// transform is applied.
    pub fn select<T: Scalar>(&self, distances: &DistanceMatrix<T>) -> NeighborResult<T> {
        let (n, m) = distances.shape();
        let k = self.config.k;
        let strategy = self.config.strategy;
        debug!(n, m, k, strategy = ?resolve_strategy(strategy, k, m), "selecting top-k");

        let rows = map_rows(n, self.config.use_parallel(n), |i| {
            select_k_smallest(distances.row(i), k, strategy, None)
        });
        NeighborResult::from_rows(rows)
    }

    /// Find the k nearest targets of every source point.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` when source and target dimensionality differ,
    /// `NonFiniteInput` when the policy is `Reject` and an input holds NaN or
    /// an infinity.
    #[tracing::instrument(skip_all, fields(n = source.len(), m = target.len(), k = self.config.k, metric = %self.config.metric))]
    pub fn search<T: Scalar>(
        &self,
        source: &PointSet<T>,
        target: &PointSet<T>,
    ) -> Result<NeighborResult<T>> {
        let (source, target) = (source.view(), target.view());
        self.check_inputs(&source, Some(&target))?;
        Ok(self.search_blocks(source, target, false))
    }

    /// Find the k nearest neighbors of every point within the same set.
    ///
    /// With [`SelfMatchPolicy::Exclude`] point `i` never appears in its own
    /// row, so each row holds at most `N - 1` neighbors.
    #[tracing::instrument(skip_all, fields(n = points.len(), k = self.config.k, metric = %self.config.metric, self_match = ?self.config.self_match))]
    pub fn search_self<T: Scalar>(&self, points: &PointSet<T>) -> Result<NeighborResult<T>> {
        let points = points.view();
        self.check_inputs(&points, None)?;
        let exclude = self.config.self_match == SelfMatchPolicy::Exclude;
        Ok(self.search_blocks(points, points, exclude))
    }

    /// Find the k nearest targets of a single query point.
    pub fn search_one<T: Scalar>(
        &self,
        query: &[T],
        target: &PointSet<T>,
    ) -> Result<Vec<Neighbor<T>>> {
        let query = PointSetRef::single(query);
        let target = target.view();
        self.check_inputs(&query, Some(&target))?;

        let mut rows = self.search_blocks(query, target, false).into_rows();
        Ok(rows.pop().unwrap_or_default())
    }

    /// Validate dimensions and, under `Reject`, scan for non-finite values.
    fn check_inputs<T: Scalar>(
        &self,
        source: &PointSetRef<'_, T>,
        target: Option<&PointSetRef<'_, T>>,
    ) -> Result<()> {
        if let Some(target) = target {
            check_dimensions(source, target)?;
        }
        if self.config.non_finite == NonFinitePolicy::Reject {
            if let Some((point, feature)) = source.first_non_finite() {
                return Err(KnnError::non_finite_input("source", point, feature));
            }
            if let Some((point, feature)) = target.and_then(|t| t.first_non_finite()) {
                return Err(KnnError::non_finite_input("target", point, feature));
            }
        }
        Ok(())
    }

    fn search_blocks<T: Scalar>(
        &self,
        source: PointSetRef<'_, T>,
        target: PointSetRef<'_, T>,
        exclude_diagonal: bool,
    ) -> NeighborResult<T> {
        let n = source.len();
        let m = target.len();
        let k = self.config.k;

        if k == 0 || m == 0 {
            debug!(n, m, k, "nothing to select");
            return NeighborResult::from_rows(vec![Vec::new(); n]);
        }

        let metric = self.config.metric;
        let strategy = self.config.strategy;
        let chunk = self.config.chunk_size.unwrap_or(n).max(1);
        debug!(
            chunk,
            blocks = n.div_ceil(chunk),
            %metric,
            strategy = ?resolve_strategy(strategy, k, m),
            "running brute-force search"
        );

        let mut rows = Vec::with_capacity(n);
        let mut start = 0;
        while start < n {
            let end = (start + chunk).min(n);
            let parallel = self.config.use_parallel(end - start);
            trace!(start, end, parallel, "processing source block");

            let block = compute_block(source.slice_rows(start, end), target, metric, parallel);
            let selected = map_rows(end - start, parallel, |r| {
                let skip = exclude_diagonal.then_some(start + r);
                select_k_smallest(block.row(r), k, strategy, skip)
            });
            rows.extend(selected);
            start = end;
        }

        NeighborResult::from_rows(rows)
    }
}
