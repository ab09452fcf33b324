//! Configuration types for the brute-force engine.

use crate::distance_measures::Metric;
use crate::error::{KnnError, Result};
use serde::{Deserialize, Serialize};

/// Default minimum number of source rows before work is spread over the rayon pool.
pub const DEFAULT_PARALLEL_ROW_THRESHOLD: usize = 64;

/// Per-row selection algorithm used by the top-k selector.
///
/// All strategies return exactly the same neighbors in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Bounded max-heap of size k, O(M log k) per row.
    Heap,
    /// Quickselect partitioning, O(M) average per row, then a sort of the k kept.
    Partition,
    /// `Partition` when k is a sizeable fraction of the row, otherwise `Heap`.
    #[default]
    Auto,
}

/// Whether a point may be its own neighbor when source and target coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfMatchPolicy {
    /// Skip the diagonal: point i never appears in its own neighbor list.
    #[default]
    Exclude,
    /// Keep the diagonal; every point is its own nearest neighbor at distance 0.
    Include,
}

/// Handling of NaN and infinite feature values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonFinitePolicy {
    /// Scan both point sets up front and fail with `NonFiniteInput`.
    #[default]
    Reject,
    /// Skip the scan; non-finite distances sort after every finite one.
    Propagate,
}

/// Configuration of a kNN query.
///
/// # Example
///
/// ```
/// use pairwise_knn::{KnnConfig, Metric};
///
/// let config = KnnConfig::new(5)
///     .with_metric(Metric::L1)
///     .with_chunk_size(Some(256));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnnConfig {
    /// Number of neighbors to return per source point.
    pub k: usize,

    /// Distance metric.
    pub metric: Metric,

    /// Per-row selection algorithm.
    pub strategy: SelectionStrategy,

    /// Number of source rows per block; `None` materializes the full matrix.
    pub chunk_size: Option<usize>,

    /// Allow row-parallel evaluation on the rayon global pool.
    pub parallel: bool,

    /// Minimum number of rows before parallel evaluation kicks in.
    pub parallel_row_threshold: usize,

    /// Self-match handling for [`search_self`](crate::BruteForceKnn::search_self).
    pub self_match: SelfMatchPolicy,

    /// NaN / infinity handling.
    pub non_finite: NonFinitePolicy,
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self {
            k: 1,
            metric: Metric::SquaredL2,
            strategy: SelectionStrategy::Auto,
            chunk_size: None,
            parallel: true,
            parallel_row_threshold: DEFAULT_PARALLEL_ROW_THRESHOLD,
            self_match: SelfMatchPolicy::Exclude,
            non_finite: NonFinitePolicy::Reject,
        }
    }
}

impl KnnConfig {
    /// Create a configuration returning `k` neighbors with default settings.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Convert a signed neighbor count, rejecting negative values.
    pub fn checked_k(k: i64) -> Result<usize> {
        usize::try_from(k).map_err(|_| KnnError::invalid_k(k))
    }

    /// Set the number of neighbors.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the distance metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the selection strategy.
    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: Option<usize>) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Enable or disable parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the parallel row threshold.
    pub fn with_parallel_row_threshold(mut self, threshold: usize) -> Self {
        self.parallel_row_threshold = threshold;
        self
    }

    /// Set the self-match policy.
    pub fn with_self_match(mut self, policy: SelfMatchPolicy) -> Self {
        self.self_match = policy;
        self
    }

    /// Set the non-finite input policy.
    pub fn with_non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }

    /// Whether `rows` rows should be processed on the rayon pool.
    pub fn use_parallel(&self, rows: usize) -> bool {
        self.parallel && rows >= self.parallel_row_threshold.max(2)
    }

    /// Validate this configuration.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == Some(0) {
            return Err(KnnError::invalid_argument("chunk_size must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_default_config() {
        let config = KnnConfig::default();
        assert_eq!(config.k, 1);
        assert_eq!(config.metric, Metric::SquaredL2);
        assert_eq!(config.strategy, SelectionStrategy::Auto);
        assert_eq!(config.self_match, SelfMatchPolicy::Exclude);
        assert_eq!(config.non_finite, NonFinitePolicy::Reject);
        assert!(config.chunk_size.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let err = KnnConfig::new(3).with_chunk_size(Some(0)).validate().unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_checked_k() {
        assert_eq!(KnnConfig::checked_k(0).unwrap(), 0);
        assert_eq!(KnnConfig::checked_k(7).unwrap(), 7);
        assert_eq!(KnnConfig::checked_k(-2).unwrap_err().code(), ErrorCode::InvalidK);
    }

    #[test]
    fn test_use_parallel() {
        let config = KnnConfig::new(1).with_parallel_row_threshold(10);
        assert!(!config.use_parallel(9));
        assert!(config.use_parallel(10));
        assert!(!config.with_parallel(false).use_parallel(1000));
    }

    #[test]
    fn test_config_serialization() {
        let config = KnnConfig::new(20)
            .with_metric(Metric::Linf)
            .with_strategy(SelectionStrategy::Heap)
            .with_chunk_size(Some(128));

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: KnnConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: KnnConfig =
            serde_json::from_str(r#"{"k": 4, "metric": "l1", "self_match": "include"}"#).unwrap();
        assert_eq!(config.k, 4);
        assert_eq!(config.metric, Metric::L1);
        assert_eq!(config.self_match, SelfMatchPolicy::Include);
        assert!(config.parallel);
    }
}
