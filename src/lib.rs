//! # pairwise-knn - Brute-force k-nearest neighbors
//!
//! Exact k-nearest-neighbor search over dense numeric point sets.
//!
//! ## Overview
//!
//! Every query runs in two stages:
//!
//! - **Broadcasted distance matrix**: every source point is compared against
//!   every target point in one fused pass, producing an `[N, M]` matrix.
//! - **Top-K selection**: each matrix row is reduced to the k targets with the
//!   smallest distance, ascending, ties broken by the lower target index.
//!
//! Rows can be processed in chunks to bound memory and spread over the rayon
//! pool. Chunked, parallel and sequential runs return identical results.
//!
//! ## Quick Start
//!
//! ```rust
//! use pairwise_knn::prelude::*;
//!
//! let points = PointSet::from_vecs(vec![
//!     vec![0.0f32, 0.0],
//!     vec![1.0, 0.0],
//!     vec![0.0, 1.0],
//! ])
//! .unwrap();
//!
//! let knn = BruteForceKnn::new(KnnConfig::new(1)).unwrap();
//! let result = knn.search_self(&points).unwrap();
//!
//! for (i, row) in result.iter().enumerate() {
//!     for neighbor in row {
//!         println!("{} -> {} ({:.4})", i, neighbor.index, neighbor.distance);
//!     }
//! }
//! ```
//!
//! ## Chunked Search
//!
//! For large source sets, bound peak memory to `chunk_size * M` distances:
//!
//! ```rust
//! use pairwise_knn::prelude::*;
//!
//! let source: PointSet<f32> = random_point_set(2_000, 16, Some(1));
//! let target: PointSet<f32> = random_point_set(500, 16, Some(2));
//!
//! let config = KnnConfig::new(10)
//!     .with_metric(Metric::L2)
//!     .with_chunk_size(Some(256));
//! let result = BruteForceKnn::new(config).unwrap().search(&source, &target).unwrap();
//! assert_eq!(result.len(), 2_000);
//! ```
//!
//! ## Distance Measures
//!
//! | Metric | Description | Use Case |
//! |--------|-------------|----------|
//! | `SquaredL2` | Squared Euclidean | Ranking (default, no sqrt) |
//! | `L2` | Euclidean | When actual distances are needed |
//! | `L1` | Manhattan | Outlier robust |
//! | `Linf` | Chebyshev | Worst-feature deviation |
//!
//! ## Module Overview
//!
//! - [`brute_force`]: The kNN engine and top-k selection
//! - [`distance_measures`]: Metrics and the pairwise distance matrix
//! - [`data_format`]: Point set types
//! - [`utils`]: Random point generation
//! - [`simd`]: Low-level SIMD kernels

pub mod brute_force;
pub mod data_format;
pub mod distance_measures;
pub mod simd;
pub mod utils;

mod config;
mod error;
mod types;

pub use brute_force::{BruteForceKnn, Neighbor, NeighborResult};
pub use config::{
    KnnConfig, NonFinitePolicy, SelectionStrategy, SelfMatchPolicy, DEFAULT_PARALLEL_ROW_THRESHOLD,
};
pub use data_format::{PointSet, PointSetRef};
pub use distance_measures::{pairwise_distances, DistanceMatrix, Metric};
pub use error::{ErrorCode, KnnError, Result};
pub use types::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::brute_force::{select_k_smallest, BruteForceKnn, Neighbor, NeighborResult, TopK};
    pub use crate::config::{KnnConfig, NonFinitePolicy, SelectionStrategy, SelfMatchPolicy};
    pub use crate::data_format::{PointSet, PointSetRef};
    pub use crate::distance_measures::{pairwise_distances, DistanceMatrix, Metric};
    pub use crate::error::{ErrorCode, KnnError, Result};
    pub use crate::types::*;
    pub use crate::utils::random_point_set;
}
