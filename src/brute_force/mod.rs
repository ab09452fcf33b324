//! Brute-force nearest neighbor search.
//!
//! This module provides exact k-nearest-neighbor search by exhaustively
//! computing the pairwise distance matrix and reducing each row with a
//! top-k selector.

mod result;
mod searcher;
mod selection;
mod top_k;

pub use result::NeighborResult;
pub use searcher::BruteForceKnn;
pub use selection::select_k_smallest;
pub use top_k::{Neighbor, TopK};
