//! Utility functions and types.

pub(crate) mod parallel;
pub mod random;

pub use parallel::MIN_PARALLEL_ROWS;
pub use random::{random_point_set, RandomPointGenerator};
