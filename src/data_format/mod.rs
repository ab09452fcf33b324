//! Point set types.
//!
//! The engine consumes dense `[N, D]` arrays; see [`PointSet`] and its
//! borrowed view [`PointSetRef`].

mod point_set;

pub use point_set::{PointSet, PointSetRef};
