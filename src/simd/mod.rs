//! SIMD kernels for the sum-reduced metrics.
//!
//! Portable 8-lane implementations built on the `wide` crate. Only the
//! reductions that are associative under lane splitting (sum of squares and
//! sum of absolute values) are vectorized; the max-reduction stays scalar so
//! that NaN propagation follows [`nan_max`](crate::types).
//!
//! Both kernels are symmetric in their arguments: `f(a, b) == f(b, a)` bit for
//! bit, because `(a - b)^2 == (b - a)^2` and `|a - b| == |b - a|` lane by lane
//! and the lane sums are combined in a fixed order.

#[cfg(feature = "simd")]
mod portable;

#[cfg(feature = "simd")]
pub use portable::{l1_distance_f32, squared_l2_f32};
