//! Core type definitions.
//!
//! This module contains the scalar trait and the index aliases used throughout the library.

use num_traits::float::FloatCore;
use std::fmt::Debug;
use std::iter::Sum;

/// Index of a point inside a [`PointSet`](crate::data_format::PointSet).
pub type PointIndex = usize;

/// Index type for dimensions within a point.
pub type DimensionIndex = usize;

/// Trait for the floating-point types a point set can hold.
///
/// Distances are computed and returned in the same type as the input
/// features, so a `PointSet<f32>` produces `f32` distances.
pub trait Scalar: FloatCore + Default + Debug + Sum + Send + Sync + 'static {
    /// Square root, used as the closing transform of the L2 metric.
    fn sqrt_val(self) -> Self;

    /// Sum of squared differences over two equal-length slices.
    #[inline]
    fn sum_squared_diff(a: &[Self], b: &[Self]) -> Self {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| {
                let d = x - y;
                d * d
            })
            .sum()
    }

    /// Sum of absolute differences over two equal-length slices.
    #[inline]
    fn sum_abs_diff(a: &[Self], b: &[Self]) -> Self {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| FloatCore::abs(x - y))
            .sum()
    }
}

impl Scalar for f32 {
    #[inline]
    fn sqrt_val(self) -> Self {
        self.sqrt()
    }

    #[cfg(feature = "simd")]
    #[inline]
    fn sum_squared_diff(a: &[Self], b: &[Self]) -> Self {
        crate::simd::squared_l2_f32(a, b)
    }

    #[cfg(feature = "simd")]
    #[inline]
    fn sum_abs_diff(a: &[Self], b: &[Self]) -> Self {
        crate::simd::l1_distance_f32(a, b)
    }
}

impl Scalar for f64 {
    #[inline]
    fn sqrt_val(self) -> Self {
        self.sqrt()
    }
}

/// NaN-propagating maximum.
///
/// `f32::max` returns the non-NaN operand, which would silently drop a NaN
/// feature difference from a max-reduction.
#[inline]
pub(crate) fn nan_max<T: Scalar>(a: T, b: T) -> T {
    if a.is_nan() || a > b {
        a
    } else {
        b
    }
}
