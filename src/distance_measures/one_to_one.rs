//! One-to-one distance computations.
//!
//! Each metric has a zero-sized kernel type so the pairwise loops can be
//! monomorphized per metric and keep the inner loop free of dispatch.

use crate::types::{nan_max, Scalar};

/// Reduction of the transformed differences between two points.
pub(crate) trait MetricKernel<T: Scalar> {
    /// Reduced value over the feature axis, before any closing transform.
    fn reduce(a: &[T], b: &[T]) -> T;
}

/// Sum of squared differences.
pub(crate) struct SquaredL2Kernel;

/// Sum of absolute differences.
pub(crate) struct L1Kernel;

/// Maximum absolute difference.
pub(crate) struct LinfKernel;

impl<T: Scalar> MetricKernel<T> for SquaredL2Kernel {
    #[inline]
    fn reduce(a: &[T], b: &[T]) -> T {
        T::sum_squared_diff(a, b)
    }
}

impl<T: Scalar> MetricKernel<T> for L1Kernel {
    #[inline]
    fn reduce(a: &[T], b: &[T]) -> T {
        T::sum_abs_diff(a, b)
    }
}

impl<T: Scalar> MetricKernel<T> for LinfKernel {
    #[inline]
    fn reduce(a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .fold(T::zero(), |acc, (&x, &y)| nan_max(acc, (x - y).abs()))
    }
}

/// Compute squared L2 distance between two points.
#[inline]
pub fn squared_l2_distance<T: Scalar>(a: &[T], b: &[T]) -> T {
    SquaredL2Kernel::reduce(a, b)
}

/// Compute L2 (Euclidean) distance between two points.
#[inline]
pub fn l2_distance<T: Scalar>(a: &[T], b: &[T]) -> T {
    squared_l2_distance(a, b).sqrt_val()
}

/// Compute L1 (Manhattan) distance between two points.
#[inline]
pub fn l1_distance<T: Scalar>(a: &[T], b: &[T]) -> T {
    L1Kernel::reduce(a, b)
}

/// Compute L-infinity (Chebyshev) distance between two points.
#[inline]
pub fn linf_distance<T: Scalar>(a: &[T], b: &[T]) -> T {
    LinfKernel::reduce(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_l2() {
        let a = [1.0f64, 2.0, 3.0];
        let b = [4.0f64, 6.0, 3.0];
        assert_eq!(squared_l2_distance(&a, &b), 25.0);
        assert_eq!(l2_distance(&a, &b), 5.0);
    }

    #[test]
    fn test_l1() {
        let a = [1.0f32, -1.0];
        let b = [-2.0f32, 3.0];
        assert!((l1_distance(&a, &b) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_linf() {
        let a = [0.0f64, 5.0, -1.0];
        let b = [1.0f64, 1.0, 2.0];
        assert_eq!(linf_distance(&a, &b), 4.0);
    }

    #[test]
    fn test_zero_dimensional_points() {
        let empty: [f64; 0] = [];
        assert_eq!(squared_l2_distance(&empty, &empty), 0.0);
        assert_eq!(l1_distance(&empty, &empty), 0.0);
        assert_eq!(linf_distance(&empty, &empty), 0.0);
    }

    #[test]
    fn test_self_distance_is_zero() {
        let p = [0.25f32, -3.5, 7.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(squared_l2_distance(&p, &p), 0.0);
        assert_eq!(l1_distance(&p, &p), 0.0);
        assert_eq!(linf_distance(&p, &p), 0.0);
    }

    #[test]
    fn test_linf_propagates_nan() {
        let a = [1.0f64, f64::NAN, 0.0];
        let b = [0.0f64, 0.0, 10.0];
        assert!(linf_distance(&a, &b).is_nan());
    }
}
