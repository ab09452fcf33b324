//! Portable implementations using the `wide` crate.

use wide::f32x8;

const LANES: usize = 8;

#[inline]
fn load(slice: &[f32]) -> f32x8 {
    debug_assert!(slice.len() >= LANES);
    f32x8::new([
        slice[0], slice[1], slice[2], slice[3],
        slice[4], slice[5], slice[6], slice[7],
    ])
}

/// Sum of squared differences.
pub fn squared_l2_f32(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let len = a.len();
    let chunks = len / LANES;
    let remainder = len % LANES;

    let mut sum = f32x8::ZERO;

    for i in 0..chunks {
        let offset = i * LANES;
        let diff = load(&a[offset..]) - load(&b[offset..]);
        sum += diff * diff;
    }

    let mut result = sum.reduce_add();

    for i in (len - remainder)..len {
        let diff = a[i] - b[i];
        result += diff * diff;
    }

    result
}

/// Sum of absolute differences.
pub fn l1_distance_f32(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let len = a.len();
    let chunks = len / LANES;
    let remainder = len % LANES;

    let mut sum = f32x8::ZERO;

    for i in 0..chunks {
        let offset = i * LANES;
        let diff = load(&a[offset..]) - load(&b[offset..]);
        sum += diff.abs();
    }

    let mut result = sum.reduce_add();

    for i in (len - remainder)..len {
        result += (a[i] - b[i]).abs();
    }

    result
}
