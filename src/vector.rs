//! Two-component vector helpers.  A `Complex<f64>` already is a 2-D
//! point (re is x, im is y), so the geometry code borrows it rather
//! than inventing a Point type of its own.
use num::Complex;

/// Euclidean length of a vector.
#[inline]
pub fn magnitude(v: Complex<f64>) -> f64 {
    (v.re * v.re + v.im * v.im).sqrt()
}

/// Scale a vector to unit length.  The caller guarantees the input
/// has non-zero length; a zero vector yields a non-finite result.
#[inline]
pub fn normalize(v: Complex<f64>) -> Complex<f64> {
    let m = magnitude(v);
    debug_assert!(m > 0.0, "normalize requires a non-zero vector");
    v / m
}
