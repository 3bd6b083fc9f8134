//! Vector helpers on plain `[f64; 3]` triples
//!
//! Positions and directions are stored as arrays throughout the crate, the
//! same way particles carry them, so these free functions do the small
//! amount of vector algebra the gun needs.

/// Componentwise sum `a + b`.
pub fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Componentwise difference `a - b`.
pub fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn scale(a: [f64; 3], factor: f64) -> [f64; 3] {
    [a[0] * factor, a[1] * factor, a[2] * factor]
}

pub fn neg(a: [f64; 3]) -> [f64; 3] {
    [-a[0], -a[1], -a[2]]
}

/// Euclidean length of `a`.
pub fn magnitude(a: [f64; 3]) -> f64 {
    (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt()
}

pub fn is_zero(a: [f64; 3]) -> bool {
    a[0] == 0.0 && a[1] == 0.0 && a[2] == 0.0
}

pub fn is_finite(a: [f64; 3]) -> bool {
    a.iter().all(|c| c.is_finite())
}

/// Largest absolute component of `a`.
pub fn max_abs_component(a: [f64; 3]) -> f64 {
    a.iter().fold(0.0_f64, |acc, c| acc.max(c.abs()))
}

/// Unit vector parallel to `a`.
///
/// Returns `None` for the zero vector, which has no direction. The vector is
/// rescaled by its largest component first so the norm neither overflows nor
/// underflows for finite inputs.
pub fn unit_vector(a: [f64; 3]) -> Option<[f64; 3]> {
    let largest = max_abs_component(a);
    if largest == 0.0 || !largest.is_finite() {
        return None;
    }
    let scaled = [a[0] / largest, a[1] / largest, a[2] / largest];
    let mag = magnitude(scaled);
    Some([scaled[0] / mag, scaled[1] / mag, scaled[2] / mag])
}
