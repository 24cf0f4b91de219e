//! Fixed absolute tolerances used across the kernel.
//!
//! Two epsilons cover every comparison: `POINT_TOL` for distances and
//! lengths, `DOT_TOL` for dot products, planarity, and angle checks.
//! Inputs are assumed normalized to meters upstream, so these are
//! absolute, never relative.

/// Point coincidence / length tolerance (model units).
pub const POINT_TOL: f64 = 1e-6;

/// Dot-product / planarity / angle tolerance.
pub const DOT_TOL: f64 = 1e-8;

/// Check if two lengths are equal within `POINT_TOL`.
pub fn point_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < POINT_TOL
}

/// Check if a length is zero within `POINT_TOL`.
pub fn is_zero_len(v: f64) -> bool {
    v.abs() < POINT_TOL
}

/// Check if a dot product is zero within `DOT_TOL`.
pub fn is_zero_dot(v: f64) -> bool {
    v.abs() < DOT_TOL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_eq() {
        assert!(point_eq(1.0, 1.0 + 1e-9));
        assert!(!point_eq(1.0, 1.0 + 1e-4));
    }

    #[test]
    fn test_zero_checks() {
        assert!(is_zero_len(5e-7));
        assert!(!is_zero_len(5e-6));
        assert!(is_zero_dot(5e-9));
        assert!(!is_zero_dot(5e-8));
    }
}
