//! Angle recovery helpers for periodic parametrizations.

use std::f64::consts::PI;

/// Recover an angle in `[0, 2*PI)` from its cosine and sine.
///
/// Both inputs are clamped to `[-1, 1]` before use, so slightly
/// out-of-range values from floating round-off are absorbed instead of
/// poisoning `acos`. Unlike a plain `atan2` on raw coordinates this is
/// well defined when both components are nearly zero (returns 0).
pub fn angle_from_cos_sin(cos: f64, sin: f64) -> f64 {
    let c = cos.clamp(-1.0, 1.0);
    let s = sin.clamp(-1.0, 1.0);
    if c == 0.0 && s == 0.0 {
        return 0.0;
    }
    if s >= 0.0 {
        c.acos()
    } else {
        let theta = 2.0 * PI - c.acos();
        if theta >= 2.0 * PI {
            0.0
        } else {
            theta
        }
    }
}
