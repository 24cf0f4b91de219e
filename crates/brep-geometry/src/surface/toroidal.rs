//! Toroidal surface.

use std::f64::consts::PI;

use brep_math::{angle_from_cos_sin, Frame3D, Point2, Point3};
use serde::{Deserialize, Serialize};

use super::round_ratio;

/// A torus around `frame.w`; 2D parameters are `(theta, phi)` with
/// `theta` the angle around the main axis and `phi` the angle around
/// the tube, both in `[0, 2*PI)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ToroidalSurface {
    pub frame: Frame3D,
    /// Distance from the axis to the tube center.
    pub major_radius: f64,
    /// Tube radius.
    pub minor_radius: f64,
}

impl ToroidalSurface {
    pub fn new(frame: Frame3D, major_radius: f64, minor_radius: f64) -> Self {
        Self {
            frame,
            major_radius,
            minor_radius,
        }
    }

    pub fn point2d_to_3d(&self, p: Point2) -> Point3 {
        let (theta, phi) = (p.x, p.y);
        let ring = self.major_radius + self.minor_radius * phi.cos();
        self.frame.local_to_global_point(Point3::new(
            ring * theta.cos(),
            ring * theta.sin(),
            self.minor_radius * phi.sin(),
        ))
    }

    /// Inverse mapping; resolves the tube angle on the outer branch
    /// (`cos(phi) >= 0`), which is where boundary loops of one-sided
    /// torus patches live.
    pub fn point3d_to_2d(&self, p: Point3) -> Point2 {
        let local = self.frame.global_to_local_point(p);
        // Clamp before asin to absorb round-off at the tube extremes
        let z = local.z.clamp(-self.minor_radius, self.minor_radius);
        let phi = (z / self.minor_radius).asin();
        let ring = self.major_radius
            + (self.minor_radius * self.minor_radius - z * z).sqrt();
        let theta = angle_from_cos_sin(
            round_ratio(local.x / ring),
            round_ratio(local.y / ring),
        );
        Point2::new(theta, phi.rem_euclid(2.0 * PI))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{dvec2, dvec3};

    fn torus() -> ToroidalSurface {
        ToroidalSurface::new(Frame3D::axis_aligned(Point3::ZERO), 3.0, 1.0)
    }

    #[test]
    fn test_points_on_torus() {
        let tor = torus();
        for &theta in &[0.0, 1.5, 4.0] {
            for &phi in &[0.0, 1.0, 3.5, 6.0] {
                let p = tor.point2d_to_3d(dvec2(theta, phi));
                let ring = (p.x * p.x + p.y * p.y).sqrt();
                let tube = ((ring - 3.0).powi(2) + p.z * p.z).sqrt();
                assert!((tube - 1.0).abs() < 1e-12, "off tube at {:?}", (theta, phi));
            }
        }
    }

    #[test]
    fn test_round_trip_outer_branch() {
        let tor = torus();
        // phi values with cos(phi) >= 0; the inverse resolves onto this
        // branch by construction
        for &theta in &[0.2, 2.0, 5.8] {
            for &phi in &[0.0, 0.8, 2.0 * PI - 0.8] {
                let p2d = dvec2(theta, phi);
                let back = tor.point3d_to_2d(tor.point2d_to_3d(p2d));
                let dphi = (back.y - p2d.y).abs();
                let dphi = dphi.min(2.0 * PI - dphi);
                assert!(
                    (back.x - p2d.x).abs() < 1e-4 && dphi < 1e-4,
                    "round trip at {:?} gave {:?}",
                    p2d,
                    back
                );
            }
        }
    }

    #[test]
    fn test_tube_top_clamped() {
        let tor = torus();
        // Exactly on top of the tube; slight numeric excess in z must
        // not produce NaN
        let p = tor.point3d_to_2d(dvec3(3.0, 0.0, 1.0 + 1e-12));
        assert!((p.y - PI / 2.0).abs() < 1e-6);
        assert!(p.x.abs() < 1e-6 || (p.x - 2.0 * PI).abs() < 1e-6);
    }
}
