//! Conical surface.

use std::f64::consts::PI;

use brep_core::POINT_TOL;
use brep_math::{angle_from_cos_sin, Frame3D, Point2, Point3};
use serde::{Deserialize, Serialize};

/// A cone with apex at `frame.origin` opening along `frame.w`; 2D
/// parameters are `(theta, z)` and the radius at height `z` is
/// `z * tan(semi_angle)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConicalSurface {
    pub frame: Frame3D,
    pub semi_angle: f64,
}

impl ConicalSurface {
    pub fn new(frame: Frame3D, semi_angle: f64) -> Self {
        Self { frame, semi_angle }
    }

    pub fn point2d_to_3d(&self, p: Point2) -> Point3 {
        let (theta, z) = (p.x, p.y);
        let radius = z * self.semi_angle.tan();
        self.frame.local_to_global_point(Point3::new(
            radius * theta.cos(),
            radius * theta.sin(),
            z,
        ))
    }

    pub fn point3d_to_2d(&self, p: Point3) -> Point2 {
        let local = self.frame.global_to_local_point(p);
        let radius = local.z * self.semi_angle.tan();
        let theta = if radius.abs() < POINT_TOL {
            // Apex: any angle represents the point
            0.0
        } else {
            angle_from_cos_sin(local.x / radius, local.y / radius)
        };
        Point2::new(theta, local.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn cone() -> ConicalSurface {
        ConicalSurface::new(Frame3D::axis_aligned(Point3::ZERO), PI / 6.0)
    }

    #[test]
    fn test_radius_grows_with_height() {
        let cone = cone();
        let p = cone.point2d_to_3d(dvec2(0.0, 3.0));
        let expected_radius = 3.0 * (PI / 6.0).tan();
        assert!((p.x - expected_radius).abs() < 1e-12);
        assert!((p.z - 3.0).abs() < 1e-12);
        // The apex maps to the origin for any angle
        let apex = cone.point2d_to_3d(dvec2(2.5, 0.0));
        assert!(apex.length() < 1e-12);
    }

    #[test]
    fn test_round_trip() {
        let cone = cone();
        for &theta in &[0.0, 1.0, PI, 5.5] {
            let p2d = dvec2(theta, 2.0);
            let back = cone.point3d_to_2d(cone.point2d_to_3d(p2d));
            assert!(
                (back - p2d).length() < 1e-6,
                "round trip at {} gave {:?}",
                theta,
                back
            );
        }
    }
}
