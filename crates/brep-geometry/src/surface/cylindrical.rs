//! Cylindrical surface.

use std::f64::consts::PI;

use brep_math::{angle_from_cos_sin, Frame3D, Point2, Point3};
use serde::{Deserialize, Serialize};

/// A cylinder around `frame.w`; 2D parameters are `(theta, z)` with
/// `theta` in `[0, 2*PI)` measured from `frame.u` and `z` the
/// frame-local height.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CylindricalSurface {
    pub frame: Frame3D,
    pub radius: f64,
}

impl CylindricalSurface {
    pub fn new(frame: Frame3D, radius: f64) -> Self {
        Self { frame, radius }
    }

    pub fn point2d_to_3d(&self, p: Point2) -> Point3 {
        let (theta, z) = (p.x, p.y);
        self.frame.local_to_global_point(Point3::new(
            self.radius * theta.cos(),
            self.radius * theta.sin(),
            z,
        ))
    }

    pub fn point3d_to_2d(&self, p: Point3) -> Point2 {
        let local = self.frame.global_to_local_point(p);
        let theta = angle_from_cos_sin(local.x / self.radius, local.y / self.radius);
        Point2::new(theta, local.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::{dvec2, dvec3};

    fn unit_cylinder() -> CylindricalSurface {
        CylindricalSurface::new(Frame3D::axis_aligned(Point3::ZERO), 1.0)
    }

    #[test]
    fn test_points_on_cylinder() {
        let cyl = CylindricalSurface::new(Frame3D::axis_aligned(dvec3(1.0, 0.0, 0.0)), 2.0);
        for i in 0..8 {
            let theta = i as f64 * PI / 4.0;
            let p = cyl.point2d_to_3d(dvec2(theta, 0.5));
            let r = ((p.x - 1.0) * (p.x - 1.0) + p.y * p.y).sqrt();
            assert!((r - 2.0).abs() < 1e-12, "off cylinder at theta={}", theta);
            assert!((p.z - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_round_trip() {
        let cyl = unit_cylinder();
        for &theta in &[0.0, 0.5, PI / 2.0, PI, 4.2, 6.0] {
            for &z in &[-1.0, 0.0, 2.5] {
                let p2d = dvec2(theta, z);
                let back = cyl.point3d_to_2d(cyl.point2d_to_3d(p2d));
                assert_relative_eq!(back.x, theta, epsilon = 1e-6);
                assert_relative_eq!(back.y, z, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_seam_representatives() {
        let cyl = unit_cylinder();
        // theta = 2*PI wraps to the 0 representative
        let back = cyl.point3d_to_2d(cyl.point2d_to_3d(dvec2(2.0 * PI, 0.0)));
        assert!(back.x.abs() < 1e-6 || (back.x - 2.0 * PI).abs() < 1e-6);
    }
}
