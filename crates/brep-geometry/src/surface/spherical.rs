//! Spherical surface.

use std::f64::consts::PI;

use brep_core::POINT_TOL;
use brep_math::{angle_from_cos_sin, Frame3D, Point2, Point3};
use serde::{Deserialize, Serialize};

use super::round_ratio;

/// A sphere around `frame.origin`; 2D parameters are `(theta, phi)`
/// with `theta` the longitude in `[0, 2*PI)` and `phi` the latitude in
/// `[-PI/2, PI/2]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SphericalSurface {
    pub frame: Frame3D,
    pub radius: f64,
}

impl SphericalSurface {
    pub fn new(frame: Frame3D, radius: f64) -> Self {
        Self { frame, radius }
    }

    pub fn point2d_to_3d(&self, p: Point2) -> Point3 {
        let (theta, phi) = (p.x, p.y);
        self.frame.local_to_global_point(Point3::new(
            self.radius * phi.cos() * theta.cos(),
            self.radius * phi.cos() * theta.sin(),
            self.radius * phi.sin(),
        ))
    }

    pub fn point3d_to_2d(&self, p: Point3) -> Point2 {
        let local = self.frame.global_to_local_point(p);
        // Clamp before asin to absorb round-off above the poles
        let z = local.z.clamp(-self.radius, self.radius);
        let phi = (z / self.radius).asin();
        let ring = (self.radius * self.radius - z * z).sqrt();
        let theta = if ring < POINT_TOL {
            // Pole: fall back to the raw coordinates
            angle_from_cos_sin(local.x, local.y)
        } else {
            angle_from_cos_sin(round_ratio(local.x / ring), round_ratio(local.y / ring))
        };
        Point2::new(theta, phi)
    }
}
