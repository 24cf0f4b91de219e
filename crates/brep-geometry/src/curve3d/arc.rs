//! 3D circular arc through three points.

use std::f64::consts::PI;

use brep_core::{BrepError, Result, POINT_TOL};
use brep_math::{Frame3D, Point3, Vector3};
use glam::DQuat;
use serde::{Deserialize, Serialize};

/// A circular arc defined by `start`, an `interior` point on the arc,
/// and `end`.
///
/// The derived frame is oriented so the sweep from start to end is
/// counterclockwise about `normal()`; `angle` is the sweep magnitude in
/// `(0, 2*PI)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Arc3d {
    pub start: Point3,
    pub interior: Point3,
    pub end: Point3,
    center: Point3,
    radius: f64,
    u: Vector3,
    v: Vector3,
    w: Vector3,
    angle: f64,
}

impl Arc3d {
    pub fn new(start: Point3, interior: Point3, end: Point3) -> Result<Self> {
        let ab = interior - start;
        let ac = end - start;
        let n = ab.cross(ac);
        let n2 = n.length_squared();
        if n2 < 1e-18 {
            return Err(BrepError::Degenerate(
                "arc points are colinear or coincident".to_string(),
            ));
        }
        // Circumcenter of the three points
        let term = (ab.length_squared() * ac - ac.length_squared() * ab).cross(n);
        let center = start + term / (2.0 * n2);
        let radius = (start - center).length();

        let mut w = n / n2.sqrt();
        let u = (start - center) / radius;
        let mut v = w.cross(u);
        let angle_of = |p: Point3| -> f64 {
            let d = p - center;
            d.dot(v).atan2(d.dot(u)).rem_euclid(2.0 * PI)
        };
        let rel_interior = angle_of(interior);
        let rel_end = angle_of(end);
        if rel_interior > rel_end {
            // Flip the plane normal so the sweep is counterclockwise
            w = -w;
            v = -v;
        }
        let angle_of = |p: Point3| -> f64 {
            let d = p - center;
            d.dot(v).atan2(d.dot(u)).rem_euclid(2.0 * PI)
        };
        let angle = angle_of(end);
        if angle < POINT_TOL || (start - end).length() < POINT_TOL {
            return Err(BrepError::Degenerate(
                "arc start and end coincide (zero sweep)".to_string(),
            ));
        }
        Ok(Self {
            start,
            interior,
            end,
            center,
            radius,
            u,
            v,
            w,
            angle,
        })
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Plane normal; the sweep is counterclockwise about it.
    pub fn normal(&self) -> Vector3 {
        self.w
    }

    /// Sweep magnitude in `(0, 2*PI)`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn length(&self) -> f64 {
        self.radius * self.angle
    }

    /// Point at sweep fraction `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point3 {
        let phi = t * self.angle;
        self.center + self.radius * (phi.cos() * self.u + phi.sin() * self.v)
    }

    pub fn rotated(&self, center: Point3, axis: Vector3, angle: f64) -> Result<Self> {
        if axis.length() < POINT_TOL {
            return Err(BrepError::Degenerate(
                "rotation axis has zero length".to_string(),
            ));
        }
        let q = DQuat::from_axis_angle(axis.normalize(), angle);
        Self::new(
            center + q * (self.start - center),
            center + q * (self.interior - center),
            center + q * (self.end - center),
        )
    }

    pub fn translated(&self, offset: Vector3) -> Self {
        Self {
            start: self.start + offset,
            interior: self.interior + offset,
            end: self.end + offset,
            center: self.center + offset,
            ..*self
        }
    }

    pub fn mapped(&self, base: &Frame3D) -> Result<Self> {
        Self::new(
            base.local_to_global_point(self.start),
            base.local_to_global_point(self.interior),
            base.local_to_global_point(self.end),
        )
    }
}
