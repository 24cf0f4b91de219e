use brep_core::{BrepError, Result, POINT_TOL};
use glam::DQuat;
use serde::{Deserialize, Serialize};

use crate::{Point3, Vector3};

/// Right-handed local coordinate frame: origin plus basis `(u, v, w)`.
///
/// `w` is the surface normal / axis direction for the surfaces built on
/// top of it. The basis is expected orthonormal; `global_to_local`
/// assumes it and uses plain dot products.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame3D {
    pub origin: Point3,
    pub u: Vector3,
    pub v: Vector3,
    pub w: Vector3,
}

impl Frame3D {
    pub fn new(origin: Point3, u: Vector3, v: Vector3, w: Vector3) -> Self {
        Self { origin, u, v, w }
    }

    /// World frame at the given origin.
    pub fn axis_aligned(origin: Point3) -> Self {
        Self::new(origin, Vector3::X, Vector3::Y, Vector3::Z)
    }

    /// Build a frame from an origin and a normal direction.
    ///
    /// `u` and `v` are derived from the normal by crossing with whichever
    /// world axis is least parallel to it.
    pub fn from_origin_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        if normal.length() < POINT_TOL {
            return Err(BrepError::Degenerate(
                "frame normal has zero length".to_string(),
            ));
        }
        let w = normal.normalize();
        let reference = if w.x.abs() < 0.9 { Vector3::X } else { Vector3::Y };
        let u = w.cross(reference).normalize();
        let v = w.cross(u).normalize();
        Ok(Self::new(origin, u, v, w))
    }

    /// Map a frame-local point to global coordinates.
    pub fn local_to_global_point(&self, p: Point3) -> Point3 {
        self.origin + p.x * self.u + p.y * self.v + p.z * self.w
    }

    /// Express a global point in frame-local coordinates.
    pub fn global_to_local_point(&self, p: Point3) -> Point3 {
        let d = p - self.origin;
        Point3::new(d.dot(self.u), d.dot(self.v), d.dot(self.w))
    }

    pub fn local_to_global_vector(&self, vec: Vector3) -> Vector3 {
        vec.x * self.u + vec.y * self.v + vec.z * self.w
    }

    pub fn global_to_local_vector(&self, vec: Vector3) -> Vector3 {
        Vector3::new(vec.dot(self.u), vec.dot(self.v), vec.dot(self.w))
    }

    /// Frame rotated about the axis through `center` with direction
    /// `axis`, by `angle` radians. Pure counterpart of
    /// [`rotate_in_place`](Self::rotate_in_place).
    pub fn rotated(&self, center: Point3, axis: Vector3, angle: f64) -> Result<Self> {
        if axis.length() < POINT_TOL {
            return Err(BrepError::Degenerate(
                "rotation axis has zero length".to_string(),
            ));
        }
        let q = DQuat::from_axis_angle(axis.normalize(), angle);
        Ok(Self {
            origin: center + q * (self.origin - center),
            u: q * self.u,
            v: q * self.v,
            w: q * self.w,
        })
    }

    pub fn rotate_in_place(&mut self, center: Point3, axis: Vector3, angle: f64) -> Result<()> {
        *self = self.rotated(center, axis, angle)?;
        Ok(())
    }

    /// Frame translated by `offset`.
    pub fn translated(&self, offset: Vector3) -> Self {
        Self {
            origin: self.origin + offset,
            ..*self
        }
    }

    pub fn translate_in_place(&mut self, offset: Vector3) {
        self.origin += offset;
    }

    /// Re-express this frame, treated as local to `base`, in global
    /// coordinates.
    pub fn mapped(&self, base: &Frame3D) -> Self {
        Self {
            origin: base.local_to_global_point(self.origin),
            u: base.local_to_global_vector(self.u),
            v: base.local_to_global_vector(self.v),
            w: base.local_to_global_vector(self.w),
        }
    }

    pub fn map_in_place(&mut self, base: &Frame3D) {
        *self = self.mapped(base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_local_global_round_trip() {
        let frame = Frame3D::from_origin_normal(dvec3(1.0, 2.0, 3.0), dvec3(0.0, 1.0, 1.0))
            .unwrap();
        let p = dvec3(0.3, -0.7, 1.1);
        let back = frame.global_to_local_point(frame.local_to_global_point(p));
        assert!((back - p).length() < 1e-12, "round trip drifted: {:?}", back);
    }

    #[test]
    fn test_basis_orthonormal() {
        let frame = Frame3D::from_origin_normal(Point3::ZERO, dvec3(1.0, 1.0, 1.0)).unwrap();
        assert!(frame.u.dot(frame.v).abs() < 1e-12);
        assert!(frame.u.dot(frame.w).abs() < 1e-12);
        assert!((frame.u.length() - 1.0).abs() < 1e-12);
        assert!((frame.v.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotated_about_axis() {
        let frame = Frame3D::axis_aligned(dvec3(1.0, 0.0, 0.0));
        let rotated = frame
            .rotated(Point3::ZERO, Vector3::Z, FRAC_PI_2)
            .unwrap();
        assert!((rotated.origin - dvec3(0.0, 1.0, 0.0)).length() < 1e-12);
        assert!((rotated.u - Vector3::Y).length() < 1e-12);
    }

    #[test]
    fn test_zero_axis_rejected() {
        let frame = Frame3D::axis_aligned(Point3::ZERO);
        assert!(frame.rotated(Point3::ZERO, Vector3::ZERO, 1.0).is_err());
    }

    #[test]
    fn test_translate() {
        let mut frame = Frame3D::axis_aligned(Point3::ZERO);
        frame.translate_in_place(dvec3(1.0, 2.0, 3.0));
        assert_eq!(frame.origin, dvec3(1.0, 2.0, 3.0));
        assert_eq!(frame.u, Vector3::X);
    }
}
