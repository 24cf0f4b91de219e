//! 3D line segment.

use brep_core::Result;
use brep_math::{Frame3D, Point3, Vector3};
use glam::DQuat;
use serde::{Deserialize, Serialize};

/// A line segment from `start` to `end`, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LineSegment3d {
    pub start: Point3,
    pub end: Point3,
}

impl LineSegment3d {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }

    pub fn point_at(&self, t: f64) -> Point3 {
        self.start + t * (self.end - self.start)
    }

    pub fn middle(&self) -> Point3 {
        (self.start + self.end) * 0.5
    }

    pub fn direction(&self) -> Vector3 {
        self.end - self.start
    }

    /// Distance from `p` to the segment, with the closest segment point.
    pub fn point_distance(&self, p: Point3) -> (f64, Point3) {
        let d = self.end - self.start;
        let len_sq = d.length_squared();
        if len_sq == 0.0 {
            return ((p - self.start).length(), self.start);
        }
        let t = ((p - self.start).dot(d) / len_sq).clamp(0.0, 1.0);
        let nearest = self.start + t * d;
        ((p - nearest).length(), nearest)
    }

    pub fn rotated(&self, center: Point3, axis: Vector3, angle: f64) -> Result<Self> {
        // Reuse the frame rotation for the axis validity check
        let frame = Frame3D::axis_aligned(self.start).rotated(center, axis, angle)?;
        let q = DQuat::from_axis_angle(axis.normalize(), angle);
        Ok(Self {
            start: frame.origin,
            end: center + q * (self.end - center),
        })
    }

    pub fn translated(&self, offset: Vector3) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    pub fn mapped(&self, base: &Frame3D) -> Self {
        Self {
            start: base.local_to_global_point(self.start),
            end: base.local_to_global_point(self.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_point_at_and_length() {
        let seg = LineSegment3d::new(dvec3(0.0, 0.0, 0.0), dvec3(2.0, 4.0, 6.0));
        assert!((seg.point_at(0.5) - dvec3(1.0, 2.0, 3.0)).length() < 1e-12);
        assert!((seg.length() - 56.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_point_distance_clamps() {
        let seg = LineSegment3d::new(dvec3(0.0, 0.0, 0.0), dvec3(1.0, 0.0, 0.0));
        let (d, nearest) = seg.point_distance(dvec3(3.0, 0.0, 0.0));
        assert!((d - 2.0).abs() < 1e-12);
        assert!((nearest - dvec3(1.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_rotated() {
        let seg = LineSegment3d::new(dvec3(1.0, 0.0, 0.0), dvec3(2.0, 0.0, 0.0));
        let rotated = seg.rotated(Point3::ZERO, Vector3::Z, FRAC_PI_2).unwrap();
        assert!((rotated.start - dvec3(0.0, 1.0, 0.0)).length() < 1e-12);
        assert!((rotated.end - dvec3(0.0, 2.0, 0.0)).length() < 1e-12);
    }
}
