//! Plane surface.

use brep_core::{BrepError, Result, DOT_TOL, POINT_TOL};
use brep_math::{Frame3D, Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::curve3d::LineSegment3d;

/// An unbounded plane; 2D parameters are offsets from the frame origin
/// along `frame.u` and `frame.v`, the normal is `frame.w`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlaneSurface {
    pub frame: Frame3D,
}

impl PlaneSurface {
    pub fn new(frame: Frame3D) -> Self {
        Self { frame }
    }

    /// Plane through three non-colinear points; `u` follows the first
    /// edge.
    pub fn from_3_points(p1: Point3, p2: Point3, p3: Point3) -> Result<Self> {
        let u = p2 - p1;
        let normal = u.cross(p3 - p1);
        if u.length() < POINT_TOL || normal.length() < POINT_TOL {
            return Err(BrepError::Degenerate(
                "plane needs three distinct non-colinear points".to_string(),
            ));
        }
        let u = u.normalize();
        let w = normal.normalize();
        let v = w.cross(u);
        Ok(Self {
            frame: Frame3D::new(p1, u, v, w),
        })
    }

    pub fn normal(&self) -> Vector3 {
        self.frame.w
    }

    pub fn point2d_to_3d(&self, p: Point2) -> Point3 {
        self.frame.local_to_global_point(Point3::new(p.x, p.y, 0.0))
    }

    pub fn point3d_to_2d(&self, p: Point3) -> Point2 {
        let local = self.frame.global_to_local_point(p);
        Point2::new(local.x, local.y)
    }

    pub fn signed_distance(&self, p: Point3) -> f64 {
        (p - self.frame.origin).dot(self.frame.w)
    }

    pub fn project_point(&self, p: Point3) -> Point3 {
        p - self.signed_distance(p) * self.frame.w
    }

    /// Intersection of a segment with the plane, if the segment truly
    /// crosses it.
    pub fn linesegment_intersection(&self, seg: &LineSegment3d) -> Option<Point3> {
        let dir = seg.direction();
        let denom = dir.dot(self.frame.w);
        if denom.abs() < DOT_TOL {
            return None;
        }
        let t = (self.frame.origin - seg.start).dot(self.frame.w) / denom;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }
        Some(seg.point_at(t))
    }
}
