//! 2D line segment.

use brep_math::Point2;
use serde::{Deserialize, Serialize};

/// A line segment from `start` to `end`, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LineSegment2d {
    pub start: Point2,
    pub end: Point2,
}

impl LineSegment2d {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }

    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + t * (self.end - self.start)
    }

    pub fn middle(&self) -> Point2 {
        (self.start + self.end) * 0.5
    }

    /// Distance from `p` to the segment, with the closest segment point.
    pub fn point_distance(&self, p: Point2) -> (f64, Point2) {
        let d = self.end - self.start;
        let len_sq = d.length_squared();
        if len_sq == 0.0 {
            return ((p - self.start).length(), self.start);
        }
        let t = ((p - self.start).dot(d) / len_sq).clamp(0.0, 1.0);
        let nearest = self.start + t * d;
        ((p - nearest).length(), nearest)
    }

    /// Intersection with another segment, endpoints included.
    pub fn intersection(&self, other: &LineSegment2d) -> Option<Point2> {
        self.parametric_intersection(other, 0.0)
    }

    /// Intersection strictly inside both segments.
    ///
    /// The parametric margin keeps shared endpoints of adjacent edges
    /// from being reported as crossings.
    pub fn crossing(&self, other: &LineSegment2d) -> Option<Point2> {
        self.parametric_intersection(other, 1e-6)
    }

    fn parametric_intersection(&self, other: &LineSegment2d, margin: f64) -> Option<Point2> {
        let r = self.end - self.start;
        let s = other.end - other.start;
        let denom = r.perp_dot(s);
        if denom.abs() < 1e-14 {
            return None;
        }
        let q = other.start - self.start;
        let t = q.perp_dot(s) / denom;
        let u = q.perp_dot(r) / denom;
        if t < margin || t > 1.0 - margin || u < margin || u > 1.0 - margin {
            return None;
        }
        Some(self.start + t * r)
    }

    pub fn polygon_points(&self, min_x_density: f64, min_y_density: f64) -> Vec<Point2> {
        let d = self.end - self.start;
        let mut n = 1usize;
        if min_x_density > 0.0 {
            n = n.max((d.x.abs() * min_x_density).ceil() as usize);
        }
        if min_y_density > 0.0 {
            n = n.max((d.y.abs() * min_y_density).ceil() as usize);
        }
        (0..=n).map(|i| self.point_at(i as f64 / n as f64)).collect()
    }
}
