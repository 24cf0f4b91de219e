//! 2D edge primitives for wires and contours in parameter space.

mod arc;
mod bspline;
mod circle;
mod segment;

pub use arc::Arc2d;
pub use bspline::BSplineCurve2d;
pub use circle::Circle2d;
pub use segment::LineSegment2d;

use brep_math::Point2;
use serde::{Deserialize, Serialize};

/// A 2D contour edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Edge2d {
    Segment(LineSegment2d),
    Arc(Arc2d),
    Circle(Circle2d),
    BSpline(BSplineCurve2d),
}

impl Edge2d {
    pub fn start(&self) -> Point2 {
        match self {
            Edge2d::Segment(s) => s.start,
            Edge2d::Arc(a) => a.start,
            Edge2d::Circle(c) => c.point_at_angle(0.0),
            Edge2d::BSpline(b) => b.start(),
        }
    }

    pub fn end(&self) -> Point2 {
        match self {
            Edge2d::Segment(s) => s.end,
            Edge2d::Arc(a) => a.end,
            Edge2d::Circle(c) => c.point_at_angle(0.0),
            Edge2d::BSpline(b) => b.end(),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Edge2d::Segment(s) => s.length(),
            Edge2d::Arc(a) => a.length(),
            Edge2d::Circle(c) => c.circumference(),
            Edge2d::BSpline(b) => b.length(),
        }
    }

    /// Point at arc length `s` from the edge start; `s` is clamped to
    /// the edge's length.
    pub fn point_at_abscissa(&self, s: f64) -> Point2 {
        let len = self.length();
        let s = s.clamp(0.0, len);
        match self {
            Edge2d::Segment(seg) => {
                if len > 0.0 {
                    seg.start + (seg.end - seg.start) * (s / len)
                } else {
                    seg.start
                }
            }
            Edge2d::Arc(a) => a.point_at(s / len),
            Edge2d::Circle(c) => c.point_at_angle(s / c.radius),
            Edge2d::BSpline(b) => b.point_at_abscissa(s),
        }
    }

    /// Sample the edge into an ordered point run, start and end included.
    ///
    /// Densities are minimum point counts per unit of extent along each
    /// parametric axis; zero disables the corresponding constraint.
    pub fn polygon_points(&self, min_x_density: f64, min_y_density: f64) -> Vec<Point2> {
        match self {
            Edge2d::Segment(s) => s.polygon_points(min_x_density, min_y_density),
            Edge2d::Arc(a) => a.polygon_points(min_x_density, min_y_density),
            Edge2d::Circle(c) => c.polygon_points(min_x_density, min_y_density),
            Edge2d::BSpline(b) => b.polygon_points(min_x_density, min_y_density),
        }
    }
}
