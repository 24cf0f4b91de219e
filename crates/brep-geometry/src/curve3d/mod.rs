//! 3D edge primitives for boundary loops.

mod arc;
mod segment;

pub use arc::Arc3d;
pub use segment::LineSegment3d;

use brep_core::Result;
use brep_math::{Frame3D, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D boundary-loop edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Edge3d {
    Segment(LineSegment3d),
    Arc(Arc3d),
}

impl Edge3d {
    pub fn start(&self) -> Point3 {
        match self {
            Edge3d::Segment(s) => s.start,
            Edge3d::Arc(a) => a.start,
        }
    }

    pub fn end(&self) -> Point3 {
        match self {
            Edge3d::Segment(s) => s.end,
            Edge3d::Arc(a) => a.end,
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Edge3d::Segment(s) => s.length(),
            Edge3d::Arc(a) => a.length(),
        }
    }

    /// Point at arc-length `s` from the edge start, clamped to the edge.
    pub fn point_at_abscissa(&self, s: f64) -> Point3 {
        let len = self.length();
        let t = if len > 0.0 { (s / len).clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Edge3d::Segment(seg) => seg.point_at(t),
            Edge3d::Arc(a) => a.point_at(t),
        }
    }

    /// Sample the edge into an ordered point run, both ends included.
    pub fn sample_points(&self, resolution: usize) -> Vec<Point3> {
        let n = match self {
            Edge3d::Segment(_) => 1.max(resolution / 8),
            Edge3d::Arc(_) => resolution.max(2),
        };
        (0..=n)
            .map(|i| self.point_at_abscissa(self.length() * i as f64 / n as f64))
            .collect()
    }

    pub fn rotated(&self, center: Point3, axis: Vector3, angle: f64) -> Result<Self> {
        Ok(match self {
            Edge3d::Segment(s) => Edge3d::Segment(s.rotated(center, axis, angle)?),
            Edge3d::Arc(a) => Edge3d::Arc(a.rotated(center, axis, angle)?),
        })
    }

    pub fn translated(&self, offset: Vector3) -> Self {
        match self {
            Edge3d::Segment(s) => Edge3d::Segment(s.translated(offset)),
            Edge3d::Arc(a) => Edge3d::Arc(a.translated(offset)),
        }
    }

    /// Re-express the edge, treated as local to `base`, in global
    /// coordinates.
    pub fn mapped(&self, base: &Frame3D) -> Result<Self> {
        Ok(match self {
            Edge3d::Segment(s) => Edge3d::Segment(s.mapped(base)),
            Edge3d::Arc(a) => Edge3d::Arc(a.mapped(base)?),
        })
    }
}
