//! Ruled surface between two rail wires.

use brep_math::{Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::curve3d::LineSegment3d;
use crate::wire3d::Wire3d;

/// Linear interpolation between two 3D rails; 2D parameters `(x, y)`
/// are both in `[0, 1]`: `x` picks matching normalized-abscissa points
/// on the rails, `y` blends between them along the ruling segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuledSurface {
    pub rail1: Wire3d,
    pub rail2: Wire3d,
}

impl RuledSurface {
    pub fn new(rail1: Wire3d, rail2: Wire3d) -> Self {
        Self { rail1, rail2 }
    }

    /// The ruling segment at normalized abscissa `x`.
    pub fn ruling(&self, x: f64) -> LineSegment3d {
        let x = x.clamp(0.0, 1.0);
        LineSegment3d::new(
            self.rail1.point_at_abscissa(x * self.rail1.length()),
            self.rail2.point_at_abscissa(x * self.rail2.length()),
        )
    }

    pub fn point2d_to_3d(&self, p: Point2) -> Point3 {
        self.ruling(p.x).point_at(p.y.clamp(0.0, 1.0))
    }

    /// Approximate inverse: nearest ruling by sampled search, refined
    /// by ternary section, then projection onto the ruling segment.
    pub fn point3d_to_2d(&self, p: Point3) -> Point2 {
        const SAMPLES: usize = 100;
        let mut best_x = 0.0;
        let mut best_d = f64::INFINITY;
        for i in 0..=SAMPLES {
            let x = i as f64 / SAMPLES as f64;
            let (d, _) = self.ruling(x).point_distance(p);
            if d < best_d {
                best_d = d;
                best_x = x;
            }
        }
        let step = 1.0 / SAMPLES as f64;
        let mut lo = (best_x - step).max(0.0);
        let mut hi = (best_x + step).min(1.0);
        for _ in 0..40 {
            let m1 = lo + (hi - lo) / 3.0;
            let m2 = hi - (hi - lo) / 3.0;
            let d1 = self.ruling(m1).point_distance(p).0;
            let d2 = self.ruling(m2).point_distance(p).0;
            if d1 < d2 {
                hi = m2;
            } else {
                lo = m1;
            }
        }
        let x = 0.5 * (lo + hi);
        let ruling = self.ruling(x);
        let dir = ruling.direction();
        let len_sq = dir.length_squared();
        let y = if len_sq > 0.0 {
            ((p - ruling.start).dot(dir) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Point2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve3d::Edge3d;
    use glam::{dvec2, dvec3};

    /// Two parallel straight rails spanning a unit square at z=0/z=1.
    fn strip() -> RuledSurface {
        let rail1 = Wire3d::new(vec![Edge3d::Segment(LineSegment3d::new(
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
        ))]);
        let rail2 = Wire3d::new(vec![Edge3d::Segment(LineSegment3d::new(
            dvec3(0.0, 0.0, 1.0),
            dvec3(1.0, 0.0, 1.0),
        ))]);
        RuledSurface::new(rail1, rail2)
    }

    #[test]
    fn test_point2d_to_3d_blends_rails() {
        let surface = strip();
        let p = surface.point2d_to_3d(dvec2(0.25, 0.5));
        assert!((p - dvec3(0.25, 0.0, 0.5)).length() < 1e-12);
        let corner = surface.point2d_to_3d(dvec2(1.0, 1.0));
        assert!((corner - dvec3(1.0, 0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_round_trip() {
        let surface = strip();
        for &x in &[0.1, 0.5, 0.9] {
            for &y in &[0.0, 0.3, 1.0] {
                let p2d = dvec2(x, y);
                let back = surface.point3d_to_2d(surface.point2d_to_3d(p2d));
                assert!(
                    (back - p2d).length() < 1e-6,
                    "round trip at {:?} gave {:?}",
                    p2d,
                    back
                );
            }
        }
    }

    #[test]
    fn test_off_surface_projects() {
        let surface = strip();
        let p = surface.point3d_to_2d(dvec3(0.5, 2.0, 0.5));
        assert!((p - dvec2(0.5, 0.5)).length() < 1e-6);
    }
}
