//! Closed 2D polygons: integral properties, containment, and
//! self-intersection repair.

use brep_core::{BrepError, Result};
use brep_math::{Aabb2, Point2};
use serde::{Deserialize, Serialize};

use crate::curve2d::LineSegment2d;

/// A closed polygon; `points` is authoritative and the closing edge from
/// the last point back to the first is implicit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedPolygon2d {
    pub points: Vec<Point2>,
}

impl ClosedPolygon2d {
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    pub fn line_segments(&self) -> Vec<LineSegment2d> {
        let n = self.points.len();
        (0..n)
            .map(|i| LineSegment2d::new(self.points[i], self.points[(i + 1) % n]))
            .collect()
    }

    /// Shoelace area with orientation sign.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut acc = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            acc += a.x * b.y - b.x * a.y;
        }
        0.5 * acc
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Polygon centroid. The signed area is kept through the division so
    /// orientation cancels; a near-zero area is degenerate.
    pub fn center_of_mass(&self) -> Result<Point2> {
        let a = self.signed_area();
        if a.abs() < 1e-8 {
            return Err(BrepError::Degenerate(
                "polygon area too small for a centroid".to_string(),
            ));
        }
        let n = self.points.len();
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            let cross = p.x * q.y - q.x * p.y;
            cx += (p.x + q.x) * cross;
            cy += (p.y + q.y) * cross;
        }
        Ok(Point2::new(cx / (6.0 * a), cy / (6.0 * a)))
    }

    /// Second moments of area `(Ix, Iy, Ixy)` about axes through `point`.
    pub fn second_moment_area(&self, point: Point2) -> (f64, f64, f64) {
        let n = self.points.len();
        let mut ix = 0.0;
        let mut iy = 0.0;
        let mut ixy = 0.0;
        for i in 0..n {
            let p = self.points[i] - point;
            let q = self.points[(i + 1) % n] - point;
            let cross = p.x * q.y - q.x * p.y;
            ix += (p.y * p.y + p.y * q.y + q.y * q.y) * cross;
            iy += (p.x * p.x + p.x * q.x + q.x * q.x) * cross;
            ixy += (p.x * q.y + 2.0 * p.x * p.y + 2.0 * q.x * q.y + q.x * p.y) * cross;
        }
        if ix < 0.0 {
            ix = -ix;
            iy = -iy;
            ixy = -ixy;
        }
        (ix / 12.0, iy / 12.0, ixy / 24.0)
    }

    /// Ray-casting containment test; boundary points may fall on either
    /// side.
    pub fn point_belongs(&self, p: Point2) -> bool {
        let n = self.points.len();
        let mut inside = false;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            if (a.y > p.y) != (b.y > p.y) {
                let t = (p.y - a.y) / (b.y - a.y);
                if a.x + t * (b.x - a.x) > p.x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Distance from `p` to the polygon border, with the closest border
    /// point.
    pub fn point_border_distance(&self, p: Point2) -> (f64, Point2) {
        let mut best = (f64::INFINITY, p);
        for seg in self.line_segments() {
            let (d, nearest) = seg.point_distance(p);
            if d < best.0 {
                best = (d, nearest);
            }
        }
        best
    }

    pub fn bounding_rectangle(&self) -> Option<Aabb2> {
        Aabb2::from_points(&self.points)
    }

    /// First crossing of two non-adjacent edges, as
    /// `(edge_index_1, edge_index_2, intersection_point)`.
    pub fn self_intersects(&self) -> Option<(usize, usize, Point2)> {
        let segments = self.line_segments();
        let n = segments.len();
        if n < 4 {
            return None;
        }
        for i in 0..n {
            for j in (i + 2)..n {
                // The closing edge is adjacent to the first one
                if i == 0 && j == n - 1 {
                    continue;
                }
                if let Some(x) = segments[i].crossing(&segments[j]) {
                    return Some((i, j, x));
                }
            }
        }
        None
    }

    /// Split the vertex cycle at one detected crossing into two
    /// sub-polygons, each taking the intersection point as a vertex.
    pub fn split_at_crossing(&self, edge1: usize, edge2: usize, x: Point2) -> (Self, Self) {
        let (e1, e2) = if edge1 < edge2 {
            (edge1, edge2)
        } else {
            (edge2, edge1)
        };
        // Works for the wrap-around closing edge too: e2 + 1 == n gives
        // an empty tail and the intersection closes both loops.
        let mut first: Vec<Point2> = self.points[..=e1].to_vec();
        first.push(x);
        first.extend_from_slice(&self.points[e2 + 1..]);
        let mut second: Vec<Point2> = vec![x];
        second.extend_from_slice(&self.points[e1 + 1..=e2]);
        (Self::new(first), Self::new(second))
    }

    /// Decompose a self-intersecting polygon into simple polygons.
    ///
    /// Candidates are processed through an explicit work queue; each
    /// detected crossing splits one candidate into two and the parts are
    /// re-examined until all remaining polygons are simple.
    pub fn repair_intersections(&self) -> Result<Vec<Self>> {
        let mut queue = vec![self.clone()];
        let mut simple = Vec::new();
        let mut budget = 10_000usize;
        while let Some(poly) = queue.pop() {
            if budget == 0 {
                return Err(BrepError::ToleranceFailure(
                    "polygon repair did not terminate".to_string(),
                ));
            }
            budget -= 1;
            match poly.self_intersects() {
                Some((i, j, x)) => {
                    let (a, b) = poly.split_at_crossing(i, j, x);
                    for part in [a, b] {
                        if part.points.len() >= 3 {
                            queue.push(part);
                        }
                    }
                }
                None => simple.push(poly),
            }
        }
        Ok(simple)
    }

    /// Pick the repaired polygon replacing a malformed boundary: simple,
    /// more than 3 vertices, largest area. Ambiguous or all-degenerate
    /// candidate sets are an error.
    pub fn select_repaired(candidates: Vec<Self>) -> Result<Self> {
        let mut best: Option<(f64, Self)> = None;
        let mut tied = false;
        for poly in candidates {
            if poly.points.len() <= 3 {
                continue;
            }
            let area = poly.area();
            match &best {
                Some((best_area, _)) if (area - best_area).abs() < 1e-12 => tied = true,
                Some((best_area, _)) if area > *best_area => {
                    best = Some((area, poly));
                    tied = false;
                }
                Some(_) => {}
                None => best = Some((area, poly)),
            }
        }
        match best {
            Some(_) if tied => Err(BrepError::ToleranceFailure(
                "ambiguous repaired polygon selection (area tie)".to_string(),
            )),
            Some((_, poly)) => Ok(poly),
            None => Err(BrepError::ToleranceFailure(
                "no simple polygon with more than 3 vertices after repair".to_string(),
            )),
        }
    }
}
