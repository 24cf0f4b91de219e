//! 2D wires and closed contours with arc-corrected integral
//! properties.

use std::sync::OnceLock;

use brep_core::{BrepError, Result, POINT_TOL};
use brep_math::{Aabb2, Point2};
use serde::{Deserialize, Serialize};

use crate::curve2d::{Arc2d, Edge2d};
use crate::polygon::ClosedPolygon2d;

/// An open chain of 2D edges, endpoints linked start-to-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire2d {
    pub edges: Vec<Edge2d>,
}

impl Wire2d {
    pub fn new(edges: Vec<Edge2d>) -> Self {
        Self { edges }
    }

    pub fn length(&self) -> f64 {
        self.edges.iter().map(Edge2d::length).sum()
    }

    /// Point at arc length `s` from the wire start; `s` is clamped to
    /// the wire's length.
    pub fn point_at_abscissa(&self, s: f64) -> Point2 {
        let total = self.length();
        let mut remaining = s.clamp(0.0, total);
        for edge in &self.edges {
            let len = edge.length();
            if remaining <= len {
                return edge.point_at_abscissa(remaining);
            }
            remaining -= len;
        }
        match self.edges.last() {
            Some(edge) => edge.end(),
            None => Point2::ZERO,
        }
    }
}

/// Decomposition of a contour into a base polygon plus classified arcs.
///
/// The base polygon takes each edge's start point and, for arcs, the
/// arc center as an extra vertex; arcs are internal when their interior
/// point falls inside that polygon.
#[derive(Debug, Clone)]
pub struct ContourAnalysis {
    pub internal_arcs: Vec<Arc2d>,
    pub external_arcs: Vec<Arc2d>,
    /// Base polygon including arc centers as vertices.
    pub base_polygon: ClosedPolygon2d,
    /// Polygon through edge endpoints only (chords in place of arcs).
    pub straight_polygon: ClosedPolygon2d,
}

/// A closed 2D contour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contour2d {
    pub edges: Vec<Edge2d>,
    #[serde(skip)]
    analysis: OnceLock<ContourAnalysis>,
}

impl Contour2d {
    pub fn new(edges: Vec<Edge2d>) -> Self {
        Self {
            edges,
            analysis: OnceLock::new(),
        }
    }

    /// Check that edges chain start-to-end and the loop closes.
    pub fn validate(&self) -> Result<()> {
        if self.edges.is_empty() {
            return Err(BrepError::Degenerate("contour has no edges".to_string()));
        }
        let n = self.edges.len();
        for i in 0..n {
            let gap = (self.edges[(i + 1) % n].start() - self.edges[i].end()).length();
            if gap > POINT_TOL {
                return Err(BrepError::Geometry(format!(
                    "contour edge {} does not meet its successor (gap {:.3e})",
                    i, gap
                )));
            }
        }
        Ok(())
    }

    /// Memoized base-polygon decomposition and arc classification.
    pub fn analysis(&self) -> &ContourAnalysis {
        self.analysis.get_or_init(|| self.analyze())
    }

    fn analyze(&self) -> ContourAnalysis {
        let mut base_points = Vec::new();
        let mut straight_points = Vec::new();
        let mut arcs = Vec::new();
        for edge in &self.edges {
            match edge {
                Edge2d::Segment(s) => {
                    base_points.push(s.start);
                    straight_points.push(s.start);
                }
                Edge2d::Arc(a) => {
                    base_points.push(a.start);
                    base_points.push(a.center());
                    straight_points.push(a.start);
                    arcs.push(*a);
                }
                Edge2d::Circle(c) => {
                    // A circle is a whole contour on its own; treat its
                    // sample ring as polygon vertices.
                    let ring = c.polygon_points(0.0, 0.0);
                    base_points.extend_from_slice(&ring[..ring.len() - 1]);
                    straight_points.extend_from_slice(&ring[..ring.len() - 1]);
                }
                Edge2d::BSpline(b) => {
                    base_points.extend_from_slice(&b.control_points);
                    straight_points.extend_from_slice(&b.control_points);
                }
            }
        }
        let base_polygon = ClosedPolygon2d::new(base_points);
        let straight_polygon = ClosedPolygon2d::new(straight_points);
        let mut internal_arcs = Vec::new();
        let mut external_arcs = Vec::new();
        for arc in arcs {
            if base_polygon.point_belongs(arc.interior) {
                internal_arcs.push(arc);
            } else {
                external_arcs.push(arc);
            }
        }
        ContourAnalysis {
            internal_arcs,
            external_arcs,
            base_polygon,
            straight_polygon,
        }
    }

    /// Enclosed area.
    ///
    /// The base polygon's center vertices already carry each arc's radii
    /// triangle with the sign opposite to its classification, so
    /// correcting by the full circular sector replaces every chord
    /// region with the true curved region.
    pub fn area(&self) -> f64 {
        if let [Edge2d::Circle(c)] = self.edges.as_slice() {
            return c.area();
        }
        let analysis = self.analysis();
        let mut area = analysis.base_polygon.area();
        for arc in &analysis.internal_arcs {
            area -= arc.area();
        }
        for arc in &analysis.external_arcs {
            area += arc.area();
        }
        area
    }

    pub fn center_of_mass(&self) -> Result<Point2> {
        if let [Edge2d::Circle(c)] = self.edges.as_slice() {
            return Ok(c.center_of_mass());
        }
        let analysis = self.analysis();
        let mut area = analysis.base_polygon.area();
        let mut moment = area * analysis.base_polygon.center_of_mass()?;
        for arc in &analysis.internal_arcs {
            moment -= arc.area() * arc.center_of_mass();
            area -= arc.area();
        }
        for arc in &analysis.external_arcs {
            moment += arc.area() * arc.center_of_mass();
            area += arc.area();
        }
        if area.abs() < 1e-8 {
            return Err(BrepError::Degenerate(
                "contour area too small for a centroid".to_string(),
            ));
        }
        Ok(moment / area)
    }

    /// Second moments of area `(Ix, Iy, Ixy)` about axes through `point`.
    pub fn second_moment_area(&self, point: Point2) -> (f64, f64, f64) {
        if let [Edge2d::Circle(c)] = self.edges.as_slice() {
            return c.second_moment_area(point);
        }
        let analysis = self.analysis();
        let (mut ix, mut iy, mut ixy) = analysis.base_polygon.second_moment_area(point);
        for arc in &analysis.internal_arcs {
            let (ax, ay, axy) = arc.second_moment_area(point);
            ix -= ax;
            iy -= ay;
            ixy -= axy;
        }
        for arc in &analysis.external_arcs {
            let (ax, ay, axy) = arc.second_moment_area(point);
            ix += ax;
            iy += ay;
            ixy += axy;
        }
        (ix, iy, ixy)
    }

    /// Containment against the true curved boundary.
    pub fn point_belongs(&self, p: Point2) -> bool {
        if let [Edge2d::Circle(c)] = self.edges.as_slice() {
            return c.point_inside(p);
        }
        let analysis = self.analysis();
        for arc in &analysis.internal_arcs {
            if arc.bulge_contains(p) {
                return false;
            }
        }
        if analysis.straight_polygon.point_belongs(p) {
            return true;
        }
        analysis.external_arcs.iter().any(|arc| arc.bulge_contains(p))
    }

    /// Sample the contour into a closed polygon honoring the given
    /// minimum tessellation densities along x and y.
    pub fn polygonize(&self, min_x_density: f64, min_y_density: f64) -> ClosedPolygon2d {
        let mut points = Vec::new();
        for edge in &self.edges {
            let run = edge.polygon_points(min_x_density, min_y_density);
            // The junction point repeats as the next edge's start
            points.extend_from_slice(&run[..run.len().saturating_sub(1)]);
        }
        ClosedPolygon2d::new(points)
    }

    pub fn bounding_rectangle(&self) -> Option<Aabb2> {
        self.polygonize(0.0, 0.0).bounding_rectangle()
    }

    /// Distance from `p` to the contour border polygon, with the
    /// closest border point.
    pub fn point_border_distance(&self, p: Point2) -> (f64, Point2) {
        self.polygonize(0.0, 0.0).point_border_distance(p)
    }

    /// Invalidate the memoized analysis after a geometric mutation.
    pub fn reset_analysis(&mut self) {
        self.analysis = OnceLock::new();
    }
}

impl brep_core::traits::Validate for Contour2d {
    fn validate(&self) -> Result<()> {
        Contour2d::validate(self)
    }
}
