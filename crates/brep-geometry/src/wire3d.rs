//! 3D wires and closed boundary loops.

use brep_core::{BrepError, Result, POINT_TOL};
use brep_math::{Aabb3, Frame3D, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::curve3d::Edge3d;

fn edges_length(edges: &[Edge3d]) -> f64 {
    edges.iter().map(Edge3d::length).sum()
}

fn edges_point_at_abscissa(edges: &[Edge3d], s: f64) -> Point3 {
    let total = edges_length(edges);
    let mut remaining = s.clamp(0.0, total);
    for edge in edges {
        let len = edge.length();
        if remaining <= len {
            return edge.point_at_abscissa(remaining);
        }
        remaining -= len;
    }
    match edges.last() {
        Some(edge) => edge.end(),
        None => Point3::ZERO,
    }
}

fn edges_sample_points(edges: &[Edge3d], resolution: usize) -> Vec<Point3> {
    let mut points = Vec::new();
    for edge in edges {
        let run = edge.sample_points(resolution);
        points.extend_from_slice(&run[..run.len().saturating_sub(1)]);
    }
    points
}

/// An open chain of 3D edges, used as the rail of a ruled surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire3d {
    pub edges: Vec<Edge3d>,
}

impl Wire3d {
    pub fn new(edges: Vec<Edge3d>) -> Self {
        Self { edges }
    }

    pub fn length(&self) -> f64 {
        edges_length(&self.edges)
    }

    /// Point at arc length `s` from the wire start; `s` is clamped to
    /// the wire's length.
    pub fn point_at_abscissa(&self, s: f64) -> Point3 {
        edges_point_at_abscissa(&self.edges, s)
    }

    pub fn sample_points(&self, resolution: usize) -> Vec<Point3> {
        edges_sample_points(&self.edges, resolution)
    }

    pub fn rotated(&self, center: Point3, axis: Vector3, angle: f64) -> Result<Self> {
        let edges = self
            .edges
            .iter()
            .map(|e| e.rotated(center, axis, angle))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { edges })
    }

    pub fn translated(&self, offset: Vector3) -> Self {
        Self {
            edges: self.edges.iter().map(|e| e.translated(offset)).collect(),
        }
    }

    pub fn mapped(&self, base: &Frame3D) -> Result<Self> {
        let edges = self
            .edges
            .iter()
            .map(|e| e.mapped(base))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { edges })
    }
}

/// A closed 3D boundary loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contour3d {
    pub edges: Vec<Edge3d>,
}

impl Contour3d {
    pub fn new(edges: Vec<Edge3d>) -> Self {
        Self { edges }
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

    pub fn length(&self) -> f64 {
        edges_length(&self.edges)
    }

    pub fn sample_points(&self, resolution: usize) -> Vec<Point3> {
        edges_sample_points(&self.edges, resolution)
    }

    pub fn bounding_box(&self) -> Option<Aabb3> {
        Aabb3::from_points(&self.sample_points(16))
    }

    pub fn rotated(&self, center: Point3, axis: Vector3, angle: f64) -> Result<Self> {
        let edges = self
            .edges
            .iter()
            .map(|e| e.rotated(center, axis, angle))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { edges })
    }

    pub fn translated(&self, offset: Vector3) -> Self {
        Self {
            edges: self.edges.iter().map(|e| e.translated(offset)).collect(),
        }
    }

    pub fn mapped(&self, base: &Frame3D) -> Result<Self> {
        let edges = self
            .edges
            .iter()
            .map(|e| e.mapped(base))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { edges })
    }
}

impl brep_core::traits::Validate for Contour3d {
    fn validate(&self) -> Result<()> {
        Contour3d::validate(self)
    }
}
