//! Planar regions: an outer contour minus inner hole contours.

use brep_core::{BrepError, Result};
use brep_math::{Aabb2, Point2};
use serde::{Deserialize, Serialize};

use crate::wire::Contour2d;

/// A bounded planar region in a surface's 2D parameter space.
///
/// Inner contours are holes and must lie strictly inside the outer
/// contour without touching it or each other.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Surface2D {
    pub outer_contour: Contour2d,
    pub inner_contours: Vec<Contour2d>,
}

impl Surface2D {
    pub fn new(outer_contour: Contour2d, inner_contours: Vec<Contour2d>) -> Self {
        Self {
            outer_contour,
            inner_contours,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.outer_contour.validate()?;
        for (i, inner) in self.inner_contours.iter().enumerate() {
            inner.validate()?;
            let inside = inner
                .polygonize(0.0, 0.0)
                .points
                .iter()
                .all(|&p| self.outer_contour.point_belongs(p));
            if !inside {
                return Err(BrepError::Geometry(format!(
                    "inner contour {} is not contained in the outer contour",
                    i
                )));
            }
        }
        Ok(())
    }

    /// Region area: outer area minus hole areas.
    pub fn area(&self) -> f64 {
        let holes: f64 = self.inner_contours.iter().map(Contour2d::area).sum();
        self.outer_contour.area() - holes
    }

    pub fn center_of_mass(&self) -> Result<Point2> {
        let mut area = self.outer_contour.area();
        let mut moment = area * self.outer_contour.center_of_mass()?;
        for inner in &self.inner_contours {
            let a = inner.area();
            moment -= a * inner.center_of_mass()?;
            area -= a;
        }
        if area.abs() < 1e-8 {
            return Err(BrepError::Degenerate(
                "region area too small for a centroid".to_string(),
            ));
        }
        Ok(moment / area)
    }

    /// Containment: inside the outer contour and outside every hole.
    pub fn point_belongs(&self, p: Point2) -> bool {
        self.outer_contour.point_belongs(p)
            && !self.inner_contours.iter().any(|c| c.point_belongs(p))
    }

    pub fn bounding_rectangle(&self) -> Option<Aabb2> {
        self.outer_contour.bounding_rectangle()
    }
}

impl brep_core::traits::Validate for Surface2D {
    fn validate(&self) -> Result<()> {
        Surface2D::validate(self)
    }
}
