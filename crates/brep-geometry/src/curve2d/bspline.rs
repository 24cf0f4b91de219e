//! 2D B-spline curve edge.

use brep_core::{BrepError, Result};
use brep_math::Point2;
use serde::{Deserialize, Serialize};

use crate::nurbs;

/// A 2D B-spline curve with an expanded knot vector and optional
/// rational weights, parameterized over its knot domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BSplineCurve2d {
    pub degree: usize,
    pub control_points: Vec<Point2>,
    pub knots: Vec<f64>,
    pub weights: Option<Vec<f64>>,
}

impl BSplineCurve2d {
    /// Build from distinct knots plus multiplicities.
    pub fn from_knots_and_multiplicities(
        degree: usize,
        control_points: Vec<Point2>,
        knots: &[f64],
        multiplicities: &[usize],
        weights: Option<Vec<f64>>,
    ) -> Result<Self> {
        let expanded = nurbs::expand_knots(knots, multiplicities);
        if expanded.len() != control_points.len() + degree + 1 {
            return Err(BrepError::Geometry(format!(
                "knot vector length {} does not match {} control points of degree {}",
                expanded.len(),
                control_points.len(),
                degree
            )));
        }
        if let Some(w) = &weights {
            if w.len() != control_points.len() {
                return Err(BrepError::Geometry(
                    "one weight per control point required".to_string(),
                ));
            }
        }
        Ok(Self {
            degree,
            control_points,
            knots: expanded,
            weights,
        })
    }

    fn domain(&self) -> (f64, f64) {
        (
            self.knots[self.degree],
            self.knots[self.knots.len() - 1 - self.degree],
        )
    }

    /// Point at normalized parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point2 {
        let (t0, t1) = self.domain();
        nurbs::curve_point2(
            self.degree,
            &self.knots,
            &self.control_points,
            self.weights.as_deref(),
            t0 + t.clamp(0.0, 1.0) * (t1 - t0),
        )
    }

    pub fn start(&self) -> Point2 {
        self.point_at(0.0)
    }

    pub fn end(&self) -> Point2 {
        self.point_at(1.0)
    }

    /// Polyline length at a fixed sampling resolution.
    pub fn length(&self) -> f64 {
        let pts = self.sample(100);
        pts.windows(2).map(|w| (w[1] - w[0]).length()).sum()
    }

    fn sample(&self, n: usize) -> Vec<Point2> {
        (0..=n).map(|i| self.point_at(i as f64 / n as f64)).collect()
    }

    /// Point at arc length `s` along the sampled polyline.
    pub fn point_at_abscissa(&self, s: f64) -> Point2 {
        let pts = self.sample(100);
        let mut remaining = s.max(0.0);
        for w in pts.windows(2) {
            let step = (w[1] - w[0]).length();
            if remaining <= step {
                return if step > 0.0 {
                    w[0] + (w[1] - w[0]) * (remaining / step)
                } else {
                    w[0]
                };
            }
            remaining -= step;
        }
        self.end()
    }

    pub fn polygon_points(&self, min_x_density: f64, min_y_density: f64) -> Vec<Point2> {
        let coarse = self.sample(20);
        let mut dx: f64 = 0.0;
        let mut dy: f64 = 0.0;
        for w in coarse.windows(2) {
            dx += (w[1].x - w[0].x).abs();
            dy += (w[1].y - w[0].y).abs();
        }
        let mut n = 20usize;
        if min_x_density > 0.0 {
            n = n.max((dx * min_x_density).ceil() as usize);
        }
        if min_y_density > 0.0 {
            n = n.max((dy * min_y_density).ceil() as usize);
        }
        self.sample(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn quadratic() -> BSplineCurve2d {
        BSplineCurve2d::from_knots_and_multiplicities(
            2,
            vec![dvec2(0.0, 0.0), dvec2(1.0, 2.0), dvec2(2.0, 0.0)],
            &[0.0, 1.0],
            &[3, 3],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_clamped_endpoints() {
        let c = quadratic();
        assert!((c.start() - dvec2(0.0, 0.0)).length() < 1e-12);
        assert!((c.end() - dvec2(2.0, 0.0)).length() < 1e-12);
        // Quadratic Bezier midpoint
        assert!((c.point_at(0.5) - dvec2(1.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_bad_knot_count_rejected() {
        let r = BSplineCurve2d::from_knots_and_multiplicities(
            2,
            vec![dvec2(0.0, 0.0), dvec2(1.0, 2.0), dvec2(2.0, 0.0)],
            &[0.0, 1.0],
            &[2, 3],
            None,
        );
        assert!(r.is_err());
    }

    #[test]
    fn test_length_exceeds_chord() {
        let c = quadratic();
        assert!(c.length() > 2.0);
        assert!(c.length() < 2.0 + 2.0 * 2.0);
    }
}
