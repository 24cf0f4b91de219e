//! B-spline / NURBS surface.

use brep_core::{BrepError, Result};
use brep_math::{Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::nurbs;

/// A tensor-product B-spline surface over an expanded knot grid, made
/// rational by optional per-control-point weights.
///
/// Control points are row-major: index `iu * nb_v + iv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BSplineSurface {
    pub degree_u: usize,
    pub degree_v: usize,
    pub nb_u: usize,
    pub nb_v: usize,
    pub control_points: Vec<Point3>,
    pub knots_u: Vec<f64>,
    pub knots_v: Vec<f64>,
    pub weights: Option<Vec<f64>>,
}

impl BSplineSurface {
    /// Build from distinct knots plus multiplicities per direction.
    #[allow(clippy::too_many_arguments)]
    pub fn from_knots_and_multiplicities(
        degree_u: usize,
        degree_v: usize,
        nb_u: usize,
        nb_v: usize,
        control_points: Vec<Point3>,
        knots_u: &[f64],
        mult_u: &[usize],
        knots_v: &[f64],
        mult_v: &[usize],
        weights: Option<Vec<f64>>,
    ) -> Result<Self> {
        if control_points.len() != nb_u * nb_v {
            return Err(BrepError::Geometry(format!(
                "{} control points do not fill a {}x{} grid",
                control_points.len(),
                nb_u,
                nb_v
            )));
        }
        let knots_u = nurbs::expand_knots(knots_u, mult_u);
        let knots_v = nurbs::expand_knots(knots_v, mult_v);
        if knots_u.len() != nb_u + degree_u + 1 || knots_v.len() != nb_v + degree_v + 1 {
            return Err(BrepError::Geometry(
                "knot vector lengths do not match grid and degrees".to_string(),
            ));
        }
        if let Some(w) = &weights {
            if w.len() != control_points.len() {
                return Err(BrepError::Geometry(
                    "one weight per control point required".to_string(),
                ));
            }
        }
        Ok(Self {
            degree_u,
            degree_v,
            nb_u,
            nb_v,
            control_points,
            knots_u,
            knots_v,
            weights,
        })
    }

    pub fn domain(&self) -> (f64, f64, f64, f64) {
        (
            self.knots_u[self.degree_u],
            self.knots_u[self.knots_u.len() - 1 - self.degree_u],
            self.knots_v[self.degree_v],
            self.knots_v[self.knots_v.len() - 1 - self.degree_v],
        )
    }

    pub fn point2d_to_3d(&self, p: Point2) -> Point3 {
        let (u0, u1, v0, v1) = self.domain();
        let u = p.x.clamp(u0, u1);
        let v = p.y.clamp(v0, v1);
        match &self.weights {
            None => nurbs::surface_point(
                self.degree_u,
                self.degree_v,
                &self.knots_u,
                &self.knots_v,
                &self.control_points,
                self.nb_v,
                u,
                v,
            ),
            Some(w) => nurbs::rational_surface_point(
                self.degree_u,
                self.degree_v,
                &self.knots_u,
                &self.knots_v,
                &self.control_points,
                w,
                self.nb_v,
                u,
                v,
            ),
        }
    }

    /// Approximate inverse: best grid sample refined by damped
    /// Gauss-Newton on finite-difference partials.
    pub fn point3d_to_2d(&self, p: Point3) -> Point2 {
        const GRID: usize = 20;
        let (u0, u1, v0, v1) = self.domain();
        let mut best = Point2::new(u0, v0);
        let mut best_d = f64::INFINITY;
        for i in 0..=GRID {
            let u = u0 + (u1 - u0) * i as f64 / GRID as f64;
            for j in 0..=GRID {
                let v = v0 + (v1 - v0) * j as f64 / GRID as f64;
                let d = (self.point2d_to_3d(Point2::new(u, v)) - p).length_squared();
                if d < best_d {
                    best_d = d;
                    best = Point2::new(u, v);
                }
            }
        }

        let hu = (u1 - u0) * 1e-6;
        let hv = (v1 - v0) * 1e-6;
        let mut uv = best;
        for _ in 0..30 {
            let s = self.point2d_to_3d(uv);
            let su = (self.point2d_to_3d(uv + Point2::new(hu, 0.0))
                - self.point2d_to_3d(uv - Point2::new(hu, 0.0)))
                / (2.0 * hu);
            let sv = (self.point2d_to_3d(uv + Point2::new(0.0, hv))
                - self.point2d_to_3d(uv - Point2::new(0.0, hv)))
                / (2.0 * hv);
            let r = s - p;
            // Normal equations of the 3x2 Jacobian
            let a11 = su.dot(su);
            let a12 = su.dot(sv);
            let a22 = sv.dot(sv);
            let b1 = -su.dot(r);
            let b2 = -sv.dot(r);
            let det = a11 * a22 - a12 * a12;
            if det.abs() < 1e-18 {
                break;
            }
            let du = (b1 * a22 - b2 * a12) / det;
            let dv = (b2 * a11 - b1 * a12) / det;
            uv = Point2::new((uv.x + du).clamp(u0, u1), (uv.y + dv).clamp(v0, v1));
            if du.abs() < 1e-12 && dv.abs() < 1e-12 {
                break;
            }
        }
        uv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{dvec2, dvec3};

    /// Bilinear patch over the unit square, z = x*y-ish saddle.
    fn patch() -> BSplineSurface {
        BSplineSurface::from_knots_and_multiplicities(
            1,
            1,
            2,
            2,
            vec![
                dvec3(0.0, 0.0, 0.0),
                dvec3(0.0, 1.0, 0.0),
                dvec3(1.0, 0.0, 0.0),
                dvec3(1.0, 1.0, 1.0),
            ],
            &[0.0, 1.0],
            &[2, 2],
            &[0.0, 1.0],
            &[2, 2],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_construction_validation() {
        assert!(BSplineSurface::from_knots_and_multiplicities(
            1,
            1,
            2,
            2,
            vec![dvec3(0.0, 0.0, 0.0); 3],
            &[0.0, 1.0],
            &[2, 2],
            &[0.0, 1.0],
            &[2, 2],
            None,
        )
        .is_err());
    }

    #[test]
    fn test_evaluation_matches_bilinear() {
        let s = patch();
        let p = s.point2d_to_3d(dvec2(0.5, 0.5));
        assert!((p - dvec3(0.5, 0.5, 0.25)).length() < 1e-12);
        let corner = s.point2d_to_3d(dvec2(1.0, 1.0));
        assert!((corner - dvec3(1.0, 1.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_round_trip() {
        let s = patch();
        for &u in &[0.1, 0.5, 0.9] {
            for &v in &[0.2, 0.7] {
                let p2d = dvec2(u, v);
                let back = s.point3d_to_2d(s.point2d_to_3d(p2d));
                assert!(
                    (back - p2d).length() < 1e-6,
                    "round trip at {:?} gave {:?}",
                    p2d,
                    back
                );
            }
        }
    }
}
