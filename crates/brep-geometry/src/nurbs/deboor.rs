//! De Boor point evaluation.

use brep_math::{Point2, Point3};

use super::knot::{basis_functions, find_span};

/// Evaluate a 2D B-spline curve at parameter `t`.
///
/// `knots` is the expanded knot vector; optional `weights` make the
/// curve rational.
pub fn curve_point2(
    degree: usize,
    knots: &[f64],
    control_points: &[Point2],
    weights: Option<&[f64]>,
    t: f64,
) -> Point2 {
    let n = control_points.len() - 1;
    let span = find_span(degree, knots, n, t);
    let basis = basis_functions(degree, knots, span, t);
    match weights {
        None => {
            let mut p = Point2::ZERO;
            for (j, &b) in basis.iter().enumerate() {
                p += b * control_points[span - degree + j];
            }
            p
        }
        Some(w) => {
            let mut p = Point2::ZERO;
            let mut den = 0.0;
            for (j, &b) in basis.iter().enumerate() {
                let i = span - degree + j;
                p += b * w[i] * control_points[i];
                den += b * w[i];
            }
            p / den
        }
    }
}

/// Evaluate a tensor-product B-spline surface at `(u, v)`.
///
/// Control points are row-major: index `iu * nb_v + iv`.
pub fn surface_point(
    degree_u: usize,
    degree_v: usize,
    knots_u: &[f64],
    knots_v: &[f64],
    control_points: &[Point3],
    nb_v: usize,
    u: f64,
    v: f64,
) -> Point3 {
    let nb_u = control_points.len() / nb_v;
    let span_u = find_span(degree_u, knots_u, nb_u - 1, u);
    let span_v = find_span(degree_v, knots_v, nb_v - 1, v);
    let basis_u = basis_functions(degree_u, knots_u, span_u, u);
    let basis_v = basis_functions(degree_v, knots_v, span_v, v);

    let mut p = Point3::ZERO;
    for (j, &bu) in basis_u.iter().enumerate() {
        let iu = span_u - degree_u + j;
        for (k, &bv) in basis_v.iter().enumerate() {
            let iv = span_v - degree_v + k;
            p += bu * bv * control_points[iu * nb_v + iv];
        }
    }
    p
}

/// Rational variant of [`surface_point`]: control points carry one
/// weight each, in the same row-major order.
pub fn rational_surface_point(
    degree_u: usize,
    degree_v: usize,
    knots_u: &[f64],
    knots_v: &[f64],
    control_points: &[Point3],
    weights: &[f64],
    nb_v: usize,
    u: f64,
    v: f64,
) -> Point3 {
    let nb_u = control_points.len() / nb_v;
    let span_u = find_span(degree_u, knots_u, nb_u - 1, u);
    let span_v = find_span(degree_v, knots_v, nb_v - 1, v);
    let basis_u = basis_functions(degree_u, knots_u, span_u, u);
    let basis_v = basis_functions(degree_v, knots_v, span_v, v);

    let mut p = Point3::ZERO;
    let mut den = 0.0;
    for (j, &bu) in basis_u.iter().enumerate() {
        let iu = span_u - degree_u + j;
        for (k, &bv) in basis_v.iter().enumerate() {
            let iv = span_v - degree_v + k;
            let w = weights[iu * nb_v + iv];
            p += bu * bv * w * control_points[iu * nb_v + iv];
            den += bu * bv * w;
        }
    }
    p / den
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{dvec2, dvec3};

    #[test]
    fn test_linear_curve_interpolates() {
        // Degree 1 curve is a polyline through its control points
        let knots = [0.0, 0.0, 0.5, 1.0, 1.0];
        let ctrl = [dvec2(0.0, 0.0), dvec2(1.0, 1.0), dvec2(2.0, 0.0)];
        let p = curve_point2(1, &knots, &ctrl, None, 0.25);
        assert!((p - dvec2(0.5, 0.5)).length() < 1e-12);
        let p = curve_point2(1, &knots, &ctrl, None, 1.0);
        assert!((p - dvec2(2.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_bilinear_patch() {
        // Degree (1,1) patch over the unit square in x,y with a saddle in z
        let knots = [0.0, 0.0, 1.0, 1.0];
        let ctrl = [
            dvec3(0.0, 0.0, 0.0),
            dvec3(0.0, 1.0, 1.0),
            dvec3(1.0, 0.0, 1.0),
            dvec3(1.0, 1.0, 0.0),
        ];
        let p = surface_point(1, 1, &knots, &knots, &ctrl, 2, 0.5, 0.5);
        assert!((p - dvec3(0.5, 0.5, 0.5)).length() < 1e-12);
        let corner = surface_point(1, 1, &knots, &knots, &ctrl, 2, 1.0, 1.0);
        assert!((corner - dvec3(1.0, 1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_rational_matches_unit_weights() {
        let knots = [0.0, 0.0, 1.0, 1.0];
        let ctrl = [
            dvec3(0.0, 0.0, 0.0),
            dvec3(0.0, 1.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
            dvec3(1.0, 1.0, 0.0),
        ];
        let weights = [1.0; 4];
        let a = surface_point(1, 1, &knots, &knots, &ctrl, 2, 0.3, 0.7);
        let b = rational_surface_point(1, 1, &knots, &knots, &ctrl, &weights, 2, 0.3, 0.7);
        assert!((a - b).length() < 1e-12);
    }
}
