//! 3D boundary loop to 2D contour conversion.
//!
//! On periodic surfaces a naive per-point projection can scatter loop
//! points across the theta=0/2*PI branch cut. The periodic path below
//! detects and unwinds the seam with geometric heuristics (bounding-box
//! diagonal crossings, a vertical bisector sweep) rather than a
//! winding-number method.

use std::f64::consts::{PI, TAU};

use brep_core::{BrepError, Result, POINT_TOL};
use brep_geometry::{
    Arc2d, Arc3d, Contour2d, Contour3d, Edge2d, Edge3d, LineSegment2d, PlaneSurface, Surface3d,
};
use brep_math::{Point2, Vector3};

/// Convert a closed 3D boundary loop on `surface` into the 2D contour
/// bounding the same region in parameter space.
pub fn contour3d_to_2d(surface: &Surface3d, contour: &Contour3d) -> Result<Contour2d> {
    contour.validate()?;
    match surface {
        Surface3d::Cylindrical(_) | Surface3d::Toroidal(_) => {
            periodic_contour_to_2d(surface, contour)
        }
        Surface3d::Plane(plane) => plane_contour_to_2d(plane, contour),
        _ => sampled_contour_to_2d(surface, contour),
    }
}

/// On a plane both edge kinds survive projection exactly.
fn plane_contour_to_2d(plane: &PlaneSurface, contour: &Contour3d) -> Result<Contour2d> {
    let mut edges = Vec::with_capacity(contour.edges.len());
    for edge in &contour.edges {
        match edge {
            Edge3d::Segment(s) => edges.push(Edge2d::Segment(LineSegment2d::new(
                plane.point3d_to_2d(s.start),
                plane.point3d_to_2d(s.end),
            ))),
            Edge3d::Arc(a) => edges.push(Edge2d::Arc(Arc2d::new(
                plane.point3d_to_2d(a.start),
                plane.point3d_to_2d(a.interior),
                plane.point3d_to_2d(a.end),
            )?)),
        }
    }
    Ok(Contour2d::new(edges))
}

/// Non-periodic curved surfaces: sample every edge and project the
/// polyline.
fn sampled_contour_to_2d(surface: &Surface3d, contour: &Contour3d) -> Result<Contour2d> {
    let mut edges = Vec::new();
    for edge in &contour.edges {
        let samples = edge.sample_points(16);
        for pair in samples.windows(2) {
            let a = surface.point3d_to_2d(pair[0]);
            let b = surface.point3d_to_2d(pair[1]);
            if (b - a).length() > POINT_TOL {
                edges.push(Edge2d::Segment(LineSegment2d::new(a, b)));
            }
        }
    }
    if edges.is_empty() {
        return Err(BrepError::Degenerate(
            "contour projects to a single 2D point".to_string(),
        ));
    }
    Ok(Contour2d::new(edges))
}

fn periodic_contour_to_2d(surface: &Surface3d, contour: &Contour3d) -> Result<Contour2d> {
    let axis = match surface.frame() {
        Some(frame) => frame.w,
        None => Vector3::Z,
    };

    let mut primitives: Vec<LineSegment2d> = Vec::new();
    for edge in &contour.edges {
        match edge {
            Edge3d::Segment(s) => primitives.push(LineSegment2d::new(
                surface.point3d_to_2d(s.start),
                surface.point3d_to_2d(s.end),
            )),
            Edge3d::Arc(a) => project_arc(surface, axis, a, &mut primitives),
        }
    }

    dedup_primitives(&mut primitives);

    let mut points = extremal_points(&primitives);
    if points.len() < 3 {
        return Err(BrepError::ToleranceFailure(
            "fewer than 3 distinct seam points after projection".to_string(),
        ));
    }

    let shifted = apply_diagonal_unwrap(&primitives, &mut points);

    // Unwrapped point sets are rebuilt angularly; untouched ones first
    // try the plain theta ordering with its trailing-pair fix, which
    // keeps loops the angular ordering would fold (non-star shapes with
    // a monotone theta run)
    let mut ordered = if shifted {
        order_loop(&points)?
    } else {
        match theta_sorted_loop(&points) {
            Some(o) => o,
            None => order_loop(&points)?,
        }
    };
    vertical_bisector_pass(&mut ordered)?;

    Ok(loop_to_contour(&ordered))
}

/// Project one circular arc. An arc whose plane normal is aligned with
/// the surface axis sweeps theta linearly and becomes a single straight
/// 2D segment; its end angle is pinned to start + signed sweep whenever
/// the raw projection lands a wrap away.
fn project_arc(surface: &Surface3d, axis: Vector3, arc: &Arc3d, out: &mut Vec<LineSegment2d>) {
    let align = arc.normal().dot(axis);
    if align.abs() > 1.0 - 1e-6 {
        let start = surface.point3d_to_2d(arc.start);
        let naive_end = surface.point3d_to_2d(arc.end);
        let expected = start.x + arc.angle() * align.signum();
        let end_x = if (naive_end.x - expected).abs() > 1e-2 {
            expected
        } else {
            naive_end.x
        };
        let mut seg = LineSegment2d::new(start, Point2::new(end_x, naive_end.y));
        if seg.start.x.min(seg.end.x) < -1e-9 {
            seg.start.x += TAU;
            seg.end.x += TAU;
        }
        out.push(seg);
    } else {
        // Skewed arc: fall back to a projected polyline
        let samples = Edge3d::Arc(*arc).sample_points(8);
        for pair in samples.windows(2) {
            let a = surface.point3d_to_2d(pair[0]);
            let b = surface.point3d_to_2d(pair[1]);
            if (b - a).length() > POINT_TOL {
                out.push(LineSegment2d::new(a, b));
            }
        }
    }
}

/// Drop primitives sharing the same endpoint pair in either order; a
/// face boundary traverses the seam segment once in each direction and
/// only one copy belongs in the 2D contour.
fn dedup_primitives(primitives: &mut Vec<LineSegment2d>) {
    let mut kept: Vec<LineSegment2d> = Vec::with_capacity(primitives.len());
    for seg in primitives.iter() {
        let duplicate = kept.iter().any(|k| {
            ((k.start - seg.start).length() < POINT_TOL
                && (k.end - seg.end).length() < POINT_TOL)
                || ((k.start - seg.end).length() < POINT_TOL
                    && (k.end - seg.start).length() < POINT_TOL)
        });
        if !duplicate {
            kept.push(*seg);
        }
    }
    *primitives = kept;
}

fn extremal_points(primitives: &[LineSegment2d]) -> Vec<Point2> {
    let mut points: Vec<Point2> = Vec::new();
    for seg in primitives {
        for p in [seg.start, seg.end] {
            if !points.iter().any(|&q| (q - p).length() < POINT_TOL) {
                points.push(p);
            }
        }
    }
    points
}

/// Classify the seam case from the bounding-box diagonals and unwrap
/// the point set accordingly. Returns whether any points were shifted.
fn apply_diagonal_unwrap(primitives: &[LineSegment2d], points: &mut [Point2]) -> bool {
    let (min, max) = bounds(points);
    let d1 = LineSegment2d::new(min, max);
    let d2 = LineSegment2d::new(Point2::new(min.x, max.y), Point2::new(max.x, min.y));

    let mut crossings: Vec<(usize, Point2)> = Vec::new();
    for diag in [&d1, &d2] {
        for (i, seg) in primitives.iter().enumerate() {
            if let Some(x) = diag.crossing(seg) {
                crossings.push((i, x));
            }
        }
    }
    if crossings.is_empty() {
        return false;
    }
    let mut hit: Vec<usize> = crossings.iter().map(|&(i, _)| i).collect();
    hit.sort_unstable();
    hit.dedup();
    if hit.len() > 2 {
        // No single offending pair; leave the points alone
        return false;
    }

    let coincident = crossings
        .iter()
        .all(|&(_, x)| (x - crossings[0].1).length() < 1e-3);
    let cx = crossings.iter().map(|&(_, x)| x.x).sum::<f64>() / crossings.len() as f64;

    if coincident && (cx - PI).abs() < 1e-2 {
        // True straddle: the loop lives around theta=0 but half its
        // points were projected near 2*PI
        for p in points.iter_mut() {
            if p.x > PI {
                p.x -= TAU;
            }
        }
        return true;
    }

    if cx < 1e-2 || (cx - TAU).abs() < 1e-2 || crossing_outside_hull(&crossings, points) {
        // Crossing at the branch cut itself, or a stray hit outside
        // the loop: no shift needed
        return false;
    }

    // Interior crossing: unwrap everything left of it by one period
    for p in points.iter_mut() {
        if p.x < cx {
            p.x += TAU;
        }
    }
    true
}

fn crossing_outside_hull(crossings: &[(usize, Point2)], points: &[Point2]) -> bool {
    let hull = match order_loop(points) {
        Ok(ordered) => brep_geometry::ClosedPolygon2d::new(ordered),
        Err(_) => return true,
    };
    crossings.iter().any(|&(_, x)| !hull.point_belongs(x))
}

fn bounds(points: &[Point2]) -> (Point2, Point2) {
    let mut min = points[0];
    let mut max = points[0];
    for p in &points[1..] {
        min = min.min(*p);
        max = max.max(*p);
    }
    (min, max)
}

/// Order loop points counterclockwise around their bounding-box center.
fn order_loop(points: &[Point2]) -> Result<Vec<Point2>> {
    let (min, max) = bounds(points);
    let center = (min + max) * 0.5;
    let mut ordered = points.to_vec();
    ordered.sort_by(|a, b| {
        let aa = (a.y - center.y).atan2(a.x - center.x);
        let ab = (b.y - center.y).atan2(b.x - center.x);
        aa.total_cmp(&ab)
    });
    // Unwrapping can fold distinct projections onto one point
    ordered.dedup_by(|a, b| (*a - *b).length() < POINT_TOL);
    if ordered.len() > 1 && (ordered[0] - *ordered.last().unwrap()).length() < POINT_TOL {
        ordered.pop();
    }
    if signed_area(&ordered).abs() < 1e-12 {
        return Err(BrepError::ToleranceFailure(
            "seam resolution found no consistent point ordering".to_string(),
        ));
    }
    Ok(ordered)
}

/// Order points by ascending theta (ties by height). The sorted
/// sequence closes a band loop wrongly when its two trailing points sit
/// on the same side; swapping that pair repairs the fence-post defect.
/// Returns `None` when neither ordering yields a simple loop.
fn theta_sorted_loop(points: &[Point2]) -> Option<Vec<Point2>> {
    let mut ordered = points.to_vec();
    ordered.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    ordered.dedup_by(|a, b| (*a - *b).length() < POINT_TOL);
    if ordered.len() < 3 {
        return None;
    }
    if !is_simple_loop(&ordered) {
        let n = ordered.len();
        ordered.swap(n - 2, n - 1);
        if !is_simple_loop(&ordered) {
            return None;
        }
    }
    if signed_area(&ordered) < 0.0 {
        ordered.reverse();
    }
    Some(ordered)
}

fn signed_area(points: &[Point2]) -> f64 {
    0.5 * points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum::<f64>()
}

/// A vertex cycle bounds a usable loop only when no two non-adjacent
/// edges cross, no vertex sits on a non-incident edge, and the area
/// does not vanish.
fn is_simple_loop(points: &[Point2]) -> bool {
    if brep_geometry::ClosedPolygon2d::new(points.to_vec())
        .self_intersects()
        .is_some()
    {
        return false;
    }
    let n = points.len();
    for i in 0..n {
        for j in 0..n {
            if j == i || (j + 1) % n == i {
                continue;
            }
            let edge = LineSegment2d::new(points[j], points[(j + 1) % n]);
            let (d, _) = edge.point_distance(points[i]);
            if d < POINT_TOL {
                return false;
            }
        }
    }
    signed_area(points).abs() > 1e-12
}

/// Second seam sweep: a segment crossing the vertical bisector of the
/// bounding box near mid-height indicates a wrap the diagonal test
/// missed; unwrap everything left of the crossing and re-order.
fn vertical_bisector_pass(ordered: &mut Vec<Point2>) -> Result<()> {
    let (min, max) = bounds(ordered);
    let center = (min + max) * 0.5;
    let height = max.y - min.y;
    if height < POINT_TOL {
        return Ok(());
    }
    let bisector = LineSegment2d::new(
        Point2::new(center.x, min.y - 1.0),
        Point2::new(center.x, max.y + 1.0),
    );
    let n = ordered.len();
    for i in 0..n {
        let seg = LineSegment2d::new(ordered[i], ordered[(i + 1) % n]);
        if let Some(x) = bisector.crossing(&seg) {
            if (x.y - center.y).abs() < 0.2 * height {
                for p in ordered.iter_mut() {
                    if p.x < x.x {
                        p.x += TAU;
                    }
                }
                *ordered = order_loop(ordered)?;
                return Ok(());
            }
        }
    }
    Ok(())
}

fn loop_to_contour(ordered: &[Point2]) -> Contour2d {
    let n = ordered.len();
    let edges = (0..n)
        .map(|i| {
            Edge2d::Segment(LineSegment2d::new(ordered[i], ordered[(i + 1) % n]))
        })
        .collect();
    Contour2d::new(edges)
}
