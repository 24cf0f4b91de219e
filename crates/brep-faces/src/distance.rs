//! Minimum distance between trimmed face pairs.

use brep_core::{BrepError, Result};
use brep_geometry::{Surface3d, SurfaceKind};
use brep_math::{Point2, Point3, Vector3};

use crate::face::Face3d;
use crate::optimize::minimize_bounded;

/// Result of a face-pair distance query: the distance and the closest
/// point found on each face.
///
/// The value is a local optimum from a multi-start search; it is exact
/// only when the faces do not interpenetrate and the search converges
/// to the global optimum.
#[derive(Debug, Clone, Copy)]
pub struct FaceDistance {
    pub distance: f64,
    pub point1: Point3,
    pub point2: Point3,
}

/// Minimum distance between two faces.
///
/// Supported kinds are plane, cylindrical, and toroidal; any other
/// pairing is an explicit unsupported-combination error.
pub fn minimum_distance(face1: &Face3d, face2: &Face3d) -> Result<FaceDistance> {
    use SurfaceKind::*;
    match (face1.surface.kind(), face2.surface.kind()) {
        (Plane, Plane) => plane_plane_distance(face1, face2),
        (Plane | Cylindrical | Toroidal, Plane | Cylindrical | Toroidal) => {
            optimized_distance(face1, face2)
        }
        (k1, k2) => Err(BrepError::Unsupported(format!(
            "minimum distance between {} and {} faces",
            k1.name(),
            k2.name()
        ))),
    }
}

/// Local surface coordinates of a 2D parameter point, expressed in the
/// surface's own frame. Combined with the frame origin and basis this
/// reconstructs the 3D point.
fn local_coords(surface: &Surface3d, p: Point2) -> Vector3 {
    match surface {
        Surface3d::Plane(_) => Vector3::new(p.x, p.y, 0.0),
        Surface3d::Cylindrical(s) => {
            Vector3::new(s.radius * p.x.cos(), s.radius * p.x.sin(), p.y)
        }
        Surface3d::Toroidal(s) => {
            let ring = s.major_radius + s.minor_radius * p.y.cos();
            Vector3::new(
                ring * p.x.cos(),
                ring * p.x.sin(),
                s.minor_radius * p.y.sin(),
            )
        }
        // Dispatch guarantees only framed kinds reach this point
        _ => Vector3::ZERO,
    }
}

/// Distance routed through the bounded optimizer.
///
/// The squared distance is expanded over the two frames' basis vectors
/// so the inner loop works on precomputed dot products instead of
/// re-deriving global points:
///
/// |P2 - P1|^2 = w.w + |l1|^2 + |l2|^2 + 2 b2.l2 - 2 b1.l1 - 2 l1.G.l2
///
/// with w the origin offset, l1/l2 local coordinates, b = w projected
/// on each basis, and G the 3x3 cross-frame basis Gram matrix.
fn optimized_distance(face1: &Face3d, face2: &Face3d) -> Result<FaceDistance> {
    let frame1 = face1
        .surface
        .frame()
        .ok_or_else(|| BrepError::Unsupported("distance on a frameless surface".to_string()))?;
    let frame2 = face2
        .surface
        .frame()
        .ok_or_else(|| BrepError::Unsupported("distance on a frameless surface".to_string()))?;

    let rect1 = face1.surface2d.bounding_rectangle().ok_or_else(|| {
        BrepError::Degenerate("face 1 has an empty parameter domain".to_string())
    })?;
    let rect2 = face2.surface2d.bounding_rectangle().ok_or_else(|| {
        BrepError::Degenerate("face 2 has an empty parameter domain".to_string())
    })?;

    let basis1 = [frame1.u, frame1.v, frame1.w];
    let basis2 = [frame2.u, frame2.v, frame2.w];
    let w = frame2.origin - frame1.origin;
    let c = w.dot(w);
    let b1 = Vector3::new(w.dot(basis1[0]), w.dot(basis1[1]), w.dot(basis1[2]));
    let b2 = Vector3::new(w.dot(basis2[0]), w.dot(basis2[1]), w.dot(basis2[2]));
    let mut gram = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            gram[i][j] = basis1[i].dot(basis2[j]);
        }
    }

    let objective = |x: &[f64]| {
        let l1 = local_coords(&face1.surface, Point2::new(x[0], x[1]));
        let l2 = local_coords(&face2.surface, Point2::new(x[2], x[3]));
        let mut cross = 0.0;
        let a1 = [l1.x, l1.y, l1.z];
        let a2 = [l2.x, l2.y, l2.z];
        for i in 0..3 {
            for j in 0..3 {
                cross += a1[i] * gram[i][j] * a2[j];
            }
        }
        c + l1.length_squared() + l2.length_squared() + 2.0 * b2.dot(l2) - 2.0 * b1.dot(l1)
            - 2.0 * cross
    };

    let lower = [rect1.min.x, rect1.min.y, rect2.min.x, rect2.min.y];
    let upper = [rect1.max.x, rect1.max.y, rect2.max.x, rect2.max.y];
    let center = [
        0.5 * (lower[0] + upper[0]),
        0.5 * (lower[1] + upper[1]),
        0.5 * (lower[2] + upper[2]),
        0.5 * (lower[3] + upper[3]),
    ];
    let seeds = [center, lower, upper];

    let mut best: Option<(Vec<f64>, f64)> = None;
    for seed in &seeds {
        let (x, val) = minimize_bounded(&objective, seed, &lower, &upper, 2000);
        if best.as_ref().map_or(true, |(_, b)| val < *b) {
            best = Some((x, val));
        }
    }
    // Three seeds always yield a candidate
    let (x, _) = best.ok_or_else(|| {
        BrepError::Geometry("distance optimization produced no candidate".to_string())
    })?;

    let p1_2d = trim_to_contour(face1, Point2::new(x[0], x[1]));
    let p2_2d = trim_to_contour(face2, Point2::new(x[2], x[3]));
    let point1 = face1.surface.point2d_to_3d(p1_2d);
    let point2 = face2.surface.point2d_to_3d(p2_2d);
    Ok(FaceDistance {
        distance: (point2 - point1).length(),
        point1,
        point2,
    })
}

/// Pull a parameter point that escaped the trimmed contour (the
/// optimizer only sees the bounding rectangle) back onto the contour
/// border.
fn trim_to_contour(face: &Face3d, p: Point2) -> Point2 {
    if face.surface2d.point_belongs(p) {
        return p;
    }
    let (mut best_d, mut best_p) = face.surface2d.outer_contour.point_border_distance(p);
    for inner in &face.surface2d.inner_contours {
        let (d, q) = inner.point_border_distance(p);
        if d < best_d {
            best_d = d;
            best_p = q;
        }
    }
    best_p
}

/// Plane-plane distance without an optimizer: zero with a witness point
/// when the faces intersect, otherwise project each face's boundary
/// points onto the other face and keep the closest candidate pair.
fn plane_plane_distance(face1: &Face3d, face2: &Face3d) -> Result<FaceDistance> {
    if let Some(&p) = face1.face_intersection(face2)?.first() {
        return Ok(FaceDistance {
            distance: 0.0,
            point1: p,
            point2: p,
        });
    }
    let mut best: Option<FaceDistance> = None;
    for (from, to, flip) in [(face1, face2, false), (face2, face1, true)] {
        for edge in &from.outer_contour3d().edges {
            let p = edge.start();
            let (d, q) = to.distance_to_point(p)?;
            if best.as_ref().map_or(true, |b| d < b.distance) {
                best = Some(if flip {
                    FaceDistance {
                        distance: d,
                        point1: q,
                        point2: p,
                    }
                } else {
                    FaceDistance {
                        distance: d,
                        point1: p,
                        point2: q,
                    }
                });
            }
        }
    }
    best.ok_or_else(|| BrepError::Degenerate("face boundary has no points".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brep_geometry::{CylindricalSurface, PlaneSurface};
    use brep_math::Frame3D;
    use glam::dvec3;
    use std::f64::consts::TAU;

    fn cylinder_band(radius: f64, z1: f64, z2: f64) -> Face3d {
        let surface = Surface3d::Cylindrical(CylindricalSurface::new(
            Frame3D::axis_aligned(Point3::ZERO),
            radius,
        ));
        Face3d::rectangular_cut(surface, 0.0, 0.0, z1, z2).unwrap()
    }

    fn plane_face(origin: Point3, u: Vector3, v: Vector3, half: f64) -> Face3d {
        let surface = Surface3d::Plane(PlaneSurface::new(Frame3D::new(
            origin,
            u,
            v,
            u.cross(v),
        )));
        Face3d::rectangular_cut(surface, -half, half, -half, half).unwrap()
    }

    #[test]
    fn test_coaxial_bands_axial_gap() {
        // Equal radii, 5 units of axial separation: closest points sit
        // on a common generator
        let lower = cylinder_band(1.0, 0.0, 1.0);
        let upper = cylinder_band(1.0, 6.0, 7.0);
        let result = minimum_distance(&lower, &upper).unwrap();
        assert!(
            (result.distance - 5.0).abs() < 1e-3,
            "distance {}",
            result.distance
        );
        assert!((result.point1.z - 1.0).abs() < 1e-3);
        assert!((result.point2.z - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_coaxial_bands_radial_and_axial_gap() {
        let inner = cylinder_band(1.0, 0.0, 1.0);
        let outer = cylinder_band(2.0, 6.0, 7.0);
        let result = minimum_distance(&inner, &outer).unwrap();
        let expected = 26.0f64.sqrt();
        assert!(
            (result.distance - expected).abs() < 1e-3,
            "distance {}",
            result.distance
        );
    }

    #[test]
    fn test_concentric_bands_radial_gap() {
        let inner = cylinder_band(1.0, 0.0, 1.0);
        let outer = cylinder_band(2.0, 0.0, 1.0);
        let result = minimum_distance(&inner, &outer).unwrap();
        assert!(
            (result.distance - 1.0).abs() < 1e-3,
            "distance {}",
            result.distance
        );
    }

    #[test]
    fn test_plane_to_cylinder() {
        let band = cylinder_band(1.0, -1.0, 1.0);
        let wall = plane_face(dvec3(3.0, 0.0, 0.0), Vector3::Y, Vector3::Z, 1.0);
        let result = minimum_distance(&band, &wall).unwrap();
        assert!(
            (result.distance - 2.0).abs() < 1e-3,
            "distance {}",
            result.distance
        );
    }

    #[test]
    fn test_parallel_planes() {
        let floor = plane_face(Point3::ZERO, Vector3::X, Vector3::Y, 1.0);
        let ceiling = plane_face(dvec3(0.0, 0.0, 3.0), Vector3::X, Vector3::Y, 1.0);
        let result = minimum_distance(&floor, &ceiling).unwrap();
        assert!(
            (result.distance - 3.0).abs() < 1e-9,
            "distance {}",
            result.distance
        );
    }

    #[test]
    fn test_crossing_planes_touch() {
        // Floor [0,1]^2 at z = 0, wall through x = 0.5 spanning
        // z in [-0.33, 0.51]: the faces physically cross
        let floor = plane_face(dvec3(0.5, 0.5, 0.0), Vector3::X, Vector3::Y, 0.5);
        let wall_surface = Surface3d::Plane(PlaneSurface::new(Frame3D::new(
            dvec3(0.5, 0.5, 0.0),
            Vector3::Y,
            Vector3::Z,
            Vector3::X,
        )));
        let wall = Face3d::rectangular_cut(wall_surface, -0.4, 0.4, -0.33, 0.51).unwrap();
        assert!(!floor.face_intersection(&wall).unwrap().is_empty());
        let result = minimum_distance(&floor, &wall).unwrap();
        assert!(result.distance < 1e-9, "distance {}", result.distance);
        // The witness point lies on both faces
        assert!(result.point1.z.abs() < 1e-9);
        assert!((result.point1.x - 0.5).abs() < 1e-9);
        assert!((result.point1 - result.point2).length() < 1e-9);
    }

    #[test]
    fn test_offset_coplanar_planes() {
        // Same plane, regions 2 apart edge to edge
        let a = plane_face(Point3::ZERO, Vector3::X, Vector3::Y, 1.0);
        let b = plane_face(dvec3(4.0, 0.0, 0.0), Vector3::X, Vector3::Y, 1.0);
        let result = minimum_distance(&a, &b).unwrap();
        assert!(
            (result.distance - 2.0).abs() < 1e-6,
            "distance {}",
            result.distance
        );
    }

    #[test]
    fn test_unsupported_pair_is_named() {
        let band = cylinder_band(1.0, 0.0, 1.0);
        let sphere = Surface3d::Spherical(brep_geometry::SphericalSurface::new(
            Frame3D::axis_aligned(dvec3(10.0, 0.0, 0.0)),
            1.0,
        ));
        let cap = Face3d::rectangular_cut(sphere, 0.0, 0.0, -1.0, 1.0).unwrap();
        let err = minimum_distance(&band, &cap).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("spherical"), "message {}", msg);
    }

    #[test]
    fn test_full_band_theta_range() {
        let band = cylinder_band(1.0, 0.0, 1.0);
        let rect = band.surface2d.bounding_rectangle().unwrap();
        assert!((rect.max.x - TAU).abs() < 1e-12);
    }
}
