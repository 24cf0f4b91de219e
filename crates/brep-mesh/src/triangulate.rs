//! Constrained triangulation of planar regions via ear clipping.

use brep_core::{BrepError, Result};
use brep_math::Point2;
use brep_geometry::Surface2D;

use crate::mesh::Mesh2D;

/// Triangulate a region, honoring hole contours as constraints.
///
/// Contours are sampled into polygons at the given minimum densities;
/// hole rings start at recorded offsets in the flat coordinate array so
/// the ear clipper keeps them empty.
pub fn triangulate_region(
    region: &Surface2D,
    min_x_density: f64,
    min_y_density: f64,
) -> Result<Mesh2D> {
    let outer = region
        .outer_contour
        .polygonize(min_x_density, min_y_density)
        .points;
    if outer.len() < 3 {
        return Err(BrepError::Degenerate(
            "outer contour polygonizes to fewer than 3 points".to_string(),
        ));
    }

    let mut points: Vec<Point2> = outer;
    let mut hole_indices: Vec<usize> = Vec::new();
    for inner in &region.inner_contours {
        let ring = inner.polygonize(min_x_density, min_y_density).points;
        if ring.len() < 3 {
            continue;
        }
        hole_indices.push(points.len());
        points.extend(ring);
    }

    let mut coords = Vec::with_capacity(points.len() * 2);
    for p in &points {
        coords.push(p.x);
        coords.push(p.y);
    }

    let indices = earcutr::earcut(&coords, &hole_indices, 2)
        .map_err(|e| BrepError::Geometry(format!("ear clipping failed: {:?}", e)))?;
    if indices.is_empty() {
        return Err(BrepError::Degenerate(
            "region triangulated to zero triangles".to_string(),
        ));
    }

    let triangles = indices
        .chunks_exact(3)
        .map(|t| [t[0] as u32, t[1] as u32, t[2] as u32])
        .collect();
    Ok(Mesh2D { points, triangles })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brep_geometry::{Contour2d, Edge2d, LineSegment2d};
    use glam::dvec2;

    fn rect_contour(min: Point2, max: Point2) -> Contour2d {
        let corners = [min, dvec2(max.x, min.y), max, dvec2(min.x, max.y)];
        Contour2d::new(
            (0..4)
                .map(|i| {
                    Edge2d::Segment(LineSegment2d::new(corners[i], corners[(i + 1) % 4]))
                })
                .collect(),
        )
    }

    #[test]
    fn test_square_triangulates() {
        let region = Surface2D::new(rect_contour(dvec2(0.0, 0.0), dvec2(2.0, 1.0)), vec![]);
        let mesh = triangulate_region(&region, 0.0, 0.0).unwrap();
        assert_eq!(mesh.points.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!((mesh.area() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_hole_is_preserved() {
        let region = Surface2D::new(
            rect_contour(dvec2(0.0, 0.0), dvec2(4.0, 3.0)),
            vec![rect_contour(dvec2(1.0, 1.0), dvec2(2.0, 2.0))],
        );
        let mesh = triangulate_region(&region, 0.0, 0.0).unwrap();
        assert_eq!(mesh.points.len(), 8);
        // Triangle areas cover the plate minus the hole
        assert!((mesh.area() - 11.0).abs() < 1e-9, "area {}", mesh.area());
        // No triangle centroid falls inside the hole
        for &[a, b, c] in &mesh.triangles {
            let centroid = (mesh.points[a as usize]
                + mesh.points[b as usize]
                + mesh.points[c as usize])
                / 3.0;
            assert!(
                !(centroid.x > 1.0 && centroid.x < 2.0 && centroid.y > 1.0 && centroid.y < 2.0),
                "triangle centroid {:?} inside hole",
                centroid
            );
        }
    }

    #[test]
    fn test_degenerate_outer_rejected() {
        let region = Surface2D::new(Contour2d::new(vec![]), vec![]);
        assert!(triangulate_region(&region, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_density_refines_sampling() {
        let region = Surface2D::new(rect_contour(dvec2(0.0, 0.0), dvec2(2.0, 2.0)), vec![]);
        let mesh = triangulate_region(&region, 4.0, 4.0).unwrap();
        assert!(mesh.points.len() > 4);
        assert!((mesh.area() - 4.0).abs() < 1e-9);
    }
}
