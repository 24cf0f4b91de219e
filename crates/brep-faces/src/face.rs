//! Trimmed faces: a parametric surface bounded by a 2D region.

use std::f64::consts::TAU;

use brep_core::{BrepError, Result, POINT_TOL};
use brep_geometry::{
    Contour2d, Contour3d, Edge2d, Edge3d, LineSegment2d, LineSegment3d, Surface2D, Surface3d,
    SurfaceKind,
};
use brep_math::{Aabb3, Frame3D, Point2, Point3, Vector3};
use brep_mesh::{triangulate_region, TriangleMesh};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::seam;

/// Sampling density used for derived boundary polylines (bounding box,
/// 3D outer contour, plane-face border queries).
const BORDER_DENSITY: f64 = 4.0;

/// A face: a trimmed region of a parametric surface.
///
/// `surface2d` bounds the face in the surface's parameter space; the
/// bounding box is derived from the mapped outer boundary and rebuilt
/// by every mutating transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face3d {
    pub surface: Surface3d,
    pub surface2d: Surface2D,
    pub bounding_box: Aabb3,
}

impl Face3d {
    pub fn new(surface: Surface3d, surface2d: Surface2D) -> Result<Self> {
        surface2d.validate()?;
        let bounding_box = boundary_bbox(&surface, &surface2d)?;
        Ok(Self {
            surface,
            surface2d,
            bounding_box,
        })
    }

    /// Build a face from its 3D boundary loop, resolving the periodic
    /// seam where the surface requires it.
    pub fn from_contour3d(surface: Surface3d, contour: &Contour3d) -> Result<Self> {
        let outer = seam::contour3d_to_2d(&surface, contour)?;
        Self::new(surface, Surface2D::new(outer, Vec::new()))
    }

    /// Cut a rectangular patch `[u1, u2] x [v1, v2]` out of the
    /// surface's parameter space.
    ///
    /// On periodic parameters a zero-width angular range means the full
    /// revolution: `u2` (and `v2` on a torus) is extended by one period
    /// when it does not exceed its lower bound.
    pub fn rectangular_cut(surface: Surface3d, u1: f64, u2: f64, v1: f64, v2: f64) -> Result<Self> {
        let mut u2 = u2;
        let mut v2 = v2;
        match surface.kind() {
            SurfaceKind::Cylindrical | SurfaceKind::Conical | SurfaceKind::Spherical => {
                if u2 <= u1 + POINT_TOL {
                    u2 = u1 + TAU;
                }
            }
            SurfaceKind::Toroidal => {
                if u2 <= u1 + POINT_TOL {
                    u2 = u1 + TAU;
                }
                if v2 <= v1 + POINT_TOL {
                    v2 = v1 + TAU;
                }
            }
            _ => {}
        }
        if u2 <= u1 || v2 <= v1 {
            return Err(BrepError::Degenerate(format!(
                "rectangular cut [{}, {}] x [{}, {}] is empty",
                u1, u2, v1, v2
            )));
        }
        let corners = [
            Point2::new(u1, v1),
            Point2::new(u2, v1),
            Point2::new(u2, v2),
            Point2::new(u1, v2),
        ];
        let edges = (0..4)
            .map(|i| Edge2d::Segment(LineSegment2d::new(corners[i], corners[(i + 1) % 4])))
            .collect();
        Self::new(surface, Surface2D::new(Contour2d::new(edges), Vec::new()))
    }

    /// The outer boundary mapped back to 3D as a polyline loop.
    pub fn outer_contour3d(&self) -> Contour3d {
        let ring = self
            .surface2d
            .outer_contour
            .polygonize(BORDER_DENSITY, BORDER_DENSITY)
            .points;
        let mut edges = Vec::with_capacity(ring.len());
        for i in 0..ring.len() {
            let a = self.surface.point2d_to_3d(ring[i]);
            let b = self.surface.point2d_to_3d(ring[(i + 1) % ring.len()]);
            if (b - a).length() > POINT_TOL {
                edges.push(Edge3d::Segment(LineSegment3d::new(a, b)));
            }
        }
        Contour3d::new(edges)
    }

    /// Tessellate the face: triangulate the parameter region, then map
    /// every vertex through the surface.
    pub fn triangulation(&self, min_x_density: f64, min_y_density: f64) -> Result<TriangleMesh> {
        let mesh2d = triangulate_region(&self.surface2d, min_x_density, min_y_density)?;
        let positions: Vec<Point3> = mesh2d
            .points
            .iter()
            .map(|&p| self.surface.point2d_to_3d(p))
            .collect();
        let mut indices = Vec::with_capacity(mesh2d.triangles.len() * 3);
        for tri in &mesh2d.triangles {
            indices.extend_from_slice(tri);
        }
        let mut mesh = TriangleMesh {
            positions,
            normals: Vec::new(),
            indices,
        };
        mesh.compute_normals();
        Ok(mesh)
    }

    pub fn rotated(&self, center: Point3, axis: Vector3, angle: f64) -> Result<Self> {
        let surface = self.surface.rotated(center, axis, angle)?;
        let bounding_box = boundary_bbox(&surface, &self.surface2d)?;
        Ok(Self {
            surface,
            surface2d: self.surface2d.clone(),
            bounding_box,
        })
    }

    pub fn rotate_in_place(&mut self, center: Point3, axis: Vector3, angle: f64) -> Result<()> {
        self.surface.rotate_in_place(center, axis, angle)?;
        self.bounding_box = boundary_bbox(&self.surface, &self.surface2d)?;
        Ok(())
    }

    pub fn translated(&self, offset: Vector3) -> Self {
        Self {
            surface: self.surface.translated(offset),
            surface2d: self.surface2d.clone(),
            bounding_box: Aabb3::new(
                self.bounding_box.min + offset,
                self.bounding_box.max + offset,
            ),
        }
    }

    pub fn translate_in_place(&mut self, offset: Vector3) {
        self.surface.translate_in_place(offset);
        self.bounding_box = Aabb3::new(
            self.bounding_box.min + offset,
            self.bounding_box.max + offset,
        );
    }

    pub fn mapped(&self, base: &Frame3D) -> Result<Self> {
        let surface = self.surface.mapped(base)?;
        let bounding_box = boundary_bbox(&surface, &self.surface2d)?;
        Ok(Self {
            surface,
            surface2d: self.surface2d.clone(),
            bounding_box,
        })
    }

    pub fn map_in_place(&mut self, base: &Frame3D) -> Result<()> {
        self.surface.map_in_place(base)?;
        self.bounding_box = boundary_bbox(&self.surface, &self.surface2d)?;
        Ok(())
    }

    fn plane(&self) -> Result<&brep_geometry::PlaneSurface> {
        match &self.surface {
            Surface3d::Plane(p) => Ok(p),
            other => Err(BrepError::Unsupported(format!(
                "query requires a plane face, got {}",
                other.kind().name()
            ))),
        }
    }

    /// Whether `p` lies on the trimmed face (plane faces only).
    pub fn point_on_face(&self, p: Point3) -> Result<bool> {
        let plane = self.plane()?;
        if plane.signed_distance(p).abs() > POINT_TOL {
            return Ok(false);
        }
        Ok(self.surface2d.point_belongs(plane.point3d_to_2d(p)))
    }

    /// Distance from a point to the trimmed face, with the closest face
    /// point (plane faces only).
    ///
    /// Inside the trimmed region this is the plane distance; outside it
    /// combines the plane distance with the in-plane border distance.
    pub fn distance_to_point(&self, p: Point3) -> Result<(f64, Point3)> {
        let plane = self.plane()?;
        let offset = plane.signed_distance(p);
        let p2d = plane.point3d_to_2d(p);
        if self.surface2d.point_belongs(p2d) {
            return Ok((offset.abs(), plane.point2d_to_3d(p2d)));
        }
        let (mut border, mut nearest) = self.surface2d.outer_contour.point_border_distance(p2d);
        for inner in &self.surface2d.inner_contours {
            let (d, q) = inner.point_border_distance(p2d);
            if d < border {
                border = d;
                nearest = q;
            }
        }
        Ok((
            (offset * offset + border * border).sqrt(),
            plane.point2d_to_3d(nearest),
        ))
    }

    /// Intersection of a segment with the trimmed face (plane faces
    /// only).
    pub fn linesegment_intersection(&self, seg: &LineSegment3d) -> Result<Option<Point3>> {
        let plane = self.plane()?;
        Ok(plane
            .linesegment_intersection(seg)
            .filter(|&p| self.surface2d.point_belongs(plane.point3d_to_2d(p))))
    }

    /// Points where `other`'s boundary pierces this face and vice
    /// versa (plane faces only). Non-overlapping bounding boxes short
    /// circuit to an empty set.
    pub fn face_intersection(&self, other: &Face3d) -> Result<Vec<Point3>> {
        self.plane()?;
        other.plane()?;
        let a = self.bounding_box.expand(POINT_TOL);
        let b = other.bounding_box.expand(POINT_TOL);
        if !a.intersects(&b) {
            return Ok(Vec::new());
        }
        let mut points = Vec::new();
        for (face, probe) in [(self, other), (other, self)] {
            for edge in &probe.outer_contour3d().edges {
                if let Edge3d::Segment(seg) = edge {
                    if let Some(p) = face.linesegment_intersection(seg)? {
                        if !points.iter().any(|&q: &Point3| (q - p).length() < POINT_TOL) {
                            points.push(p);
                        }
                    }
                }
            }
        }
        Ok(points)
    }
}

impl brep_core::traits::BoundingBox for Face3d {
    type Box = Aabb3;

    fn bounding_box(&self) -> Aabb3 {
        self.bounding_box
    }
}

fn boundary_bbox(surface: &Surface3d, surface2d: &Surface2D) -> Result<Aabb3> {
    let ring = surface2d
        .outer_contour
        .polygonize(BORDER_DENSITY, BORDER_DENSITY)
        .points;
    let mapped: Vec<Point3> = ring.iter().map(|&p| surface.point2d_to_3d(p)).collect();
    Aabb3::from_points(&mapped)
        .ok_or_else(|| BrepError::Degenerate("face boundary has no points".to_string()))
}

/// Tessellate independent faces in parallel; faces share no state, so
/// this is a plain data-parallel map.
pub fn triangulate_faces(
    faces: &[Face3d],
    min_x_density: f64,
    min_y_density: f64,
) -> Vec<Result<TriangleMesh>> {
    faces
        .par_iter()
        .map(|face| face.triangulation(min_x_density, min_y_density))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use brep_geometry::{Arc3d, CylindricalSurface, PlaneSurface};
    use glam::dvec3;
    use std::f64::consts::PI;

    fn unit_cylinder() -> Surface3d {
        Surface3d::Cylindrical(CylindricalSurface::new(
            Frame3D::axis_aligned(Point3::ZERO),
            1.0,
        ))
    }

    fn unit_square_face() -> Face3d {
        let surface = Surface3d::Plane(PlaneSurface::new(Frame3D::axis_aligned(Point3::ZERO)));
        Face3d::rectangular_cut(surface, 0.0, 1.0, 0.0, 1.0).unwrap()
    }

    #[test]
    fn test_rectangular_cut_extends_full_revolution() {
        // Zero-width angular range means the whole circumference
        let face = Face3d::rectangular_cut(unit_cylinder(), 0.0, 0.0, 0.0, 1.0).unwrap();
        let rect = face.surface2d.bounding_rectangle().unwrap();
        assert!(rect.min.x.abs() < 1e-12);
        assert!((rect.max.x - TAU).abs() < 1e-12);
        assert!(rect.min.y.abs() < 1e-12 && (rect.max.y - 1.0).abs() < 1e-12);
        assert!((face.surface2d.area() - TAU).abs() < 1e-12);
        // The mapped boundary spans the full circle
        assert!((face.bounding_box.max.x - 1.0).abs() < 1e-2);
        assert!((face.bounding_box.min.x + 1.0).abs() < 1e-2);
    }

    #[test]
    fn test_face_from_circular_contour() {
        // Unit circle boundary at z in {0, 1} walked through the seam
        let a1 = Arc3d::new(
            dvec3(1.0, 0.0, 0.0),
            dvec3(0.0, 1.0, 0.0),
            dvec3(-1.0, 0.0, 0.0),
        )
        .unwrap();
        let a2 = Arc3d::new(
            dvec3(-1.0, 0.0, 0.0),
            dvec3(0.0, -1.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
        )
        .unwrap();
        let t1 = Arc3d::new(
            dvec3(1.0, 0.0, 1.0),
            dvec3(0.0, -1.0, 1.0),
            dvec3(-1.0, 0.0, 1.0),
        )
        .unwrap();
        let t2 = Arc3d::new(
            dvec3(-1.0, 0.0, 1.0),
            dvec3(0.0, 1.0, 1.0),
            dvec3(1.0, 0.0, 1.0),
        )
        .unwrap();
        let contour = Contour3d::new(vec![
            Edge3d::Arc(a1),
            Edge3d::Arc(a2),
            Edge3d::Segment(LineSegment3d::new(
                dvec3(1.0, 0.0, 0.0),
                dvec3(1.0, 0.0, 1.0),
            )),
            Edge3d::Arc(t1),
            Edge3d::Arc(t2),
            Edge3d::Segment(LineSegment3d::new(
                dvec3(1.0, 0.0, 1.0),
                dvec3(1.0, 0.0, 0.0),
            )),
        ]);
        let face = Face3d::from_contour3d(unit_cylinder(), &contour).unwrap();
        let rect = face.surface2d.bounding_rectangle().unwrap();
        assert!((rect.max.x - rect.min.x - TAU).abs() < 1e-9);
        assert!((rect.max.y - rect.min.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_distance_inside_projection() {
        let face = unit_square_face();
        let (d, q) = face.distance_to_point(dvec3(0.5, 0.5, 2.0)).unwrap();
        assert!((d - 2.0).abs() < 1e-12);
        assert!((q - dvec3(0.5, 0.5, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_point_distance_outside_projection() {
        let face = unit_square_face();
        // Projection lands at (2, 0.5), 1 unit beyond the border
        let (d, q) = face.distance_to_point(dvec3(2.0, 0.5, 2.0)).unwrap();
        assert!((d - 5.0f64.sqrt()).abs() < 1e-12);
        assert!((q - dvec3(1.0, 0.5, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_point_on_face() {
        let face = unit_square_face();
        assert!(face.point_on_face(dvec3(0.25, 0.75, 0.0)).unwrap());
        assert!(!face.point_on_face(dvec3(0.25, 0.75, 0.5)).unwrap());
        assert!(!face.point_on_face(dvec3(2.0, 0.5, 0.0)).unwrap());
        // Plane-only query on a curved face errors
        let band = Face3d::rectangular_cut(unit_cylinder(), 0.0, 0.0, 0.0, 1.0).unwrap();
        assert!(band.point_on_face(Point3::ZERO).is_err());
    }

    #[test]
    fn test_linesegment_intersection() {
        let face = unit_square_face();
        let hit = face
            .linesegment_intersection(&LineSegment3d::new(
                dvec3(0.5, 0.5, -1.0),
                dvec3(0.5, 0.5, 1.0),
            ))
            .unwrap();
        assert!((hit.unwrap() - dvec3(0.5, 0.5, 0.0)).length() < 1e-12);
        // Crossing the plane outside the trimmed region
        let miss = face
            .linesegment_intersection(&LineSegment3d::new(
                dvec3(5.0, 5.0, -1.0),
                dvec3(5.0, 5.0, 1.0),
            ))
            .unwrap();
        assert!(miss.is_none());
    }

    #[test]
    fn test_face_intersection() {
        let floor = unit_square_face();
        // Vertical wall through x = 0.5, crossing the floor
        let wall_surface = Surface3d::Plane(PlaneSurface::new(Frame3D::new(
            dvec3(0.5, 0.5, 0.0),
            Vector3::Y,
            Vector3::Z,
            Vector3::X,
        )));
        let wall = Face3d::rectangular_cut(wall_surface, -0.4, 0.4, -0.5, 0.5).unwrap();
        let points = floor.face_intersection(&wall).unwrap();
        assert!(!points.is_empty());
        for p in &points {
            assert!(p.z.abs() < 1e-9 && (p.x - 0.5).abs() < 1e-9);
        }
        // Disjoint faces short-circuit on bounding boxes
        let far = floor.translated(dvec3(50.0, 0.0, 0.0));
        assert!(floor.face_intersection(&far).unwrap().is_empty());
    }

    #[test]
    fn test_triangulation_maps_to_surface() {
        let band = Face3d::rectangular_cut(unit_cylinder(), 0.0, 0.0, 0.0, 1.0).unwrap();
        let mesh = band.triangulation(2.0, 2.0).unwrap();
        assert!(mesh.triangle_count() > 0);
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
        for p in &mesh.positions {
            let radial = (p.x * p.x + p.y * p.y).sqrt();
            assert!((radial - 1.0).abs() < 1e-9, "vertex off cylinder: {:?}", p);
        }
    }

    #[test]
    fn test_transforms_rebuild_bounding_box() {
        let face = unit_square_face();
        let moved = face.translated(dvec3(0.0, 0.0, 3.0));
        assert!((moved.bounding_box.min.z - 3.0).abs() < 1e-12);

        let mut spun = face.clone();
        spun.rotate_in_place(Point3::ZERO, Vector3::X, PI / 2.0).unwrap();
        // The square now stands in the xz plane
        assert!((spun.bounding_box.max.z - 1.0).abs() < 1e-9);
        assert!(spun.bounding_box.max.y.abs() < 1e-9);
    }

    #[test]
    fn test_outer_contour3d_closes() {
        let face = unit_square_face();
        let contour = face.outer_contour3d();
        assert!(contour.validate().is_ok());
        assert!((contour.length() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_batch_matches_serial() {
        let faces = vec![
            unit_square_face(),
            Face3d::rectangular_cut(unit_cylinder(), 0.0, 0.0, 0.0, 1.0).unwrap(),
        ];
        let meshes = triangulate_faces(&faces, 2.0, 2.0);
        assert_eq!(meshes.len(), 2);
        for (face, mesh) in faces.iter().zip(&meshes) {
            let serial = face.triangulation(2.0, 2.0).unwrap();
            let parallel = mesh.as_ref().unwrap();
            assert_eq!(serial.triangle_count(), parallel.triangle_count());
        }
    }
}
