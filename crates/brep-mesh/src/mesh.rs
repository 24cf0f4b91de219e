//! Mesh containers shared by tessellation and rendering consumers.

use brep_math::{Aabb3, Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Triangulation of a planar region in parameter space.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh2D {
    pub points: Vec<Point2>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh2D {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Total area of all triangles.
    pub fn area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|&[a, b, c]| {
                let (pa, pb, pc) = (
                    self.points[a as usize],
                    self.points[b as usize],
                    self.points[c as usize],
                );
                0.5 * (pb - pa).perp_dot(pc - pa).abs()
            })
            .sum()
    }
}

/// Render-ready triangle mesh with per-vertex normals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Merge another mesh into this one, offsetting its indices.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Accumulate face normals onto shared vertices and normalize
    /// (smooth shading approximation).
    pub fn compute_normals(&mut self) {
        let n = self.positions.len();
        self.normals.clear();
        self.normals.resize(n, Vector3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let p0 = self.positions[i0];
            let p1 = self.positions[i1];
            let p2 = self.positions[i2];
            let normal = (p1 - p0).cross(p2 - p0);
            self.normals[i0] += normal;
            self.normals[i1] += normal;
            self.normals[i2] += normal;
        }

        for n in &mut self.normals {
            let len = n.length();
            if len > 1e-12 {
                *n /= len;
            }
        }
    }

    pub fn bounding_box(&self) -> Option<Aabb3> {
        Aabb3::from_points(&self.positions)
    }
}
