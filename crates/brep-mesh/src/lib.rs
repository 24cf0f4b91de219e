//! Triangle meshes and constrained triangulation of planar regions.

pub mod mesh;
pub mod triangulate;

pub use mesh::{Mesh2D, TriangleMesh};
pub use triangulate::triangulate_region;
