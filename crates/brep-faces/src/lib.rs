//! Trimmed faces on parametric surfaces: construction from 3D boundary
//! loops (including periodic-seam resolution), tessellation, and
//! distance queries.

pub mod distance;
pub mod face;
pub mod optimize;
pub mod seam;

pub use distance::{minimum_distance, FaceDistance};
pub use face::{triangulate_faces, Face3d};
pub use optimize::minimize_bounded;
pub use seam::contour3d_to_2d;
