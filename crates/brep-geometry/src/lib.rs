//! B-Rep kernel geometry: 2D/3D edges, wires and contours, polygons,
//! planar regions, and parametric surfaces.

pub mod curve2d;
pub mod curve3d;
pub mod nurbs;
pub mod polygon;
pub mod region;
pub mod surface;
pub mod wire;
pub mod wire3d;

pub use curve2d::{Arc2d, BSplineCurve2d, Circle2d, Edge2d, LineSegment2d};
pub use curve3d::{Arc3d, Edge3d, LineSegment3d};
pub use polygon::ClosedPolygon2d;
pub use region::Surface2D;
pub use surface::{
    BSplineSurface, ConicalSurface, CylindricalSurface, PlaneSurface, RuledSurface,
    SphericalSurface, Surface3d, SurfaceKind, ToroidalSurface,
};
pub use wire::{Contour2d, Wire2d};
pub use wire3d::{Contour3d, Wire3d};
