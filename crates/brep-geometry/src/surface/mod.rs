//! Analytic and freeform parametric surfaces with bidirectional
//! 2D parameter / 3D point mapping.

mod bspline;
mod conical;
mod cylindrical;
mod planar;
mod ruled;
mod spherical;
mod toroidal;

pub use bspline::BSplineSurface;
pub use conical::ConicalSurface;
pub use cylindrical::CylindricalSurface;
pub use planar::PlaneSurface;
pub use ruled::RuledSurface;
pub use spherical::SphericalSurface;
pub use toroidal::ToroidalSurface;

use brep_core::Result;
use brep_math::{Frame3D, Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Round a cos/sin ratio before angle recovery; absorbs the round-off
/// jitter that would otherwise flip points across the periodic seam.
pub(crate) fn round_ratio(v: f64) -> f64 {
    (v * 1e5).round() / 1e5
}

/// Surface kind tag used by face dispatch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    Plane,
    Cylindrical,
    Conical,
    Spherical,
    Toroidal,
    Ruled,
    BSpline,
}

impl SurfaceKind {
    pub fn name(self) -> &'static str {
        match self {
            SurfaceKind::Plane => "plane",
            SurfaceKind::Cylindrical => "cylindrical",
            SurfaceKind::Conical => "conical",
            SurfaceKind::Spherical => "spherical",
            SurfaceKind::Toroidal => "toroidal",
            SurfaceKind::Ruled => "ruled",
            SurfaceKind::BSpline => "b-spline",
        }
    }
}

/// A parametric surface, one concrete type per kind.
///
/// Every variant maps 2D parameters to 3D points and back; the two
/// mappings are approximate mutual inverses on the surface's valid
/// domain. Periodic parameters are angles in `[0, 2*PI)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Surface3d {
    Plane(PlaneSurface),
    Cylindrical(CylindricalSurface),
    Conical(ConicalSurface),
    Spherical(SphericalSurface),
    Toroidal(ToroidalSurface),
    Ruled(RuledSurface),
    BSpline(BSplineSurface),
}

impl Surface3d {
    pub fn kind(&self) -> SurfaceKind {
        match self {
            Surface3d::Plane(_) => SurfaceKind::Plane,
            Surface3d::Cylindrical(_) => SurfaceKind::Cylindrical,
            Surface3d::Conical(_) => SurfaceKind::Conical,
            Surface3d::Spherical(_) => SurfaceKind::Spherical,
            Surface3d::Toroidal(_) => SurfaceKind::Toroidal,
            Surface3d::Ruled(_) => SurfaceKind::Ruled,
            Surface3d::BSpline(_) => SurfaceKind::BSpline,
        }
    }

    pub fn point2d_to_3d(&self, p: Point2) -> Point3 {
        match self {
            Surface3d::Plane(s) => s.point2d_to_3d(p),
            Surface3d::Cylindrical(s) => s.point2d_to_3d(p),
            Surface3d::Conical(s) => s.point2d_to_3d(p),
            Surface3d::Spherical(s) => s.point2d_to_3d(p),
            Surface3d::Toroidal(s) => s.point2d_to_3d(p),
            Surface3d::Ruled(s) => s.point2d_to_3d(p),
            Surface3d::BSpline(s) => s.point2d_to_3d(p),
        }
    }

    /// Parameters of a 3D point assumed to lie on (or near) the
    /// surface; off-surface points map to their nearest on-surface
    /// projection's parameters.
    pub fn point3d_to_2d(&self, p: Point3) -> Point2 {
        match self {
            Surface3d::Plane(s) => s.point3d_to_2d(p),
            Surface3d::Cylindrical(s) => s.point3d_to_2d(p),
            Surface3d::Conical(s) => s.point3d_to_2d(p),
            Surface3d::Spherical(s) => s.point3d_to_2d(p),
            Surface3d::Toroidal(s) => s.point3d_to_2d(p),
            Surface3d::Ruled(s) => s.point3d_to_2d(p),
            Surface3d::BSpline(s) => s.point3d_to_2d(p),
        }
    }

    /// The owning frame for frame-based kinds.
    pub fn frame(&self) -> Option<&Frame3D> {
        match self {
            Surface3d::Plane(s) => Some(&s.frame),
            Surface3d::Cylindrical(s) => Some(&s.frame),
            Surface3d::Conical(s) => Some(&s.frame),
            Surface3d::Spherical(s) => Some(&s.frame),
            Surface3d::Toroidal(s) => Some(&s.frame),
            Surface3d::Ruled(_) | Surface3d::BSpline(_) => None,
        }
    }

    pub fn rotated(&self, center: Point3, axis: Vector3, angle: f64) -> Result<Self> {
        Ok(match self {
            Surface3d::Plane(s) => Surface3d::Plane(PlaneSurface {
                frame: s.frame.rotated(center, axis, angle)?,
            }),
            Surface3d::Cylindrical(s) => Surface3d::Cylindrical(CylindricalSurface {
                frame: s.frame.rotated(center, axis, angle)?,
                ..*s
            }),
            Surface3d::Conical(s) => Surface3d::Conical(ConicalSurface {
                frame: s.frame.rotated(center, axis, angle)?,
                ..*s
            }),
            Surface3d::Spherical(s) => Surface3d::Spherical(SphericalSurface {
                frame: s.frame.rotated(center, axis, angle)?,
                ..*s
            }),
            Surface3d::Toroidal(s) => Surface3d::Toroidal(ToroidalSurface {
                frame: s.frame.rotated(center, axis, angle)?,
                ..*s
            }),
            Surface3d::Ruled(s) => Surface3d::Ruled(RuledSurface {
                rail1: s.rail1.rotated(center, axis, angle)?,
                rail2: s.rail2.rotated(center, axis, angle)?,
            }),
            Surface3d::BSpline(s) => {
                if axis.length() < brep_core::POINT_TOL {
                    return Err(brep_core::BrepError::Degenerate(
                        "rotation axis has zero length".to_string(),
                    ));
                }
                let q = glam::DQuat::from_axis_angle(axis.normalize(), angle);
                let mut out = s.clone();
                for cp in &mut out.control_points {
                    *cp = center + q * (*cp - center);
                }
                Surface3d::BSpline(out)
            }
        })
    }

    pub fn rotate_in_place(&mut self, center: Point3, axis: Vector3, angle: f64) -> Result<()> {
        *self = self.rotated(center, axis, angle)?;
        Ok(())
    }

    pub fn translated(&self, offset: Vector3) -> Self {
        match self {
            Surface3d::Plane(s) => Surface3d::Plane(PlaneSurface {
                frame: s.frame.translated(offset),
            }),
            Surface3d::Cylindrical(s) => Surface3d::Cylindrical(CylindricalSurface {
                frame: s.frame.translated(offset),
                ..*s
            }),
            Surface3d::Conical(s) => Surface3d::Conical(ConicalSurface {
                frame: s.frame.translated(offset),
                ..*s
            }),
            Surface3d::Spherical(s) => Surface3d::Spherical(SphericalSurface {
                frame: s.frame.translated(offset),
                ..*s
            }),
            Surface3d::Toroidal(s) => Surface3d::Toroidal(ToroidalSurface {
                frame: s.frame.translated(offset),
                ..*s
            }),
            Surface3d::Ruled(s) => Surface3d::Ruled(RuledSurface {
                rail1: s.rail1.translated(offset),
                rail2: s.rail2.translated(offset),
            }),
            Surface3d::BSpline(s) => {
                let mut out = s.clone();
                for cp in &mut out.control_points {
                    *cp += offset;
                }
                Surface3d::BSpline(out)
            }
        }
    }

    pub fn translate_in_place(&mut self, offset: Vector3) {
        *self = self.translated(offset);
    }

    /// Re-express the surface, treated as local to `base`, in global
    /// coordinates.
    pub fn mapped(&self, base: &Frame3D) -> Result<Self> {
        Ok(match self {
            Surface3d::Plane(s) => Surface3d::Plane(PlaneSurface {
                frame: s.frame.mapped(base),
            }),
            Surface3d::Cylindrical(s) => Surface3d::Cylindrical(CylindricalSurface {
                frame: s.frame.mapped(base),
                ..*s
            }),
            Surface3d::Conical(s) => Surface3d::Conical(ConicalSurface {
                frame: s.frame.mapped(base),
                ..*s
            }),
            Surface3d::Spherical(s) => Surface3d::Spherical(SphericalSurface {
                frame: s.frame.mapped(base),
                ..*s
            }),
            Surface3d::Toroidal(s) => Surface3d::Toroidal(ToroidalSurface {
                frame: s.frame.mapped(base),
                ..*s
            }),
            Surface3d::Ruled(s) => Surface3d::Ruled(RuledSurface {
                rail1: s.rail1.mapped(base)?,
                rail2: s.rail2.mapped(base)?,
            }),
            Surface3d::BSpline(s) => {
                let mut out = s.clone();
                for cp in &mut out.control_points {
                    *cp = base.local_to_global_point(*cp);
                }
                Surface3d::BSpline(out)
            }
        })
    }

    pub fn map_in_place(&mut self, base: &Frame3D) -> Result<()> {
        *self = self.mapped(base)?;
        Ok(())
    }
}
