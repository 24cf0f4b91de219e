//! B-spline/NURBS evaluation: knot utilities and de Boor point
//! evaluation for curves and tensor-product surfaces.
//!
//! This module plays the role of the external NURBS evaluator; the
//! surface and curve types own only their control/knot arrays and
//! delegate evaluation here.

mod deboor;
mod knot;

pub use deboor::{curve_point2, rational_surface_point, surface_point};
pub use knot::{basis_functions, expand_knots, find_span};
