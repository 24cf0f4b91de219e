pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{BrepError, Result};
pub use tolerance::{DOT_TOL, POINT_TOL};
