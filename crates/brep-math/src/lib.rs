pub mod aabb;
pub mod angle;
pub mod frame;

pub use glam::{DMat3, DMat4, DVec2, DVec3, DVec4};

pub use aabb::{Aabb2, Aabb3};
pub use angle::angle_from_cos_sin;
pub use frame::Frame3D;

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
