use crate::{Point2, Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in 3D space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let mut bb = Self::new(first, first);
        for &p in rest {
            bb.include(p);
        }
        Some(bb)
    }

    /// Grow the box to cover `p`.
    pub fn include(&mut self, p: Point3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn center(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }

    pub fn contains_point(&self, p: Point3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn expand(&self, amount: f64) -> Self {
        let offset = Vector3::splat(amount);
        Self {
            min: self.min - offset,
            max: self.max + offset,
        }
    }
}

/// Axis-aligned bounding rectangle in the 2D parameter plane.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Aabb2 {
    pub min: Point2,
    pub max: Point2,
}

impl Aabb2 {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let mut bb = Self::new(first, first);
        for &p in rest {
            bb.include(p);
        }
        Some(bb)
    }

    pub fn include(&mut self, p: Point2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn center(&self) -> Point2 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vector2 {
        self.max - self.min
    }

    pub fn contains_point(&self, p: Point2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{dvec2, dvec3};

    #[test]
    fn test_aabb3_from_points() {
        let pts = [
            dvec3(1.0, 2.0, 3.0),
            dvec3(-1.0, 5.0, 0.0),
            dvec3(3.0, -1.0, 2.0),
        ];
        let bb = Aabb3::from_points(&pts).unwrap();
        assert_eq!(bb.min, dvec3(-1.0, -1.0, 0.0));
        assert_eq!(bb.max, dvec3(3.0, 5.0, 3.0));
        assert!(Aabb3::from_points(&[]).is_none());
    }

    #[test]
    fn test_aabb3_contains_and_intersects() {
        let a = Aabb3::new(dvec3(0.0, 0.0, 0.0), dvec3(2.0, 2.0, 2.0));
        let b = Aabb3::new(dvec3(1.0, 1.0, 1.0), dvec3(3.0, 3.0, 3.0));
        let c = Aabb3::new(dvec3(5.0, 5.0, 5.0), dvec3(6.0, 6.0, 6.0));
        assert!(a.contains_point(dvec3(0.5, 1.5, 2.0)));
        assert!(!a.contains_point(dvec3(0.5, 1.5, 2.5)));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_aabb2_include() {
        let mut bb = Aabb2::new(dvec2(0.0, 0.0), dvec2(1.0, 1.0));
        bb.include(dvec2(-2.0, 0.5));
        assert_eq!(bb.min, dvec2(-2.0, 0.0));
        assert_eq!(bb.max, dvec2(1.0, 1.0));
        assert!((bb.center() - dvec2(-0.5, 0.5)).length() < 1e-12);
    }
}
