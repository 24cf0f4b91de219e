//! Full circle primitive.

use std::f64::consts::PI;

use brep_math::Point2;
use serde::{Deserialize, Serialize};

/// A full circle, usable as the single primitive of a closed contour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Circle2d {
    pub center: Point2,
    pub radius: f64,
}

impl Circle2d {
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    pub fn center_of_mass(&self) -> Point2 {
        self.center
    }

    /// Second moments of the disc about axes through `point`.
    pub fn second_moment_area(&self, point: Point2) -> (f64, f64, f64) {
        let i = PI * self.radius.powi(4) / 4.0;
        let area = self.area();
        let q = point - self.center;
        (
            i + area * q.y * q.y,
            i + area * q.x * q.x,
            area * q.x * q.y,
        )
    }

    pub fn point_inside(&self, p: Point2) -> bool {
        (p - self.center).length() <= self.radius
    }

    pub fn point_at_angle(&self, theta: f64) -> Point2 {
        self.center + self.radius * Point2::new(theta.cos(), theta.sin())
    }

    pub fn polygon_points(&self, min_x_density: f64, min_y_density: f64) -> Vec<Point2> {
        let mut n = 40usize;
        let density = min_x_density.max(min_y_density);
        if density > 0.0 {
            n = n.max((2.0 * self.radius * density * PI).ceil() as usize);
        }
        (0..=n)
            .map(|i| self.point_at_angle(2.0 * PI * i as f64 / n as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn test_disc_properties() {
        let c = Circle2d::new(dvec2(1.0, 2.0), 2.0);
        assert!((c.area() - 4.0 * PI).abs() < 1e-12);
        assert_eq!(c.center_of_mass(), dvec2(1.0, 2.0));
        assert!(c.point_inside(dvec2(2.5, 2.0)));
        assert!(!c.point_inside(dvec2(3.5, 2.0)));
    }

    #[test]
    fn test_second_moment_transfer() {
        let c = Circle2d::new(Point2::ZERO, 1.0);
        let (ix, _, _) = c.second_moment_area(Point2::ZERO);
        assert!((ix - PI / 4.0).abs() < 1e-12);
        // Shifted axis picks up the area * d^2 term
        let (ix, _, _) = c.second_moment_area(dvec2(0.0, 2.0));
        assert!((ix - (PI / 4.0 + PI * 4.0)).abs() < 1e-12);
    }
}
