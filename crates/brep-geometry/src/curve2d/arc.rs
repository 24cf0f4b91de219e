//! 2D circular arc through three points.

use std::f64::consts::PI;

use brep_core::{BrepError, Result, POINT_TOL};
use brep_math::Point2;
use serde::{Deserialize, Serialize};

/// A circular arc defined by `start`, an `interior` point on the arc,
/// and `end`.
///
/// Center, radius and orientation are derived at construction. The arc
/// never represents a full circle; use [`Circle2d`](super::Circle2d) for
/// that.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Arc2d {
    pub start: Point2,
    pub interior: Point2,
    pub end: Point2,
    center: Point2,
    radius: f64,
    start_angle: f64,
    angle: f64,
    is_trigo: bool,
}

impl Arc2d {
    pub fn new(start: Point2, interior: Point2, end: Point2) -> Result<Self> {
        let (a, b, c) = (start, interior, end);
        let d = 2.0
            * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d.abs() < 1e-12 {
            return Err(BrepError::Degenerate(
                "arc points are colinear or coincident".to_string(),
            ));
        }
        let a2 = a.length_squared();
        let b2 = b.length_squared();
        let c2 = c.length_squared();
        let center = Point2::new(
            (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
            (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
        );
        let radius = (a - center).length();

        let angle_of = |p: Point2| (p - center).to_angle().rem_euclid(2.0 * PI);
        let a1 = angle_of(start);
        let rel_interior = (angle_of(interior) - a1).rem_euclid(2.0 * PI);
        let rel_end = (angle_of(end) - a1).rem_euclid(2.0 * PI);
        let is_trigo = rel_interior < rel_end;
        let angle = if is_trigo { rel_end } else { 2.0 * PI - rel_end };
        if angle < POINT_TOL || (start - end).length() < POINT_TOL {
            return Err(BrepError::Degenerate(
                "arc start and end coincide (zero sweep)".to_string(),
            ));
        }
        Ok(Self {
            start,
            interior,
            end,
            center,
            radius,
            start_angle: a1,
            angle,
            is_trigo,
        })
    }

    pub fn center(&self) -> Point2 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Sweep magnitude in `(0, 2*PI)`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Counterclockwise orientation.
    pub fn is_trigo(&self) -> bool {
        self.is_trigo
    }

    pub fn length(&self) -> f64 {
        self.radius * self.angle
    }

    /// Point at sweep fraction `t` in `[0, 1]` from start to end.
    pub fn point_at(&self, t: f64) -> Point2 {
        let sweep = if self.is_trigo { self.angle } else { -self.angle };
        let phi = self.start_angle + t * sweep;
        self.center + self.radius * Point2::new(phi.cos(), phi.sin())
    }

    /// Area of the circular sector (center, start) -> (center, end).
    pub fn area(&self) -> f64 {
        0.5 * self.angle * self.radius * self.radius
    }

    /// Centroid of the circular sector.
    pub fn center_of_mass(&self) -> Point2 {
        let sweep = if self.is_trigo { self.angle } else { -self.angle };
        let phi_mid = self.start_angle + 0.5 * sweep;
        let dist = 4.0 * self.radius * (self.angle * 0.5).sin() / (3.0 * self.angle);
        self.center + dist * Point2::new(phi_mid.cos(), phi_mid.sin())
    }

    /// Second moments of area `(Ix, Iy, Ixy)` of the circular sector
    /// about axes through `point`.
    pub fn second_moment_area(&self, point: Point2) -> (f64, f64, f64) {
        // Sector moments about the arc center, then axis transfer.
        let (a, b) = self.ccw_interval();
        let r2 = self.radius * self.radius;
        let r3 = r2 * self.radius;
        let r4 = r2 * r2;
        let span = b - a;
        let sin2 = (2.0 * b).sin() - (2.0 * a).sin();
        let ix = r4 / 4.0 * (span / 2.0 - sin2 / 4.0);
        let iy = r4 / 4.0 * (span / 2.0 + sin2 / 4.0);
        let ixy = r4 / 16.0 * ((2.0 * a).cos() - (2.0 * b).cos());
        // First moments about the center.
        let sx = r3 / 3.0 * (a.cos() - b.cos());
        let sy = r3 / 3.0 * (b.sin() - a.sin());
        let area = self.area();
        let q = point - self.center;
        (
            ix - 2.0 * q.y * sx + area * q.y * q.y,
            iy - 2.0 * q.x * sy + area * q.x * q.x,
            ixy - q.x * sy - q.y * sx + area * q.x * q.y,
        )
    }

    /// Whether `p` lies in the bulge region between the chord and the
    /// arc (the circular segment the arc bounds).
    pub fn bulge_contains(&self, p: Point2) -> bool {
        if (p - self.center).length() > self.radius + POINT_TOL {
            return false;
        }
        let chord = self.end - self.start;
        let side_p = chord.perp_dot(p - self.start);
        let side_mid = chord.perp_dot(self.point_at(0.5) - self.start);
        side_p * side_mid >= 0.0
    }

    fn ccw_interval(&self) -> (f64, f64) {
        if self.is_trigo {
            (self.start_angle, self.start_angle + self.angle)
        } else {
            (self.start_angle - self.angle, self.start_angle)
        }
    }

    pub fn polygon_points(&self, min_x_density: f64, min_y_density: f64) -> Vec<Point2> {
        let mut n = ((self.angle / (2.0 * PI)) * 40.0).ceil() as usize;
        n = n.max(2);
        let dx = (self.end.x - self.start.x).abs().max(
            (self.interior.x - self.start.x).abs(),
        );
        let dy = (self.end.y - self.start.y).abs().max(
            (self.interior.y - self.start.y).abs(),
        );
        if min_x_density > 0.0 {
            n = n.max((dx * min_x_density).ceil() as usize);
        }
        if min_y_density > 0.0 {
            n = n.max((dy * min_y_density).ceil() as usize);
        }
        (0..=n).map(|i| self.point_at(i as f64 / n as f64)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn upper_semicircle() -> Arc2d {
        // Unit radius, counterclockwise from (1,0) through (0,1) to (-1,0)
        Arc2d::new(dvec2(1.0, 0.0), dvec2(0.0, 1.0), dvec2(-1.0, 0.0)).unwrap()
    }

    #[test]
    fn test_derived_geometry() {
        let arc = upper_semicircle();
        assert!((arc.center() - dvec2(0.0, 0.0)).length() < 1e-12);
        assert!((arc.radius() - 1.0).abs() < 1e-12);
        assert!((arc.angle() - PI).abs() < 1e-12);
        assert!(arc.is_trigo());
    }

    #[test]
    fn test_clockwise_orientation() {
        let arc =
            Arc2d::new(dvec2(-1.0, 0.0), dvec2(0.0, 1.0), dvec2(1.0, 0.0)).unwrap();
        assert!(!arc.is_trigo());
        assert!((arc.angle() - PI).abs() < 1e-12);
        // Midpoint still on the upper half
        assert!((arc.point_at(0.5) - dvec2(0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_sector_area_and_centroid() {
        let arc = upper_semicircle();
        assert!((arc.area() - PI / 2.0).abs() < 1e-12);
        // Semicircular sector centroid: 4r / (3*pi) up the bisector
        let com = arc.center_of_mass();
        assert!(com.x.abs() < 1e-12);
        assert!((com.y - 4.0 / (3.0 * PI)).abs() < 1e-12);
    }

    #[test]
    fn test_second_moment_full_disc_halves() {
        // Ix of the upper semicircular sector about the center is half
        // the full disc's pi/4.
        let arc = upper_semicircle();
        let (ix, iy, ixy) = arc.second_moment_area(dvec2(0.0, 0.0));
        assert!((ix - PI / 8.0).abs() < 1e-12, "ix={}", ix);
        assert!((iy - PI / 8.0).abs() < 1e-12, "iy={}", iy);
        assert!(ixy.abs() < 1e-12);
    }

    #[test]
    fn test_bulge_contains() {
        let arc = upper_semicircle();
        assert!(arc.bulge_contains(dvec2(0.0, 0.5)));
        assert!(arc.bulge_contains(dvec2(0.0, 0.999)));
        assert!(!arc.bulge_contains(dvec2(0.0, -0.5)));
        assert!(!arc.bulge_contains(dvec2(0.0, 1.5)));
    }

    #[test]
    fn test_degenerate_rejected() {
        assert!(Arc2d::new(dvec2(0.0, 0.0), dvec2(1.0, 0.0), dvec2(2.0, 0.0)).is_err());
        assert!(Arc2d::new(dvec2(0.0, 0.0), dvec2(0.0, 0.0), dvec2(0.0, 0.0)).is_err());
    }

    #[test]
    fn test_polygon_points_spans_arc() {
        let arc = upper_semicircle();
        let pts = arc.polygon_points(0.0, 0.0);
        assert!(pts.len() >= 3);
        assert!((pts[0] - arc.start).length() < 1e-12);
        assert!((*pts.last().unwrap() - arc.end).length() < 1e-12);
        for p in &pts {
            assert!((p.length() - 1.0).abs() < 1e-12, "sample off circle");
        }
    }
}
