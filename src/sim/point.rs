//! Plane geometry primitives
//!
//! `Point` is the mutable position type shared by transforms, colliders and
//! movement paths. `Bounds` is the rectangular play area.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A mutable 2D point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn set(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn set_point(&mut self, other: Point) {
        *self = other;
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Rotate around `pivot` by `angle_degrees` (counter-clockwise in a
    /// y-up frame). Returns a new point; neither `self` nor `pivot` changes.
    pub fn rotate(&self, angle_degrees: f64, pivot: Point) -> Point {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        let rel_x = self.x - pivot.x;
        let rel_y = self.y - pivot.y;
        Point::new(
            rel_x * cos - rel_y * sin + pivot.x,
            rel_x * sin + rel_y * cos + pivot.y,
        )
    }

    pub fn distance(&self, other: Point) -> f64 {
        DVec2::from(*self).distance(other.into())
    }
}

impl From<DVec2> for Point {
    #[inline]
    fn from(v: DVec2) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Point> for DVec2 {
    #[inline]
    fn from(p: Point) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2},{:.2})", self.x, self.y)
    }
}

/// Axis-aligned play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(0.0, 0.0, 300.0, 600.0)
    }
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    /// Per-axis clamp of a reference point into the area
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.max(self.min_x()).min(self.max_x()),
            p.y.max(self.min_y()).min(self.max_y()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_translate_and_set() {
        let mut p = Point::new(1.0, 2.0);
        p.translate(3.0, -4.0);
        assert_eq!(p, Point::new(4.0, -2.0));
        p.set(0.5, 0.25);
        assert_eq!(p, Point::new(0.5, 0.25));
    }

    #[test]
    fn test_rotate_about_pivot() {
        let p = Point::new(2.0, 1.0);
        let pivot = Point::new(1.0, 1.0);
        let r = p.rotate(90.0, pivot);
        assert!((r.x - 1.0).abs() < EPS);
        assert!((r.y - 2.0).abs() < EPS);
        // Inputs untouched
        assert_eq!(p, Point::new(2.0, 1.0));
        assert_eq!(pivot, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_rotate_full_turn_is_identity() {
        let p = Point::new(-3.0, 7.5);
        let r = p.rotate(360.0, Point::new(10.0, -2.0));
        assert!((r.x - p.x).abs() < 1e-9);
        assert!((r.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(1.0, -2.346).to_string(), "(1.00,-2.35)");
    }

    #[test]
    fn test_bounds_clamp() {
        let b = Bounds::new(0.0, 0.0, 300.0, 600.0);
        assert_eq!(b.clamp(Point::new(330.0, -5.0)), Point::new(300.0, 0.0));
        assert_eq!(b.clamp(Point::new(10.0, 20.0)), Point::new(10.0, 20.0));
        assert!(b.contains(Point::new(300.0, 600.0)));
        assert!(!b.contains(Point::new(300.1, 600.0)));
    }
}
