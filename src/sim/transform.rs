//! Per-entity placement: position, render layer, rotation and scale

use serde::{Deserialize, Serialize};

use super::point::Point;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Point,
    /// Render layer (higher draws on top)
    pub layer: i32,
    /// Rotation in degrees, not wrapped
    pub angle: f64,
    /// Uniform scale. Not clamped; callers keep it non-negative.
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(0.0, 0.0)
    }
}

impl Transform {
    pub fn new(x: f64, y: f64, layer: i32, angle: f64, scale: f64) -> Self {
        Self {
            position: Point::new(x, y),
            layer,
            angle,
            scale,
        }
    }

    /// Layer 0, no rotation, unit scale
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(x, y, 0, 0.0, 1.0)
    }

    pub fn move_by(&mut self, delta: Point, delta_layer: i32) {
        self.position.translate(delta.x, delta.y);
        self.layer += delta_layer;
    }

    pub fn rotate(&mut self, delta_angle: f64) {
        self.angle += delta_angle;
    }

    /// Additive: `scale += delta_scale`
    pub fn scale_by(&mut self, delta_scale: f64) {
        self.scale += delta_scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_adds_position_and_layer() {
        let mut t = Transform::new(1.0, 2.0, 3, 0.0, 1.0);
        t.move_by(Point::new(4.0, -1.0), 2);
        assert_eq!(t.position, Point::new(5.0, 1.0));
        assert_eq!(t.layer, 5);
    }

    #[test]
    fn test_rotate_does_not_wrap() {
        let mut t = Transform::at(0.0, 0.0);
        t.rotate(270.0);
        t.rotate(180.0);
        assert_eq!(t.angle, 450.0);
        t.rotate(-900.0);
        assert_eq!(t.angle, -450.0);
    }

    #[test]
    fn test_scale_is_additive() {
        let mut t = Transform::new(0.0, 0.0, 0, 0.0, 2.0);
        t.scale_by(0.5);
        assert_eq!(t.scale, 2.5);
        t.scale_by(-1.0);
        assert_eq!(t.scale, 1.5);
    }
}
