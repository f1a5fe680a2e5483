//! Enemy movement patterns
//!
//! Each pattern is stepped once per tick by the enemy behavior and moves the
//! enemy's transform directly. Patterns carry their own state (speed sign,
//! current target corner, zig-zag phase) and are plain serializable data so
//! levels can describe them.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::point::{Bounds, Point};
use super::transform::Transform;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyPath {
    Straight(StraightPath),
    Rectangular(RectangularPath),
    ZigZag(ZigZagPath),
}

impl EnemyPath {
    pub fn straight(speed: f64) -> Self {
        EnemyPath::Straight(StraightPath::new(speed))
    }

    pub fn rectangular(rect: Bounds, speed: f64) -> Self {
        EnemyPath::Rectangular(RectangularPath::new(rect, speed))
    }

    pub fn zigzag() -> Self {
        EnemyPath::ZigZag(ZigZagPath::default())
    }

    pub fn advance(&mut self, dt: f64, transform: &mut Transform, bounds: &Bounds) {
        match self {
            EnemyPath::Straight(p) => p.advance(dt, transform, bounds),
            EnemyPath::Rectangular(p) => p.advance(dt, transform),
            EnemyPath::ZigZag(p) => p.advance(dt, transform, bounds),
        }
    }
}

/// Constant horizontal speed, reflected at the play-area edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StraightPath {
    speed: f64,
}

impl StraightPath {
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }

    /// Signed horizontal speed (units/s)
    pub fn speed(&self) -> f64 {
        self.speed
    }

    fn advance(&mut self, dt: f64, transform: &mut Transform, bounds: &Bounds) {
        transform.move_by(Point::new(self.speed * dt, 0.0), 0);
        let x = transform.position.x;
        if (self.speed > 0.0 && x >= bounds.max_x()) || (self.speed < 0.0 && x <= bounds.min_x()) {
            self.speed = -self.speed;
        }
    }
}

/// Patrols the corners of a rectangle: top-left, top-right, bottom-right,
/// bottom-left, then around again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangularPath {
    corners: [Point; 4],
    target: usize,
    speed: f64,
}

impl RectangularPath {
    /// Distance under which the enemy snaps onto its target corner
    pub const ARRIVAL_THRESHOLD: f64 = 1.5;

    pub fn new(rect: Bounds, speed: f64) -> Self {
        Self {
            corners: [
                Point::new(rect.min_x(), rect.min_y()),
                Point::new(rect.max_x(), rect.min_y()),
                Point::new(rect.max_x(), rect.max_y()),
                Point::new(rect.min_x(), rect.max_y()),
            ],
            target: 0,
            speed: speed.abs(),
        }
    }

    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    /// Index of the corner currently being approached
    pub fn target_index(&self) -> usize {
        self.target
    }

    fn advance(&mut self, dt: f64, transform: &mut Transform) {
        let target = self.corners[self.target];
        let to_target = DVec2::from(target) - DVec2::from(transform.position);
        let distance = to_target.length();

        if distance < Self::ARRIVAL_THRESHOLD {
            transform.position.set_point(target);
            self.target = (self.target + 1) % self.corners.len();
        } else {
            let step = to_target / distance * (self.speed * dt);
            transform.move_by(step.into(), 0);
        }
    }
}

/// Five timed phases alternating horizontal and vertical segments. The phase
/// sequence is walked forward, then backward, then forward again; horizontal
/// travel flips on its own whenever the enemy nears a side edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZigZagPath {
    horizontal_speed: f64,
    vertical_speed: f64,
    durations: [f64; ZigZagPath::PHASES],
    phase: usize,
    phase_time: f64,
    forward: bool,
    inverted: bool,
}

impl Default for ZigZagPath {
    fn default() -> Self {
        Self::new(50.0, 50.0, [1.2, 1.1, 4.1, 1.1, 1.1])
    }
}

impl ZigZagPath {
    pub const PHASES: usize = 5;
    /// Inset from the side edges at which horizontal travel reverses
    pub const EDGE_MARGIN: f64 = 1.0;

    pub fn new(horizontal_speed: f64, vertical_speed: f64, durations: [f64; Self::PHASES]) -> Self {
        Self {
            horizontal_speed,
            vertical_speed,
            durations,
            phase: 0,
            phase_time: 0.0,
            forward: true,
            inverted: false,
        }
    }

    /// Position within the current pass (0..PHASES)
    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    fn advance(&mut self, dt: f64, transform: &mut Transform, bounds: &Bounds) {
        let current = if self.forward {
            self.phase
        } else {
            Self::PHASES - 1 - self.phase
        };
        let vertical_sign = if self.forward { 1.0 } else { -1.0 };

        let delta = match current {
            0 | 2 | 4 => Point::new(self.horizontal_velocity(transform.position.x, bounds) * dt, 0.0),
            1 => Point::new(0.0, vertical_sign * self.vertical_speed * dt),
            _ => Point::new(0.0, -vertical_sign * self.vertical_speed * dt),
        };
        transform.move_by(delta, 0);

        self.phase_time += dt;
        if self.phase_time >= self.durations[current] {
            self.phase += 1;
            self.phase_time = 0.0;
            if self.phase >= Self::PHASES {
                self.forward = !self.forward;
                self.phase = 0;
            }
        }
    }

    fn horizontal_velocity(&mut self, x: f64, bounds: &Bounds) -> f64 {
        if (!self.inverted && x >= bounds.max_x() - Self::EDGE_MARGIN)
            || (self.inverted && x <= bounds.min_x() + Self::EDGE_MARGIN)
        {
            self.inverted = !self.inverted;
        }
        if self.inverted {
            -self.horizontal_speed
        } else {
            self.horizontal_speed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_straight_reflects_at_right_edge() {
        let bounds = Bounds::new(0.0, 0.0, 300.0, 600.0);
        let mut t = Transform::at(280.0, 100.0);
        let mut path = StraightPath::new(50.0);
        path.advance(1.0, &mut t, &bounds);
        assert_eq!(t.position.x, 330.0);
        assert_eq!(path.speed(), -50.0);
        path.advance(1.0, &mut t, &bounds);
        assert_eq!(t.position.x, 280.0);
        assert_eq!(path.speed(), -50.0);
    }

    #[test]
    fn test_straight_reflects_at_left_edge() {
        let bounds = Bounds::new(0.0, 0.0, 300.0, 600.0);
        let mut t = Transform::at(10.0, 0.0);
        let mut path = StraightPath::new(-20.0);
        path.advance(0.5, &mut t, &bounds);
        assert_eq!(t.position.x, 0.0);
        assert_eq!(path.speed(), 20.0);
    }

    #[test]
    fn test_rectangular_closes_the_loop() {
        let rect = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let mut path = RectangularPath::new(rect, 100.0);
        let mut t = Transform::at(0.0, 0.0);
        let bounds = Bounds::default();

        // One tick to snap onto the start corner, then ten per side
        let mut wrapped = EnemyPath::Rectangular(path.clone());
        wrapped.advance(0.01, &mut t, &bounds);
        assert_eq!(t.position, Point::new(0.0, 0.0));
        if let EnemyPath::Rectangular(p) = &wrapped {
            assert_eq!(p.target_index(), 1);
        }

        t = Transform::at(0.0, 0.0);
        for _ in 0..41 {
            path.advance(0.01, &mut t);
        }
        assert!(t.position.distance(Point::new(0.0, 0.0)) < RectangularPath::ARRIVAL_THRESHOLD);
        assert_eq!(path.target_index(), 1);
    }

    #[test]
    fn test_rectangular_visits_corners_in_order() {
        let rect = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let mut path = RectangularPath::new(rect, 100.0);
        let mut t = Transform::at(0.0, 0.0);
        let mut visited = Vec::new();
        for _ in 0..41 {
            let before = path.target_index();
            path.advance(0.01, &mut t);
            if path.target_index() != before {
                visited.push(t.position);
            }
        }
        assert_eq!(
            visited,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
                Point::new(0.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_rectangular_speed_is_unsigned() {
        let path = RectangularPath::new(Bounds::new(0.0, 0.0, 10.0, 10.0), -70.0);
        assert_eq!(path.speed, 70.0);
    }

    #[test]
    fn test_zigzag_runs_forward_then_backward() {
        let bounds = Bounds::new(0.0, 0.0, 300.0, 600.0);
        let mut path = ZigZagPath::new(50.0, 50.0, [1.0, 0.5, 1.0, 0.5, 1.0]);
        let mut t = Transform::at(100.0, 100.0);

        for _ in 0..8 {
            path.advance(0.5, &mut t, &bounds);
        }
        // Forward pass: right 50, down 25, right 50, up 25, right 50
        assert!((t.position.x - 250.0).abs() < EPS);
        assert!((t.position.y - 100.0).abs() < EPS);
        assert!(!path.is_forward());
        assert_eq!(path.phase(), 0);

        for _ in 0..8 {
            path.advance(0.5, &mut t, &bounds);
        }
        // Backward pass hits the right edge at x=300 and turns around
        assert!(path.is_inverted());
        assert!(path.is_forward());
        assert!((t.position.x - 200.0).abs() < EPS);
        assert!((t.position.y - 100.0).abs() < EPS);
    }

    #[test]
    fn test_zigzag_inverts_near_left_edge() {
        let bounds = Bounds::new(0.0, 0.0, 300.0, 600.0);
        let mut path = ZigZagPath::new(50.0, 50.0, [10.0, 1.0, 1.0, 1.0, 1.0]);
        path.inverted = true;
        let mut t = Transform::at(0.5, 50.0);
        path.advance(0.1, &mut t, &bounds);
        assert!(!path.is_inverted());
        assert!((t.position.x - 5.5).abs() < EPS);
    }
}
