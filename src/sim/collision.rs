//! Collider shapes and overlap testing
//!
//! Two collider kinds exist: circles and convex polygons. Each keeps its
//! local definition and a cached world-space copy that `resync` rebuilds from
//! the owning entity's transform once per tick. Overlap tests are routed
//! through one dispatch table keyed on the kind pair, so every pair algorithm
//! is written once and `a.is_colliding(b) == b.is_colliding(a)` holds for all
//! combinations.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::point::Point;
use super::transform::Transform;

/// Tolerance used by the strict inequality tests and degenerate-edge checks
pub const COLLISION_EPSILON: f64 = 1e-9;

/// Circle collider. Rotation has no effect on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleCollider {
    radius: f64,
    world_center: Point,
    world_radius: f64,
}

impl CircleCollider {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            world_center: Point::ORIGIN,
            world_radius: radius,
        }
    }

    /// Local (unscaled) radius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn world_center(&self) -> Point {
        self.world_center
    }

    pub fn world_radius(&self) -> f64 {
        self.world_radius
    }

    pub fn resync(&mut self, transform: &Transform) {
        self.world_center = transform.position;
        self.world_radius = self.radius * transform.scale;
    }
}

/// Polygon collider over an ordered vertex ring (consistent winding)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonCollider {
    local: Vec<Point>,
    /// Same length as `local` at all times
    world: Vec<Point>,
}

impl PolygonCollider {
    pub fn new(vertices: Vec<Point>) -> Self {
        if vertices.len() < 3 {
            log::warn!(
                "polygon collider built with {} vertices; overlap tests will be unreliable",
                vertices.len()
            );
        }
        let world = vertices.clone();
        Self {
            local: vertices,
            world,
        }
    }

    /// Build from a flat `[x0, y0, x1, y1, ...]` list. A trailing unpaired
    /// coordinate is dropped with a warning.
    pub fn from_coords(coords: &[f64]) -> Self {
        if coords.len() % 2 != 0 {
            log::warn!(
                "polygon coordinate list has odd length {}; ignoring the last value",
                coords.len()
            );
        }
        let vertices = coords
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect();
        Self::new(vertices)
    }

    pub fn local_vertices(&self) -> &[Point] {
        &self.local
    }

    /// World-space vertices as of the last `resync`
    pub fn vertices(&self) -> &[Point] {
        &self.world
    }

    /// Scale, then rotate about the local origin, then translate.
    pub fn resync(&mut self, transform: &Transform) {
        let offset = DVec2::from(transform.position);
        for (local, world) in self.local.iter().zip(self.world.iter_mut()) {
            let scaled = Point::new(local.x * transform.scale, local.y * transform.scale);
            let rotated = DVec2::from(scaled.rotate(transform.angle, Point::ORIGIN));
            *world = Point::from(rotated + offset);
        }
    }

    /// Half the width of the world-space axis-aligned bounding box
    pub fn half_width(&self) -> f64 {
        if self.world.is_empty() {
            return 0.0;
        }
        let (min_x, max_x) = self
            .world
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.x), hi.max(p.x))
            });
        (max_x - min_x) / 2.0
    }

    /// Area centroid of the world ring (vertex average for zero-area rings)
    pub fn centroid(&self) -> Point {
        let n = self.world.len();
        if n == 0 {
            return Point::ORIGIN;
        }
        let mut twice_area = 0.0;
        let mut sum = DVec2::ZERO;
        for i in 0..n {
            let p1 = DVec2::from(self.world[i]);
            let p2 = DVec2::from(self.world[(i + 1) % n]);
            let cross = p1.perp_dot(p2);
            twice_area += cross;
            sum += (p1 + p2) * cross;
        }
        if twice_area.abs() < COLLISION_EPSILON {
            let avg = self.world.iter().map(|&p| DVec2::from(p)).sum::<DVec2>() / n as f64;
            return avg.into();
        }
        (sum / (3.0 * twice_area)).into()
    }
}

/// Collider variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    Circle(CircleCollider),
    Polygon(PolygonCollider),
}

impl Collider {
    pub fn circle(radius: f64) -> Self {
        Collider::Circle(CircleCollider::new(radius))
    }

    pub fn polygon(vertices: Vec<Point>) -> Self {
        Collider::Polygon(PolygonCollider::new(vertices))
    }

    /// Axis-aligned box anchored at the local origin (top-left corner)
    pub fn rect(width: f64, height: f64) -> Self {
        Collider::Polygon(PolygonCollider::from_coords(&[
            0.0, 0.0, width, 0.0, width, height, 0.0, height,
        ]))
    }

    /// Rebuild world geometry from `transform`
    pub fn resync(&mut self, transform: &Transform) {
        match self {
            Collider::Circle(c) => c.resync(transform),
            Collider::Polygon(p) => p.resync(transform),
        }
    }

    /// Overlap test. Symmetric for every kind pair.
    pub fn is_colliding(&self, other: &Collider) -> bool {
        match (self, other) {
            (Collider::Circle(a), Collider::Circle(b)) => circle_circle(a, b),
            (Collider::Circle(c), Collider::Polygon(p))
            | (Collider::Polygon(p), Collider::Circle(c)) => circle_polygon(c, p),
            (Collider::Polygon(a), Collider::Polygon(b)) => polygon_polygon(a, b),
        }
    }

    /// Rough size: radius for circles, half AABB width for polygons
    pub fn characteristic_dimension(&self) -> f64 {
        match self {
            Collider::Circle(c) => c.world_radius(),
            Collider::Polygon(p) => p.half_width(),
        }
    }

    pub fn centroid(&self) -> Point {
        match self {
            Collider::Circle(c) => c.world_center(),
            Collider::Polygon(p) => p.centroid(),
        }
    }
}

/// Strictly overlapping circles (touching does not count)
pub fn circle_circle(a: &CircleCollider, b: &CircleCollider) -> bool {
    let distance = a.world_center.distance(b.world_center);
    distance < a.world_radius + b.world_radius - COLLISION_EPSILON
}

/// Circle against polygon: an edge passes within the radius, or the center
/// lies inside the ring.
pub fn circle_polygon(circle: &CircleCollider, poly: &PolygonCollider) -> bool {
    let ring = poly.vertices();
    if ring.is_empty() {
        return false;
    }
    let center = DVec2::from(circle.world_center);
    let n = ring.len();
    for i in 0..n {
        let p1 = DVec2::from(ring[i]);
        let p2 = DVec2::from(ring[(i + 1) % n]);
        if distance_to_segment(center, p1, p2) < circle.world_radius - COLLISION_EPSILON {
            return true;
        }
    }
    point_in_polygon(center, ring)
}

/// Separating Axis Theorem over the edge normals of both rings
pub fn polygon_polygon(a: &PolygonCollider, b: &PolygonCollider) -> bool {
    let axes_a = separating_axes(a.vertices());
    if axes_a.is_empty() {
        return false;
    }
    let axes_b = separating_axes(b.vertices());
    if axes_b.is_empty() {
        return false;
    }
    axes_a.iter().chain(axes_b.iter()).all(|&axis| {
        project(a.vertices(), axis).overlaps(&project(b.vertices(), axis))
    })
}

/// Distance from `p` to the segment `a..b`
fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let seg = b - a;
    let len_sq = seg.length_squared();
    if len_sq < COLLISION_EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    p.distance(a + seg * t)
}

/// Even-odd ray cast
fn point_in_polygon(p: DVec2, ring: &[Point]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = ring[i];
        let vj = ring[j];
        if (vi.y > p.y) != (vj.y > p.y) && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Unit edge normals; zero-length edges contribute nothing
fn separating_axes(ring: &[Point]) -> Vec<DVec2> {
    let n = ring.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n)
        .filter_map(|i| {
            let edge = DVec2::from(ring[(i + 1) % n]) - DVec2::from(ring[i]);
            let normal = edge.perp();
            let len = normal.length();
            (len > COLLISION_EPSILON).then(|| normal / len)
        })
        .collect()
}

/// 1D interval of a ring projected on an axis
#[derive(Debug, Clone, Copy)]
struct Projection {
    min: f64,
    max: f64,
}

impl Projection {
    /// Touching intervals overlap
    fn overlaps(&self, other: &Projection) -> bool {
        self.max >= other.min && other.max >= self.min
    }
}

fn project(ring: &[Point], axis: DVec2) -> Projection {
    ring.iter().fold(
        Projection {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        },
        |acc, &p| {
            let d = DVec2::from(p).dot(axis);
            Projection {
                min: acc.min.min(d),
                max: acc.max.max(d),
            }
        },
    )
}
