//! Simulation core
//!
//! Everything that runs inside a tick lives here:
//! - Geometry, transforms and colliders
//! - Entities, their behaviors and movement paths
//! - The engine that owns entities and drives the tick pipeline
//!
//! Nothing in this module renders or reads the keyboard; those arrive through
//! the `Surface` and `InputQuery` traits.

pub mod behavior;
pub mod collision;
pub mod engine;
pub mod entity;
pub mod input;
pub mod path;
pub mod point;
pub mod prefab;
pub mod shape;
pub mod transform;

pub use behavior::{Behavior, BulletBehavior, EnemyBehavior, ObstacleBehavior, PlayerBehavior};
pub use collision::{
    COLLISION_EPSILON, CircleCollider, Collider, PolygonCollider, circle_circle, circle_polygon,
    polygon_polygon,
};
pub use engine::{Engine, EntityCtx};
pub use entity::{Body, Contact, Entity, EntityId, EntityKind, EntitySnapshot};
pub use input::{InputQuery, Key, KeySet, NoInput};
pub use path::{EnemyPath, RectangularPath, StraightPath, ZigZagPath};
pub use point::{Bounds, Point};
pub use shape::{BlockShape, Color, Shape, Sprite, Surface};
pub use transform::Transform;
