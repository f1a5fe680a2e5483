//! Game entities
//!
//! An entity bundles a name, a kind tag, its transform and collider, a
//! replaceable shape and the behavior that drives it. Entities are owned by the
//! engine once registered and are referred to everywhere else by `EntityId`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::behavior::Behavior;
use super::collision::Collider;
use super::point::Point;
use super::shape::{Shape, Surface};
use super::transform::Transform;

/// Handle into the engine's entity arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an entity is, for collision and scoring decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    PlayerBullet,
    Obstacle,
}

/// The data half of an entity, handed to behaviors during callbacks
#[derive(Debug)]
pub struct Body {
    pub name: String,
    pub kind: EntityKind,
    pub transform: Transform,
    pub collider: Collider,
    shape: Box<dyn Shape>,
}

impl Body {
    pub fn shape(&self) -> &dyn Shape {
        self.shape.as_ref()
    }

    pub fn change_shape(&mut self, shape: Box<dyn Shape>) {
        self.shape = shape;
    }

    pub fn contact(&self, id: EntityId) -> Contact {
        Contact {
            id,
            kind: self.kind,
            name: self.name.clone(),
            position: self.transform.position,
        }
    }
}

/// The other party of a pairwise collision
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: EntityId,
    pub kind: EntityKind,
    pub name: String,
    pub position: Point,
}

/// Render-side view of a live entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub name: String,
    pub kind: EntityKind,
    pub transform: Transform,
}

#[derive(Debug)]
pub struct Entity {
    /// Set when the entity is registered with an engine
    pub(crate) id: Option<EntityId>,
    pub(crate) body: Body,
    pub(crate) behavior: Box<dyn Behavior>,
}

impl Entity {
    pub fn new(
        name: impl Into<String>,
        kind: EntityKind,
        transform: Transform,
        mut collider: Collider,
        shape: impl Shape + 'static,
        behavior: impl Behavior + 'static,
    ) -> Self {
        collider.resync(&transform);
        Self {
            id: None,
            body: Body {
                name: name.into(),
                kind,
                transform,
                collider,
                shape: Box::new(shape),
            },
            behavior: Box::new(behavior),
        }
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.body.name
    }

    pub fn kind(&self) -> EntityKind {
        self.body.kind
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn transform(&self) -> &Transform {
        &self.body.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.body.transform
    }

    pub fn collider(&self) -> &Collider {
        &self.body.collider
    }

    pub fn shape(&self) -> &dyn Shape {
        self.body.shape()
    }

    pub fn change_shape(&mut self, shape: impl Shape + 'static) {
        self.body.change_shape(Box::new(shape));
    }

    pub fn behavior(&self) -> &dyn Behavior {
        self.behavior.as_ref()
    }

    pub fn behavior_mut(&mut self) -> &mut dyn Behavior {
        self.behavior.as_mut()
    }

    pub fn move_by(&mut self, delta: Point, delta_layer: i32) {
        self.body.transform.move_by(delta, delta_layer);
    }

    pub fn rotate(&mut self, delta_angle: f64) {
        self.body.transform.rotate(delta_angle);
    }

    pub fn scale_by(&mut self, delta_scale: f64) {
        self.body.transform.scale_by(delta_scale);
    }

    /// Draw through the shape at the current transform. Called by the
    /// rendering side, never by the engine.
    pub fn render(&self, surface: &mut dyn Surface) {
        let t = &self.body.transform;
        self.body.shape.render(
            surface,
            t.position.x,
            t.position.y,
            t.angle,
            t.scale,
            t.layer,
        );
    }

    /// `None` until the entity is registered
    pub fn snapshot(&self) -> Option<EntitySnapshot> {
        let id = self.id?;
        Some(EntitySnapshot {
            id,
            name: self.body.name.clone(),
            kind: self.body.kind,
            transform: self.body.transform.clone(),
        })
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.body.transform;
        write!(
            f,
            "{} {} layer={} angle={:.2} scale={:.2}",
            self.body.name, t.position, t.layer, t.angle, t.scale
        )
    }
}
