//! Fixed-tick entity engine
//!
//! The engine owns every registered entity and advances them in three steps
//! per tick: update every live entity (behavior, collider resync, bounds
//! clamp), test every pair of live entities for overlap, then apply the
//! structural changes queued during the tick.
//!
//! Membership only ever changes in that last step (or through
//! `add_disabled`), so the enabled list is stable while behaviors run. Anything
//! a callback wants to change goes through `EntityCtx`, which only enqueues.

use std::collections::{HashMap, HashSet};

use super::behavior::Behavior;
use super::collision::Collider;
use super::entity::{Body, Contact, Entity, EntityId, EntitySnapshot};
use super::input::InputQuery;
use super::point::Bounds;
use super::shape::Shape;
use super::transform::Transform;

/// Ids in request order, each at most once
#[derive(Debug, Default)]
struct IdQueue {
    order: Vec<EntityId>,
    members: HashSet<EntityId>,
}

impl IdQueue {
    fn push(&mut self, id: EntityId) {
        if self.members.insert(id) {
            self.order.push(id);
        }
    }

    fn contains(&self, id: EntityId) -> bool {
        self.members.contains(&id)
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Structural changes requested since the last drain
#[derive(Debug, Default)]
struct Pending {
    add: Vec<Entity>,
    enable: IdQueue,
    disable: IdQueue,
    destroy: IdQueue,
}

/// Membership lists and the pending queues
#[derive(Debug, Default)]
pub(crate) struct Roster {
    enabled: Vec<EntityId>,
    disabled: Vec<EntityId>,
    pending: Pending,
    next_id: u32,
}

impl Roster {
    fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Assign an id, link the behavior and queue the entity for enabling
    fn queue_add(&mut self, mut entity: Entity) -> EntityId {
        let id = self.allocate();
        entity.id = Some(id);
        entity.behavior.link(id);
        log::trace!("queued {} as {id}", entity.body.name);
        self.pending.add.push(entity);
        id
    }

    fn enable(&mut self, id: EntityId) {
        if self.disabled.contains(&id) {
            self.pending.enable.push(id);
        }
    }

    fn disable(&mut self, id: EntityId) {
        if self.enabled.contains(&id) {
            self.pending.disable.push(id);
        }
    }

    fn destroy(&mut self, id: EntityId) {
        self.pending.destroy.push(id);
    }

    fn destroy_all(&mut self) {
        let Roster {
            enabled,
            disabled,
            pending,
            ..
        } = self;
        for &id in enabled.iter().chain(disabled.iter()) {
            pending.destroy.push(id);
        }
    }

    fn is_enabled(&self, id: EntityId) -> bool {
        self.enabled.contains(&id)
    }

    fn is_disabled(&self, id: EntityId) -> bool {
        self.disabled.contains(&id)
    }

    /// Queued for disable or destroy. Membership itself cannot change
    /// between drains, so for an id taken from the enabled list this is the
    /// whole liveness check.
    fn is_leaving(&self, id: EntityId) -> bool {
        self.pending.destroy.contains(id) || self.pending.disable.contains(id)
    }
}

fn remove_id(ids: &mut Vec<EntityId>, id: EntityId) -> bool {
    match ids.iter().position(|&x| x == id) {
        Some(index) => {
            ids.remove(index);
            true
        }
        None => false,
    }
}

/// What a behavior callback can see and do
///
/// Gives mutable access to the owning entity's body and the engine's
/// queueing API. Nothing here mutates the live collections directly.
pub struct EntityCtx<'a> {
    id: EntityId,
    body: &'a mut Body,
    roster: &'a mut Roster,
    bounds: Bounds,
}

impl<'a> EntityCtx<'a> {
    pub(crate) fn new(
        id: EntityId,
        body: &'a mut Body,
        roster: &'a mut Roster,
        bounds: Bounds,
    ) -> Self {
        Self {
            id,
            body,
            roster,
            bounds,
        }
    }

    /// The entity this callback belongs to
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Name, transform, collider and shape of the owning entity
    pub fn body(&self) -> &Body {
        self.body
    }

    /// Mutable access to the owning entity's body
    pub fn body_mut(&mut self) -> &mut Body {
        self.body
    }

    /// Where the owning entity is
    pub fn transform(&self) -> &Transform {
        &self.body.transform
    }

    /// Move, rotate or scale the owning entity. The collider follows at the
    /// next resync.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.body.transform
    }

    /// Collision geometry as of the last resync
    pub fn collider(&self) -> &Collider {
        &self.body.collider
    }

    /// Swap how the owning entity is drawn
    pub fn change_shape(&mut self, shape: impl Shape + 'static) {
        self.body.change_shape(Box::new(shape));
    }

    /// The engine's play area
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Queue a new entity; it becomes enabled at the end of the tick
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.roster.queue_add(entity)
    }

    /// Queue a disabled entity for promotion at the end of the tick
    pub fn enable(&mut self, id: EntityId) {
        self.roster.enable(id);
    }

    /// Queue an enabled entity for demotion. It stops colliding at once.
    pub fn disable(&mut self, id: EntityId) {
        self.roster.disable(id);
    }

    /// Queue any entity for removal. It stops colliding at once.
    pub fn destroy(&mut self, id: EntityId) {
        self.roster.destroy(id);
    }

    /// Queue the owning entity for removal
    pub fn destroy_self(&mut self) {
        self.roster.destroy(self.id);
    }

    /// Queue every enabled and disabled entity for removal
    pub fn destroy_all(&mut self) {
        self.roster.destroy_all();
    }

    /// Enabled as of the last drain
    pub fn is_enabled(&self, id: EntityId) -> bool {
        self.roster.is_enabled(id)
    }

    /// Disabled as of the last drain
    pub fn is_disabled(&self, id: EntityId) -> bool {
        self.roster.is_disabled(id)
    }
}

/// Callback to deliver to a single entity
#[derive(Debug, Clone, Copy)]
enum Hook<'c> {
    Init,
    Enabled,
    Disabled,
    Destroy,
    Collision(&'c Contact),
}

/// Owns every registered entity and the play area they are kept inside
#[derive(Debug, Default)]
pub struct Engine {
    entities: HashMap<EntityId, Entity>,
    roster: Roster,
    bounds: Bounds,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(bounds: Bounds) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Takes effect from the next tick's clamp
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Queue an entity to be enabled at the next drain. The returned id is
    /// valid immediately for enable/disable/destroy requests, but `entity()`
    /// only finds it once the drain has run.
    pub fn add_enabled(&mut self, entity: Entity) -> EntityId {
        self.roster.queue_add(entity)
    }

    /// Register an entity straight into the disabled list, firing
    /// `on_init` then `on_disabled`
    pub fn add_disabled(&mut self, mut entity: Entity) -> EntityId {
        let id = self.roster.allocate();
        entity.id = Some(id);
        entity.behavior.link(id);
        log::debug!("{} added disabled as {id}", entity.body.name);
        self.entities.insert(id, entity);
        self.roster.disabled.push(id);
        self.fire(id, Hook::Init);
        self.fire(id, Hook::Disabled);
        id
    }

    /// Queue a disabled entity to be enabled at the next drain. Ignored for
    /// anything not currently disabled.
    pub fn enable(&mut self, id: EntityId) {
        self.roster.enable(id);
    }

    /// Queue an enabled entity to be disabled at the next drain. Ignored for
    /// anything not currently enabled.
    pub fn disable(&mut self, id: EntityId) {
        self.roster.disable(id);
    }

    /// Queue an entity for removal at the next drain. Also cancels a
    /// pending add or enable of the same id.
    pub fn destroy(&mut self, id: EntityId) {
        self.roster.destroy(id);
    }

    /// Queue every enabled and disabled entity for destruction. Entities
    /// still waiting to be added are not affected.
    pub fn destroy_all(&mut self) {
        self.roster.destroy_all();
    }

    /// Advance one tick
    pub fn run(&mut self, dt: f64, input: &dyn InputQuery) {
        let snapshot = self.roster.enabled.clone();

        for &id in &snapshot {
            if self.roster.is_leaving(id) {
                continue;
            }
            let Some(entity) = self.entities.get_mut(&id) else {
                continue;
            };
            let Entity { body, behavior, .. } = entity;
            let mut ctx = EntityCtx::new(id, body, &mut self.roster, self.bounds);
            behavior.on_update(&mut ctx, dt, input);

            body.collider.resync(&body.transform);
            body.transform.position = self.bounds.clamp(body.transform.position);
        }

        self.collide_pairs(&snapshot);
        self.apply_pending();
    }

    /// Test every pair of currently enabled entities and notify overlaps
    pub fn check_collisions(&mut self) {
        let snapshot = self.roster.enabled.clone();
        self.collide_pairs(&snapshot);
    }

    fn collide_pairs(&mut self, ids: &[EntityId]) {
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                // Either side may have been queued out by an earlier pair
                if self.roster.is_leaving(a) || self.roster.is_leaving(b) {
                    continue;
                }
                let (Some(ea), Some(eb)) = (self.entities.get(&a), self.entities.get(&b)) else {
                    continue;
                };
                if !ea.body.collider.is_colliding(&eb.body.collider) {
                    continue;
                }
                let contact_a = ea.body.contact(a);
                let contact_b = eb.body.contact(b);
                log::trace!("collision {} <-> {}", contact_a.name, contact_b.name);

                self.fire(a, Hook::Collision(&contact_b));
                self.fire(b, Hook::Collision(&contact_a));
            }
        }
    }

    /// Drain the pending queues: adds, then promotions, then demotions, then
    /// destroys. The queues are taken up front, so anything a callback queues
    /// while this runs waits for the next drain.
    pub fn apply_pending(&mut self) {
        let Pending {
            mut add,
            enable,
            disable,
            destroy,
        } = std::mem::take(&mut self.roster.pending);

        let mut enable = enable.order;
        if !destroy.is_empty() {
            add.retain(|e| e.id.is_none_or(|id| !destroy.contains(id)));
            enable.retain(|&id| !destroy.contains(id));
        }

        for entity in add {
            let Some(id) = entity.id else {
                continue;
            };
            log::debug!("enabling {} ({id})", entity.body.name);
            self.entities.insert(id, entity);
            self.roster.enabled.push(id);
            self.fire(id, Hook::Init);
            self.fire(id, Hook::Enabled);
        }

        for id in enable {
            if remove_id(&mut self.roster.disabled, id) {
                self.roster.enabled.push(id);
                log::debug!("{id} enabled");
                self.fire(id, Hook::Enabled);
            }
        }

        for id in disable.order {
            if remove_id(&mut self.roster.enabled, id) {
                self.roster.disabled.push(id);
                log::debug!("{id} disabled");
                self.fire(id, Hook::Disabled);
            }
        }

        for id in destroy.order {
            let was_live = remove_id(&mut self.roster.enabled, id)
                || remove_id(&mut self.roster.disabled, id);
            if was_live {
                log::debug!("{id} destroyed");
                self.fire(id, Hook::Destroy);
            }
            self.entities.remove(&id);
        }
    }

    fn fire(&mut self, id: EntityId, hook: Hook<'_>) {
        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        let Entity { body, behavior, .. } = entity;
        let mut ctx = EntityCtx::new(id, body, &mut self.roster, self.bounds);
        let behavior: &mut dyn Behavior = behavior.as_mut();
        match hook {
            Hook::Init => behavior.on_init(&mut ctx),
            Hook::Enabled => behavior.on_enabled(&mut ctx),
            Hook::Disabled => behavior.on_disabled(&mut ctx),
            Hook::Destroy => behavior.on_destroy(&mut ctx),
            Hook::Collision(other) => behavior.on_collision(&mut ctx, other),
        }
    }

    /// In the enabled list as of the last drain
    pub fn is_enabled(&self, id: EntityId) -> bool {
        self.roster.is_enabled(id)
    }

    /// In the disabled list as of the last drain
    pub fn is_disabled(&self, id: EntityId) -> bool {
        self.roster.is_disabled(id)
    }

    /// Copy of the enabled ids, in enable order
    pub fn enabled(&self) -> Vec<EntityId> {
        self.roster.enabled.clone()
    }

    /// Copy of the disabled ids, in disable order
    pub fn disabled(&self) -> Vec<EntityId> {
        self.roster.disabled.clone()
    }

    /// Look up a registered entity, enabled or disabled
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Enabled entities in enable order
    pub fn live_entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.roster
            .enabled
            .iter()
            .filter_map(|id| self.entities.get(id))
    }

    /// Render-side view of the enabled entities
    pub fn snapshots(&self) -> Vec<EntitySnapshot> {
        self.live_entities().filter_map(Entity::snapshot).collect()
    }

    /// Registered entities (enabled plus disabled)
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
