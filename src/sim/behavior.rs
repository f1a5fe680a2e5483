//! Per-entity logic
//!
//! A behavior is attached to one entity and receives its lifecycle, update and
//! collision callbacks from the engine. Every callback gets an `EntityCtx`:
//! mutable access to the owning entity's body plus the engine's queueing API,
//! so behaviors can spawn or remove entities mid-tick without touching the live
//! collections.

use std::fmt;

use super::engine::EntityCtx;
use super::entity::{Contact, EntityId, EntityKind};
use super::input::{InputQuery, Key};
use super::path::EnemyPath;
use super::point::Point;
use super::prefab;
use super::shape::{Sprite, assets};
use crate::consts::*;

pub trait Behavior: fmt::Debug {
    /// Called once when the owning entity is registered with an engine
    fn link(&mut self, _owner: EntityId) {}

    fn on_init(&mut self, _ctx: &mut EntityCtx<'_>) {}
    fn on_enabled(&mut self, _ctx: &mut EntityCtx<'_>) {}
    fn on_disabled(&mut self, _ctx: &mut EntityCtx<'_>) {}
    fn on_destroy(&mut self, _ctx: &mut EntityCtx<'_>) {}

    fn on_update(&mut self, ctx: &mut EntityCtx<'_>, dt: f64, input: &dyn InputQuery);

    /// One call per colliding pair per tick
    fn on_collision(&mut self, ctx: &mut EntityCtx<'_>, other: &Contact);

    fn is_frozen(&self) -> bool {
        false
    }

    /// True once per freeze; clears the flag
    fn take_just_frozen(&mut self) -> bool {
        false
    }

    /// Shots left, for behaviors that shoot
    fn ammo(&self) -> Option<u32> {
        None
    }

    fn max_ammo(&self) -> Option<u32> {
        None
    }

    /// Restore per-attempt state (e.g. ammo) on level reset
    fn reset_state(&mut self) {}

    fn path(&self) -> Option<&EnemyPath> {
        None
    }
}

/// Keyboard-driven ship: slides left/right and fires on Space
#[derive(Debug, Clone)]
pub struct PlayerBehavior {
    owner: Option<EntityId>,
    max_ammo: u32,
    ammo: u32,
    shots_fired: u32,
    fire_was_held: bool,
    half_width: f64,
}

impl PlayerBehavior {
    pub fn new(max_ammo: u32) -> Self {
        Self {
            owner: None,
            max_ammo,
            ammo: max_ammo,
            shots_fired: 0,
            fire_was_held: false,
            half_width: PLAYER_RADIUS,
        }
    }

    fn shoot(&mut self, ctx: &mut EntityCtx<'_>) {
        if self.ammo == 0 {
            return;
        }
        let pos = ctx.transform().position;
        let name = format!("player_bullet_{}", self.shots_fired);
        self.shots_fired += 1;
        self.ammo -= 1;
        let id = ctx.spawn(prefab::bullet(name, pos.x, pos.y - MUZZLE_OFFSET));
        log::debug!("player fired {id}, {} shots left", self.ammo);
    }
}

impl Behavior for PlayerBehavior {
    fn link(&mut self, owner: EntityId) {
        self.owner = Some(owner);
    }

    fn on_init(&mut self, ctx: &mut EntityCtx<'_>) {
        self.reset_state();
        self.half_width = ctx.collider().characteristic_dimension();
    }

    fn on_update(&mut self, ctx: &mut EntityCtx<'_>, dt: f64, input: &dyn InputQuery) {
        if self.owner.is_none() {
            return;
        }
        let step = PLAYER_SPEED * dt;
        let mut dx = 0.0;
        if input.is_key_pressed(Key::Left) {
            dx -= step;
        }
        if input.is_key_pressed(Key::Right) {
            dx += step;
        }

        let bounds = ctx.bounds();
        let x = ctx.transform().position.x;
        let lo = bounds.min_x() + self.half_width;
        let hi = bounds.max_x() - self.half_width;
        // Not clamp(): lo > hi when the area is narrower than the ship
        let new_x = (x + dx).max(lo).min(hi);
        ctx.transform_mut().move_by(Point::new(new_x - x, 0.0), 0);

        let fire_held = input.is_key_pressed(Key::Space);
        if fire_held && !self.fire_was_held {
            self.shoot(ctx);
        }
        self.fire_was_held = fire_held;
    }

    fn on_collision(&mut self, _ctx: &mut EntityCtx<'_>, _other: &Contact) {}

    fn ammo(&self) -> Option<u32> {
        Some(self.ammo)
    }

    fn max_ammo(&self) -> Option<u32> {
        Some(self.max_ammo)
    }

    fn reset_state(&mut self) {
        self.ammo = self.max_ammo;
    }
}

/// Follows its path until a player bullet freezes it
#[derive(Debug, Clone)]
pub struct EnemyBehavior {
    owner: Option<EntityId>,
    path: EnemyPath,
    frozen: bool,
    just_frozen: bool,
    stopped: bool,
}

impl EnemyBehavior {
    pub fn new(path: EnemyPath) -> Self {
        Self {
            owner: None,
            path,
            frozen: false,
            just_frozen: false,
            stopped: false,
        }
    }

    /// Halt movement without freezing
    pub fn stop(&mut self) {
        self.stopped = true;
    }
}

impl Behavior for EnemyBehavior {
    fn link(&mut self, owner: EntityId) {
        self.owner = Some(owner);
    }

    fn on_update(&mut self, ctx: &mut EntityCtx<'_>, dt: f64, _input: &dyn InputQuery) {
        if self.frozen || self.stopped || self.owner.is_none() {
            return;
        }
        let bounds = ctx.bounds();
        self.path.advance(dt, ctx.transform_mut(), &bounds);
    }

    fn on_collision(&mut self, ctx: &mut EntityCtx<'_>, other: &Contact) {
        if self.frozen || other.kind != EntityKind::PlayerBullet {
            return;
        }
        self.frozen = true;
        self.just_frozen = true;
        self.stopped = true;
        ctx.change_shape(Sprite::new(assets::FROZEN_ENEMY));
        log::debug!("{} frozen by {}", ctx.body().name, other.name);
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn take_just_frozen(&mut self) -> bool {
        std::mem::take(&mut self.just_frozen)
    }

    fn path(&self) -> Option<&EnemyPath> {
        Some(&self.path)
    }
}

/// Travels straight up; gone when it leaves the top or hits something solid
#[derive(Debug, Clone)]
pub struct BulletBehavior {
    speed: f64,
}

impl Default for BulletBehavior {
    fn default() -> Self {
        Self {
            speed: -BULLET_SPEED,
        }
    }
}

impl Behavior for BulletBehavior {
    fn on_update(&mut self, ctx: &mut EntityCtx<'_>, dt: f64, _input: &dyn InputQuery) {
        ctx.transform_mut().move_by(Point::new(0.0, self.speed * dt), 0);
        if ctx.transform().position.y < ctx.bounds().min_y() {
            ctx.destroy_self();
        }
    }

    fn on_collision(&mut self, ctx: &mut EntityCtx<'_>, other: &Contact) {
        if matches!(other.kind, EntityKind::Enemy | EntityKind::Obstacle) {
            ctx.destroy_self();
        }
    }
}

/// Static scenery
#[derive(Debug, Clone, Copy, Default)]
pub struct ObstacleBehavior;

impl Behavior for ObstacleBehavior {
    fn on_update(&mut self, _ctx: &mut EntityCtx<'_>, _dt: f64, _input: &dyn InputQuery) {}

    fn on_collision(&mut self, _ctx: &mut EntityCtx<'_>, _other: &Contact) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::engine::Engine;
    use crate::sim::entity::Entity;
    use crate::sim::input::{KeySet, NoInput};
    use crate::sim::point::Bounds;

    fn arena() -> Engine {
        Engine::with_bounds(Bounds::new(0.0, 0.0, 300.0, 600.0))
    }

    fn bullets(engine: &Engine) -> Vec<&Entity> {
        engine
            .live_entities()
            .filter(|e| e.kind() == EntityKind::PlayerBullet)
            .collect()
    }

    #[test]
    fn test_player_stops_at_half_width_from_edge() {
        let mut engine = arena();
        let id = engine.add_enabled(prefab::player(20.0, 380.0, 6));
        engine.apply_pending();

        let left: KeySet = [Key::Left].into_iter().collect();
        engine.run(1.0, &left);
        let x = engine.entity(id).map(|e| e.transform().position.x);
        assert_eq!(x, Some(PLAYER_RADIUS));

        let right: KeySet = [Key::Right].into_iter().collect();
        for _ in 0..3 {
            engine.run(1.0, &right);
        }
        let x = engine.entity(id).map(|e| e.transform().position.x);
        assert_eq!(x, Some(300.0 - PLAYER_RADIUS));
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut engine = arena();
        let id = engine.add_enabled(prefab::player(150.0, 380.0, 6));
        engine.apply_pending();

        let fire: KeySet = [Key::Space].into_iter().collect();
        engine.run(0.016, &fire);
        let shots = bullets(&engine);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].name(), "player_bullet_0");
        assert_eq!(shots[0].transform().position.y, 380.0 - MUZZLE_OFFSET);

        // Still held: no second shot
        engine.run(0.016, &fire);
        assert_eq!(bullets(&engine).len(), 1);

        engine.run(0.016, &NoInput);
        engine.run(0.016, &fire);
        assert_eq!(bullets(&engine).len(), 2);
        assert_eq!(engine.entity(id).and_then(|e| e.behavior().ammo()), Some(4));
    }

    #[test]
    fn test_no_shots_without_ammo() {
        let mut engine = arena();
        let id = engine.add_enabled(prefab::player(150.0, 380.0, 1));
        engine.apply_pending();

        let fire: KeySet = [Key::Space].into_iter().collect();
        for _ in 0..3 {
            engine.run(0.016, &fire);
            engine.run(0.016, &NoInput);
        }
        assert_eq!(bullets(&engine).len(), 1);

        let player = engine.entity_mut(id).expect("player registered");
        assert_eq!(player.behavior().ammo(), Some(0));
        player.behavior_mut().reset_state();
        assert_eq!(player.behavior().ammo(), player.behavior().max_ammo());
    }

    #[test]
    fn test_bullet_leaves_through_the_top() {
        let mut engine = arena();
        let id = engine.add_enabled(prefab::bullet("player_bullet_0", 100.0, 10.0));
        engine.apply_pending();

        engine.run(0.016, &NoInput);
        assert!(engine.is_enabled(id));
        engine.run(0.1, &NoInput);
        assert!(engine.entity(id).is_none());
    }

    #[test]
    fn test_enemy_follows_its_path() {
        let mut engine = arena();
        let id = engine.add_enabled(prefab::enemy("enemy0", 100.0, 100.0, EnemyPath::straight(50.0)));
        engine.apply_pending();
        engine.run(1.0, &NoInput);
        let x = engine.entity(id).map(|e| e.transform().position.x);
        assert_eq!(x, Some(150.0));
    }

    #[test]
    fn test_frozen_enemy_ignores_further_hits() {
        let mut engine = arena();
        let enemy = engine.add_enabled(prefab::enemy("enemy0", 100.0, 100.0, EnemyPath::straight(50.0)));
        engine.add_enabled(prefab::bullet("player_bullet_0", 100.0, 118.0));
        engine.apply_pending();
        engine.run(0.016, &NoInput);

        let before = engine.entity(enemy).map(|e| e.transform().position);
        engine.add_enabled(prefab::bullet("player_bullet_1", 100.0, 118.0));
        engine.apply_pending();
        engine.run(0.016, &NoInput);

        let e = engine.entity_mut(enemy).expect("enemy registered");
        assert!(e.behavior().is_frozen());
        assert_eq!(Some(e.transform().position), before);
        assert!(e.behavior_mut().take_just_frozen());
        assert!(!e.behavior_mut().take_just_frozen());
    }
}
