//! One play-through: lives, score and level progression
//!
//! The session wraps an `Engine`, keeps the player ship across levels and
//! decides after every tick whether the current attempt is lost or the level
//! is cleared.

use serde::{Deserialize, Serialize};

use crate::level::{Guides, Level, standard_levels};
use crate::settings::Settings;
use crate::sim::engine::Engine;
use crate::sim::entity::{EntityId, EntityKind};
use crate::sim::input::{InputQuery, Key};
use crate::sim::prefab;

/// Where the play-through stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    /// Every level cleared
    Victory,
    /// Out of lives
    GameOver,
}

/// Player ship sits this far above the bottom of the play area
const PLAYER_LIFT: f64 = 20.0;

#[derive(Debug)]
pub struct Session {
    engine: Engine,
    settings: Settings,
    levels: Vec<Box<dyn Level>>,
    level_index: usize,
    guides: Guides,
    player: EntityId,
    lives: u32,
    score: u64,
    /// Score to fall back to when the attempt is restarted or lost
    attempt_score: u64,
    restart_was_held: bool,
    phase: Phase,
}

impl Session {
    /// Start at the first of the stock levels
    pub fn new(settings: Settings) -> Self {
        Self::with_levels(settings, standard_levels())
    }

    pub fn with_levels(settings: Settings, levels: Vec<Box<dyn Level>>) -> Self {
        let bounds = settings.bounds;
        let mut engine = Engine::with_bounds(bounds);
        let player = engine.add_enabled(prefab::player(
            bounds.min_x() + bounds.width / 2.0,
            bounds.max_y() - PLAYER_LIFT,
            settings.max_bullets,
        ));

        let mut session = Self {
            engine,
            lives: settings.lives,
            settings,
            levels,
            level_index: 0,
            guides: Guides::default(),
            player,
            score: 0,
            attempt_score: 0,
            restart_was_held: false,
            phase: Phase::Playing,
        };
        if session.levels.is_empty() {
            log::warn!("Session started without levels");
            session.phase = Phase::Victory;
        }
        session.load_current_level();
        session.engine.apply_pending();
        session
    }

    /// Advance one tick and settle the outcome
    pub fn step(&mut self, input: &dyn InputQuery) -> Phase {
        if self.phase != Phase::Playing {
            return self.phase;
        }

        let restart_held = input.is_key_pressed(Key::Restart);
        let restart = restart_held && !self.restart_was_held;
        self.restart_was_held = restart_held;
        if restart {
            self.restart_level();
            return self.phase;
        }

        self.engine.run(self.settings.dt, input);
        self.collect_freezes();
        self.settle();
        self.phase
    }

    /// Throw away the current attempt and replay the level from its start,
    /// score included. Costs no life.
    pub fn restart_level(&mut self) {
        if self.phase == Phase::Playing {
            log::info!("Restarting level {}", self.level_number());
            self.reset_attempt(true);
        }
    }

    fn collect_freezes(&mut self) {
        for id in self.engine.enabled() {
            let Some(entity) = self.engine.entity_mut(id) else {
                continue;
            };
            if entity.kind() == EntityKind::Enemy && entity.behavior_mut().take_just_frozen() {
                self.score += self.settings.points_per_freeze;
            }
        }
    }

    fn settle(&mut self) {
        let mut enemies = 0;
        let mut unfrozen = 0;
        let mut bullets = 0;
        for entity in self.engine.live_entities() {
            match entity.kind() {
                EntityKind::Enemy => {
                    enemies += 1;
                    if !entity.behavior().is_frozen() {
                        unfrozen += 1;
                    }
                }
                EntityKind::PlayerBullet => bullets += 1,
                _ => {}
            }
        }
        let ammo = self.ammo();

        if ammo == 0 && bullets == 0 && unfrozen > 0 {
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                log::info!("Game over with {} points", self.score);
                self.phase = Phase::GameOver;
            } else {
                log::info!("Life lost, {} left", self.lives);
                self.reset_attempt(true);
            }
            return;
        }

        let cleared = (enemies > 0 && unfrozen == 0) || (enemies == 0 && bullets == 0);
        if cleared {
            self.score += u64::from(ammo) * self.settings.points_per_spare_bullet;
            log::info!(
                "Cleared level {} with {ammo} bullets to spare, score {}",
                self.level_number(),
                self.score
            );
            self.next_level();
        }
    }

    fn next_level(&mut self) {
        self.level_index += 1;
        if self.level_index < self.levels.len() {
            self.reset_attempt(false);
        } else {
            log::info!("Victory with {} points", self.score);
            self.phase = Phase::Victory;
        }
    }

    fn reset_attempt(&mut self, revert_score: bool) {
        if revert_score {
            self.score = self.attempt_score;
        }
        for id in self.engine.enabled() {
            let kind = self.engine.entity(id).map(|e| e.kind());
            if matches!(
                kind,
                Some(EntityKind::Enemy | EntityKind::PlayerBullet | EntityKind::Obstacle)
            ) {
                self.engine.destroy(id);
            }
        }
        self.load_current_level();
        if let Some(player) = self.engine.entity_mut(self.player) {
            player.behavior_mut().reset_state();
        }
        self.engine.apply_pending();
    }

    fn load_current_level(&mut self) {
        let Some(level) = self.levels.get(self.level_index) else {
            return;
        };
        self.attempt_score = self.score;
        self.guides = level.load(&mut self.engine);
        log::info!("Loaded {}", level.name());
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// 1-based number of the level being played
    pub fn level_number(&self) -> usize {
        self.level_index + 1
    }

    /// Bullets the player has left this attempt
    pub fn ammo(&self) -> u32 {
        self.engine
            .entity(self.player)
            .and_then(|e| e.behavior().ammo())
            .unwrap_or(0)
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn guides(&self) -> &Guides {
        &self.guides
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }
}
