//! Scripted input for headless runs
//!
//! Wanders left and right in random stretches and taps fire now and then. All
//! choices come from a seeded `Pcg32`, so the same seed always plays the same
//! game.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::input::{InputQuery, Key, KeySet};

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    held: KeySet,
    steer: Option<Key>,
    steer_ticks: u32,
    fire_chance: f64,
}

impl Autopilot {
    /// Ticks a steering choice is held for
    const STEER_TICKS: std::ops::Range<u32> = 10..40;

    pub fn new(seed: u64) -> Self {
        Self::with_fire_chance(seed, 0.05)
    }

    /// `fire_chance` is the per-tick probability of pressing fire
    pub fn with_fire_chance(seed: u64, fire_chance: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            held: KeySet::new(),
            steer: None,
            steer_ticks: 0,
            fire_chance: fire_chance.clamp(0.0, 1.0),
        }
    }

    /// Choose the keys held during the next tick
    pub fn advance(&mut self) -> &KeySet {
        if self.steer_ticks == 0 {
            self.steer = match self.rng.random_range(0..3) {
                0 => Some(Key::Left),
                1 => Some(Key::Right),
                _ => None,
            };
            self.steer_ticks = self.rng.random_range(Self::STEER_TICKS);
        }
        self.steer_ticks -= 1;

        // Fire is edge-triggered, so never hold it two ticks running
        let was_firing = self.held.is_key_pressed(Key::Space);
        let fire = !was_firing && self.rng.random_bool(self.fire_chance);

        self.held.clear();
        if let Some(key) = self.steer {
            self.held.press(key);
        }
        if fire {
            self.held.press(Key::Space);
        }
        &self.held
    }

    pub fn held(&self) -> &KeySet {
        &self.held
    }
}

impl InputQuery for Autopilot {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.held.is_key_pressed(key)
    }
}
