//! Cryo Arcade - a small 2D arcade shooter engine
//!
//! Core modules:
//! - `sim`: Entity engine (colliders, behaviors, movement paths, tick pipeline)
//! - `level`: Level layouts loaded into an engine
//! - `session`: Lives, score and level progression around the engine
//! - `settings`: JSON-backed tuning
//! - `highscores`: Top-10 leaderboard
//! - `autopilot`: Seeded scripted input for demos and tests

pub mod autopilot;
pub mod highscores;
pub mod level;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use session::{Phase, Session};
pub use settings::{ConfigError, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (~60 Hz)
    pub const SIM_DT: f64 = 0.016;

    /// Player ship horizontal speed (units/s)
    pub const PLAYER_SPEED: f64 = 250.0;
    pub const PLAYER_RADIUS: f64 = 15.0;
    /// Bullets per level attempt
    pub const PLAYER_MAX_BULLETS: u32 = 6;
    /// Bullets spawn this far above the ship
    pub const MUZZLE_OFFSET: f64 = 25.0;

    pub const ENEMY_RADIUS: f64 = 15.0;

    pub const BULLET_RADIUS: f64 = 5.0;
    /// Upward bullet speed (units/s)
    pub const BULLET_SPEED: f64 = 300.0;

    pub const STARTING_LIVES: u32 = 3;
    /// Score for each enemy frozen
    pub const POINTS_PER_FREEZE: u64 = 10;
    /// Bonus per bullet left when a level is cleared
    pub const POINTS_PER_SPARE_BULLET: u64 = 10;
}
