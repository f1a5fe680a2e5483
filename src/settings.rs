//! Game tuning
//!
//! Loaded from an optional JSON file; every field falls back to its default
//! when missing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::point::Bounds;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Parsed but out of range
    #[error("Invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds per tick
    pub dt: f64,
    /// Play area handed to the engine
    pub bounds: Bounds,
    pub lives: u32,
    pub points_per_freeze: u64,
    pub points_per_spare_bullet: u64,
    /// Bullets per level attempt
    pub max_bullets: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dt: SIM_DT,
            bounds: Bounds::new(25.0, 10.0, 365.0, 400.0),
            lives: STARTING_LIVES,
            points_per_freeze: POINTS_PER_FREEZE,
            points_per_spare_bullet: POINTS_PER_SPARE_BULLET,
            max_bullets: PLAYER_MAX_BULLETS,
        }
    }
}

impl Settings {
    /// Parse and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(invalid("dt", format!("must be positive, got {}", self.dt)));
        }
        let b = &self.bounds;
        if ![b.x, b.y, b.width, b.height].iter().all(|v| v.is_finite()) {
            return Err(invalid("bounds", "must be finite"));
        }
        if b.width <= 0.0 || b.height <= 0.0 {
            return Err(invalid(
                "bounds",
                format!("needs a positive size, got {}x{}", b.width, b.height),
            ));
        }
        if self.lives == 0 {
            return Err(invalid("lives", "must be at least 1"));
        }
        if self.max_bullets == 0 {
            return Err(invalid("max_bullets", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.dt, 0.016);
        assert_eq!(settings.lives, 3);
        assert_eq!(settings.max_bullets, 6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "lives": 5, "bounds": { "x": 0, "y": 0, "width": 300, "height": 600 } }"#)
            .expect("valid settings");
        assert_eq!(settings.lives, 5);
        assert_eq!(settings.bounds, Bounds::default());
        assert_eq!(settings.points_per_freeze, 10);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.dt = 0.02;
        let json = settings.to_json().expect("serializable");
        assert_eq!(Settings::from_json(&json).expect("parses"), settings);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "dt": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "dt", .. }));

        let err = Settings::from_json(r#"{ "lives": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "lives", .. }));

        let err = Settings::from_json(r#"{ "bounds": { "x": 0, "y": 0, "width": -1, "height": 10 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "bounds", .. }));
        assert!(err.to_string().starts_with("Invalid setting `bounds`"));
    }

    #[test]
    fn test_reports_parse_and_io_errors() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Settings::load_from("/nonexistent/cryo-arcade/settings.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
