//! Simulation settings
//!
//! Everything tunable at `Init`. Persisted as JSON; missing fields fall back
//! to their defaults so a settings file only needs the values it changes.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, SettingsError};
use crate::sim::{Obstacle, Viewport};

/// Physical parameters shared by every spawned mover
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverParams {
    /// Higher mass needs more force to get moving
    pub mass: f32,
    /// Fraction of vertical speed kept after a wall bounce
    pub elasticity: f32,
    pub radius: f32,
    /// Maximum distance travelled per tick
    pub speed_limit: f32,
    /// Friction force magnitude (mu)
    pub friction: f32,
}

impl Default for MoverParams {
    fn default() -> Self {
        Self {
            mass: DEFAULT_MASS,
            elasticity: DEFAULT_ELASTICITY,
            radius: DEFAULT_MOVER_RADIUS,
            speed_limit: DEFAULT_SPEED_LIMIT,
            friction: DEFAULT_FRICTION,
        }
    }
}

impl MoverParams {
    /// Reject parameters that would divide by zero or move nonsensically
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("mass", self.mass)?;
        ensure_finite("elasticity", self.elasticity)?;
        ensure_finite("mover radius", self.radius)?;
        ensure_finite("speed limit", self.speed_limit)?;
        ensure_finite("friction", self.friction)?;

        if self.mass <= 0.0 {
            return Err(ConfigError::NonPositiveMass(self.mass));
        }
        if self.radius < 0.0 {
            return Err(ConfigError::NegativeRadius {
                what: "mover",
                radius: self.radius,
            });
        }
        if self.speed_limit <= 0.0 {
            return Err(ConfigError::NonPositiveSpeedLimit(self.speed_limit));
        }
        if !(0.0..=1.0).contains(&self.elasticity) {
            return Err(ConfigError::ElasticityOutOfRange(self.elasticity));
        }
        if self.friction < 0.0 {
            return Err(ConfigError::NegativeFriction(self.friction));
        }
        Ok(())
    }
}

/// Parameters of the simulation core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Run seed for reproducibility
    pub seed: u64,
    pub mover_count: usize,
    /// Constant force applied to every mover every tick
    pub environmental_force: Vec2,
    pub mover: MoverParams,
    /// Extra clearance used by the collision-course test
    pub lateral_margin: f32,
    /// World-to-viewport mapping and viewport bounds
    pub viewport: Viewport,
    /// Pre-placed obstacles (empty = let the driver decide)
    pub obstacles: Vec<Obstacle>,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            mover_count: DEFAULT_MOVER_COUNT,
            environmental_force: Vec2::from_array(DEFAULT_ENVIRONMENTAL_FORCE),
            mover: MoverParams::default(),
            lateral_margin: LATERAL_DANGER_MARGIN,
            viewport: Viewport::default(),
            obstacles: Vec::new(),
        }
    }
}

impl SimSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mover.validate()?;
        if !self.environmental_force.is_finite() {
            return Err(ConfigError::NonFinite("environmental force"));
        }
        ensure_finite("lateral margin", self.lateral_margin)?;
        if self.lateral_margin < 0.0 {
            return Err(ConfigError::NegativeMargin(self.lateral_margin));
        }
        self.viewport.validate()?;
        for obstacle in &self.obstacles {
            obstacle.validate()?;
        }
        Ok(())
    }
}

/// Presentation-only switches. Never read by the simulation core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationSettings {
    /// Expose mover/obstacle radii to the renderer for debug overlays
    pub show_debug: bool,
}

/// Complete settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sim: SimSettings,
    pub presentation: PresentationSettings,
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.sim.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

pub(crate) fn ensure_finite(what: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite(what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_values() {
        let settings = Settings::default();
        assert_eq!(settings.sim.mover_count, 1000);
        assert_eq!(settings.sim.environmental_force, Vec2::new(0.1, 0.0));
        assert_eq!(settings.sim.mover.mass, 1.0);
        assert_eq!(settings.sim.mover.elasticity, 0.9);
        assert_eq!(settings.sim.mover.radius, 1.0);
        assert_eq!(settings.sim.mover.speed_limit, 0.125);
        assert_eq!(settings.sim.mover.friction, 0.01);
        assert_eq!(settings.sim.lateral_margin, 0.125);
        assert!(!settings.presentation.show_debug);
        assert!(settings.sim.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_mass() {
        let params = MoverParams {
            mass: 0.0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ConfigError::NonPositiveMass(0.0)));
    }

    #[test]
    fn test_rejects_negative_radius() {
        let params = MoverParams {
            radius: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NegativeRadius { what: "mover", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_speed_limit() {
        let params = MoverParams {
            speed_limit: 0.0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ConfigError::NonPositiveSpeedLimit(0.0)));
    }

    #[test]
    fn test_rejects_bad_elasticity_and_nan() {
        let params = MoverParams {
            elasticity: 1.5,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ConfigError::ElasticityOutOfRange(1.5)));

        let params = MoverParams {
            mass: f32::NAN,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ConfigError::NonFinite("mass")));
    }

    #[test]
    fn test_rejects_negative_obstacle_radius() {
        let sim = SimSettings {
            obstacles: vec![Obstacle::new(Vec2::ZERO, -0.5)],
            ..Default::default()
        };
        assert!(matches!(
            sim.validate(),
            Err(ConfigError::NegativeRadius { what: "obstacle", .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "sim": { "mover_count": 5, "mover": { "mass": 2.0 } } }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.sim.mover_count, 5);
        assert_eq!(settings.sim.mover.mass, 2.0);
        assert_eq!(settings.sim.mover.speed_limit, DEFAULT_SPEED_LIMIT);
        assert_eq!(settings.sim.viewport, Viewport::default());
    }

    #[test]
    fn test_invalid_json_settings_rejected() {
        let json = r#"{ "sim": { "mover": { "speed_limit": -1.0 } } }"#;
        assert!(matches!(
            Settings::from_json(json),
            Err(SettingsError::Invalid(ConfigError::NonPositiveSpeedLimit(_)))
        ));
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip_preserves_obstacles() {
        let mut settings = Settings::default();
        settings.sim.obstacles.push(Obstacle::new(Vec2::new(2.0, -1.0), 0.75));
        settings.presentation.show_debug = true;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/nonexistent/steer-sim/settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
