//! Error types
//!
//! The simulation itself never fails once running; everything that can go
//! wrong is caught while loading settings or at `Simulation::init`.

use std::path::PathBuf;

use thiserror::Error;

/// An invalid simulation parameter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("mass must be positive (got {0})")]
    NonPositiveMass(f32),
    #[error("{what} radius must not be negative (got {radius})")]
    NegativeRadius { what: &'static str, radius: f32 },
    #[error("speed limit must be positive (got {0})")]
    NonPositiveSpeedLimit(f32),
    #[error("elasticity must be within [0, 1] (got {0})")]
    ElasticityOutOfRange(f32),
    #[error("friction coefficient must not be negative (got {0})")]
    NegativeFriction(f32),
    #[error("lateral danger margin must not be negative (got {0})")]
    NegativeMargin(f32),
    #[error("viewport {what} must be positive (got {value})")]
    InvalidViewport { what: &'static str, value: f32 },
    #[error("{0} must be finite")]
    NonFinite(&'static str),
}

/// Failure loading or saving a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(#[from] ConfigError),
}
