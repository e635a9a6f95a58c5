//! Static circular obstacles
//!
//! An obstacle only answers geometric questions about a mover: where it is
//! relative to the mover, whether it lies ahead, and whether the mover's
//! current path passes close enough to hit it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mover::Mover;
use crate::error::ConfigError;
use crate::perpendicular_left;
use crate::settings::ensure_finite;

/// A static circular hazard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec2,
    pub radius: f32,
}

impl Obstacle {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self { position, radius }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.position.is_finite() {
            return Err(ConfigError::NonFinite("obstacle position"));
        }
        ensure_finite("obstacle radius", self.radius)?;
        if self.radius < 0.0 {
            return Err(ConfigError::NegativeRadius {
                what: "obstacle",
                radius: self.radius,
            });
        }
        Ok(())
    }

    /// Vector from the mover to this obstacle's center
    #[inline]
    pub fn vector_to(&self, mover: &Mover) -> Vec2 {
        self.position - mover.position()
    }

    /// Whether the obstacle lies in front of the mover's heading.
    ///
    /// A stationary mover has no heading, so nothing is ahead of it.
    pub fn is_ahead(&self, mover: &Mover) -> bool {
        let forward = mover.velocity().normalize_or_zero();
        forward.dot(self.vector_to(mover)) > 0.0
    }

    /// Whether the mover's straight-line path passes within reach of this
    /// obstacle, measured as the lateral offset of the obstacle center from
    /// the heading line.
    pub fn is_dangerous(&self, mover: &Mover, margin: f32) -> bool {
        self.lateral_offset(mover).abs() < self.radius + mover.radius() + margin
    }

    /// Signed distance of the obstacle center from the mover's heading line
    /// (positive = to the mover's left)
    #[inline]
    pub fn lateral_offset(&self, mover: &Mover) -> f32 {
        let left = perpendicular_left(mover.velocity().normalize_or_zero());
        left.dot(self.vector_to(mover))
    }
}
