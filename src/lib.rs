//! Steer Sim - 2D steering simulation
//!
//! A population of movers is pushed by a constant environmental force and
//! steers around circular obstacles while bouncing off the top and bottom of
//! a bounded viewport and wrapping at its right edge.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (forces, integration, avoidance, bounds)
//! - `clock`: Fixed timestep accumulator that feeds `dt` to the simulation
//! - `settings`: Validated, JSON-backed configuration
//! - `renderer`: Read-only presentation boundary

pub mod clock;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SettingsError};
pub use settings::{MoverParams, PresentationSettings, Settings, SimSettings};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Number of movers spawned at init
    pub const DEFAULT_MOVER_COUNT: usize = 1000;
    /// Constant rightward bias applied to every mover every tick
    pub const DEFAULT_ENVIRONMENTAL_FORCE: [f32; 2] = [0.1, 0.0];

    /// Mover defaults
    pub const DEFAULT_MASS: f32 = 1.0;
    pub const DEFAULT_ELASTICITY: f32 = 0.9;
    pub const DEFAULT_MOVER_RADIUS: f32 = 1.0;
    pub const DEFAULT_SPEED_LIMIT: f32 = 0.125;
    pub const DEFAULT_FRICTION: f32 = 0.01;

    /// Safety buffer added to obstacle + mover radii for the collision-course test
    pub const LATERAL_DANGER_MARGIN: f32 = 0.125;
    /// Braking force per unit of velocity while avoiding
    pub const BRAKING_FACTOR: f32 = 2.0;

    /// Viewport defaults (orthographic camera, 10 world units tall)
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1920.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 1080.0;
    pub const DEFAULT_PIXELS_PER_UNIT: f32 = 108.0;
}

/// Left perpendicular of `v`: `(x, y) -> (-y, x)`
#[inline]
pub fn perpendicular_left(v: Vec2) -> Vec2 {
    v.perp()
}

/// Convert a unit heading into a rotation about the plane normal (radians).
///
/// Callers must not pass a zero vector; the result is `atan2(0, 0)` which is
/// meaningless as a heading. [`sim::Mover`] keeps its previous orientation
/// when it has no velocity instead of calling this.
#[inline]
pub fn heading_to_orientation(unit: Vec2) -> f32 {
    unit.y.atan2(unit.x)
}

/// Convert an orientation (radians) back into a unit heading
#[inline]
pub fn orientation_to_heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_perpendicular_left() {
        assert_eq!(perpendicular_left(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0));
        assert_eq!(perpendicular_left(Vec2::new(0.0, 1.0)), Vec2::new(-1.0, 0.0));
        assert_eq!(perpendicular_left(Vec2::new(3.0, -2.0)), Vec2::new(2.0, 3.0));
        assert_eq!(perpendicular_left(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_heading_to_orientation() {
        assert!(heading_to_orientation(Vec2::X).abs() < 1e-6);
        assert!((heading_to_orientation(Vec2::Y) - FRAC_PI_2).abs() < 1e-6);
        assert!((heading_to_orientation(Vec2::NEG_X) - PI).abs() < 1e-6);
    }

    #[test]
    fn test_orientation_round_trip() {
        let heading = Vec2::new(1.0, 1.0).normalize();
        let back = orientation_to_heading(heading_to_orientation(heading));
        assert!((back - heading).length() < 1e-6);
    }
}
