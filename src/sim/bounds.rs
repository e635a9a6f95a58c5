//! Viewport mapping and boundary resolution
//!
//! Boundary tests run in viewport space (origin at the bottom-left corner,
//! y up, `0..width` by `0..height`); positions are corrected there and
//! mapped back into world space.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::ensure_finite;

/// Converts between world space and the bounded viewport.
///
/// Implementations must be deterministic and invertible for positions inside
/// the viewport.
pub trait CoordinateMap {
    fn world_to_viewport(&self, world: Vec2) -> Vec2;
    fn viewport_to_world(&self, viewport: Vec2) -> Vec2;
    /// Viewport width and height (both positive)
    fn size(&self) -> Vec2;

    /// Reject maps whose viewport has no area
    fn check_size(&self) -> Result<(), ConfigError> {
        let size = self.size();
        for (what, value) in [("width", size.x), ("height", size.y)] {
            ensure_finite("viewport dimension", value)?;
            if value <= 0.0 {
                return Err(ConfigError::InvalidViewport { what, value });
            }
        }
        Ok(())
    }
}

/// Orthographic camera looking at `center`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// World-space point shown at the middle of the viewport
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    /// Viewport units per world unit
    pub pixels_per_unit: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
            pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
        }
    }
}

impl Viewport {
    pub fn new(center: Vec2, width: f32, height: f32, pixels_per_unit: f32) -> Self {
        Self {
            center,
            width,
            height,
            pixels_per_unit,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.center.is_finite() {
            return Err(ConfigError::NonFinite("viewport center"));
        }
        for (what, value) in [
            ("width", self.width),
            ("height", self.height),
            ("scale", self.pixels_per_unit),
        ] {
            ensure_finite("viewport dimension", value)?;
            if value <= 0.0 {
                return Err(ConfigError::InvalidViewport { what, value });
            }
        }
        Ok(())
    }

    /// World-space extent covered by the viewport
    pub fn world_size(&self) -> Vec2 {
        self.size() / self.pixels_per_unit
    }
}

impl CoordinateMap for Viewport {
    #[inline]
    fn world_to_viewport(&self, world: Vec2) -> Vec2 {
        (world - self.center) * self.pixels_per_unit + self.size() * 0.5
    }

    #[inline]
    fn viewport_to_world(&self, viewport: Vec2) -> Vec2 {
        (viewport - self.size() * 0.5) / self.pixels_per_unit + self.center
    }

    #[inline]
    fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Horizontal edge a mover bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalEdge {
    Bottom,
    Top,
}

/// What boundary resolution did to a mover this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryOutcome {
    /// Edge bounced off, if any
    pub vertical: Option<VerticalEdge>,
    /// Exited right and reappeared at the left edge
    pub wrapped: bool,
}

impl BoundaryOutcome {
    pub fn bounced(&self) -> bool {
        self.vertical.is_some()
    }
}

/// Keep a mover inside the viewport.
///
/// Bottom/top: snap onto the edge and reflect the y velocity, losing energy
/// by `elasticity`. Right: reappear at the left edge at a random height with
/// velocity untouched. The left edge has no exit behaviour.
pub fn resolve_boundaries<M, R>(
    position: &mut Vec2,
    velocity: &mut Vec2,
    elasticity: f32,
    map: &M,
    rng: &mut R,
) -> BoundaryOutcome
where
    M: CoordinateMap + ?Sized,
    R: Rng + ?Sized,
{
    let mut outcome = BoundaryOutcome::default();
    let size = map.size();

    let screen = map.world_to_viewport(*position);
    if screen.y < 0.0 {
        *position = map.viewport_to_world(Vec2::new(screen.x, 0.0));
        velocity.y = -velocity.y * elasticity;
        outcome.vertical = Some(VerticalEdge::Bottom);
    } else if screen.y > size.y {
        *position = map.viewport_to_world(Vec2::new(screen.x, size.y));
        velocity.y = -velocity.y * elasticity;
        outcome.vertical = Some(VerticalEdge::Top);
    }

    // Re-map after the vertical fix, stale coordinates sink movers into corners
    let screen = map.world_to_viewport(*position);
    if screen.x > size.x {
        let y = rng.random_range(0.0..size.y);
        *position = map.viewport_to_world(Vec2::new(0.0, y));
        outcome.wrapped = true;
    }

    outcome
}
