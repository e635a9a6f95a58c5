//! Deterministic simulation module
//!
//! All steering and physics logic lives here. This module must be pure and
//! deterministic:
//! - Caller-supplied `dt` only
//! - Seeded RNG only
//! - Stable iteration order (spawn order for movers, list order for obstacles)
//! - No rendering or platform dependencies

pub mod bounds;
pub mod mover;
pub mod obstacle;
pub mod spawn;
pub mod state;
pub mod tick;

pub use bounds::{BoundaryOutcome, CoordinateMap, VerticalEdge, Viewport, resolve_boundaries};
pub use mover::Mover;
pub use obstacle::Obstacle;
pub use spawn::{FixedPlacement, Placement, RandomPlacement, scatter_obstacles};
pub use state::{RngState, SimPhase, Simulation};
pub use tick::{TickStats, avoid_obstacles, closest_dangerous, tick};
