//! Simulation state
//!
//! Owns the movers and the environmental force; shares the obstacle list
//! read-only with whoever placed it.

use std::sync::Arc;

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::{CoordinateMap, Viewport};
use super::mover::Mover;
use super::obstacle::Obstacle;
use super::spawn::Placement;
use super::tick::{TickStats, tick};
use crate::error::ConfigError;
use crate::settings::SimSettings;

/// Lifecycle phase. There is no terminal phase; the driver simply stops
/// calling [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// Spawned, no tick has run yet
    Init,
    /// At least one tick has run
    Running,
}

/// RNG stream used for right-edge wrap heights
const WRAP_STREAM: u64 = 1;

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64, stream: u64) -> Self {
        Self { seed, stream }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Complete simulation state (deterministic for a given seed and dt sequence)
#[derive(Debug, Clone)]
pub struct Simulation<M: CoordinateMap = Viewport> {
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) phase: SimPhase,
    pub(crate) time_ticks: u64,
    pub(crate) environmental_force: Vec2,
    pub(crate) lateral_margin: f32,
    /// Fixed after spawn, iterated in index order
    pub(crate) movers: Vec<Mover>,
    pub(crate) obstacles: Arc<[Obstacle]>,
    pub(crate) map: M,
}

impl Simulation<Viewport> {
    /// Init using the viewport and obstacle list from `settings`
    pub fn from_settings(
        settings: &SimSettings,
        placement: &mut dyn Placement,
    ) -> Result<Self, ConfigError> {
        Self::init(
            settings,
            settings.obstacles.clone(),
            placement,
            settings.viewport,
        )
    }
}

impl<M: CoordinateMap> Simulation<M> {
    /// Validate parameters, spawn the movers and accept the obstacle set.
    pub fn init(
        settings: &SimSettings,
        obstacles: impl Into<Arc<[Obstacle]>>,
        placement: &mut dyn Placement,
        map: M,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        map.check_size()?;
        let obstacles: Arc<[Obstacle]> = obstacles.into();
        for obstacle in obstacles.iter() {
            obstacle.validate()?;
        }

        let size = map.size();
        let mut outside = 0usize;
        let movers: Vec<Mover> = (0..settings.mover_count)
            .map(|i| {
                let pos = placement.place(i, &map);
                let screen = map.world_to_viewport(pos);
                if screen.x < 0.0 || screen.x > size.x || screen.y < 0.0 || screen.y > size.y {
                    outside += 1;
                }
                Mover::new(pos, &settings.mover)
            })
            .collect();

        if outside > 0 {
            log::warn!("{} movers spawned outside the viewport", outside);
        }
        log::info!(
            "Simulation initialized: {} movers, {} obstacles, seed {}",
            movers.len(),
            obstacles.len(),
            settings.seed
        );

        Ok(Self {
            seed: settings.seed,
            rng: RngState::new(settings.seed, WRAP_STREAM).to_rng(),
            phase: SimPhase::Init,
            time_ticks: 0,
            environmental_force: settings.environmental_force,
            lateral_margin: settings.lateral_margin,
            movers,
            obstacles,
            map,
        })
    }

    /// Advance by one tick of length `dt`
    pub fn step(&mut self, dt: f32) -> TickStats {
        if !(dt.is_finite() && dt > 0.0) {
            log::warn!("Ignoring tick with invalid dt {}", dt);
            return TickStats::default();
        }
        self.phase = SimPhase::Running;
        tick(self, dt)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Completed ticks
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn environmental_force(&self) -> Vec2 {
        self.environmental_force
    }

    pub fn lateral_margin(&self) -> f32 {
        self.lateral_margin
    }

    pub fn movers(&self) -> &[Mover] {
        &self.movers
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Another handle to the shared obstacle list
    pub fn shared_obstacles(&self) -> Arc<[Obstacle]> {
        Arc::clone(&self.obstacles)
    }

    pub fn map(&self) -> &M {
        &self.map
    }
}
