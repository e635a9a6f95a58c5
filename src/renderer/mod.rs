//! Presentation boundary
//!
//! Renderers only ever see a [`Frame`]: an immutable snapshot of mover poses
//! and obstacle geometry captured after a tick. Debug radii are included only
//! when the renderer's [`PresentationSettings`] ask for them.

use glam::Vec2;

use crate::orientation_to_heading;
use crate::settings::PresentationSettings;
use crate::sim::{CoordinateMap, Simulation};

/// Pose of a single mover
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoverView {
    pub position: Vec2,
    /// Heading in radians
    pub orientation: f32,
    /// Only present in debug frames
    pub radius: Option<f32>,
}

impl MoverView {
    /// Unit vector the mover is facing
    pub fn heading(&self) -> Vec2 {
        orientation_to_heading(self.orientation)
    }
}

/// Obstacle as shown on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleView {
    pub position: Vec2,
    /// Only present in debug frames
    pub radius: Option<f32>,
}

/// Everything a renderer needs to draw one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub movers: Vec<MoverView>,
    pub obstacles: Vec<ObstacleView>,
}

impl Frame {
    pub fn capture<M: CoordinateMap>(sim: &Simulation<M>, settings: &PresentationSettings) -> Self {
        let debug = settings.show_debug;
        Self {
            tick: sim.time_ticks(),
            movers: sim
                .movers()
                .iter()
                .map(|m| MoverView {
                    position: m.position(),
                    orientation: m.orientation(),
                    radius: debug.then_some(m.radius()),
                })
                .collect(),
            obstacles: sim
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    position: o.position,
                    radius: debug.then_some(o.radius),
                })
                .collect(),
        }
    }

    /// Mean mover position (zero for an empty frame)
    pub fn centroid(&self) -> Vec2 {
        if self.movers.is_empty() {
            return Vec2::ZERO;
        }
        let sum: Vec2 = self.movers.iter().map(|m| m.position).sum();
        sum / self.movers.len() as f32
    }

    /// Average facing direction, unnormalized (length near 1 when the
    /// population is aligned, near 0 when headings cancel out)
    pub fn mean_heading(&self) -> Vec2 {
        if self.movers.is_empty() {
            return Vec2::ZERO;
        }
        let sum: Vec2 = self.movers.iter().map(MoverView::heading).sum();
        sum / self.movers.len() as f32
    }
}

/// Read-only consumer of simulation frames
pub trait Renderer {
    fn present(&mut self, frame: &Frame);
}

/// Renderer that reports frames through the log
#[derive(Debug, Clone)]
pub struct LogRenderer {
    settings: PresentationSettings,
    /// Log every n-th frame
    every: u64,
    presented: u64,
}

impl LogRenderer {
    pub fn new(settings: PresentationSettings, every: u64) -> Self {
        Self {
            settings,
            every: every.max(1),
            presented: 0,
        }
    }

    pub fn settings(&self) -> &PresentationSettings {
        &self.settings
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Renderer for LogRenderer {
    fn present(&mut self, frame: &Frame) {
        self.presented += 1;
        if frame.tick % self.every != 0 {
            return;
        }

        let centroid = frame.centroid();
        let heading = frame.mean_heading();
        log::info!(
            "tick {}: {} movers, centroid ({:.2}, {:.2}), mean heading ({:.2}, {:.2})",
            frame.tick,
            frame.movers.len(),
            centroid.x,
            centroid.y,
            heading.x,
            heading.y
        );
        if self.settings.show_debug {
            for (i, o) in frame.obstacles.iter().enumerate() {
                if let Some(r) = o.radius {
                    log::debug!("  obstacle {} at ({:.2}, {:.2}) r={:.2}", i, o.position.x, o.position.y, r);
                }
            }
        }
    }
}
