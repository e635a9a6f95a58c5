//! Steer Sim entry point
//!
//! Loads settings (first argument, optional), spawns the population and runs
//! the fixed timestep loop for a bounded number of frames.

use std::process::ExitCode;

use steer_sim::clock::FixedTimestep;
use steer_sim::renderer::{Frame, LogRenderer, Renderer};
use steer_sim::sim::{RandomPlacement, Simulation, scatter_obstacles};
use steer_sim::{Settings, SettingsError};

/// Frames to run before exiting
const DEMO_FRAMES: u32 = 1200;
/// Simulated display refresh (seconds per frame)
const FRAME_TIME: f32 = 1.0 / 60.0;
/// Obstacles scattered when the settings list none
const DEFAULT_OBSTACLES: usize = 12;

fn load_settings() -> Result<Settings, SettingsError> {
    match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => {
            log::info!("Using default settings");
            Ok(Settings::default())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Steer Sim starting...");

    let mut settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if settings.sim.obstacles.is_empty() {
        settings.sim.obstacles = scatter_obstacles(
            settings.sim.seed,
            DEFAULT_OBSTACLES,
            (0.3, 0.9),
            &settings.sim.viewport,
        );
    }

    let mut placement = RandomPlacement::new(settings.sim.seed);
    let mut sim = match Simulation::from_settings(&settings.sim, &mut placement) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut clock = FixedTimestep::default();
    let mut renderer = LogRenderer::new(settings.presentation, 120);

    for _ in 0..DEMO_FRAMES {
        let substeps = clock.advance(FRAME_TIME);
        for _ in 0..substeps {
            let stats = sim.step(clock.step());
            log::debug!(
                "tick {}: avoiding={} bounced={} wrapped={}",
                sim.time_ticks(),
                stats.avoiding,
                stats.bounced,
                stats.wrapped
            );
        }
        if substeps > 0 {
            renderer.present(&Frame::capture(&sim, renderer.settings()));
        }
    }

    log::info!(
        "Steer Sim finished after {} ticks ({} frames presented)",
        sim.time_ticks(),
        renderer.presented()
    );
    ExitCode::SUCCESS
}
