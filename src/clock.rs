//! Tick clock
//!
//! Turns variable frame times into a whole number of fixed-`dt` ticks.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame time accepted in one call (seconds)
const MAX_FRAME_TIME: f32 = 0.1;

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// The `dt` handed to every tick
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time carried over to the next frame
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Add a frame's elapsed time and return how many ticks to run now.
    ///
    /// Never returns more than `max_substeps`; whatever is left after that is
    /// dropped so a slow frame cannot snowball.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt.min(MAX_FRAME_TIME);
        }

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }

        if substeps == self.max_substeps && self.accumulator >= self.step {
            log::debug!("Dropping {:.4}s of simulation time", self.accumulator);
            self.accumulator = 0.0;
        }
        substeps
    }
}
