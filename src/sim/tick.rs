//! Fixed timestep simulation tick
//!
//! Per mover, in spawn order: environmental force, obstacle avoidance, then
//! integration. Movers never interact, so running each mover's full
//! apply-then-integrate sequence before moving on is equivalent to applying
//! all forces first and integrating afterwards.

use super::bounds::CoordinateMap;
use super::mover::Mover;
use super::obstacle::Obstacle;
use super::state::Simulation;
use crate::consts::BRAKING_FACTOR;
use crate::perpendicular_left;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Movers that steered around an obstacle
    pub avoiding: usize,
    /// Movers that bounced off the top or bottom edge
    pub bounced: usize,
    /// Movers that wrapped from the right edge to the left
    pub wrapped: usize,
}

/// Advance the simulation by one tick of length `dt`
pub fn tick<M: CoordinateMap>(sim: &mut Simulation<M>, dt: f32) -> TickStats {
    let mut stats = TickStats::default();
    let force = sim.environmental_force;
    let margin = sim.lateral_margin;

    for mover in sim.movers.iter_mut() {
        mover.apply_force(force, dt);
        if avoid_obstacles(mover, &sim.obstacles, margin, dt).is_some() {
            stats.avoiding += 1;
        }

        let outcome = mover.integrate(dt, &sim.map, &mut sim.rng);
        if outcome.bounced() {
            stats.bounced += 1;
        }
        if outcome.wrapped {
            stats.wrapped += 1;
        }
    }

    sim.time_ticks += 1;
    log::trace!(
        "tick {}: avoiding={} bounced={} wrapped={}",
        sim.time_ticks,
        stats.avoiding,
        stats.bounced,
        stats.wrapped
    );
    stats
}

/// Index of the nearest obstacle that is both ahead of the mover and on its
/// path. Ties keep the first in list order.
pub fn closest_dangerous(mover: &Mover, obstacles: &[Obstacle], margin: f32) -> Option<usize> {
    let mut closest = None;
    let mut min_dist = f32::MAX;

    for (i, obstacle) in obstacles.iter().enumerate() {
        if obstacle.is_ahead(mover) && obstacle.is_dangerous(mover, margin) {
            let dist = obstacle.vector_to(mover).length_squared();
            if dist < min_dist {
                min_dist = dist;
                closest = Some(i);
            }
        }
    }

    closest
}

/// Steer away from the closest dangerous obstacle and brake.
///
/// The lateral push goes to whichever side the obstacle is not on; braking
/// opposes the current velocity. Returns the index of the obstacle avoided.
pub fn avoid_obstacles(
    mover: &mut Mover,
    obstacles: &[Obstacle],
    margin: f32,
    dt: f32,
) -> Option<usize> {
    let index = closest_dangerous(mover, obstacles, margin)?;
    let obstacle = &obstacles[index];

    let left = perpendicular_left(mover.velocity().normalize_or_zero());
    let side = left.dot(obstacle.vector_to(mover));
    let direction = if side < 0.0 { 1.0 } else { -1.0 };

    mover.apply_force(left * mover.speed_limit() * direction, dt);
    mover.apply_force(mover.velocity() * -BRAKING_FACTOR, dt);

    log::trace!(
        "mover at {:?} avoiding obstacle {} (side {:.3})",
        mover.position(),
        index,
        side
    );
    Some(index)
}
