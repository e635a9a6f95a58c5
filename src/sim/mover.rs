//! Point-mass movers
//!
//! Forces are accumulated with [`Mover::apply_force`] during a tick, then
//! consumed exactly once by [`Mover::integrate`].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::{BoundaryOutcome, CoordinateMap, resolve_boundaries};
use crate::heading_to_orientation;
use crate::settings::MoverParams;

/// An autonomous point mass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    position: Vec2,
    velocity: Vec2,
    /// Velocity change accumulated this tick (reset after integration)
    acceleration: Vec2,
    /// Heading in radians, for presentation
    orientation: f32,
    mass: f32,
    elasticity: f32,
    radius: f32,
    speed_limit: f32,
    friction: f32,
}

impl Mover {
    /// Create a resting mover. `params` are expected to be validated.
    pub fn new(position: Vec2, params: &MoverParams) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            orientation: 0.0,
            mass: params.mass,
            elasticity: params.elasticity,
            radius: params.radius,
            speed_limit: params.speed_limit,
            friction: params.friction,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        if velocity != Vec2::ZERO {
            self.orientation = heading_to_orientation(velocity.normalize());
        }
        self
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Acceleration accumulated so far this tick
    #[inline]
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    #[inline]
    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn elasticity(&self) -> f32 {
        self.elasticity
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn speed_limit(&self) -> f32 {
        self.speed_limit
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Accumulate `force` over a tick of length `dt`.
    ///
    /// Scaling by `dt` on every call keeps the total independent of how the
    /// tick is split: two calls at `dt / 2` add up to one call at `dt`.
    #[inline]
    pub fn apply_force(&mut self, force: Vec2, dt: f32) {
        self.acceleration += force / self.mass * dt;
    }

    /// Kinetic friction opposing the current heading (zero at rest)
    #[inline]
    pub fn friction_force(&self) -> Vec2 {
        self.velocity.normalize_or_zero() * -self.friction
    }

    /// Consume this tick's forces: friction, velocity update, speed clamp,
    /// movement, orientation, boundary resolution, accumulator reset.
    pub fn integrate<M, R>(&mut self, dt: f32, map: &M, rng: &mut R) -> BoundaryOutcome
    where
        M: CoordinateMap + ?Sized,
        R: Rng + ?Sized,
    {
        self.apply_force(self.friction_force(), dt);

        self.velocity += self.acceleration;
        self.velocity = self.velocity.clamp_length_max(self.speed_limit);
        self.position += self.velocity;

        let heading = self.velocity.normalize_or_zero();
        if heading != Vec2::ZERO {
            self.orientation = heading_to_orientation(heading);
        }

        let outcome = resolve_boundaries(
            &mut self.position,
            &mut self.velocity,
            self.elasticity,
            map,
            rng,
        );

        self.acceleration = Vec2::ZERO;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Viewport;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn params() -> MoverParams {
        MoverParams::default()
    }

    #[test]
    fn test_apply_force_scales_by_mass_and_dt() {
        let params = MoverParams {
            mass: 2.0,
            ..params()
        };
        let mut mover = Mover::new(Vec2::ZERO, &params);
        mover.apply_force(Vec2::new(4.0, 0.0), 0.5);
        assert_eq!(mover.acceleration(), Vec2::new(1.0, 0.0));
        mover.apply_force(Vec2::new(0.0, -4.0), 0.25);
        assert_eq!(mover.acceleration(), Vec2::new(1.0, -0.5));
    }

    #[test]
    fn test_integrate_resets_accumulator() {
        let vp = Viewport::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut mover = Mover::new(Vec2::ZERO, &params());
        mover.apply_force(Vec2::new(0.1, 0.0), 1.0);
        mover.integrate(1.0, &vp, &mut rng);
        assert_eq!(mover.acceleration(), Vec2::ZERO);
        assert!(mover.velocity().x > 0.0);
        assert_eq!(mover.position(), mover.velocity());
    }

    #[test]
    fn test_zero_velocity_stays_finite() {
        let vp = Viewport::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut mover = Mover::new(Vec2::new(1.0, 2.0), &params());
        assert_eq!(mover.friction_force(), Vec2::ZERO);
        mover.integrate(1.0 / 60.0, &vp, &mut rng);
        assert_eq!(mover.velocity(), Vec2::ZERO);
        assert_eq!(mover.position(), Vec2::new(1.0, 2.0));
        assert_eq!(mover.orientation(), 0.0);
    }

    #[test]
    fn test_speed_clamped() {
        let vp = Viewport::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut mover = Mover::new(Vec2::ZERO, &params());
        mover.apply_force(Vec2::new(100.0, 100.0), 1.0);
        mover.integrate(1.0, &vp, &mut rng);
        assert!((mover.velocity().length() - 0.125).abs() < 1e-6);
        // Direction preserved
        assert!((mover.velocity().x - mover.velocity().y).abs() < 1e-6);
    }

    #[test]
    fn test_orientation_follows_velocity() {
        let vp = Viewport::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut mover = Mover::new(Vec2::ZERO, &params());
        mover.apply_force(Vec2::new(0.0, 1.0), 0.1);
        mover.integrate(0.1, &vp, &mut rng);
        assert!((mover.orientation() - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_friction_decelerates() {
        let vp = Viewport::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut mover = Mover::new(Vec2::ZERO, &params()).with_velocity(Vec2::new(0.1, 0.0));
        mover.integrate(0.5, &vp, &mut rng);
        // 0.1 - 0.01 * 0.5
        assert!((mover.velocity().x - 0.095).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_loses_energy() {
        let vp = Viewport::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let params = MoverParams {
            friction: 0.0,
            ..params()
        };
        // Bottom edge of the default viewport is y = -5
        let mut mover = Mover::new(Vec2::new(0.0, -4.95), &params).with_velocity(Vec2::new(0.0, -0.1));
        let outcome = mover.integrate(1.0 / 60.0, &vp, &mut rng);
        assert!(outcome.bounced());
        assert!((mover.velocity().y - 0.09).abs() < 1e-6);
        assert!(mover.velocity().y.abs() < 0.1);
    }

    proptest! {
        #[test]
        fn prop_speed_never_exceeds_limit(
            forces in prop::collection::vec((-50.0f32..50.0, -50.0f32..50.0, 0.001f32..1.0), 1..40),
        ) {
            let vp = Viewport::default();
            let mut rng = Pcg32::seed_from_u64(9);
            let mut mover = Mover::new(Vec2::ZERO, &MoverParams::default());
            for (fx, fy, dt) in forces {
                mover.apply_force(Vec2::new(fx, fy), dt);
                mover.integrate(dt, &vp, &mut rng);
                prop_assert!(mover.velocity().length() <= mover.speed_limit() + 1e-5);
            }
        }

        #[test]
        fn prop_friction_magnitude_bounded(vx in -1.0f32..1.0, vy in -1.0f32..1.0, mu in 0.0f32..0.5) {
            let params = MoverParams { friction: mu, ..MoverParams::default() };
            let mover = Mover::new(Vec2::ZERO, &params).with_velocity(Vec2::new(vx, vy));
            prop_assert!(mover.friction_force().length() <= mu + 1e-6);
        }

        #[test]
        fn prop_force_split_across_calls_is_linear(
            fx in -10.0f32..10.0,
            fy in -10.0f32..10.0,
            total_dt in 0.001f32..1.0,
            k in 1u32..16,
        ) {
            let mut whole = Mover::new(Vec2::ZERO, &MoverParams::default());
            whole.apply_force(Vec2::new(fx, fy), total_dt);

            let mut split = Mover::new(Vec2::ZERO, &MoverParams::default());
            for _ in 0..k {
                split.apply_force(Vec2::new(fx, fy), total_dt / k as f32);
            }
            prop_assert!((whole.acceleration() - split.acceleration()).length() < 1e-4);
        }
    }
}
