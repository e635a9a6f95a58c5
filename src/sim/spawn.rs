//! Initial placement of movers and obstacles

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bounds::CoordinateMap;
use super::obstacle::Obstacle;

/// Supplies initial mover positions at `Init`.
pub trait Placement {
    /// World-space position for the mover with the given spawn index
    fn place(&mut self, index: usize, map: &dyn CoordinateMap) -> Vec2;
}

/// Uniformly random positions across the viewport
#[derive(Debug, Clone)]
pub struct RandomPlacement {
    rng: Pcg32,
}

impl RandomPlacement {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Placement for RandomPlacement {
    fn place(&mut self, _index: usize, map: &dyn CoordinateMap) -> Vec2 {
        let size = map.size();
        let screen = Vec2::new(
            self.rng.random_range(0.0..size.x),
            self.rng.random_range(0.0..size.y),
        );
        map.viewport_to_world(screen)
    }
}

/// Fixed list of positions, cycled if shorter than the population
#[derive(Debug, Clone)]
pub struct FixedPlacement {
    positions: Vec<Vec2>,
}

impl FixedPlacement {
    pub fn new(positions: Vec<Vec2>) -> Self {
        Self { positions }
    }
}

impl Placement for FixedPlacement {
    fn place(&mut self, index: usize, _map: &dyn CoordinateMap) -> Vec2 {
        if self.positions.is_empty() {
            return Vec2::ZERO;
        }
        self.positions[index % self.positions.len()]
    }
}

/// Scatter `count` obstacles inside the viewport, keeping them clear of the
/// left fifth so freshly wrapped movers have room to react.
pub fn scatter_obstacles(
    seed: u64,
    count: usize,
    radius_range: (f32, f32),
    map: &dyn CoordinateMap,
) -> Vec<Obstacle> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let size = map.size();
    let (min_r, max_r) = radius_range;

    (0..count)
        .map(|_| {
            let screen = Vec2::new(
                rng.random_range(size.x * 0.2..size.x),
                rng.random_range(0.0..size.y),
            );
            let radius = if max_r > min_r {
                rng.random_range(min_r..max_r)
            } else {
                min_r
            };
            Obstacle::new(map.viewport_to_world(screen), radius)
        })
        .collect()
}
