//! Food placement: a uniformly random cell the snake does not occupy.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::grid::Grid;
use super::state::{Cell, Snake};

pub struct FoodSpawner {
    rng: StdRng,
}

impl FoodSpawner {
    /// Spawner seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic spawner, for reproducible runs and tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick a free cell. Returns `None` when the snake fills the whole board.
    pub fn spawn(&mut self, grid: &Grid, snake: &Snake) -> Option<Cell> {
        let free: Vec<Cell> = grid
            .cells()
            .filter(|cell| !snake.collides_with(*cell))
            .collect();

        free.choose(&mut self.rng).copied()
    }
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new()
    }
}
