use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::error::GameError;
use super::grid::Grid;
use super::state::Cell;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in pixels
    pub board_width: u32,
    /// Board height in pixels
    pub board_height: u32,
    /// Side of one square cell in pixels
    pub cell_size: u32,

    /// Points awarded per food eaten
    pub food_reward: u32,
    /// Delay between ticks at the start of a run
    pub initial_interval_ms: u64,
    /// How much faster each food makes the game
    pub interval_step_ms: u64,
    /// The interval never drops below this
    pub min_interval_ms: u64,

    /// Starting body, head first
    pub initial_snake: Vec<Cell>,
    pub initial_direction: Direction,

    /// Fixed seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 400,
            board_height: 400,
            cell_size: 16,
            food_reward: 10,
            initial_interval_ms: 130,
            interval_step_ms: 4,
            min_interval_ms: 60,
            initial_snake: vec![Cell::new(5, 10), Cell::new(4, 10), Cell::new(3, 10)],
            initial_direction: Direction::Right,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size in pixels
    pub fn new(board_width: u32, board_height: u32) -> Self {
        Self {
            board_width,
            board_height,
            ..Default::default()
        }
    }

    /// Read a JSON config file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let raw = std::fs::read_to_string(path).map_err(|source| GameError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn grid(&self) -> Result<Grid, GameError> {
        Grid::from_pixels(self.board_width, self.board_height, self.cell_size)
    }

    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    pub fn interval_step(&self) -> Duration {
        Duration::from_millis(self.interval_step_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Check that a game can be built from this config, returning its grid
    pub fn validate(&self) -> Result<Grid, GameError> {
        let grid = self.grid()?;

        if self.min_interval_ms == 0 || self.initial_interval_ms < self.min_interval_ms {
            return Err(GameError::InvalidInterval {
                initial_ms: self.initial_interval_ms,
                floor_ms: self.min_interval_ms,
            });
        }

        if self.initial_snake.is_empty() {
            return Err(GameError::EmptySnake);
        }

        let mut seen = HashSet::new();
        for &cell in &self.initial_snake {
            if !grid.contains(cell) {
                return Err(GameError::SnakeOutOfBounds(cell));
            }
            if !seen.insert(cell) {
                return Err(GameError::OverlappingSnake(cell));
            }
        }

        if let [head, neck, ..] = self.initial_snake[..] {
            if head.moved_in_direction(self.initial_direction) == neck {
                return Err(GameError::ReversedStart);
            }
        }

        if self.initial_snake.len() >= grid.area() {
            return Err(GameError::NoRoomForFood);
        }

        Ok(grid)
    }
}
