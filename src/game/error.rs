//! Errors raised while building or configuring a game.
//!
//! Gameplay itself never fails: collisions and a full board are reported
//! as game events, not as errors.

use std::path::PathBuf;

use thiserror::Error;

use super::state::Cell;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("cell size must be greater than zero")]
    ZeroCellSize,

    #[error("board of {width}x{height}px holds no {cell_size}px cells")]
    EmptyBoard {
        width: u32,
        height: u32,
        cell_size: u32,
    },

    #[error("snake must have at least one cell")]
    EmptySnake,

    #[error("snake cell ({}, {}) lies outside the board", .0.x, .0.y)]
    SnakeOutOfBounds(Cell),

    #[error("snake cell ({}, {}) appears more than once", .0.x, .0.y)]
    OverlappingSnake(Cell),

    #[error("initial direction points back into the snake's body")]
    ReversedStart,

    #[error("snake covers the whole board, no room for food")]
    NoRoomForFood,

    #[error("tick interval floor must be positive and not above the initial interval ({initial_ms}ms < {floor_ms}ms)")]
    InvalidInterval { initial_ms: u64, floor_ms: u64 },

    #[error("unknown direction token '{0}'")]
    UnknownDirection(String),

    #[error("failed to read config file {path}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] serde_json::Error),
}
