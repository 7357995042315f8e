//! Core game logic module for Snake
//!
//! Grid, snake, food placement, tick scheduling and the controller state
//! machine. Nothing here does I/O: drawing goes through the [`Renderer`]
//! trait and the host reads [`Notification`]s back out of the controller.

pub mod action;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod food;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use clock::{GameClock, ScheduledTick, TickId};
pub use config::GameConfig;
pub use controller::{
    BoardView, GameController, Notification, Renderer, RunOutcome, TickOutcome, VISUAL_CYCLE,
};
pub use error::GameError;
pub use food::FoodSpawner;
pub use grid::Grid;
pub use state::{Cell, CollisionType, GameState, Snake};
