//! Grid Snake - a real-time, single-player snake game
//!
//! This library provides:
//! - Core game logic and the controller state machine (game module)
//! - Keyboard input mapping (input module)
//! - Terminal rendering with ratatui (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
