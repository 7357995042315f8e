//! Terminal rendering with ratatui

pub mod hud;
pub mod renderer;

pub use hud::{Hud, Overlay};
pub use renderer::TerminalRenderer;
