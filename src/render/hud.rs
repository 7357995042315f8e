//! UI chrome around the board: score label, session stats and the overlay panel.

use crate::game::{Notification, RunOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: String,
    pub text: String,
    /// Whether to advertise the start key
    pub show_start: bool,
}

impl Overlay {
    pub fn idle() -> Self {
        Self {
            title: "Press start".to_string(),
            text: "Use the arrows or WASD to move the snake.".to_string(),
            show_start: true,
        }
    }

    pub fn finished(final_score: u32, outcome: RunOutcome) -> Self {
        let title = match outcome {
            RunOutcome::BoardFull => "Board cleared!",
            RunOutcome::Collision(_) => "Game over",
        };
        Self {
            title: title.to_string(),
            text: format!("Final score: {final_score} points"),
            show_start: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    /// Session stats, filled in by the host
    pub high_score: u32,
    pub elapsed: String,
    pub overlay: Option<Overlay>,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            score: 0,
            high_score: 0,
            elapsed: "00:00".to_string(),
            overlay: Some(Overlay::idle()),
        }
    }

    /// Update the chrome from a controller notification
    pub fn apply(&mut self, notification: Notification) {
        match notification {
            Notification::Started => self.overlay = None,
            Notification::Idle => self.overlay = Some(Overlay::idle()),
            Notification::ScoreChanged(score) => self.score = score,
            Notification::GameOver {
                final_score,
                outcome,
            } => {
                self.score = final_score;
                self.overlay = Some(Overlay::finished(final_score, outcome));
            }
        }
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}
