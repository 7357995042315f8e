use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameCommand(Command),
    Quit,
    None,
}

impl From<Direction> for KeyAction {
    fn from(direction: Direction) -> Self {
        KeyAction::GameCommand(Command::Turn(direction))
    }
}

/// Translates keys and textual tokens into game commands
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => Direction::Up.into(),
            KeyCode::Down => Direction::Down.into(),
            KeyCode::Left => Direction::Left.into(),
            KeyCode::Right => Direction::Right.into(),

            KeyCode::Enter => KeyAction::GameCommand(Command::Start),
            KeyCode::Esc => KeyAction::Quit,

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Direction::Up.into(),
                's' => Direction::Down.into(),
                'a' => Direction::Left.into(),
                'd' => Direction::Right.into(),
                ' ' => KeyAction::GameCommand(Command::Start),
                'n' | 'r' => KeyAction::GameCommand(Command::Reset),
                'x' => KeyAction::GameCommand(Command::Stop),
                'q' => KeyAction::Quit,
                _ => KeyAction::None,
            },

            _ => KeyAction::None,
        }
    }

    /// Map a textual intent ("up", "start", "reset", ...) to an action.
    /// Unrecognized tokens map to `KeyAction::None`.
    pub fn handle_token(&self, token: &str) -> KeyAction {
        if let Ok(direction) = token.parse::<Direction>() {
            return direction.into();
        }

        match token.trim().to_ascii_lowercase().as_str() {
            "start" => KeyAction::GameCommand(Command::Start),
            "stop" => KeyAction::GameCommand(Command::Stop),
            "reset" | "new" => KeyAction::GameCommand(Command::Reset),
            "quit" => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
