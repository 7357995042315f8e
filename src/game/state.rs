use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::error::GameError;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move cell one step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The snake: occupied cells head first, plus the direction currently in effect
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Cell>,
    direction: Direction,
}

impl Snake {
    pub fn new(body: Vec<Cell>, direction: Direction) -> Result<Self, GameError> {
        if body.is_empty() {
            return Err(GameError::EmptySnake);
        }
        Ok(Self { body, direction })
    }

    /// Replace the whole snake. The only check is that the body is non-empty.
    pub fn reset(&mut self, body: Vec<Cell>, direction: Direction) -> Result<(), GameError> {
        *self = Self::new(body, direction)?;
        Ok(())
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Cells head first
    pub fn cells(&self) -> &[Cell] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Where the head would land moving in `direction`; no mutation
    pub fn peek_next_head(&self, direction: Direction) -> Cell {
        self.head().moved_in_direction(direction)
    }

    /// Step one cell along the current direction.
    ///
    /// Without growth the tail cell is dropped, keeping the length constant.
    pub fn advance(&mut self, grow: bool) {
        let new_head = self.peek_next_head(self.direction);
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// True if `cell` is any cell of the snake, tail included
    pub fn collides_with(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Self-collision test for a head about to enter `next`.
    ///
    /// When not growing the tail leaves its cell in the same tick, so entering
    /// the current tail cell is legal.
    pub fn would_collide(&self, next: Cell, grow: bool) -> bool {
        let blocking = if grow {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };
        blocking.contains(&next)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake ran into itself
    SelfCollision,
}

/// Lifecycle of the game controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Idle,
    Running,
    GameOver,
}
