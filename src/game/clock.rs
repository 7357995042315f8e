//! Tick scheduling model.
//!
//! The clock never sleeps itself. It records the single tick that is due next
//! and hands out an id for it; the host arms a timer for that id and reports
//! back when it fires. Scheduling always replaces the pending tick, so at most
//! one tick is ever in flight and a late timer for a superseded id is refused.

use std::time::Duration;

/// Identifies one scheduled tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickId(u64);

/// A tick waiting to fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTick {
    pub id: TickId,
    pub delay: Duration,
}

#[derive(Debug, Default)]
pub struct GameClock {
    pending: Option<ScheduledTick>,
    next_id: u64,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the next tick after `delay`, cancelling any pending one
    pub fn schedule(&mut self, delay: Duration) -> TickId {
        let id = TickId(self.next_id);
        self.next_id += 1;
        self.pending = Some(ScheduledTick { id, delay });
        id
    }

    /// Drop the pending tick, if any
    pub fn cancel(&mut self) -> Option<TickId> {
        self.pending.take().map(|tick| tick.id)
    }

    pub fn pending(&self) -> Option<ScheduledTick> {
        self.pending
    }

    /// Consume the pending tick if `id` is the one currently scheduled.
    pub fn fire(&mut self, id: TickId) -> bool {
        match self.pending {
            Some(tick) if tick.id == id => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
