use std::time::{Duration, Instant};

/// Statistics for the current session. Nothing is persisted.
pub struct GameMetrics {
    run_started: Option<Instant>,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub runs_finished: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            run_started: None,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            runs_finished: 0,
        }
    }

    /// Refresh the elapsed time of a run in progress
    pub fn update(&mut self) {
        if let Some(started) = self.run_started {
            self.elapsed_time = started.elapsed();
        }
    }

    pub fn on_run_start(&mut self) {
        self.run_started = Some(Instant::now());
        self.elapsed_time = Duration::ZERO;
    }

    /// Back to idle without finishing the run
    pub fn on_reset(&mut self) {
        self.run_started = None;
        self.elapsed_time = Duration::ZERO;
    }

    /// Freeze the clock and record the score
    pub fn on_run_end(&mut self, final_score: u32) {
        self.update();
        self.run_started = None;
        self.runs_finished += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn is_timing(&self) -> bool {
        self.run_started.is_some()
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
