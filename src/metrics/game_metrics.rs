use std::time::{Duration, Instant};

use crate::game::{ResetReason, StepResult};

/// Per-session counters shown in the header
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Longest snake seen this session
    pub best_length: usize,
    pub apples_eaten: u32,
    pub self_collisions: u32,
    pub full_boards: u32,
    /// Set while the game is paused; the clock stands still from this instant
    paused_at: Option<Instant>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_length: 1,
            apples_eaten: 0,
            self_collisions: 0,
            full_boards: 0,
            paused_at: None,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = match self.paused_at {
            Some(paused_at) => paused_at.saturating_duration_since(self.start_time),
            None => self.start_time.elapsed(),
        };
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.paused_at = None;
    }

    /// Stop the clock. Pausing twice keeps the first instant.
    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
        }
        self.update();
    }

    /// Restart the clock, leaving the paused span out of the elapsed time
    pub fn resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            self.start_time += paused_at.elapsed();
        }
        self.update();
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Fold one engine step into the counters. `length` is the number of
    /// occupied cells reached before any reset the step triggered.
    pub fn on_step(&mut self, result: &StepResult, length: usize) {
        if result.ate_apple {
            self.apples_eaten += 1;
        }
        self.best_length = self.best_length.max(length);

        match result.reset {
            Some(ResetReason::SelfCollision) => self.self_collisions += 1,
            Some(ResetReason::BoardFull) => self.full_boards += 1,
            None => {}
        }
    }

    pub fn resets(&self) -> u32 {
        self.self_collisions + self.full_boards
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
