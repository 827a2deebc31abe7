//! Score and countdown state machine for one level attempt

use serde::{Deserialize, Serialize};

/// Current state of a level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Timer running, clicks count
    Active,
    /// Timer and spawning frozen
    Paused,
    /// Target reached (terminal)
    Complete,
    /// Time ran out (terminal)
    Failed,
}

impl SessionState {
    /// Complete or Failed
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Complete | SessionState::Failed)
    }
}

/// Score, target and countdown for a level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSession {
    level: u32,
    target: u32,
    time_limit: f32,
    score: u32,
    time_remaining: f32,
    state: SessionState,
}

impl ScoringSession {
    pub fn new(level: u32, target: u32, time_limit: f32) -> Self {
        let time_limit = time_limit.max(0.0);
        Self {
            level,
            target,
            time_limit,
            score: 0,
            time_remaining: time_limit,
            state: SessionState::Active,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn time_limit(&self) -> f32 {
        self.time_limit
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Apply a click's score delta (clamped at zero).
    /// Returns `Some(Complete)` on the call that reaches the target.
    pub fn add_points(&mut self, delta: i32) -> Option<SessionState> {
        if self.state != SessionState::Active {
            return None;
        }

        self.score = if delta >= 0 {
            self.score.saturating_add(delta.unsigned_abs())
        } else {
            self.score.saturating_sub(delta.unsigned_abs())
        };

        if self.score >= self.target {
            self.state = SessionState::Complete;
            log::info!(
                "Level {} complete: {}/{} with {:.1}s left",
                self.level,
                self.score,
                self.target,
                self.time_remaining
            );
            return Some(SessionState::Complete);
        }
        None
    }

    /// Advance the countdown. Returns `Some(Failed)` on the tick that runs out.
    pub fn tick(&mut self, dt: f32) -> Option<SessionState> {
        if self.state != SessionState::Active {
            return None;
        }

        self.time_remaining = (self.time_remaining - dt.max(0.0)).max(0.0);
        if self.time_remaining <= 0.0 {
            self.state = SessionState::Failed;
            log::info!(
                "Level {} failed: time up at {}/{}",
                self.level,
                self.score,
                self.target
            );
            return Some(SessionState::Failed);
        }
        None
    }

    /// Active -> Paused. Returns true if the state changed.
    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Active {
            return false;
        }
        self.state = SessionState::Paused;
        true
    }

    /// Paused -> Active. Returns true if the state changed.
    pub fn resume(&mut self) -> bool {
        if self.state != SessionState::Paused {
            return false;
        }
        self.state = SessionState::Active;
        true
    }
}
