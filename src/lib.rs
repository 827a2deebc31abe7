//! Sprite Clicker - timed "click the right sprite" levels
//!
//! Core modules:
//! - `sim`: Deterministic level simulation (placement, spawning, scoring)
//! - `persistence`: Unlocked-level storage backends
//! - `progress`: Unlocked-level watermark and level-select gating
//! - `tuning`: Data-driven level table and spawn balance

pub mod persistence;
pub mod progress;
pub mod sim;
pub mod tuning;

pub use progress::{LevelProgress, UnlockOutcome};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed frame step used by the headless demo (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Target score for levels missing from the level table
    pub const DEFAULT_TARGET_SCORE: u32 = 20;
    /// Time budget (seconds) for levels missing from the level table
    pub const DEFAULT_TIME_LIMIT: f32 = 60.0;
    /// Last level of the campaign; clearing it rolls the ending
    pub const FINAL_LEVEL: u32 = 5;
    /// Watermark reported when nothing has been stored yet
    pub const FIRST_LEVEL: u32 = 1;

    /// Spawn cadence bounds (seconds)
    pub const DEFAULT_MIN_SPAWN_INTERVAL: f32 = 1.0;
    pub const DEFAULT_MAX_SPAWN_INTERVAL: f32 = 3.0;
    /// How long a sprite stays on screen (seconds)
    pub const DEFAULT_LIFESPAN: f32 = 3.0;
    /// Minimum distance between live sprites (world units)
    pub const DEFAULT_MIN_SEPARATION: f32 = 3.0;
    /// Resample budget before accepting a too-close placement
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;
    /// Default sprite half extents (world units)
    pub const DEFAULT_FOOTPRINT_HALF: f32 = 0.5;
}

/// Whole seconds shown on the countdown (rounded up, never negative)
#[inline]
pub fn display_seconds(time_remaining: f32) -> u32 {
    time_remaining.max(0.0).ceil() as u32
}

/// Parse a level number out of a scene name like `Level3Scene`
pub fn level_from_scene_name(name: &str) -> Option<u32> {
    name.strip_prefix("Level")?
        .strip_suffix("Scene")?
        .parse()
        .ok()
        .filter(|&level| level > 0)
}
