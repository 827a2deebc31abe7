//! Unlocked-level watermark
//!
//! Level select only lets the player start levels up to the watermark.
//! Completing the newest unlocked level (or a later one) raises it; replays of
//! older levels leave it alone.

use crate::persistence::LevelProgressStore;

/// What completing a level did to the watermark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockOutcome {
    pub completed_level: u32,
    /// Watermark before completion
    pub previous: u32,
    /// Watermark after completion
    pub current: u32,
    pub advanced: bool,
    /// The completed level was the last one (play the ending)
    pub game_finished: bool,
}

/// Watermark logic over a persistent store
pub struct LevelProgress {
    store: Box<dyn LevelProgressStore>,
    final_level: u32,
}

impl std::fmt::Debug for LevelProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelProgress")
            .field("unlocked_level", &self.unlocked_level())
            .field("final_level", &self.final_level)
            .finish()
    }
}

impl LevelProgress {
    pub fn new(store: Box<dyn LevelProgressStore>, final_level: u32) -> Self {
        Self { store, final_level }
    }

    /// Highest level the player may start
    pub fn unlocked_level(&self) -> u32 {
        self.store.unlocked_level()
    }

    /// Level-select gating
    pub fn is_unlocked(&self, level: u32) -> bool {
        level >= 1 && level <= self.unlocked_level()
    }

    /// Playable levels among `1..=max_level`
    pub fn unlocked_levels(&self, max_level: u32) -> std::ops::RangeInclusive<u32> {
        1..=self.unlocked_level().min(max_level)
    }

    /// Record a cleared level, advancing the watermark if needed
    pub fn complete_level(&mut self, level: u32) -> UnlockOutcome {
        let previous = self.store.unlocked_level();
        let advanced = level >= previous;
        // The last representable level unlocks nothing further
        let current = if advanced {
            level.saturating_add(1)
        } else {
            previous
        };

        if advanced {
            if let Err(e) = self.store.set_unlocked_level(current) {
                log::error!("Failed to save progress: {}", e);
            }
            log::info!("Unlocked level {} (was {})", current, previous);
        }

        UnlockOutcome {
            completed_level: level,
            previous,
            current,
            advanced,
            game_finished: level == self.final_level,
        }
    }

    /// Hand the store back (e.g. to start the next session)
    pub fn into_store(self) -> Box<dyn LevelProgressStore> {
        self.store
    }
}
