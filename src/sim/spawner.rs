//! Timed sprite spawning
//!
//! The scheduler decides *when* the next sprite appears and *what* it is.
//! Instead of sleeping, it keeps a "next spawn due" timestamp on the session
//! clock; the frame tick polls it. Since the session clock stands still while
//! paused, a pending wait is simply resumed on unpause.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::diagnostics::{ConfigIssue, Diagnostics};
use super::variant::{ObjectVariant, VariantKind};
use crate::tuning::SpawnTuning;

/// Scheduler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerPhase {
    /// Created, level not started yet
    Idle,
    /// Spawning on a cadence
    Scheduling,
    /// Halted for good (session ended)
    Stopped,
}

/// How the next sprite kind is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnPattern {
    /// Independent draw per spawn
    Random { harmful_chance: f32 },
    /// Strict alternation, starting with `first`
    Alternating { first: VariantKind },
}

impl Default for SpawnPattern {
    fn default() -> Self {
        SpawnPattern::Random {
            harmful_chance: 0.5,
        }
    }
}

/// Spawn cadence driver for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    phase: SchedulerPhase,
    pattern: SpawnPattern,
    min_interval: f32,
    max_interval: f32,
    beneficial_variants: u8,
    harmful_variants: u8,
    /// Session clock time of the next spawn
    next_due: f32,
    /// Next kind for alternating patterns
    next_kind: VariantKind,
    spawned: u32,
}

impl SpawnScheduler {
    pub fn new(tuning: &SpawnTuning) -> Self {
        let next_kind = match tuning.pattern {
            SpawnPattern::Alternating { first } => first,
            SpawnPattern::Random { .. } => VariantKind::Harmful,
        };
        Self {
            phase: SchedulerPhase::Idle,
            pattern: tuning.pattern,
            min_interval: tuning.min_interval.min(tuning.max_interval).max(0.0),
            max_interval: tuning.max_interval.max(tuning.min_interval).max(0.0),
            beneficial_variants: tuning.beneficial_variants,
            harmful_variants: tuning.harmful_variants,
            next_due: 0.0,
            next_kind,
            spawned: 0,
        }
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    pub fn is_scheduling(&self) -> bool {
        self.phase == SchedulerPhase::Scheduling
    }

    /// Sprites issued so far
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Session clock time of the next spawn
    pub fn next_due(&self) -> f32 {
        self.next_due
    }

    /// Begin spawning; the first sprite is due immediately
    pub fn start(&mut self, now: f32) {
        if self.phase != SchedulerPhase::Idle {
            return;
        }
        self.phase = SchedulerPhase::Scheduling;
        self.next_due = now;
    }

    /// Halt spawning permanently. Returns true on the first call only.
    pub fn stop(&mut self) -> bool {
        if self.phase == SchedulerPhase::Stopped {
            return false;
        }
        self.phase = SchedulerPhase::Stopped;
        log::debug!("Spawning stopped after {} sprites", self.spawned);
        true
    }

    /// Poll at session time `now`. Returns the variant to spawn if one is due.
    pub fn poll<R: Rng + ?Sized>(
        &mut self,
        now: f32,
        session_active: bool,
        rng: &mut R,
        diagnostics: &mut Diagnostics,
    ) -> Option<ObjectVariant> {
        if self.phase != SchedulerPhase::Scheduling || !session_active {
            return None;
        }
        if now < self.next_due {
            return None;
        }

        let variant = self.pick_variant(rng, diagnostics);
        self.spawned += 1;

        // Arm the next wait
        let wait = rng.random_range(self.min_interval..=self.max_interval);
        self.next_due = now + wait;

        Some(variant)
    }

    fn pick_variant<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        diagnostics: &mut Diagnostics,
    ) -> ObjectVariant {
        let kind = match self.pattern {
            SpawnPattern::Random { harmful_chance } => {
                if rng.random::<f32>() < harmful_chance {
                    VariantKind::Harmful
                } else {
                    VariantKind::Beneficial
                }
            }
            SpawnPattern::Alternating { .. } => {
                let kind = self.next_kind;
                self.next_kind = kind.opposite();
                kind
            }
        };

        let count = match kind {
            VariantKind::Beneficial => self.beneficial_variants,
            VariantKind::Harmful => self.harmful_variants,
        };
        let sub_variant = if count == 0 {
            diagnostics.report(ConfigIssue::EmptyVariantSet(kind));
            0
        } else {
            rng.random_range(0..count)
        };

        ObjectVariant::new(kind, sub_variant)
    }
}
