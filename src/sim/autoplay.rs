//! Idle/demo mode - a simulated player
//!
//! Clicks sprites that are worth points once they have been on screen for a
//! human-ish reaction time. Used by the headless binary and for soak tests.

use glam::Vec2;

use super::lifecycle::ObjectHandle;
use super::placement::Camera;
use super::state::{LevelSession, SessionSnapshot};
use super::tick::{TickInput, tick};
use super::variant::ScoreConvention;
use crate::consts::FRAME_DT;
use crate::persistence::LevelProgressStore;
use crate::progress::UnlockOutcome;
use crate::tuning::Tuning;

/// Seconds a sprite must be visible before the bot clicks it
pub const REACTION_TIME: f32 = 0.4;

/// Simulated player
#[derive(Debug, Clone, Copy)]
pub struct Autoplay {
    convention: ScoreConvention,
    reaction_time: f32,
}

impl Autoplay {
    pub fn new(convention: ScoreConvention) -> Self {
        Self {
            convention,
            reaction_time: REACTION_TIME,
        }
    }

    pub fn with_reaction_time(mut self, reaction_time: f32) -> Self {
        self.reaction_time = reaction_time.max(0.0);
        self
    }

    /// Oldest point-scoring sprite the bot has "seen", if any (one click per frame)
    pub fn choose(&self, session: &LevelSession) -> Option<ObjectHandle> {
        let now = session.clock();
        session
            .live_objects()
            .iter()
            .filter(|o| self.convention.delta(o.variant.kind) > 0)
            .find(|o| now - o.spawned_at >= self.reaction_time)
            .map(|o| o.handle)
    }
}

/// Outcome of an unattended level run
#[derive(Debug, Clone, Copy)]
pub struct AutoplayReport {
    pub snapshot: SessionSnapshot,
    pub unlock: Option<UnlockOutcome>,
    pub frames: u32,
}

/// Play one level to completion or failure
pub fn run_level(
    level: u32,
    tuning: &Tuning,
    seed: u64,
    store: Box<dyn LevelProgressStore>,
) -> (AutoplayReport, Box<dyn LevelProgressStore>) {
    let mut session = LevelSession::new(level, tuning, seed, store);
    let bot = Autoplay::new(tuning.score);
    let mut input = TickInput {
        camera: Some(Camera::new(Vec2::ZERO, 5.0, 16.0 / 9.0)),
        ..Default::default()
    };

    // Hard stop well past the level's time budget
    let max_frames = ((session.session().time_limit() + 5.0) / FRAME_DT) as u32;
    let mut frames = 0;
    while frames < max_frames && !session.state().is_terminal() {
        input.interactions.clear();
        input.interactions.extend(bot.choose(&session));
        tick(&mut session, &input, FRAME_DT);
        frames += 1;
    }

    let report = AutoplayReport {
        snapshot: session.snapshot(),
        unlock: session.unlock_outcome(),
        frames,
    };
    (report, session.into_store())
}
