//! Per-level session context
//!
//! A `LevelSession` is created when a level starts and dropped when the player
//! leaves it. It owns everything the level needs (score/timer state machine,
//! spawn scheduler, live sprites, RNG, save store), so nothing is global and
//! several sessions can run side by side.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::diagnostics::{ConfigIssue, Diagnostics};
use super::lifecycle::{LiveObject, ObjectHandle, ObjectLifecycle};
use super::placement::{self, Camera};
use super::session::{ScoringSession, SessionState};
use super::spawner::SpawnScheduler;
use super::variant::ObjectVariant;
use crate::persistence::LevelProgressStore;
use crate::progress::{LevelProgress, UnlockOutcome};
use crate::tuning::{SpawnTuning, Tuning};

/// Notifications for UI, audio and effects
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Spawned {
        handle: ObjectHandle,
        variant: ObjectVariant,
        position: Vec2,
    },
    /// Lifespan ran out
    Expired { handle: ObjectHandle },
    /// Sprite clicked and removed
    Interacted { handle: ObjectHandle, delta: i32 },
    ScoreChanged { score: u32, target: u32 },
    Paused,
    Resumed,
    LevelComplete {
        level: u32,
        score: u32,
        unlock: UnlockOutcome,
    },
    LevelFailed { level: u32, score: u32 },
}

/// Read-only view for the HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSnapshot {
    pub level: u32,
    pub score: u32,
    pub target: u32,
    pub time_remaining: f32,
    /// Countdown as shown on screen (rounded up)
    pub seconds_display: u32,
    pub state: SessionState,
    pub live_objects: usize,
}

/// Everything belonging to one attempt at a level
pub struct LevelSession {
    seed: u64,
    rng: Pcg32,
    tuning: Tuning,
    spawn: SpawnTuning,
    session: ScoringSession,
    scheduler: SpawnScheduler,
    lifecycle: ObjectLifecycle,
    progress: LevelProgress,
    diagnostics: Diagnostics,
    camera: Option<Camera>,
    /// Session time (seconds); stands still while paused
    clock: f32,
    events: Vec<GameEvent>,
    unlock: Option<UnlockOutcome>,
}

impl std::fmt::Debug for LevelSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelSession")
            .field("seed", &self.seed)
            .field("session", &self.session)
            .field("scheduler", &self.scheduler.phase())
            .field("live_objects", &self.lifecycle.len())
            .field("clock", &self.clock)
            .finish()
    }
}

impl LevelSession {
    /// Start a level. The store supplies (and receives) the unlocked-level watermark.
    pub fn new(
        level: u32,
        tuning: &Tuning,
        seed: u64,
        store: Box<dyn LevelProgressStore>,
    ) -> Self {
        let mut diagnostics = Diagnostics::new();

        let resolved = tuning.levels.resolve(level);
        if !resolved.recognized {
            diagnostics.report(ConfigIssue::UnknownLevel(level));
        }
        let spec = resolved.spec;
        let spawn = spec.spawn.sanitized(&mut diagnostics);

        let progress = LevelProgress::new(store, tuning.final_level);
        if !progress.is_unlocked(level) {
            log::warn!(
                "Starting level {} which is not unlocked yet (unlocked: {})",
                level,
                progress.unlocked_level()
            );
        }

        let session = ScoringSession::new(level, spec.target_score, spec.time_limit);
        let mut scheduler = SpawnScheduler::new(&spawn);
        scheduler.start(0.0);
        let lifecycle = ObjectLifecycle::new(spawn.lifespan, tuning.score);

        log::info!(
            "Level {} started: target {}, {}s, seed {}",
            level,
            spec.target_score,
            spec.time_limit,
            seed
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning: tuning.clone(),
            spawn,
            session,
            scheduler,
            lifecycle,
            progress,
            diagnostics,
            camera: None,
            clock: 0.0,
            events: Vec::new(),
            unlock: None,
        }
    }

    /// Start the level a scene like `Level3Scene` stands for.
    ///
    /// Scenes that are not levels (menus, level select) give the store back.
    pub fn for_scene(
        scene: &str,
        tuning: &Tuning,
        seed: u64,
        store: Box<dyn LevelProgressStore>,
    ) -> Result<Self, Box<dyn LevelProgressStore>> {
        match crate::level_from_scene_name(scene) {
            Some(level) => Ok(Self::new(level, tuning, seed, store)),
            None => {
                log::warn!("Scene {:?} is not a level", scene);
                Err(store)
            }
        }
    }

    /// Restart the same level with a fresh session; progress carries over
    pub fn retry(self) -> Self {
        let level = self.session.level();
        let seed = self.seed.wrapping_add(1);
        let tuning = self.tuning;
        let camera = self.camera;
        let mut session = Self::new(level, &tuning, seed, self.progress.into_store());
        session.camera = camera;
        session
    }

    /// End the session, returning the save store
    pub fn into_store(self) -> Box<dyn LevelProgressStore> {
        self.progress.into_store()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn level(&self) -> u32 {
        self.session.level()
    }

    pub fn session(&self) -> &ScoringSession {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub fn lifecycle(&self) -> &ObjectLifecycle {
        &self.lifecycle
    }

    /// Sprites currently on screen
    pub fn live_objects(&self) -> &[LiveObject] {
        self.lifecycle.live()
    }

    pub fn progress(&self) -> &LevelProgress {
        &self.progress
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Effective (sanitized) spawn settings
    pub fn spawn_tuning(&self) -> &SpawnTuning {
        &self.spawn
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Watermark change, once the level is complete
    pub fn unlock_outcome(&self) -> Option<UnlockOutcome> {
        self.unlock
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            level: self.session.level(),
            score: self.session.score(),
            target: self.session.target(),
            time_remaining: self.session.time_remaining(),
            seconds_display: crate::display_seconds(self.session.time_remaining()),
            state: self.session.state(),
            live_objects: self.lifecycle.len(),
        }
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
    }

    pub fn pause(&mut self) -> bool {
        let changed = self.session.pause();
        if changed {
            self.events.push(GameEvent::Paused);
        }
        changed
    }

    pub fn resume(&mut self) -> bool {
        let changed = self.session.resume();
        if changed {
            self.events.push(GameEvent::Resumed);
        }
        changed
    }

    /// Player clicked a sprite. Ignored unless the level is running.
    /// Returns the applied score delta.
    pub fn interact(&mut self, handle: ObjectHandle) -> Option<i32> {
        if !self.session.is_active() {
            return None;
        }
        let delta = self.lifecycle.on_interact(handle)?;
        self.events.push(GameEvent::Interacted { handle, delta });

        let transition = self.session.add_points(delta);
        self.events.push(GameEvent::ScoreChanged {
            score: self.session.score(),
            target: self.session.target(),
        });
        if transition == Some(SessionState::Complete) {
            self.on_complete();
        }
        Some(delta)
    }

    /// Remove a sprite early without scoring. Returns false if already gone.
    pub fn expire(&mut self, handle: ObjectHandle) -> bool {
        let removed = self.lifecycle.expire(handle).is_some();
        if removed {
            self.events.push(GameEvent::Expired { handle });
        }
        removed
    }

    /// Advance session time and drop sprites whose lifespan ended
    pub(crate) fn advance_clock(&mut self, dt: f32) {
        self.clock += dt.max(0.0);
        for object in self.lifecycle.expire_due(self.clock) {
            log::debug!("Sprite {} expired", object.handle.id());
            self.events.push(GameEvent::Expired {
                handle: object.handle,
            });
        }
    }

    /// Run the countdown
    pub(crate) fn tick_timer(&mut self, dt: f32) {
        if self.session.tick(dt) == Some(SessionState::Failed) {
            self.scheduler.stop();
            self.events.push(GameEvent::LevelFailed {
                level: self.session.level(),
                score: self.session.score(),
            });
        }
    }

    /// Spawn a sprite if one is due
    pub(crate) fn spawn_due(&mut self) -> Option<ObjectHandle> {
        let variant = self.scheduler.poll(
            self.clock,
            self.session.is_active(),
            &mut self.rng,
            &mut self.diagnostics,
        )?;
        let position = self.place();
        let handle = self.lifecycle.spawn(position, variant, self.clock);
        log::debug!(
            "Spawned {} sprite {} at {:?}",
            variant.kind,
            handle.id(),
            position
        );
        self.events.push(GameEvent::Spawned {
            handle,
            variant,
            position,
        });
        Some(handle)
    }

    fn place(&mut self) -> Vec2 {
        let Some(camera) = self.camera else {
            self.diagnostics.report(ConfigIssue::MissingCamera);
            return Vec2::ZERO;
        };
        let viewport = camera.viewport();
        let occupied = self.lifecycle.occupied();
        let placement = placement::sample(
            &mut self.rng,
            &viewport,
            self.spawn.footprint,
            &occupied,
            self.spawn.min_separation,
            self.spawn.max_attempts,
        );
        if placement.degenerate {
            self.diagnostics.report(ConfigIssue::DegenerateFootprint {
                half_w: self.spawn.footprint.half_w,
                half_h: self.spawn.footprint.half_h,
                view_half_w: viewport.half_width,
                view_half_h: viewport.half_height,
            });
        }
        placement.position
    }

    fn on_complete(&mut self) {
        self.scheduler.stop();
        let unlock = self.progress.complete_level(self.session.level());
        self.unlock = Some(unlock);
        self.events.push(GameEvent::LevelComplete {
            level: self.session.level(),
            score: self.session.score(),
            unlock,
        });
    }
}
