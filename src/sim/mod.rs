//! Deterministic level simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-driven only (no wall clock, no threads)
//! - Seeded RNG only
//! - Stable iteration order (by handle)
//! - No rendering, audio or platform dependencies

pub mod autoplay;
pub mod diagnostics;
pub mod lifecycle;
pub mod placement;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod variant;

pub use autoplay::{Autoplay, AutoplayReport, run_level};
pub use diagnostics::{ConfigIssue, Diagnostics};
pub use lifecycle::{LiveObject, ObjectHandle, ObjectLifecycle};
pub use placement::{Camera, Footprint, Placement, Viewport};
pub use session::{ScoringSession, SessionState};
pub use spawner::{SchedulerPhase, SpawnPattern, SpawnScheduler};
pub use state::{GameEvent, LevelSession, SessionSnapshot};
pub use tick::{TickInput, tick};
pub use variant::{ObjectVariant, ScoreConvention, VariantKind};
