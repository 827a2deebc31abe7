//! Level table and spawn balance
//!
//! Defaults mirror the shipped levels. A JSON file can override any part of
//! it; missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::diagnostics::{ConfigIssue, Diagnostics};
use crate::sim::placement::Footprint;
use crate::sim::spawner::SpawnPattern;
use crate::sim::variant::{ScoreConvention, VariantKind};

/// Spawn cadence, lifespan and placement settings for a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Shortest wait between spawns (seconds)
    pub min_interval: f32,
    /// Longest wait between spawns (seconds)
    pub max_interval: f32,
    /// Time a sprite stays on screen (seconds)
    pub lifespan: f32,
    /// Minimum distance between live sprites
    pub min_separation: f32,
    /// Placement resample budget
    pub max_attempts: u32,
    /// Sprite half extents
    pub footprint: Footprint,
    pub pattern: SpawnPattern,
    /// Number of beneficial sprite assets for the level
    pub beneficial_variants: u8,
    /// Number of harmful sprite assets for the level
    pub harmful_variants: u8,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            min_interval: DEFAULT_MIN_SPAWN_INTERVAL,
            max_interval: DEFAULT_MAX_SPAWN_INTERVAL,
            lifespan: DEFAULT_LIFESPAN,
            min_separation: DEFAULT_MIN_SEPARATION,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
            footprint: Footprint::new(DEFAULT_FOOTPRINT_HALF, DEFAULT_FOOTPRINT_HALF),
            pattern: SpawnPattern::default(),
            beneficial_variants: 1,
            harmful_variants: 1,
        }
    }
}

impl SpawnTuning {
    /// Spawning used from level 2 on: alternate bad/good, faster, two assets each
    pub fn alternating() -> Self {
        Self {
            max_interval: 2.0,
            pattern: SpawnPattern::Alternating {
                first: VariantKind::Harmful,
            },
            beneficial_variants: 2,
            harmful_variants: 2,
            ..Self::default()
        }
    }

    /// Copy with nonsensical values repaired (issues go to `diagnostics`)
    pub fn sanitized(&self, diagnostics: &mut Diagnostics) -> Self {
        let mut tuning = self.clone();
        if tuning.min_interval > tuning.max_interval {
            diagnostics.report(ConfigIssue::InvertedSpawnInterval {
                min: tuning.min_interval,
                max: tuning.max_interval,
            });
            std::mem::swap(&mut tuning.min_interval, &mut tuning.max_interval);
        }
        tuning.min_interval = tuning.min_interval.max(0.0);
        tuning.max_interval = tuning.max_interval.max(0.0);
        tuning.lifespan = tuning.lifespan.max(0.0);
        tuning.min_separation = tuning.min_separation.max(0.0);
        if let SpawnPattern::Random { harmful_chance } = &mut tuning.pattern {
            *harmful_chance = harmful_chance.clamp(0.0, 1.0);
        }
        tuning
    }
}

/// Per-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub level: u32,
    pub target_score: u32,
    /// Time budget (seconds)
    pub time_limit: f32,
    #[serde(default)]
    pub spawn: SpawnTuning,
}

impl LevelSpec {
    pub fn new(level: u32, target_score: u32, time_limit: f32, spawn: SpawnTuning) -> Self {
        Self {
            level,
            target_score,
            time_limit,
            spawn,
        }
    }
}

/// A level lookup result
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLevel {
    pub spec: LevelSpec,
    /// False when defaults were substituted
    pub recognized: bool,
}

/// Level number -> target score, time limit and spawn settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTable {
    pub levels: Vec<LevelSpec>,
    pub default_target: u32,
    pub default_time_limit: f32,
    pub default_spawn: SpawnTuning,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            levels: vec![
                LevelSpec::new(1, 10, DEFAULT_TIME_LIMIT, SpawnTuning::default()),
                LevelSpec::new(2, 15, DEFAULT_TIME_LIMIT, SpawnTuning::alternating()),
                LevelSpec::new(3, 20, DEFAULT_TIME_LIMIT, SpawnTuning::alternating()),
                LevelSpec::new(4, 25, DEFAULT_TIME_LIMIT, SpawnTuning::alternating()),
                LevelSpec::new(5, 30, DEFAULT_TIME_LIMIT, SpawnTuning::alternating()),
            ],
            default_target: DEFAULT_TARGET_SCORE,
            default_time_limit: DEFAULT_TIME_LIMIT,
            default_spawn: SpawnTuning::default(),
        }
    }
}

impl LevelTable {
    /// Look up a level, substituting defaults for unknown ones
    pub fn resolve(&self, level: u32) -> ResolvedLevel {
        match self.levels.iter().find(|spec| spec.level == level) {
            Some(spec) => ResolvedLevel {
                spec: spec.clone(),
                recognized: true,
            },
            None => ResolvedLevel {
                spec: LevelSpec::new(
                    level,
                    self.default_target,
                    self.default_time_limit,
                    self.default_spawn.clone(),
                ),
                recognized: false,
            },
        }
    }

    /// Replace or add a level
    pub fn set(&mut self, spec: LevelSpec) {
        match self.levels.iter_mut().find(|s| s.level == spec.level) {
            Some(existing) => *existing = spec,
            None => {
                self.levels.push(spec);
                self.levels.sort_by_key(|s| s.level);
            }
        }
    }
}

/// All data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub levels: LevelTable,
    /// Click score per sprite kind
    pub score: ScoreConvention,
    /// Clearing this level finishes the campaign
    pub final_level: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            levels: LevelTable::default(),
            score: ScoreConvention::default(),
            final_level: FINAL_LEVEL,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning in {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No tuning at {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
