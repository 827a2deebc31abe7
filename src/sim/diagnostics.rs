//! Once-only reporting of configuration problems
//!
//! Misconfiguration never aborts a session. Each distinct issue is logged the
//! first time it is seen and the affected operation falls back to a safe
//! default.

use thiserror::Error;

use super::variant::VariantKind;

/// A configuration problem detected while running a level
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigIssue {
    #[error("no camera available, spawning at the origin")]
    MissingCamera,
    #[error(
        "sprite footprint ({half_w}x{half_h}) does not fit the viewport \
         ({view_half_w}x{view_half_h}), collapsing to the viewport center"
    )]
    DegenerateFootprint {
        half_w: f32,
        half_h: f32,
        view_half_w: f32,
        view_half_h: f32,
    },
    #[error("level has no {0} sprites configured, using a single default sprite")]
    EmptyVariantSet(VariantKind),
    #[error("level {0} is not in the level table, using default target and time")]
    UnknownLevel(u32),
    #[error("spawn interval {min}..{max} is inverted, swapping bounds")]
    InvertedSpawnInterval { min: f32, max: f32 },
}

impl ConfigIssue {
    /// Issues of the same kind are only reported once, whatever their payload
    fn same_kind(&self, other: &ConfigIssue) -> bool {
        match (self, other) {
            (ConfigIssue::EmptyVariantSet(a), ConfigIssue::EmptyVariantSet(b)) => a == b,
            (ConfigIssue::UnknownLevel(a), ConfigIssue::UnknownLevel(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

/// Diagnostic channel for a single session
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    issues: Vec<ConfigIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue, logging it only the first time.
    /// Returns true if this was a new issue.
    pub fn report(&mut self, issue: ConfigIssue) -> bool {
        if self.issues.iter().any(|seen| seen.same_kind(&issue)) {
            return false;
        }
        log::warn!("Configuration: {}", issue);
        self.issues.push(issue);
        true
    }

    /// All distinct issues reported so far
    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
