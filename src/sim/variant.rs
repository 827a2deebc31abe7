//! Spawnable object variants and their score deltas

use serde::{Deserialize, Serialize};

/// Beneficial ("good") or harmful ("bad") sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantKind {
    Beneficial,
    Harmful,
}

impl VariantKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantKind::Beneficial => "beneficial",
            VariantKind::Harmful => "harmful",
        }
    }

    /// The other kind (used by alternating spawn patterns)
    pub fn opposite(&self) -> Self {
        match self {
            VariantKind::Beneficial => VariantKind::Harmful,
            VariantKind::Harmful => VariantKind::Beneficial,
        }
    }
}

impl std::fmt::Display for VariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete spawn: kind plus cosmetic asset index within the level's set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectVariant {
    pub kind: VariantKind,
    /// Index into the level's sprite set for this kind
    pub sub_variant: u8,
}

impl ObjectVariant {
    pub fn new(kind: VariantKind, sub_variant: u8) -> Self {
        Self { kind, sub_variant }
    }

    pub fn beneficial() -> Self {
        Self::new(VariantKind::Beneficial, 0)
    }

    pub fn harmful() -> Self {
        Self::new(VariantKind::Harmful, 0)
    }
}

/// Points awarded per click, by kind
///
/// The shipped game rewards clicking harmful sprites and penalizes clicking
/// beneficial ones, even though its labels suggest the reverse. That literal
/// behavior is the default; [`ScoreConvention::intended`] flips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreConvention {
    pub beneficial: i32,
    pub harmful: i32,
}

impl Default for ScoreConvention {
    fn default() -> Self {
        Self::observed()
    }
}

impl ScoreConvention {
    /// Harmful +1, beneficial -1
    pub fn observed() -> Self {
        Self {
            beneficial: -1,
            harmful: 1,
        }
    }

    /// Beneficial +1, harmful -1
    pub fn intended() -> Self {
        Self {
            beneficial: 1,
            harmful: -1,
        }
    }

    /// Score delta for clicking a sprite of this kind
    #[inline]
    pub fn delta(&self, kind: VariantKind) -> i32 {
        match kind {
            VariantKind::Beneficial => self.beneficial,
            VariantKind::Harmful => self.harmful,
        }
    }
}
