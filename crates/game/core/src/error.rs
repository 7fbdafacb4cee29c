//! Error infrastructure for arena-core.
//!
//! The tick loop itself never fails: every formula is clamped, and missing
//! weapons fall back to an unarmed profile. The only failure surface is an
//! invalid [`CombatantSnapshot`](crate::CombatantSnapshot), which is rejected
//! with a [`SnapshotError`] before the first tick runs.

use crate::combatant::CombatantId;
use crate::stats::Attribute;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    Validation,

    /// Unexpected state inconsistency. These indicate bugs.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all arena-core errors.
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Rejection of a malformed combatant snapshot.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("missing required attribute `{attribute}`")]
    MissingAttribute { attribute: Attribute },

    #[error("combatant {combatant}: attribute `{attribute}` must be a finite non-negative number, got {value}")]
    InvalidAttribute {
        combatant: CombatantId,
        attribute: Attribute,
        value: f64,
    },

    #[error("combatant {combatant}: max HP must be positive, got {max_hp}")]
    InvalidMaxHp { combatant: CombatantId, max_hp: f64 },

    #[error("combatant {combatant}: current HP {current} outside 0..={max}")]
    HpOutOfRange {
        combatant: CombatantId,
        current: f64,
        max: f64,
    },

    #[error("combatant {combatant}: current shield {current} outside 0..={max}")]
    ShieldOutOfRange {
        combatant: CombatantId,
        current: f64,
        max: f64,
    },

    #[error("combatant {combatant}: yield threshold {threshold} outside 0..=100")]
    YieldThresholdOutOfRange { combatant: CombatantId, threshold: f64 },

    #[error("combatant {combatant}: weapon `{weapon}` is invalid: {reason}")]
    InvalidWeapon {
        combatant: CombatantId,
        weapon: String,
        reason: &'static str,
    },

    #[error("both combatants share identity {combatant}")]
    DuplicateCombatant { combatant: CombatantId },
}

impl EngineError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingAttribute { .. } => "SNAPSHOT_MISSING_ATTRIBUTE",
            Self::InvalidAttribute { .. } => "SNAPSHOT_INVALID_ATTRIBUTE",
            Self::InvalidMaxHp { .. } => "SNAPSHOT_INVALID_MAX_HP",
            Self::HpOutOfRange { .. } => "SNAPSHOT_HP_OUT_OF_RANGE",
            Self::ShieldOutOfRange { .. } => "SNAPSHOT_SHIELD_OUT_OF_RANGE",
            Self::YieldThresholdOutOfRange { .. } => "SNAPSHOT_YIELD_OUT_OF_RANGE",
            Self::InvalidWeapon { .. } => "SNAPSHOT_INVALID_WEAPON",
            Self::DuplicateCombatant { .. } => "SNAPSHOT_DUPLICATE_COMBATANT",
        }
    }
}
