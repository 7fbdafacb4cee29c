//! Deterministic combat rules for two-combatant arena battles.
//!
//! `arena-core` resolves a single battle between two [`CombatantSnapshot`]s
//! into a [`CombatResult`]: a winner (or draw), final resources, and an ordered
//! log of [`CombatEvent`]s. The engine is pure: it performs no I/O, touches no
//! global state, and draws all randomness from an injected [`RngOracle`], so
//! the same inputs and seed always replay the same battle.
//!
//! Modules are layered leaf-first:
//! - [`stats`] attribute storage and the per-hand attribute resolver
//! - [`combatant`] immutable battle inputs (weapons, loadout, stance)
//! - [`combat`] probability formulas and the damage pipeline
//! - [`state`] per-combatant mutable resources owned by the loop
//! - [`engine`] cooldowns, regeneration, the tick loop and its outputs
pub mod combat;
pub mod combatant;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use combat::{
    Chance, DamageSplit, FormulaBreakdown, FormulaComponent, apply_damage, base_damage,
    counter_chance, critical_chance, critical_multiplier, hit_chance,
};
pub use combatant::{CombatantId, CombatantSnapshot, Hand, Loadout, Stance, Weapon};
pub use config::EngineConfig;
pub use engine::{
    BattleOutcome, CombatEvent, CombatResult, CombatantSummary, EventKind, ResourceSnapshot,
    RollKind, RollRecord, Simulator, TopAttack, simulate,
};
pub use env::{PcgRng, RngOracle, RollContext, RollStream, compute_seed};
pub use error::{EngineError, ErrorSeverity, SnapshotError};
pub use state::CombatState;
pub use stats::{Attribute, AttributeSet, WeaponBonuses, effective};
