//! Combat resolution formulas.
//!
//! This module provides pure functions for resolving combat interactions.
//! Random draws are passed in by the caller, so every function here is
//! deterministic and side-effect free apart from [`apply_damage`], which
//! mutates the defender's exclusively-owned [`CombatState`](crate::CombatState).
//!
//! # Core Functions
//!
//! - `hit_chance`: targeting vs evasion and gyros, per hand
//! - `critical_chance`: critical systems, targeting and loadout
//! - `counter_chance`: defender counter protocols, stance and loadout
//! - `base_damage`: weapon damage scaled by power, control, loadout and stance
//! - `critical_multiplier`: loadout crit base reduced by damage dampeners
//! - `apply_damage`: shield absorption, bleed-through and armor mitigation

pub mod counter;
pub mod damage;
pub mod formula;
pub mod hit;

pub use counter::counter_chance;
pub use damage::{
    DamageSplit, apply_damage, base_damage, critical_multiplier, loadout_damage_multiplier,
    stance_damage_multiplier,
};
pub use formula::{FormulaBreakdown, FormulaComponent};
pub use hit::{critical_chance, hit_chance};

/// A computed probability (in percent) with the terms that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Chance {
    pub value: f64,
    pub breakdown: FormulaBreakdown,
}

impl Chance {
    /// A roll succeeds iff the draw in `[0, 100)` is below the chance.
    #[inline]
    pub fn succeeds(&self, draw: f64) -> bool {
        draw < self.value
    }
}
