//! Combatant attributes and the per-hand attribute resolver.
//!
//! Attributes are stored in fixed, enum-indexed arrays rather than keyed by
//! strings, so every lookup is resolved at compile time:
//!
//! - [`AttributeSet`]: all 23 base attributes of a combatant (dense)
//! - [`WeaponBonuses`]: the attributes a weapon modifies (sparse)
//! - [`effective`]: base value plus the bonus of the weapon in a given hand

mod attributes;
mod resolver;

pub use attributes::{Attribute, AttributeSet, WeaponBonuses};
pub use resolver::effective;
