//! Data-driven combatant rosters.
//!
//! This crate reads RON roster files and turns them into validated
//! [`CombatantSnapshot`](arena_core::CombatantSnapshot)s:
//! - Weapon catalogs (weapons declared once, referenced by name)
//! - Combatant entries (attributes, equipment, loadout, stance, resources)
//!
//! Content never reaches the engine as anything but snapshots; the engine has
//! no notion of files or names-as-references.

pub mod loaders;

pub use loaders::{
    CombatantEntry, LoadResult, Roster, RosterLoader, WeaponCatalog, WeaponLoader,
};
