//! Content loaders for reading roster data from files.

pub mod roster;
pub mod weapon;

pub use roster::{CombatantEntry, Roster, RosterLoader};
pub use weapon::{WeaponCatalog, WeaponLoader};

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file {}", path.display()))
}
