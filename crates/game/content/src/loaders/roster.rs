//! Roster loader.
//!
//! A roster file declares a weapon catalog and the combatants that may fight.
//! Combatants refer to weapons by name; the loader resolves the references and
//! validates every resulting snapshot up front, so a roster that loads can be
//! simulated without further checks.
//!
//! ```ron
//! (
//!     weapons: [
//!         (name: "Saber", base_damage: 18.0, cooldown: Some(2.5)),
//!     ],
//!     combatants: [
//!         (
//!             id: 1,
//!             name: "Iron Warden",
//!             attributes: { combat_power: 12.0, /* all 23 attributes */ },
//!             main_weapon: Some("Saber"),
//!             loadout: weapon_shield,
//!             stance: defensive,
//!             yield_threshold: 20.0,
//!             max_hp: 150.0,
//!             max_shield: 40.0,
//!         ),
//!     ],
//! )
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use arena_core::{AttributeSet, CombatantId, CombatantSnapshot, Loadout, Stance, Weapon};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::loaders::{LoadResult, WeaponCatalog, read_file};

/// One combatant as written in a roster file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantEntry {
    pub id: CombatantId,
    pub name: String,
    /// Every attribute must be present.
    pub attributes: AttributeSet,
    #[serde(default)]
    pub main_weapon: Option<String>,
    #[serde(default)]
    pub offhand_weapon: Option<String>,
    #[serde(default)]
    pub loadout: Loadout,
    #[serde(default)]
    pub stance: Stance,
    #[serde(default)]
    pub yield_threshold: f64,
    #[serde(default = "default_max_hp")]
    pub max_hp: f64,
    #[serde(default)]
    pub max_shield: f64,
    /// Defaults to `max_hp`.
    #[serde(default)]
    pub current_hp: Option<f64>,
    /// Defaults to `max_shield`.
    #[serde(default)]
    pub current_shield: Option<f64>,
}

fn default_max_hp() -> f64 {
    CombatantSnapshot::DEFAULT_MAX_HP
}

/// Roster structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterFile {
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    pub combatants: Vec<CombatantEntry>,
}

/// A loaded roster: the weapon catalog and its combatant entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    weapons: WeaponCatalog,
    combatants: Vec<CombatantEntry>,
}

impl Roster {
    /// Parse a roster from RON text and validate every combatant.
    pub fn parse(content: &str) -> LoadResult<Self> {
        let file: RosterFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        Self::from_file(file)
    }

    pub fn from_file(file: RosterFile) -> LoadResult<Self> {
        let roster = Self {
            weapons: WeaponCatalog::from_weapons(file.weapons)?,
            combatants: file.combatants,
        };

        let mut ids = BTreeSet::new();
        for entry in &roster.combatants {
            if !ids.insert(entry.id) {
                anyhow::bail!("Duplicate combatant id {} ('{}')", entry.id, entry.name);
            }
            let snapshot = roster.build(entry)?;
            snapshot
                .validate()
                .with_context(|| format!("Invalid combatant '{}'", entry.name))?;
        }

        Ok(roster)
    }

    pub fn weapons(&self) -> &WeaponCatalog {
        &self.weapons
    }

    pub fn entries(&self) -> &[CombatantEntry] {
        &self.combatants
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    /// Snapshot of the combatant with `id`.
    pub fn snapshot(&self, id: CombatantId) -> LoadResult<CombatantSnapshot> {
        let entry = self
            .combatants
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| anyhow::anyhow!("No combatant with id {}", id))?;
        self.build(entry)
    }

    /// Snapshot selected by numeric id or by case-insensitive name.
    pub fn lookup(&self, key: &str) -> LoadResult<CombatantSnapshot> {
        if let Ok(raw) = key.parse::<u32>() {
            return self.snapshot(CombatantId(raw));
        }
        let entry = self
            .combatants
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| anyhow::anyhow!("No combatant named '{}'", key))?;
        self.build(entry)
    }

    /// Snapshots of every combatant, in file order.
    pub fn snapshots(&self) -> LoadResult<Vec<CombatantSnapshot>> {
        self.combatants.iter().map(|entry| self.build(entry)).collect()
    }

    fn build(&self, entry: &CombatantEntry) -> LoadResult<CombatantSnapshot> {
        let resolve = |name: &Option<String>| -> LoadResult<Option<Weapon>> {
            name.as_deref()
                .map(|name| self.weapons.resolve(name))
                .transpose()
                .with_context(|| format!("Combatant '{}' references a missing weapon", entry.name))
        };

        let mut snapshot =
            CombatantSnapshot::new(entry.id, entry.name.clone(), entry.attributes.clone())
                .with_loadout(entry.loadout)
                .with_stance(entry.stance);
        snapshot.main_weapon = resolve(&entry.main_weapon)?;
        snapshot.offhand_weapon = resolve(&entry.offhand_weapon)?;
        snapshot.yield_threshold = entry.yield_threshold;
        snapshot.max_hp = entry.max_hp;
        snapshot.current_hp = entry.current_hp.unwrap_or(entry.max_hp);
        snapshot.max_shield = entry.max_shield;
        snapshot.current_shield = entry.current_shield.unwrap_or(entry.max_shield);

        Ok(snapshot)
    }
}

/// Loader for roster files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load and validate a roster from a RON file.
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        let roster = Roster::parse(&content)
            .with_context(|| format!("Failed to load roster {}", path.display()))?;

        info!(
            path = %path.display(),
            combatants = roster.len(),
            weapons = roster.weapons().len(),
            "roster loaded"
        );
        Ok(roster)
    }
}
