//! Weapon catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use arena_core::Weapon;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Weapon catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponCatalogFile {
    pub weapons: Vec<Weapon>,
}

/// Weapons indexed by their unique name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeaponCatalog {
    weapons: BTreeMap<String, Weapon>,
}

impl WeaponCatalog {
    /// Index `weapons` by name, rejecting duplicate names.
    pub fn from_weapons(weapons: impl IntoIterator<Item = Weapon>) -> LoadResult<Self> {
        let mut catalog = Self::default();
        for weapon in weapons {
            if catalog.weapons.contains_key(&weapon.name) {
                anyhow::bail!("Duplicate weapon '{}' in catalog", weapon.name);
            }
            catalog.weapons.insert(weapon.name.clone(), weapon);
        }
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Option<&Weapon> {
        self.weapons.get(name)
    }

    /// Clone the weapon called `name`, failing if the catalog lacks it.
    pub fn resolve(&self, name: &str) -> LoadResult<Weapon> {
        self.get(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Unknown weapon '{}'", name))
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.values()
    }
}

/// Loader for standalone weapon catalog files.
pub struct WeaponLoader;

impl WeaponLoader {
    /// Load a weapon catalog from a RON file.
    ///
    /// RON format: `(weapons: [(name: "Saber", base_damage: 18.0, ...), ...])`
    pub fn load(path: &Path) -> LoadResult<WeaponCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load weapon catalog {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<WeaponCatalog> {
        let file: WeaponCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon catalog RON: {}", e))?;
        WeaponCatalog::from_weapons(file.weapons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::Attribute;

    #[test]
    fn parses_cooldowns_and_bonuses() {
        let catalog = WeaponLoader::parse(
            r#"(
                weapons: [
                    (name: "Saber", base_damage: 18.0, cooldown: Some(2.5),
                     bonuses: { targeting_systems: 5.0 }),
                    (name: "Club", base_damage: 22.0),
                ],
            )"#,
        )
        .expect("catalog parses");

        assert_eq!(catalog.len(), 2);
        let saber = catalog.get("Saber").expect("saber present");
        assert_eq!(saber.cooldown, Some(2.5));
        assert_eq!(saber.bonuses.get(Attribute::TargetingSystems), Some(5.0));
        assert_eq!(saber.bonuses.get(Attribute::CombatPower), None);

        let club = catalog.resolve("Club").expect("club present");
        assert_eq!(club.cooldown, None);
        assert!(club.bonuses.is_empty());
    }

    #[test]
    fn rejects_duplicates_and_unknown_names() {
        let err = WeaponCatalog::from_weapons([Weapon::new("Axe", 10.0), Weapon::new("Axe", 12.0)])
            .unwrap_err();
        assert!(err.to_string().contains("Duplicate weapon 'Axe'"));

        let catalog = WeaponCatalog::from_weapons([Weapon::new("Axe", 10.0)]).unwrap();
        assert!(catalog.resolve("Lance").is_err());
    }
}
