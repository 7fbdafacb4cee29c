//! Immutable battle inputs: identity, attributes, equipment and posture.

use core::fmt;

use crate::error::SnapshotError;
use crate::stats::{self, Attribute, AttributeSet, WeaponBonuses};

/// Stable identity of a combatant, supplied by the orchestrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Equipment configuration archetype.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Loadout {
    /// One weapon, free hand.
    #[default]
    Single,
    /// One heavy weapon held in both hands: harder hits and criticals.
    TwoHanded,
    /// A weapon in each hand, each on its own cooldown.
    DualWield,
    /// Weapon plus shield: better counters.
    WeaponShield,
}

/// Combat posture.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Stance {
    Offensive,
    Defensive,
    #[default]
    Balanced,
}

/// Hand an attack is made with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Hand {
    Main,
    Offhand,
}

/// An equipped weapon.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub base_damage: f64,
    /// Seconds between attacks; the engine default applies when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: WeaponBonuses,
}

impl Weapon {
    pub fn new(name: impl Into<String>, base_damage: f64) -> Self {
        Self {
            name: name.into(),
            base_damage,
            cooldown: None,
            bonuses: WeaponBonuses::new(),
        }
    }

    #[must_use]
    pub fn with_cooldown(mut self, seconds: f64) -> Self {
        self.cooldown = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_bonuses(mut self, bonuses: WeaponBonuses) -> Self {
        self.bonuses = bonuses;
        self
    }

    fn validate(&self, combatant: CombatantId) -> Result<(), SnapshotError> {
        let invalid = |reason| SnapshotError::InvalidWeapon {
            combatant,
            weapon: self.name.clone(),
            reason,
        };

        if !self.base_damage.is_finite() || self.base_damage < 0.0 {
            return Err(invalid("base damage must be a finite non-negative number"));
        }
        if self
            .cooldown
            .is_some_and(|cooldown| !cooldown.is_finite() || cooldown <= 0.0)
        {
            return Err(invalid("cooldown must be a finite positive number"));
        }
        if self.bonuses.iter().any(|(_, bonus)| !bonus.is_finite()) {
            return Err(invalid("attribute bonuses must be finite"));
        }
        Ok(())
    }
}

/// Everything the engine needs to know about one combatant.
///
/// Snapshots are immutable for the duration of a simulation; the loop copies
/// the resource values it mutates into a [`CombatState`](crate::CombatState).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSnapshot {
    pub id: CombatantId,
    pub name: String,
    pub attributes: AttributeSet,
    pub main_weapon: Option<Weapon>,
    pub offhand_weapon: Option<Weapon>,
    pub loadout: Loadout,
    pub stance: Stance,
    /// HP percentage at or below which the combatant concedes (0 never yields).
    pub yield_threshold: f64,
    pub current_hp: f64,
    pub max_hp: f64,
    pub current_shield: f64,
    pub max_shield: f64,
}

impl CombatantSnapshot {
    /// Default HP pool for snapshots built in code.
    pub const DEFAULT_MAX_HP: f64 = 100.0;

    /// Create an unarmed, balanced, single-loadout combatant at full HP with
    /// no shield and no yield threshold.
    pub fn new(id: CombatantId, name: impl Into<String>, attributes: AttributeSet) -> Self {
        Self {
            id,
            name: name.into(),
            attributes,
            main_weapon: None,
            offhand_weapon: None,
            loadout: Loadout::Single,
            stance: Stance::Balanced,
            yield_threshold: 0.0,
            current_hp: Self::DEFAULT_MAX_HP,
            max_hp: Self::DEFAULT_MAX_HP,
            current_shield: 0.0,
            max_shield: 0.0,
        }
    }

    #[must_use]
    pub fn with_main_weapon(mut self, weapon: Weapon) -> Self {
        self.main_weapon = Some(weapon);
        self
    }

    #[must_use]
    pub fn with_offhand_weapon(mut self, weapon: Weapon) -> Self {
        self.offhand_weapon = Some(weapon);
        self
    }

    #[must_use]
    pub fn with_loadout(mut self, loadout: Loadout) -> Self {
        self.loadout = loadout;
        self
    }

    #[must_use]
    pub fn with_stance(mut self, stance: Stance) -> Self {
        self.stance = stance;
        self
    }

    #[must_use]
    pub fn with_yield_threshold(mut self, threshold: f64) -> Self {
        self.yield_threshold = threshold;
        self
    }

    /// Set current and maximum HP.
    #[must_use]
    pub fn with_hp(mut self, current: f64, max: f64) -> Self {
        self.current_hp = current;
        self.max_hp = max;
        self
    }

    /// Set current and maximum shield.
    #[must_use]
    pub fn with_shield(mut self, current: f64, max: f64) -> Self {
        self.current_shield = current;
        self.max_shield = max;
        self
    }

    /// Restore HP and shield to their maximums, as orchestrators do before a
    /// battle.
    #[must_use]
    pub fn at_full_resources(mut self) -> Self {
        self.current_hp = self.max_hp;
        self.current_shield = self.max_shield;
        self
    }

    /// Weapon equipped in `hand`, if any.
    pub fn weapon(&self, hand: Hand) -> Option<&Weapon> {
        match hand {
            Hand::Main => self.main_weapon.as_ref(),
            Hand::Offhand => self.offhand_weapon.as_ref(),
        }
    }

    #[inline]
    pub fn attribute(&self, attribute: Attribute) -> f64 {
        self.attributes.get(attribute)
    }

    /// Base attribute plus the bonus of the weapon in `hand`.
    pub fn effective(&self, attribute: Attribute, hand: Hand) -> f64 {
        stats::effective(self, self.attribute(attribute), hand, attribute)
    }

    /// Whether this combatant makes independent off-hand attacks.
    pub fn attacks_with_offhand(&self) -> bool {
        self.loadout == Loadout::DualWield && self.offhand_weapon.is_some()
    }

    /// Reject snapshots the engine cannot simulate.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let combatant = self.id;

        for (attribute, value) in self.attributes.iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(SnapshotError::InvalidAttribute {
                    combatant,
                    attribute,
                    value,
                });
            }
        }

        if !self.max_hp.is_finite() || self.max_hp <= 0.0 {
            return Err(SnapshotError::InvalidMaxHp {
                combatant,
                max_hp: self.max_hp,
            });
        }
        if !(0.0..=self.max_hp).contains(&self.current_hp) {
            return Err(SnapshotError::HpOutOfRange {
                combatant,
                current: self.current_hp,
                max: self.max_hp,
            });
        }
        if !self.max_shield.is_finite() || !(0.0..=self.max_shield).contains(&self.current_shield)
        {
            return Err(SnapshotError::ShieldOutOfRange {
                combatant,
                current: self.current_shield,
                max: self.max_shield,
            });
        }
        if !(0.0..=100.0).contains(&self.yield_threshold) {
            return Err(SnapshotError::YieldThresholdOutOfRange {
                combatant,
                threshold: self.yield_threshold,
            });
        }

        for weapon in [&self.main_weapon, &self.offhand_weapon].into_iter().flatten() {
            weapon.validate(combatant)?;
        }

        Ok(())
    }
}
