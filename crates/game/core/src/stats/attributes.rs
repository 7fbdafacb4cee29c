//! Attribute identifiers and enum-indexed attribute storage.

use strum::{EnumCount, IntoEnumIterator};

use crate::error::SnapshotError;

/// The 23 numeric attributes of a combatant.
///
/// Grouped as the arena presents them:
/// - **Combat systems**: power, targeting, criticals, penetration, control, speed
/// - **Defensive systems**: armor, shield capacity, evasion, dampeners, counters
/// - **Chassis & mobility**: hull, servos, gyros, hydraulics, power core
/// - **AI processing** and **team coordination**: carried for completeness,
///   not read by the duel formulas
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Attribute {
    CombatPower,
    TargetingSystems,
    CriticalSystems,
    Penetration,
    WeaponControl,
    AttackSpeed,
    ArmorPlating,
    ShieldCapacity,
    EvasionThrusters,
    DamageDampeners,
    CounterProtocols,
    HullIntegrity,
    ServoMotors,
    GyroStabilizers,
    HydraulicSystems,
    PowerCore,
    CombatAlgorithms,
    ThreatAnalysis,
    AdaptiveAi,
    LogicCores,
    SyncProtocols,
    SupportSystems,
    FormationTactics,
}

impl Attribute {
    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// Dense set of all base attributes of one combatant.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeSet {
    values: [f64; Attribute::COUNT],
}

impl AttributeSet {
    /// Every attribute set to `value`.
    pub fn uniform(value: f64) -> Self {
        Self {
            values: [value; Attribute::COUNT],
        }
    }

    /// Every attribute set to zero.
    pub fn zeroed() -> Self {
        Self::uniform(0.0)
    }

    /// Build from `(attribute, value)` pairs, requiring every attribute.
    ///
    /// Later pairs overwrite earlier ones. Fails on the first attribute (in
    /// declaration order) that no pair provided.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (Attribute, f64)>,
    ) -> Result<Self, SnapshotError> {
        let mut values = [None; Attribute::COUNT];
        for (attribute, value) in pairs {
            values[attribute.index()] = Some(value);
        }

        let mut set = Self::zeroed();
        for attribute in Attribute::iter() {
            set.values[attribute.index()] =
                values[attribute.index()].ok_or(SnapshotError::MissingAttribute { attribute })?;
        }
        Ok(set)
    }

    #[inline]
    pub fn get(&self, attribute: Attribute) -> f64 {
        self.values[attribute.index()]
    }

    pub fn set(&mut self, attribute: Attribute, value: f64) {
        self.values[attribute.index()] = value;
    }

    /// Set one attribute (builder pattern).
    #[must_use]
    pub fn with(mut self, attribute: Attribute, value: f64) -> Self {
        self.set(attribute, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        Attribute::iter().map(|attribute| (attribute, self.get(attribute)))
    }
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl core::ops::Index<Attribute> for AttributeSet {
    type Output = f64;

    fn index(&self, attribute: Attribute) -> &f64 {
        &self.values[attribute.index()]
    }
}

/// Sparse per-attribute bonuses carried by a weapon.
///
/// An absent entry means the weapon carries no bonus for that attribute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeaponBonuses {
    values: [Option<f64>; Attribute::COUNT],
}

impl WeaponBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, attribute: Attribute) -> Option<f64> {
        self.values[attribute.index()]
    }

    pub fn set(&mut self, attribute: Attribute, bonus: f64) {
        self.values[attribute.index()] = Some(bonus);
    }

    /// Add a bonus for one attribute (builder pattern).
    #[must_use]
    pub fn with(mut self, attribute: Attribute, bonus: f64) -> Self {
        self.set(attribute, bonus);
        self
    }

    /// Present bonuses in attribute declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        Attribute::iter().filter_map(|attribute| self.get(attribute).map(|v| (attribute, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

impl FromIterator<(Attribute, f64)> for WeaponBonuses {
    fn from_iter<I: IntoIterator<Item = (Attribute, f64)>>(iter: I) -> Self {
        let mut bonuses = Self::new();
        for (attribute, bonus) in iter {
            bonuses.set(attribute, bonus);
        }
        bonuses
    }
}

// Both sets serialize as maps keyed by snake_case attribute name, which keeps
// roster files readable and lets deserialization reject missing attributes.
#[cfg(feature = "serde")]
mod serde_impls {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{Attribute, AttributeSet, WeaponBonuses};

    impl Serialize for AttributeSet {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_map(self.iter())
        }
    }

    impl<'de> Deserialize<'de> for AttributeSet {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let map = BTreeMap::<Attribute, f64>::deserialize(deserializer)?;
            AttributeSet::from_pairs(map).map_err(serde::de::Error::custom)
        }
    }

    impl Serialize for WeaponBonuses {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_map(self.iter())
        }
    }

    impl<'de> Deserialize<'de> for WeaponBonuses {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let map = BTreeMap::<Attribute, f64>::deserialize(deserializer)?;
            Ok(map.into_iter().collect())
        }
    }
}
