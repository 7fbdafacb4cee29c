//! Combat log entries.

use crate::combat::{Chance, DamageSplit, FormulaBreakdown};
use crate::combatant::{CombatantId, Hand};
use crate::state::CombatState;

/// What happened in a [`CombatEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    Attack,
    Miss,
    Critical,
    Counter,
    ShieldRegen,
    /// A combatant conceded, or the time limit ran out (no subject).
    Yield,
    Destroyed,
}

impl EventKind {
    /// Events produced by resolving a scheduled attack.
    pub fn is_attack_resolution(self) -> bool {
        matches!(self, Self::Attack | Self::Miss | Self::Critical)
    }
}

/// Probabilistic decision kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum RollKind {
    Hit,
    Critical,
    Counter,
}

/// One random decision: the threshold it was compared against, the draw in
/// `[0, 100)` and the outcome.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollRecord {
    pub kind: RollKind,
    pub threshold: f64,
    pub draw: f64,
    pub success: bool,
}

impl RollRecord {
    pub fn new(kind: RollKind, chance: &Chance, draw: f64) -> Self {
        Self {
            kind,
            threshold: chance.value,
            draw,
            success: chance.succeeds(draw),
        }
    }
}

/// HP and shield of both combatants right after an event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceSnapshot {
    pub first_hp: f64,
    pub first_shield: f64,
    pub second_hp: f64,
    pub second_shield: f64,
}

impl ResourceSnapshot {
    pub fn capture(states: &[CombatState; 2]) -> Self {
        Self {
            first_hp: states[0].current_hp,
            first_shield: states[0].current_shield,
            second_hp: states[1].current_hp,
            second_shield: states[1].current_shield,
        }
    }
}

/// A timestamped entry of the battle log.
///
/// Attack, miss, critical and counter events name an attacker and defender.
/// Shield regeneration, yield and destruction name the combatant they concern
/// in `subject`; the time-limit yield names nobody.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEvent {
    /// Seconds since battle start, aligned to a tick.
    pub timestamp: f64,
    pub kind: EventKind,
    pub attacker: Option<CombatantId>,
    pub defender: Option<CombatantId>,
    pub subject: Option<CombatantId>,
    pub weapon: Option<String>,
    pub hand: Option<Hand>,
    pub shield_damage: f64,
    pub hp_damage: f64,
    pub resources: ResourceSnapshot,
    pub message: String,
    pub breakdown: Option<FormulaBreakdown>,
    pub rolls: Vec<RollRecord>,
}

impl CombatEvent {
    pub fn new(
        timestamp: f64,
        kind: EventKind,
        resources: ResourceSnapshot,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            kind,
            attacker: None,
            defender: None,
            subject: None,
            weapon: None,
            hand: None,
            shield_damage: 0.0,
            hp_damage: 0.0,
            resources,
            message: message.into(),
            breakdown: None,
            rolls: Vec::new(),
        }
    }

    #[must_use]
    pub fn between(mut self, attacker: CombatantId, defender: CombatantId) -> Self {
        self.attacker = Some(attacker);
        self.defender = Some(defender);
        self
    }

    #[must_use]
    pub fn about(mut self, subject: CombatantId) -> Self {
        self.subject = Some(subject);
        self
    }

    #[must_use]
    pub fn with_weapon(mut self, weapon: impl Into<String>, hand: Hand) -> Self {
        self.weapon = Some(weapon.into());
        self.hand = Some(hand);
        self
    }

    #[must_use]
    pub fn with_damage(mut self, split: DamageSplit) -> Self {
        self.shield_damage = split.shield_damage;
        self.hp_damage = split.hp_damage;
        self
    }

    #[must_use]
    pub fn with_breakdown(mut self, breakdown: FormulaBreakdown) -> Self {
        self.breakdown = Some(breakdown);
        self
    }

    #[must_use]
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = RollRecord>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    pub fn total_damage(&self) -> f64 {
        self.shield_damage + self.hp_damage
    }

    pub fn roll(&self, kind: RollKind) -> Option<&RollRecord> {
        self.rolls.iter().find(|roll| roll.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(EventKind::ShieldRegen.to_string(), "shield_regen");
        assert_eq!(EventKind::Destroyed.as_ref(), "destroyed");
        assert!(EventKind::Critical.is_attack_resolution());
        assert!(!EventKind::Counter.is_attack_resolution());
    }

    #[test]
    fn roll_record_compares_draw_to_threshold() {
        let chance = Chance {
            value: 40.0,
            breakdown: FormulaBreakdown::default(),
        };
        assert!(RollRecord::new(RollKind::Counter, &chance, 39.9).success);
        assert!(!RollRecord::new(RollKind::Counter, &chance, 40.0).success);
    }

    #[test]
    fn builder_fills_damage_and_rolls() {
        let event = CombatEvent::new(1.2, EventKind::Attack, ResourceSnapshot::default(), "hit")
            .between(CombatantId(1), CombatantId(2))
            .with_weapon("Saber", Hand::Main)
            .with_damage(DamageSplit {
                shield_damage: 4.0,
                hp_damage: 6.0,
            })
            .with_rolls([RollRecord {
                kind: RollKind::Hit,
                threshold: 70.0,
                draw: 12.0,
                success: true,
            }]);

        assert_eq!(event.total_damage(), 10.0);
        assert_eq!(event.hand, Some(Hand::Main));
        assert!(event.roll(RollKind::Hit).is_some());
        assert!(event.roll(RollKind::Counter).is_none());
    }
}
