//! Battle results.

use crate::combatant::{CombatantId, CombatantSnapshot};
use crate::state::CombatState;

use super::events::CombatEvent;

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    Destroyed,
    Yielded,
    TimeExpired,
}

/// Final figures of one combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSummary {
    pub id: CombatantId,
    pub name: String,
    pub final_hp: f64,
    pub final_shield: f64,
    /// HP damage this combatant inflicted, counters included.
    pub damage_dealt: f64,
    /// HP damage this combatant received.
    pub damage_taken: f64,
}

impl CombatantSummary {
    pub(crate) fn new(snapshot: &CombatantSnapshot, state: &CombatState) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name.clone(),
            final_hp: state.current_hp,
            final_shield: state.current_shield,
            damage_dealt: state.damage_dealt,
            damage_taken: state.damage_taken,
        }
    }
}

/// The single most damaging attack of a battle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopAttack {
    pub attacker: CombatantId,
    /// Shield plus HP damage of that attack.
    pub damage: f64,
}

impl TopAttack {
    /// Pick the larger per-combatant peak; the first combatant wins ties.
    pub(crate) fn from_states(states: &[CombatState; 2]) -> Option<Self> {
        let [first, second] = states;
        let best = if first.max_attack_damage >= second.max_attack_damage {
            first
        } else {
            second
        };
        (best.max_attack_damage > 0.0).then(|| Self {
            attacker: best.id,
            damage: best.max_attack_damage,
        })
    }
}

/// Everything a battle produced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatResult {
    /// `None` on a draw.
    pub winner: Option<CombatantId>,
    pub outcome: BattleOutcome,
    pub first: CombatantSummary,
    pub second: CombatantSummary,
    /// Timestamp of the last simulated tick.
    pub duration: f64,
    pub is_draw: bool,
    pub events: Vec<CombatEvent>,
    pub top_attack: Option<TopAttack>,
}

impl CombatResult {
    pub fn loser(&self) -> Option<CombatantId> {
        let winner = self.winner?;
        if winner == self.first.id {
            Some(self.second.id)
        } else {
            Some(self.first.id)
        }
    }

    pub fn summary(&self, id: CombatantId) -> Option<&CombatantSummary> {
        [&self.first, &self.second]
            .into_iter()
            .find(|summary| summary.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::stats::AttributeSet;

    fn states() -> [CombatState; 2] {
        let config = EngineConfig::default();
        let a = CombatantSnapshot::new(CombatantId(1), "A", AttributeSet::zeroed());
        let b = CombatantSnapshot::new(CombatantId(2), "B", AttributeSet::zeroed());
        [CombatState::new(&a, &config), CombatState::new(&b, &config)]
    }

    #[test]
    fn top_attack_tie_goes_to_first() {
        let mut states = states();
        assert_eq!(TopAttack::from_states(&states), None);

        states[0].max_attack_damage = 30.0;
        states[1].max_attack_damage = 30.0;
        let top = TopAttack::from_states(&states).unwrap();
        assert_eq!(top.attacker, CombatantId(1));

        states[1].max_attack_damage = 30.5;
        let top = TopAttack::from_states(&states).unwrap();
        assert_eq!(top.attacker, CombatantId(2));
        assert_eq!(top.damage, 30.5);
    }
}
