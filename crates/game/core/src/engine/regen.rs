//! Shield regeneration.

use crate::combatant::{CombatantSnapshot, Stance};
use crate::state::CombatState;
use crate::stats::Attribute;

pub const SHIELD_REGEN_PER_POWER_CORE: f64 = 0.15;
pub const DEFENSIVE_REGEN_MULTIPLIER: f64 = 1.20;

/// Regenerate the shield for one tick and return the amount gained.
///
/// `gain = power_core × 0.15 × stance_mult × tick_seconds`, clamped so the
/// shield never exceeds its maximum.
pub fn regenerate_shield(
    state: &mut CombatState,
    snapshot: &CombatantSnapshot,
    tick_seconds: f64,
) -> f64 {
    let stance = if snapshot.stance == Stance::Defensive {
        DEFENSIVE_REGEN_MULTIPLIER
    } else {
        1.0
    };
    let gain = snapshot.attribute(Attribute::PowerCore)
        * SHIELD_REGEN_PER_POWER_CORE
        * stance
        * tick_seconds;

    let before = state.current_shield;
    state.current_shield = (before + gain).min(state.max_shield);
    state.current_shield - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::CombatantId;
    use crate::config::EngineConfig;
    use crate::stats::AttributeSet;

    fn snapshot(stance: Stance) -> CombatantSnapshot {
        CombatantSnapshot::new(
            CombatantId(1),
            "Dynamo",
            AttributeSet::zeroed().with(Attribute::PowerCore, 20.0),
        )
        .with_stance(stance)
        .with_shield(0.0, 10.0)
    }

    #[test]
    fn defensive_stance_regenerates_faster() {
        let config = EngineConfig::default();

        let balanced = snapshot(Stance::Balanced);
        let mut state = CombatState::new(&balanced, &config);
        let gain = regenerate_shield(&mut state, &balanced, 0.1);
        assert!((gain - 0.3).abs() < 1e-9);

        let defensive = snapshot(Stance::Defensive);
        let mut state = CombatState::new(&defensive, &config);
        let gain = regenerate_shield(&mut state, &defensive, 0.1);
        assert!((gain - 0.36).abs() < 1e-9);
    }

    #[test]
    fn clamped_at_max_shield() {
        let config = EngineConfig::default();
        let s = snapshot(Stance::Balanced);
        let mut state = CombatState::new(&s, &config);
        state.current_shield = 9.9;

        let gain = regenerate_shield(&mut state, &s, 1.0);
        assert!((gain - 0.1).abs() < 1e-9);
        assert_eq!(state.current_shield, 10.0);
        assert_eq!(regenerate_shield(&mut state, &s, 1.0), 0.0);
    }
}
