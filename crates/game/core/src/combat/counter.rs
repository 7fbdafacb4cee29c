//! Counter-attack chance.

use crate::combatant::{CombatantSnapshot, Loadout, Stance};
use crate::stats::Attribute;

use super::{Chance, FormulaBreakdown};

pub const DEFENSIVE_COUNTER_MULTIPLIER: f64 = 1.15;
pub const WEAPON_SHIELD_COUNTER_MULTIPLIER: f64 = 1.10;
pub const MAX_COUNTER_CHANCE: f64 = 40.0;

/// Calculate the chance (percent) that `defender` counters a hit it survived.
///
/// # Formula
///
/// ```text
/// counter = counter_protocols / 100 × stance_mult × loadout_mult × 100
/// clamped to [0, 40]
/// ```
///
/// There is no random variance term.
pub fn counter_chance(defender: &CombatantSnapshot) -> Chance {
    let protocols = defender.attribute(Attribute::CounterProtocols) / 100.0;
    let stance = if defender.stance == Stance::Defensive {
        DEFENSIVE_COUNTER_MULTIPLIER
    } else {
        1.0
    };
    let loadout = if defender.loadout == Loadout::WeaponShield {
        WEAPON_SHIELD_COUNTER_MULTIPLIER
    } else {
        1.0
    };

    let value = (protocols * stance * loadout * 100.0).clamp(0.0, MAX_COUNTER_CHANCE);

    Chance {
        value,
        breakdown: FormulaBreakdown::new(
            format!(
                "{protocols:.2} counter_protocols × {stance:.2} stance × {loadout:.2} loadout × 100"
            ),
            value,
        )
        .with("counter_protocols", protocols)
        .with("counter_stance", stance)
        .with("counter_loadout", loadout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::CombatantId;
    use crate::stats::AttributeSet;

    fn defender(counter: f64) -> CombatantSnapshot {
        CombatantSnapshot::new(
            CombatantId(2),
            "Warden",
            AttributeSet::zeroed().with(Attribute::CounterProtocols, counter),
        )
    }

    #[test]
    fn stance_and_loadout_multiply() {
        let plain = counter_chance(&defender(20.0)).value;
        assert!((plain - 20.0).abs() < 1e-9);

        let guarded = defender(20.0)
            .with_stance(Stance::Defensive)
            .with_loadout(Loadout::WeaponShield);
        // 20 × 1.15 × 1.10 = 25.3
        assert!((counter_chance(&guarded).value - 25.3).abs() < 1e-9);
    }

    #[test]
    fn capped_at_forty_percent() {
        assert_eq!(counter_chance(&defender(90.0)).value, MAX_COUNTER_CHANCE);
        assert_eq!(counter_chance(&defender(0.0)).value, 0.0);
    }
}
