//! Hit and critical chance calculations.

use crate::combatant::{CombatantSnapshot, Hand, Loadout, Stance};
use crate::stats::Attribute;

use super::{Chance, FormulaBreakdown};

/// Base hit chance of main-hand attacks.
pub const MAIN_HAND_BASE_HIT: f64 = 70.0;
/// Base hit chance of off-hand attacks.
pub const OFFHAND_BASE_HIT: f64 = 50.0;
pub const OFFENSIVE_HIT_BONUS: f64 = 5.0;
pub const MIN_HIT_CHANCE: f64 = 10.0;
pub const MAX_HIT_CHANCE: f64 = 95.0;

pub const BASE_CRIT_CHANCE: f64 = 5.0;
pub const TWO_HANDED_CRIT_BONUS: f64 = 10.0;
pub const MIN_CRIT_CHANCE: f64 = 0.0;
pub const MAX_CRIT_CHANCE: f64 = 50.0;

/// Calculate the chance (percent) that an attack from `hand` hits.
///
/// # Formula
///
/// ```text
/// hit = base(hand) + targeting / 2 + offensive_bonus
///       - evasion / 3 - gyro / 5 + variance
/// clamped to [10, 95]
/// ```
///
/// `targeting` includes the bonus of the weapon in `hand`; the defender's
/// evasion and gyro stabilizers are base attributes. `variance` is a uniform
/// draw in `[-10, 10]` supplied by the caller.
pub fn hit_chance(
    attacker: &CombatantSnapshot,
    defender: &CombatantSnapshot,
    hand: Hand,
    variance: f64,
) -> Chance {
    let base = match hand {
        Hand::Main => MAIN_HAND_BASE_HIT,
        Hand::Offhand => OFFHAND_BASE_HIT,
    };
    let targeting = attacker.effective(Attribute::TargetingSystems, hand) / 2.0;
    let stance = if attacker.stance == Stance::Offensive {
        OFFENSIVE_HIT_BONUS
    } else {
        0.0
    };
    let evasion = defender.attribute(Attribute::EvasionThrusters) / 3.0;
    let gyro = defender.attribute(Attribute::GyroStabilizers) / 5.0;

    let value = (base + targeting + stance - evasion - gyro + variance)
        .clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE);

    Chance {
        value,
        breakdown: FormulaBreakdown::new(
            format!(
                "{base:.0} base + {targeting:.1} targeting + {stance:.0} stance - {evasion:.1} evasion - {gyro:.1} gyro + {variance:.1} variance"
            ),
            value,
        )
        .with("base", base)
        .with("targeting", targeting)
        .with("stance", stance)
        .with("evasion", -evasion)
        .with("gyro", -gyro)
        .with("variance", variance),
    }
}

/// Calculate the chance (percent) that an attack from `hand` is critical.
///
/// # Formula
///
/// ```text
/// crit = 5 + critical_systems / 8 + targeting / 25 + two_handed_bonus + variance
/// clamped to [0, 50]
/// ```
pub fn critical_chance(attacker: &CombatantSnapshot, hand: Hand, variance: f64) -> Chance {
    let critical = attacker.effective(Attribute::CriticalSystems, hand) / 8.0;
    let targeting = attacker.effective(Attribute::TargetingSystems, hand) / 25.0;
    let loadout = if attacker.loadout == Loadout::TwoHanded {
        TWO_HANDED_CRIT_BONUS
    } else {
        0.0
    };

    let value = (BASE_CRIT_CHANCE + critical + targeting + loadout + variance)
        .clamp(MIN_CRIT_CHANCE, MAX_CRIT_CHANCE);

    Chance {
        value,
        breakdown: FormulaBreakdown::new(
            format!(
                "{BASE_CRIT_CHANCE:.0} base + {critical:.1} critical_systems + {targeting:.1} targeting + {loadout:.0} loadout + {variance:.1} variance"
            ),
            value,
        )
        .with("crit_base", BASE_CRIT_CHANCE)
        .with("critical_systems", critical)
        .with("crit_targeting", targeting)
        .with("crit_loadout", loadout)
        .with("crit_variance", variance),
    }
}
