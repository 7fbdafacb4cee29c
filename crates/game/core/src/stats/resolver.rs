//! Per-hand effective attribute resolution.

use crate::combatant::{CombatantSnapshot, Hand};

use super::Attribute;

/// Combine a base attribute value with the bonus of the weapon in `hand`.
///
/// Returns `base` unchanged when the hand is empty or the weapon carries no
/// bonus for `field`; otherwise `base + bonus`.
pub fn effective(combatant: &CombatantSnapshot, base: f64, hand: Hand, field: Attribute) -> f64 {
    match combatant.weapon(hand).and_then(|weapon| weapon.bonuses.get(field)) {
        Some(bonus) => base + bonus,
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{CombatantId, Weapon};
    use crate::stats::{AttributeSet, WeaponBonuses};

    fn combatant() -> CombatantSnapshot {
        let rifle = Weapon::new("Rifle", 18.0)
            .with_bonuses(WeaponBonuses::new().with(Attribute::TargetingSystems, 6.0));
        CombatantSnapshot::new(CombatantId(1), "Sentinel", AttributeSet::uniform(10.0))
            .with_main_weapon(rifle)
    }

    #[test]
    fn adds_bonus_of_weapon_in_hand() {
        let c = combatant();
        assert_eq!(
            effective(&c, 10.0, Hand::Main, Attribute::TargetingSystems),
            16.0
        );
    }

    #[test]
    fn base_unchanged_without_bonus_or_weapon() {
        let c = combatant();
        assert_eq!(effective(&c, 10.0, Hand::Main, Attribute::CombatPower), 10.0);
        assert_eq!(
            effective(&c, 10.0, Hand::Offhand, Attribute::TargetingSystems),
            10.0
        );
    }
}
