//! Per-hand attack cooldowns.

use crate::combatant::{CombatantSnapshot, Hand};
use crate::config::EngineConfig;
use crate::stats::Attribute;

/// Tolerance for comparing elapsed tick time against cooldowns.
const TIME_EPSILON: f64 = 1e-9;

/// Seconds between two attacks from `hand`.
///
/// # Formula
///
/// ```text
/// cooldown = weapon_cooldown (or default) × offhand_penalty / (1 + attack_speed / 50)
/// ```
///
/// Attack speed includes the bonus of the weapon in `hand`; the off-hand
/// penalty is 1.4 and applies only to off-hand attacks.
pub fn resolved_cooldown(combatant: &CombatantSnapshot, hand: Hand, config: &EngineConfig) -> f64 {
    let weapon_cooldown = combatant
        .weapon(hand)
        .and_then(|weapon| weapon.cooldown)
        .unwrap_or(config.default_cooldown);
    let penalty = match hand {
        Hand::Main => 1.0,
        Hand::Offhand => EngineConfig::OFFHAND_COOLDOWN_PENALTY,
    };
    // Negative weapon bonuses may not push attack speed below zero.
    let speed = 1.0 + combatant.effective(Attribute::AttackSpeed, hand).max(0.0) / 50.0;

    weapon_cooldown * penalty / speed
}

/// Whether a hand whose last attack was at `last_attack` may fire at `now`.
#[inline]
pub fn is_ready(now: f64, last_attack: f64, cooldown: f64) -> bool {
    now - last_attack + TIME_EPSILON >= cooldown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{CombatantId, Loadout, Weapon};
    use crate::stats::{AttributeSet, WeaponBonuses};

    #[test]
    fn default_cooldown_scaled_by_attack_speed() {
        let config = EngineConfig::default();
        let c = CombatantSnapshot::new(
            CombatantId(1),
            "Quick",
            AttributeSet::zeroed().with(Attribute::AttackSpeed, 50.0),
        );
        assert_eq!(resolved_cooldown(&c, Hand::Main, &config), 2.0);
    }

    #[test]
    fn offhand_penalty_and_weapon_bonus() {
        let config = EngineConfig::default();
        let knife = Weapon::new("Knife", 6.0)
            .with_cooldown(3.0)
            .with_bonuses(WeaponBonuses::new().with(Attribute::AttackSpeed, 25.0));
        let c = CombatantSnapshot::new(
            CombatantId(1),
            "Twin",
            AttributeSet::zeroed().with(Attribute::AttackSpeed, 25.0),
        )
        .with_loadout(Loadout::DualWield)
        .with_offhand_weapon(knife);

        // 3.0 × 1.4 / (1 + 50 / 50) = 2.1
        assert!((resolved_cooldown(&c, Hand::Offhand, &config) - 2.1).abs() < 1e-9);
        // main hand is empty: 4.0 / (1 + 25 / 50)
        assert!((resolved_cooldown(&c, Hand::Main, &config) - 4.0 / 1.5).abs() < 1e-9);
    }

    #[test]
    fn readiness_tolerates_float_noise() {
        assert!(is_ready(2.4, 1.2, 1.2000000000000002));
        assert!(!is_ready(2.3, 1.2, 1.2));
    }
}
