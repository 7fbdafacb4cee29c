//! Damage calculation and application.

use crate::combatant::{CombatantSnapshot, Hand, Loadout, Stance};
use crate::state::CombatState;
use crate::stats::Attribute;

use super::FormulaBreakdown;

pub const TWO_HANDED_DAMAGE_MULTIPLIER: f64 = 1.25;
pub const DUAL_WIELD_DAMAGE_MULTIPLIER: f64 = 0.90;
pub const OFFENSIVE_DAMAGE_MULTIPLIER: f64 = 1.15;
pub const DEFENSIVE_DAMAGE_MULTIPLIER: f64 = 0.90;

pub const TWO_HANDED_CRIT_BASE: f64 = 2.5;
pub const DEFAULT_CRIT_BASE: f64 = 2.0;
pub const MIN_CRIT_MULTIPLIER: f64 = 1.2;

/// Smallest HP loss of any attack that reaches HP.
pub const MIN_HP_DAMAGE: f64 = 1.0;

pub const fn loadout_damage_multiplier(loadout: Loadout) -> f64 {
    match loadout {
        Loadout::TwoHanded => TWO_HANDED_DAMAGE_MULTIPLIER,
        Loadout::DualWield => DUAL_WIELD_DAMAGE_MULTIPLIER,
        Loadout::Single | Loadout::WeaponShield => 1.0,
    }
}

pub const fn stance_damage_multiplier(stance: Stance) -> f64 {
    match stance {
        Stance::Offensive => OFFENSIVE_DAMAGE_MULTIPLIER,
        Stance::Defensive => DEFENSIVE_DAMAGE_MULTIPLIER,
        Stance::Balanced => 1.0,
    }
}

/// Calculate the damage of an attack before criticals and mitigation.
///
/// # Formula
///
/// ```text
/// damage = weapon_base
///        × (1 + combat_power × 1.5 / 100)
///        × loadout_mult
///        × (1 + weapon_control / 100)
///        × stance_mult
/// ```
///
/// Combat power and weapon control include the bonus of the weapon in `hand`.
/// `weapon_base` is the base damage of that weapon (or the unarmed fallback).
pub fn base_damage(attacker: &CombatantSnapshot, hand: Hand, weapon_base: f64) -> FormulaBreakdown {
    let power = 1.0 + attacker.effective(Attribute::CombatPower, hand) * 1.5 / 100.0;
    let loadout = loadout_damage_multiplier(attacker.loadout);
    let control = 1.0 + attacker.effective(Attribute::WeaponControl, hand) / 100.0;
    let stance = stance_damage_multiplier(attacker.stance);

    let damage = weapon_base * power * loadout * control * stance;

    FormulaBreakdown::new(
        format!(
            "{weapon_base:.1} weapon × {power:.2} combat_power × {loadout:.2} loadout × {control:.2} weapon_control × {stance:.2} stance"
        ),
        damage,
    )
    .with("weapon_base", weapon_base)
    .with("combat_power", power)
    .with("loadout", loadout)
    .with("weapon_control", control)
    .with("damage_stance", stance)
}

/// Multiplier applied to a critical hit.
///
/// `crit_base(loadout) - dampeners / 100`, never below 1.2. The crit base is
/// 2.5 for two-handed attackers and 2.0 otherwise.
pub fn critical_multiplier(attacker: &CombatantSnapshot, defender: &CombatantSnapshot) -> f64 {
    let crit_base = if attacker.loadout == Loadout::TwoHanded {
        TWO_HANDED_CRIT_BASE
    } else {
        DEFAULT_CRIT_BASE
    };
    (crit_base - defender.attribute(Attribute::DamageDampeners) / 100.0).max(MIN_CRIT_MULTIPLIER)
}

/// How an attack's damage was split between shield and HP.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageSplit {
    pub shield_damage: f64,
    pub hp_damage: f64,
}

impl DamageSplit {
    pub fn total(&self) -> f64 {
        self.shield_damage + self.hp_damage
    }
}

/// Apply `damage` to the defender through shield and armor.
///
/// # Formula
///
/// ```text
/// pen_mult        = 1 + penetration / 200
/// armor_reduction = armor × (1 - penetration / 100)
///
/// with shield:
///     shield_damage = min(damage × pen_mult, shield)
///     bleed         = max(0, damage × pen_mult - shield_damage)
///     hp_damage     = bleed > 0 ? max(1, bleed - armor_reduction) : 0
/// without shield:
///     hp_damage     = max(1, damage - armor_reduction)
/// ```
///
/// Armor reduction is uncapped. Negative weapon bonuses can push `damage`
/// or `pen_mult` below zero; both are floored at zero so an attack never
/// restores shield. The defender's HP is clamped at zero; the returned split
/// reports the computed damage components.
pub fn apply_damage(
    defender: &mut CombatState,
    damage: f64,
    penetration: f64,
    armor: f64,
) -> DamageSplit {
    let damage = damage.max(0.0);
    let armor_reduction = armor * (1.0 - penetration / 100.0);

    let split = if defender.current_shield > 0.0 {
        let penetrating = (damage * (1.0 + penetration / 200.0)).max(0.0);
        let shield_damage = penetrating.min(defender.current_shield);
        defender.current_shield -= shield_damage;

        let bleed_through = (penetrating - shield_damage).max(0.0);
        let hp_damage = if bleed_through > 0.0 {
            (bleed_through - armor_reduction).max(MIN_HP_DAMAGE)
        } else {
            0.0
        };
        DamageSplit {
            shield_damage,
            hp_damage,
        }
    } else {
        DamageSplit {
            shield_damage: 0.0,
            hp_damage: (damage - armor_reduction).max(MIN_HP_DAMAGE),
        }
    };

    defender.current_hp = (defender.current_hp - split.hp_damage).max(0.0);
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::CombatantId;
    use crate::config::EngineConfig;
    use crate::stats::AttributeSet;

    fn approx_eq(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
    }

    fn state(hp: f64, shield: f64) -> CombatState {
        let snapshot = CombatantSnapshot::new(CombatantId(1), "Target", AttributeSet::zeroed())
            .with_hp(hp, hp.max(1.0))
            .with_shield(shield, shield);
        CombatState::new(&snapshot, &EngineConfig::default())
    }

    #[test]
    fn base_damage_multiplies_every_term() {
        let attacker = CombatantSnapshot::new(
            CombatantId(1),
            "Brute",
            AttributeSet::zeroed()
                .with(Attribute::CombatPower, 20.0)
                .with(Attribute::WeaponControl, 10.0),
        )
        .with_loadout(Loadout::TwoHanded)
        .with_stance(Stance::Offensive);

        // 20 × 1.3 × 1.25 × 1.1 × 1.15 = 41.1125
        let breakdown = base_damage(&attacker, Hand::Main, 20.0);
        approx_eq(breakdown.result, 41.1125);
        approx_eq(breakdown.component("combat_power").unwrap(), 1.3);
    }

    #[test]
    fn critical_multiplier_respects_floor() {
        let two_handed = CombatantSnapshot::new(CombatantId(1), "A", AttributeSet::zeroed())
            .with_loadout(Loadout::TwoHanded);
        let soft = CombatantSnapshot::new(
            CombatantId(2),
            "B",
            AttributeSet::zeroed().with(Attribute::DamageDampeners, 30.0),
        );
        let padded = CombatantSnapshot::new(
            CombatantId(3),
            "C",
            AttributeSet::zeroed().with(Attribute::DamageDampeners, 200.0),
        );

        approx_eq(critical_multiplier(&two_handed, &soft), 2.2);
        approx_eq(critical_multiplier(&soft, &two_handed), 2.0);
        approx_eq(critical_multiplier(&two_handed, &padded), MIN_CRIT_MULTIPLIER);
    }

    #[test]
    fn shield_absorbs_everything_below_capacity() {
        let mut defender = state(100.0, 50.0);
        let split = apply_damage(&mut defender, 30.0, 0.0, 0.0);

        approx_eq(split.shield_damage, 30.0);
        approx_eq(split.hp_damage, 0.0);
        approx_eq(defender.current_shield, 20.0);
        approx_eq(defender.current_hp, 100.0);
    }

    #[test]
    fn bleed_through_is_reduced_by_armor() {
        let mut defender = state(100.0, 10.0);
        // penetrating = 40 × 1.1 = 44; bleed = 34; armor = 10 × 0.8 = 8
        let split = apply_damage(&mut defender, 40.0, 20.0, 10.0);

        approx_eq(split.shield_damage, 10.0);
        approx_eq(split.hp_damage, 26.0);
        approx_eq(defender.current_shield, 0.0);
        approx_eq(defender.current_hp, 74.0);
    }

    #[test]
    fn unshielded_hits_deal_at_least_one() {
        let mut defender = state(100.0, 0.0);
        let split = apply_damage(&mut defender, 5.0, 0.0, 50.0);
        approx_eq(split.hp_damage, MIN_HP_DAMAGE);
        approx_eq(defender.current_hp, 99.0);

        let split = apply_damage(&mut defender, 25.0, 0.0, 0.0);
        approx_eq(split.hp_damage, 25.0);
        approx_eq(defender.current_hp, 74.0);
    }

    #[test]
    fn negative_penetration_never_restores_shield() {
        let mut defender = state(100.0, 50.0);
        // pen_mult = 1 - 400 / 200 = -1
        let split = apply_damage(&mut defender, 20.0, -400.0, 0.0);

        approx_eq(split.shield_damage, 0.0);
        approx_eq(split.hp_damage, 0.0);
        approx_eq(defender.current_shield, 50.0);
        approx_eq(defender.current_hp, 100.0);
    }

    #[test]
    fn negative_damage_is_floored() {
        let mut shielded = state(100.0, 50.0);
        let split = apply_damage(&mut shielded, -30.0, 0.0, 0.0);
        approx_eq(split.shield_damage, 0.0);
        approx_eq(shielded.current_shield, 50.0);

        let mut bare = state(100.0, 0.0);
        let split = apply_damage(&mut bare, -30.0, 0.0, 0.0);
        approx_eq(split.hp_damage, MIN_HP_DAMAGE);
        approx_eq(bare.current_hp, 99.0);
    }

    #[test]
    fn hp_never_drops_below_zero() {
        let mut defender = state(10.0, 0.0);
        let split = apply_damage(&mut defender, 500.0, 0.0, 0.0);
        approx_eq(split.hp_damage, 500.0);
        assert_eq!(defender.current_hp, 0.0);
    }
}
