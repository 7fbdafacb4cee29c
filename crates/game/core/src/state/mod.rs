//! Mutable per-combatant battle state.
//!
//! One [`CombatState`] exists per combatant for the duration of a single
//! simulation. The loop owns both exclusively and lends them by `&mut` to the
//! update functions in [`combat`](crate::combat) and [`engine`](crate::engine);
//! nothing else aliases them.

use crate::combatant::{CombatantId, CombatantSnapshot, Hand};
use crate::config::EngineConfig;
use crate::engine::cooldown::resolved_cooldown;

/// Resources, timers and running totals of one combatant.
///
/// Invariants: `0 <= current_hp <= max_hp` and
/// `0 <= current_shield <= max_shield`. Cooldowns are resolved once at battle
/// start and never change.
#[derive(Clone, Debug, PartialEq)]
pub struct CombatState {
    pub id: CombatantId,
    pub current_hp: f64,
    pub max_hp: f64,
    pub current_shield: f64,
    pub max_shield: f64,
    pub last_main_attack: f64,
    pub last_offhand_attack: f64,
    pub main_cooldown: f64,
    /// `None` when the combatant never attacks with its off-hand.
    pub offhand_cooldown: Option<f64>,
    pub damage_dealt: f64,
    pub damage_taken: f64,
    /// Largest shield + HP damage of a single attack this combatant made.
    pub max_attack_damage: f64,
}

impl CombatState {
    pub fn new(snapshot: &CombatantSnapshot, config: &EngineConfig) -> Self {
        let offhand_cooldown = snapshot
            .attacks_with_offhand()
            .then(|| resolved_cooldown(snapshot, Hand::Offhand, config));

        Self {
            id: snapshot.id,
            current_hp: snapshot.current_hp,
            max_hp: snapshot.max_hp,
            current_shield: snapshot.current_shield,
            max_shield: snapshot.max_shield,
            last_main_attack: 0.0,
            last_offhand_attack: 0.0,
            main_cooldown: resolved_cooldown(snapshot, Hand::Main, config),
            offhand_cooldown,
            damage_dealt: 0.0,
            damage_taken: 0.0,
            max_attack_damage: 0.0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }

    pub fn hp_percent(&self) -> f64 {
        self.current_hp / self.max_hp * 100.0
    }

    /// Whether the combatant concedes: `0 < hp% <= threshold`.
    pub fn should_yield(&self, threshold: f64) -> bool {
        let percent = self.hp_percent();
        percent > 0.0 && percent <= threshold
    }

    /// Book an attack this combatant landed.
    pub fn record_attack(&mut self, hp_damage: f64, total_damage: f64) {
        self.damage_dealt += hp_damage;
        self.max_attack_damage = self.max_attack_damage.max(total_damage);
    }

    /// Book HP damage this combatant received.
    pub fn record_hit_taken(&mut self, hp_damage: f64) {
        self.damage_taken += hp_damage;
    }
}
