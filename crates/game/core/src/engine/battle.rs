//! The tick loop.

use tracing::{debug, trace};

use crate::combat::{
    Chance, DamageSplit, FormulaBreakdown, apply_damage, base_damage, counter_chance,
    critical_chance, critical_multiplier, hit_chance,
};
use crate::combatant::{CombatantSnapshot, Hand};
use crate::config::EngineConfig;
use crate::env::{PcgRng, RngOracle, RollContext, RollStream};
use crate::error::SnapshotError;
use crate::state::CombatState;
use crate::stats::Attribute;

use super::cooldown::is_ready;
use super::events::{CombatEvent, EventKind, ResourceSnapshot, RollKind, RollRecord};
use super::regen::regenerate_shield;
use super::result::{BattleOutcome, CombatResult, CombatantSummary, TopAttack};

const VARIANCE: f64 = 10.0;

/// Runs battles with a fixed configuration and random oracle.
///
/// The simulator holds no per-battle state; one instance can be shared by any
/// number of threads.
#[derive(Clone, Debug)]
pub struct Simulator<R: RngOracle = PcgRng> {
    config: EngineConfig,
    rng: R,
}

impl Simulator<PcgRng> {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, PcgRng)
    }
}

impl Default for Simulator<PcgRng> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<R: RngOracle> Simulator<R> {
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve one battle between `first` and `second`.
    ///
    /// `seed` selects the random stream; equal inputs and seed replay the same
    /// battle. Fails only when a snapshot is invalid or both share an id.
    pub fn simulate(
        &self,
        first: &CombatantSnapshot,
        second: &CombatantSnapshot,
        seed: u64,
    ) -> Result<CombatResult, SnapshotError> {
        first.validate()?;
        second.validate()?;
        if first.id == second.id {
            return Err(SnapshotError::DuplicateCombatant { combatant: first.id });
        }

        Ok(Battle::new(&self.config, &self.rng, [first, second], seed).run())
    }
}

/// Resolve one battle with the default configuration and [`PcgRng`].
pub fn simulate(
    first: &CombatantSnapshot,
    second: &CombatantSnapshot,
    seed: u64,
) -> Result<CombatResult, SnapshotError> {
    Simulator::default().simulate(first, second, seed)
}

/// State of one battle in progress. Sides are indexed 0 (first) and 1.
struct Battle<'a, R: RngOracle + ?Sized> {
    config: &'a EngineConfig,
    combatants: [&'a CombatantSnapshot; 2],
    states: [CombatState; 2],
    rolls: RollStream<'a, R>,
    events: Vec<CombatEvent>,
    tick: u32,
}

impl<'a, R: RngOracle + ?Sized> Battle<'a, R> {
    fn new(
        config: &'a EngineConfig,
        rng: &'a R,
        combatants: [&'a CombatantSnapshot; 2],
        seed: u64,
    ) -> Self {
        Self {
            config,
            combatants,
            states: combatants.map(|snapshot| CombatState::new(snapshot, config)),
            rolls: RollStream::new(rng, seed),
            events: Vec::new(),
            tick: 0,
        }
    }

    fn run(mut self) -> CombatResult {
        debug!(
            first = %self.combatants[0].id,
            second = %self.combatants[1].id,
            max_ticks = self.config.max_ticks,
            "battle started"
        );

        let mut ending = None;
        while self.tick < self.config.max_ticks {
            self.tick += 1;
            self.regenerate_shields();
            for side in [0, 1] {
                self.try_attack(side, Hand::Main);
                self.try_attack(side, Hand::Offhand);
            }
            ending = self.check_termination();
            if ending.is_some() {
                break;
            }
        }

        let (outcome, winner) = match ending {
            Some((outcome, loser)) => (outcome, Some(other(loser))),
            None => {
                self.push_time_limit();
                (BattleOutcome::TimeExpired, None)
            }
        };
        self.finish(outcome, winner)
    }

    fn now(&self) -> f64 {
        self.config.timestamp(self.tick)
    }

    fn resources(&self) -> ResourceSnapshot {
        ResourceSnapshot::capture(&self.states)
    }

    fn regenerate_shields(&mut self) {
        let tick_seconds = self.config.tick_seconds();
        for side in [0, 1] {
            let snapshot = self.combatants[side];
            let state = &mut self.states[side];
            let gain = regenerate_shield(state, snapshot, tick_seconds);
            if gain > 0.0 && state.current_shield >= state.max_shield {
                let message = format!("{}'s shield is fully recharged", snapshot.name);
                let event = CombatEvent::new(
                    self.now(),
                    EventKind::ShieldRegen,
                    self.resources(),
                    message,
                )
                .about(snapshot.id);
                self.events.push(event);
            }
        }
    }

    fn try_attack(&mut self, side: usize, hand: Hand) {
        let state = &self.states[side];
        let (cooldown, last_attack) = match hand {
            Hand::Main => (Some(state.main_cooldown), state.last_main_attack),
            Hand::Offhand => (state.offhand_cooldown, state.last_offhand_attack),
        };
        let Some(cooldown) = cooldown else {
            return;
        };
        if !state.is_alive() || !self.states[other(side)].is_alive() {
            return;
        }

        let now = self.now();
        if !is_ready(now, last_attack, cooldown) {
            return;
        }

        let state = &mut self.states[side];
        match hand {
            Hand::Main => state.last_main_attack = now,
            Hand::Offhand => state.last_offhand_attack = now,
        }
        self.resolve_attack(side, hand);
    }

    /// Hit roll, critical roll, damage and a possible counter for one attack.
    fn resolve_attack(&mut self, side: usize, hand: Hand) {
        let target = other(side);
        let attacker = self.combatants[side];
        let defender = self.combatants[target];
        let actor = side as u32;

        let weapon = attacker.weapon(hand);
        let weapon_name = weapon.map_or(EngineConfig::UNARMED_NAME, |w| w.name.as_str());
        let weapon_base = weapon.map_or(self.config.unarmed_base_damage, |w| w.base_damage);

        let variance = self
            .rolls
            .uniform(actor, RollContext::HitVariance, -VARIANCE, VARIANCE);
        let hit = hit_chance(attacker, defender, hand, variance);
        let hit_roll = RollRecord::new(
            RollKind::Hit,
            &hit,
            self.rolls.uniform(actor, RollContext::HitRoll, 0.0, 100.0),
        );

        // Rolled on misses too so every attack leaves the same audit trail.
        let variance = self
            .rolls
            .uniform(actor, RollContext::CritVariance, -VARIANCE, VARIANCE);
        let crit = critical_chance(attacker, hand, variance);
        let crit_roll = RollRecord::new(
            RollKind::Critical,
            &crit,
            self.rolls.uniform(actor, RollContext::CritRoll, 0.0, 100.0),
        );

        if !hit_roll.success {
            trace!(attacker = %attacker.id, %hand, threshold = hit.value, "attack missed");
            let message = format!(
                "{} misses {} with {weapon_name}",
                attacker.name, defender.name
            );
            let event = CombatEvent::new(self.now(), EventKind::Miss, self.resources(), message)
                .between(attacker.id, defender.id)
                .with_weapon(weapon_name, hand)
                .with_breakdown(hit.breakdown)
                .with_rolls([hit_roll, crit_roll]);
            self.events.push(event);
            return;
        }

        let damage = base_damage(attacker, hand, weapon_base);
        let multiplier = if crit_roll.success {
            critical_multiplier(attacker, defender)
        } else {
            1.0
        };
        let raw = damage.result * multiplier;
        let penetration = attacker.effective(Attribute::Penetration, hand);
        let armor = defender.attribute(Attribute::ArmorPlating);

        let split = apply_damage(&mut self.states[target], raw, penetration, armor);
        self.states[side].record_attack(split.hp_damage, split.total());
        self.states[target].record_hit_taken(split.hp_damage);

        trace!(
            attacker = %attacker.id,
            %hand,
            critical = crit_roll.success,
            shield_damage = split.shield_damage,
            hp_damage = split.hp_damage,
            "attack landed"
        );

        let apply = mitigation_breakdown(raw, multiplier, penetration, armor, split);
        let mut stages = vec![("Hit", &hit.breakdown)];
        if crit_roll.success {
            stages.push(("Critical", &crit.breakdown));
        }
        stages.extend([("Damage", &damage), ("Apply", &apply)]);
        let breakdown = FormulaBreakdown::merge(stages, split.total());

        let (kind, message) = if crit_roll.success {
            (
                EventKind::Critical,
                format!(
                    "CRITICAL! {} deals {:.0} damage with {weapon_name} ({:.0} shield, {:.0} HP)",
                    attacker.name,
                    split.total(),
                    split.shield_damage,
                    split.hp_damage
                ),
            )
        } else {
            (
                EventKind::Attack,
                format!(
                    "{} hits {} with {weapon_name} for {:.0} damage ({:.0} shield, {:.0} HP)",
                    attacker.name,
                    defender.name,
                    split.total(),
                    split.shield_damage,
                    split.hp_damage
                ),
            )
        };
        let mut event = CombatEvent::new(self.now(), kind, self.resources(), message)
            .between(attacker.id, defender.id)
            .with_weapon(weapon_name, hand)
            .with_damage(split)
            .with_breakdown(breakdown)
            .with_rolls([hit_roll, crit_roll]);

        if !self.states[target].is_alive() {
            self.events.push(event);
            return;
        }

        let counter = counter_chance(defender);
        let counter_roll = RollRecord::new(
            RollKind::Counter,
            &counter,
            self.rolls
                .uniform(target as u32, RollContext::CounterRoll, 0.0, 100.0),
        );
        event.rolls.push(counter_roll);
        self.events.push(event);

        if counter_roll.success {
            self.counter_attack(target, counter);
        }
    }

    /// Main-hand riposte by `side` at a fraction of its base damage. Never
    /// critical.
    fn counter_attack(&mut self, side: usize, chance: Chance) {
        let target = other(side);
        let attacker = self.combatants[side];
        let defender = self.combatants[target];

        let weapon = attacker.weapon(Hand::Main);
        let weapon_name = weapon.map_or(EngineConfig::UNARMED_NAME, |w| w.name.as_str());
        let weapon_base = weapon.map_or(self.config.unarmed_base_damage, |w| w.base_damage);

        let damage = base_damage(attacker, Hand::Main, weapon_base);
        let raw = damage.result * EngineConfig::COUNTER_DAMAGE_RATIO;
        let penetration = attacker.effective(Attribute::Penetration, Hand::Main);
        let armor = defender.attribute(Attribute::ArmorPlating);

        let split = apply_damage(&mut self.states[target], raw, penetration, armor);
        self.states[side].record_attack(split.hp_damage, split.total());
        self.states[target].record_hit_taken(split.hp_damage);

        trace!(
            attacker = %attacker.id,
            hp_damage = split.hp_damage,
            "counter landed"
        );

        let apply = mitigation_breakdown(
            raw,
            EngineConfig::COUNTER_DAMAGE_RATIO,
            penetration,
            armor,
            split,
        );
        let breakdown = FormulaBreakdown::merge(
            [
                ("Counter", &chance.breakdown),
                ("Damage", &damage),
                ("Apply", &apply),
            ],
            split.total(),
        );
        let message = format!(
            "{} counters {} for {:.0} damage",
            attacker.name,
            defender.name,
            split.total()
        );
        let event = CombatEvent::new(self.now(), EventKind::Counter, self.resources(), message)
            .between(attacker.id, defender.id)
            .with_weapon(weapon_name, Hand::Main)
            .with_damage(split)
            .with_breakdown(breakdown);
        self.events.push(event);
    }

    /// Destruction of either side outranks a yield; the first side is
    /// checked first in each class. Returns the outcome and the losing side.
    fn check_termination(&mut self) -> Option<(BattleOutcome, usize)> {
        let (outcome, loser) = if let Some(side) = [0, 1]
            .into_iter()
            .find(|&side| !self.states[side].is_alive())
        {
            (BattleOutcome::Destroyed, side)
        } else {
            let side = [0, 1].into_iter().find(|&side| {
                self.states[side].should_yield(self.combatants[side].yield_threshold)
            })?;
            (BattleOutcome::Yielded, side)
        };

        let loser_snapshot = self.combatants[loser];
        let winner_snapshot = self.combatants[other(loser)];
        let (kind, message) = match outcome {
            BattleOutcome::Destroyed => (
                EventKind::Destroyed,
                format!(
                    "{} destroyed! {} wins!",
                    loser_snapshot.name, winner_snapshot.name
                ),
            ),
            _ => (
                EventKind::Yield,
                format!(
                    "{} yields at {:.0}% HP! {} wins!",
                    loser_snapshot.name,
                    self.states[loser].hp_percent(),
                    winner_snapshot.name
                ),
            ),
        };
        let event = CombatEvent::new(self.now(), kind, self.resources(), message)
            .about(loser_snapshot.id);
        self.events.push(event);

        Some((outcome, loser))
    }

    fn push_time_limit(&mut self) {
        let event = CombatEvent::new(
            self.now(),
            EventKind::Yield,
            self.resources(),
            "Time limit reached - draw!",
        );
        self.events.push(event);
    }

    fn finish(self, outcome: BattleOutcome, winner: Option<usize>) -> CombatResult {
        let winner = winner.map(|side| self.combatants[side].id);
        let duration = self.now();

        debug!(
            %outcome,
            winner = ?winner,
            duration,
            events = self.events.len(),
            draws = self.rolls.draws(),
            "battle finished"
        );

        CombatResult {
            winner,
            outcome,
            first: CombatantSummary::new(self.combatants[0], &self.states[0]),
            second: CombatantSummary::new(self.combatants[1], &self.states[1]),
            duration,
            is_draw: winner.is_none(),
            top_attack: TopAttack::from_states(&self.states),
            events: self.events,
        }
    }
}

#[inline]
fn other(side: usize) -> usize {
    1 - side
}

fn mitigation_breakdown(
    raw: f64,
    multiplier: f64,
    penetration: f64,
    armor: f64,
    split: DamageSplit,
) -> FormulaBreakdown {
    let armor_reduction = armor * (1.0 - penetration / 100.0);
    FormulaBreakdown::new(
        format!(
            "{raw:.1} raw ({multiplier:.2}×) → {:.1} shield + {:.1} HP after {armor_reduction:.1} armor",
            split.shield_damage, split.hp_damage
        ),
        split.total(),
    )
    .with("raw_damage", raw)
    .with("damage_multiplier", multiplier)
    .with("penetration", penetration)
    .with("armor_reduction", armor_reduction)
    .with("shield_damage", split.shield_damage)
    .with("hp_damage", split.hp_damage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{CombatantId, Weapon};
    use crate::stats::AttributeSet;

    fn fighter(id: u32) -> CombatantSnapshot {
        CombatantSnapshot::new(CombatantId(id), format!("Unit {id}"), AttributeSet::uniform(10.0))
            .with_main_weapon(Weapon::new("Blade", 15.0).with_cooldown(2.0))
    }

    #[test]
    fn rejects_shared_identity() {
        let err = simulate(&fighter(1), &fighter(1), 0).unwrap_err();
        assert_eq!(
            err,
            SnapshotError::DuplicateCombatant {
                combatant: CombatantId(1)
            }
        );
    }

    #[test]
    fn rejects_invalid_snapshot_before_running() {
        let broken = fighter(2).with_hp(150.0, 100.0);
        assert!(matches!(
            simulate(&fighter(1), &broken, 0),
            Err(SnapshotError::HpOutOfRange { .. })
        ));
    }

    #[test]
    fn same_seed_replays_same_battle() {
        let a = simulate(&fighter(1), &fighter(2), 99).unwrap();
        let b = simulate(&fighter(1), &fighter(2), 99).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_tick_budget_is_an_immediate_draw() {
        let config = EngineConfig {
            max_ticks: 0,
            ..EngineConfig::default()
        };
        let result = Simulator::new(config)
            .simulate(&fighter(1), &fighter(2), 0)
            .unwrap();
        assert!(result.is_draw);
        assert_eq!(result.duration, 0.0);
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.outcome, BattleOutcome::TimeExpired);
    }
}
