//! Battle series: many seeded battles of one pairing.

use std::sync::Arc;

use arena_core::{
    BattleOutcome, CombatResult, CombatantId, CombatantSnapshot, SnapshotError, Simulator,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::workers::{BattleChunk, run_chunk};

/// Aggregated outcome of a series.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesSummary {
    pub first: CombatantId,
    pub second: CombatantId,
    /// Seed every battle seed of the series was derived from.
    pub base_seed: u64,
    pub battles: u32,
    pub first_wins: u32,
    pub second_wins: u32,
    pub draws: u32,
    pub destroyed: u32,
    pub yielded: u32,
    /// Sum of battle durations in seconds.
    pub total_duration: f64,
}

impl SeriesSummary {
    pub fn new(first: CombatantId, second: CombatantId, base_seed: u64) -> Self {
        Self {
            first,
            second,
            base_seed,
            battles: 0,
            first_wins: 0,
            second_wins: 0,
            draws: 0,
            destroyed: 0,
            yielded: 0,
            total_duration: 0.0,
        }
    }

    pub fn record(&mut self, result: &CombatResult) {
        self.battles += 1;
        self.total_duration += result.duration;

        match result.winner {
            Some(id) if id == self.first => self.first_wins += 1,
            Some(_) => self.second_wins += 1,
            None => self.draws += 1,
        }
        match result.outcome {
            BattleOutcome::Destroyed => self.destroyed += 1,
            BattleOutcome::Yielded => self.yielded += 1,
            BattleOutcome::TimeExpired => {}
        }
    }

    /// Fold another partial summary of the same pairing into this one.
    pub fn merge(&mut self, other: &SeriesSummary) {
        self.battles += other.battles;
        self.first_wins += other.first_wins;
        self.second_wins += other.second_wins;
        self.draws += other.draws;
        self.destroyed += other.destroyed;
        self.yielded += other.yielded;
        self.total_duration += other.total_duration;
    }

    pub fn decisive(&self) -> u32 {
        self.first_wins + self.second_wins
    }

    /// Share of decisive battles won by the first combatant.
    pub fn first_win_rate(&self) -> Option<f64> {
        let decisive = self.decisive();
        (decisive > 0).then(|| f64::from(self.first_wins) / f64::from(decisive))
    }

    pub fn mean_duration(&self) -> Option<f64> {
        (self.battles > 0).then(|| self.total_duration / f64::from(self.battles))
    }
}

/// Runs battles on blocking worker tasks.
#[derive(Clone, Debug)]
pub struct SeriesRunner {
    config: RuntimeConfig,
    simulator: Arc<Simulator>,
}

impl SeriesRunner {
    pub fn new(config: RuntimeConfig) -> Self {
        let simulator = Arc::new(Simulator::new(config.engine.clone()));
        Self { config, simulator }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Run a single battle off the async executor.
    pub async fn battle(
        &self,
        first: &CombatantSnapshot,
        second: &CombatantSnapshot,
        seed: u64,
    ) -> Result<CombatResult> {
        let simulator = Arc::clone(&self.simulator);
        let (first, second) = (first.clone(), second.clone());

        let result = tokio::task::spawn_blocking(move || simulator.simulate(&first, &second, seed))
            .await
            .map_err(RuntimeError::WorkerJoin)??;
        Ok(result)
    }

    /// Run `battles` battles of `first` against `second`.
    ///
    /// Battle seeds derive from the configured base seed (or a random one),
    /// so a series with a fixed base seed is reproducible regardless of the
    /// worker count.
    pub async fn run(
        &self,
        first: &CombatantSnapshot,
        second: &CombatantSnapshot,
        battles: u32,
    ) -> Result<SeriesSummary> {
        if battles == 0 {
            return Err(RuntimeError::EmptySeries);
        }
        first.validate()?;
        second.validate()?;
        if first.id == second.id {
            return Err(SnapshotError::DuplicateCombatant { combatant: first.id }.into());
        }

        let base_seed = self.config.base_seed.unwrap_or_else(rand::random);
        let seeds = derive_seeds(base_seed, battles);
        let workers = self.config.workers.clamp(1, seeds.len());
        let chunk_size = seeds.len().div_ceil(workers);

        info!(
            first = %first.id,
            second = %second.id,
            battles,
            workers,
            base_seed,
            "series started"
        );

        let first = Arc::new(first.clone());
        let second = Arc::new(second.clone());
        let mut tasks = JoinSet::new();
        for (index, seeds) in seeds.chunks(chunk_size).enumerate() {
            let chunk = BattleChunk {
                index,
                simulator: Arc::clone(&self.simulator),
                first: Arc::clone(&first),
                second: Arc::clone(&second),
                seeds: seeds.to_vec(),
            };
            tasks.spawn_blocking(move || run_chunk(chunk));
        }

        let mut summary = SeriesSummary::new(first.id, second.id, base_seed);
        while let Some(joined) = tasks.join_next().await {
            let partial = joined.map_err(RuntimeError::WorkerJoin)??;
            debug!(battles = partial.battles, "worker chunk merged");
            summary.merge(&partial);
        }

        info!(
            first_wins = summary.first_wins,
            second_wins = summary.second_wins,
            draws = summary.draws,
            "series finished"
        );
        Ok(summary)
    }
}

/// Per-battle seeds drawn from a generator seeded with `base_seed`.
fn derive_seeds(base_seed: u64, battles: u32) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(base_seed);
    (0..battles).map(|_| rng.next_u64()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_seeds_are_reproducible() {
        assert_eq!(derive_seeds(9, 16), derive_seeds(9, 16));
        assert_ne!(derive_seeds(9, 16), derive_seeds(10, 16));
        assert_eq!(derive_seeds(9, 0).len(), 0);
    }

    #[test]
    fn summary_merge_adds_counts() {
        let mut a = SeriesSummary::new(CombatantId(1), CombatantId(2), 0);
        a.battles = 3;
        a.first_wins = 2;
        a.draws = 1;
        a.total_duration = 90.0;
        let mut b = SeriesSummary::new(CombatantId(1), CombatantId(2), 0);
        b.battles = 1;
        b.second_wins = 1;
        b.total_duration = 30.0;

        a.merge(&b);
        assert_eq!(a.battles, 4);
        assert_eq!(a.decisive(), 3);
        assert_eq!(a.first_win_rate(), Some(2.0 / 3.0));
        assert_eq!(a.mean_duration(), Some(30.0));
    }
}
