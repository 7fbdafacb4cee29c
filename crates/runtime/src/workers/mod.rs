//! Blocking worker that runs a chunk of a series.
//!
//! The engine is synchronous and CPU-bound, so chunks run on tokio's blocking
//! pool instead of the async executor.

use std::sync::Arc;

use arena_core::{CombatantSnapshot, Simulator, SnapshotError};
use tracing::debug;

use crate::series::SeriesSummary;

/// Seeds one worker resolves against a shared pairing.
pub(crate) struct BattleChunk {
    pub index: usize,
    pub simulator: Arc<Simulator>,
    pub first: Arc<CombatantSnapshot>,
    pub second: Arc<CombatantSnapshot>,
    pub seeds: Vec<u64>,
}

pub(crate) fn run_chunk(chunk: BattleChunk) -> Result<SeriesSummary, SnapshotError> {
    debug!(worker = chunk.index, battles = chunk.seeds.len(), "worker chunk started");

    let mut summary = SeriesSummary::new(chunk.first.id, chunk.second.id, 0);
    for &seed in &chunk.seeds {
        let result = chunk.simulator.simulate(&chunk.first, &chunk.second, seed)?;
        summary.record(&result);
    }
    Ok(summary)
}
