//! Runtime configuration.

use std::env;
use std::thread;

use arena_core::EngineConfig;

/// Settings of a [`SeriesRunner`](crate::SeriesRunner).
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub engine: EngineConfig,
    /// Number of blocking worker tasks a series is split across.
    pub workers: usize,
    /// Seed the per-battle seeds derive from; random when unset.
    pub base_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            workers: thread::available_parallelism().map_or(1, usize::from),
            base_seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by environment variables.
    ///
    /// - `ARENA_WORKERS`: worker task count
    /// - `ARENA_SEED`: base seed for reproducible series
    /// - `ARENA_MAX_DURATION`: battle time limit in seconds
    ///
    /// Unparseable values are ignored, as are time limits whose tick count
    /// overflows the engine's tick budget.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(workers) = parse::<usize>(lookup("ARENA_WORKERS")) {
            config.workers = workers.max(1);
        }
        config.base_seed = parse(lookup("ARENA_SEED"));
        if let Some(engine) = parse::<u32>(lookup("ARENA_MAX_DURATION"))
            .and_then(|seconds| config.engine.clone().checked_max_duration(seconds))
        {
            config.engine = engine;
        }

        config
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    #[must_use]
    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn reads_overrides() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("ARENA_WORKERS", "3"),
            ("ARENA_SEED", " 42 "),
            ("ARENA_MAX_DURATION", "30"),
        ]));

        assert_eq!(config.workers, 3);
        assert_eq!(config.base_seed, Some(42));
        assert_eq!(config.engine.max_ticks, 300);
    }

    #[test]
    fn ignores_garbage_and_zero_workers() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("ARENA_WORKERS", "0"),
            ("ARENA_SEED", "soon"),
        ]));

        assert_eq!(config.workers, 1);
        assert_eq!(config.base_seed, None);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn ignores_duration_beyond_tick_budget() {
        let config = RuntimeConfig::from_lookup(lookup(&[("ARENA_MAX_DURATION", "500000000")]));
        assert_eq!(config.engine, EngineConfig::default());
    }
}
