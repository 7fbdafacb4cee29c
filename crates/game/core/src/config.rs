/// Engine timing constants and tunable balance parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Simulation ticks per second of battle time.
    pub ticks_per_second: u32,
    /// Tick budget; the battle is a draw once it is exhausted.
    pub max_ticks: u32,
    /// Cooldown (seconds) for weapons that do not declare one.
    pub default_cooldown: f64,
    /// Base damage of the fallback used when a hand has no weapon.
    pub unarmed_base_damage: f64,
}

impl EngineConfig {
    // ===== compile-time constants =====
    /// Name reported for attacks made without a weapon.
    pub const UNARMED_NAME: &'static str = "Unarmed";
    /// Share of the counter-attacker's base damage dealt by a counter.
    pub const COUNTER_DAMAGE_RATIO: f64 = 0.7;
    /// Cooldown stretch applied to off-hand attacks.
    pub const OFFHAND_COOLDOWN_PENALTY: f64 = 1.4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICKS_PER_SECOND: u32 = 10;
    pub const DEFAULT_MAX_DURATION_SECS: u32 = 120;
    pub const DEFAULT_COOLDOWN: f64 = 4.0;
    pub const DEFAULT_UNARMED_BASE_DAMAGE: f64 = 20.0;

    pub fn new() -> Self {
        Self {
            ticks_per_second: Self::DEFAULT_TICKS_PER_SECOND,
            max_ticks: Self::DEFAULT_TICKS_PER_SECOND * Self::DEFAULT_MAX_DURATION_SECS,
            default_cooldown: Self::DEFAULT_COOLDOWN,
            unarmed_base_damage: Self::DEFAULT_UNARMED_BASE_DAMAGE,
        }
    }

    /// Replace the battle time limit, keeping the tick rate.
    ///
    /// The tick budget saturates at `u32::MAX`.
    pub fn with_max_duration(mut self, seconds: u32) -> Self {
        self.max_ticks = self.ticks_per_second.max(1).saturating_mul(seconds);
        self
    }

    /// Like [`with_max_duration`](Self::with_max_duration), but `None` when
    /// the tick budget does not fit in a `u32`.
    pub fn checked_max_duration(self, seconds: u32) -> Option<Self> {
        let max_ticks = self.ticks_per_second.max(1).checked_mul(seconds)?;
        Some(Self { max_ticks, ..self })
    }

    /// Length of one tick in seconds.
    pub fn tick_seconds(&self) -> f64 {
        1.0 / f64::from(self.ticks_per_second.max(1))
    }

    /// Battle time at the end of `tick`, in seconds.
    ///
    /// Derived from the integer tick count so timestamps stay tick-aligned
    /// instead of accumulating float error.
    pub fn timestamp(&self, tick: u32) -> f64 {
        f64::from(tick) / f64::from(self.ticks_per_second.max(1))
    }

    pub fn max_duration(&self) -> f64 {
        self.timestamp(self.max_ticks)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_arena_rules() {
        let config = EngineConfig::default();
        assert_eq!(config.max_ticks, 1200);
        assert_eq!(config.max_duration(), 120.0);
        assert!((config.tick_seconds() - 0.1).abs() < 1e-12);
        assert_eq!(config.timestamp(3), 0.3);
    }

    #[test]
    fn max_duration_override_keeps_tick_rate() {
        let config = EngineConfig::default().with_max_duration(30);
        assert_eq!(config.max_ticks, 300);
        assert_eq!(config.max_duration(), 30.0);
    }

    #[test]
    fn oversized_duration_saturates_or_is_rejected() {
        let saturated = EngineConfig::default().with_max_duration(500_000_000);
        assert_eq!(saturated.max_ticks, u32::MAX);

        assert_eq!(EngineConfig::default().checked_max_duration(500_000_000), None);
        let checked = EngineConfig::default()
            .checked_max_duration(60)
            .expect("fits in the tick budget");
        assert_eq!(checked.max_ticks, 600);
    }
}
