//! JSON reports printed by the harness.

use arena_core::CombatResult;
use arena_runtime::SeriesSummary;
use serde::Serialize;

/// One battle and the seed that replays it.
#[derive(Debug, Serialize)]
pub struct BattleReport {
    pub seed: u64,
    #[serde(flatten)]
    pub result: CombatResult,
}

/// Series counts plus derived rates.
#[derive(Debug, Serialize)]
pub struct SeriesReport {
    #[serde(flatten)]
    pub summary: SeriesSummary,
    pub first_win_rate: Option<f64>,
    pub mean_duration: Option<f64>,
}

impl From<SeriesSummary> for SeriesReport {
    fn from(summary: SeriesSummary) -> Self {
        Self {
            first_win_rate: summary.first_win_rate(),
            mean_duration: summary.mean_duration(),
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use arena_core::{AttributeSet, CombatantId, CombatantSnapshot, simulate};

    use super::*;

    #[test]
    fn battle_report_inlines_result() {
        let a = CombatantSnapshot::new(CombatantId(1), "A", AttributeSet::uniform(5.0));
        let b = CombatantSnapshot::new(CombatantId(2), "B", AttributeSet::uniform(5.0));
        let result = simulate(&a, &b, 3).expect("valid snapshots");

        let json = serde_json::to_value(BattleReport { seed: 3, result }).expect("serialize");
        assert_eq!(json["seed"], 3);
        assert!(json["events"].is_array());
        assert!(json.get("is_draw").is_some());
    }

    #[test]
    fn series_report_derives_rates() {
        let mut summary = SeriesSummary::new(CombatantId(1), CombatantId(2), 11);
        summary.battles = 4;
        summary.first_wins = 3;
        summary.second_wins = 1;
        summary.total_duration = 100.0;

        let json = serde_json::to_value(SeriesReport::from(summary)).expect("serialize");
        assert_eq!(json["first_win_rate"], 0.75);
        assert_eq!(json["mean_duration"], 25.0);
        assert_eq!(json["base_seed"], 11);
    }
}
