use arena_core::{
    Attribute, AttributeSet, CombatantId, CombatantSnapshot, ErrorSeverity, Loadout, Stance,
    Weapon,
};
use arena_runtime::{RuntimeConfig, RuntimeError, SeriesRunner};

fn challenger(id: u32) -> CombatantSnapshot {
    let attributes = AttributeSet::uniform(10.0)
        .with(Attribute::AttackSpeed, 40.0)
        .with(Attribute::CounterProtocols, 10.0);
    CombatantSnapshot::new(CombatantId(id), format!("Challenger {id}"), attributes)
        .with_main_weapon(Weapon::new("Lance", 16.0).with_cooldown(3.0))
        .with_loadout(Loadout::WeaponShield)
        .with_stance(Stance::Balanced)
        .with_hp(120.0, 120.0)
        .with_yield_threshold(10.0)
}

fn runner(workers: usize) -> SeriesRunner {
    SeriesRunner::new(
        RuntimeConfig::default()
            .with_workers(workers)
            .with_base_seed(2024),
    )
}

#[tokio::test]
async fn series_counts_every_battle() {
    let summary = runner(4)
        .run(&challenger(1), &challenger(2), 300)
        .await
        .expect("series runs");

    assert_eq!(summary.battles, 300);
    assert_eq!(summary.base_seed, 2024);
    assert_eq!(
        summary.first_wins + summary.second_wins + summary.draws,
        summary.battles
    );
    assert_eq!(summary.destroyed + summary.yielded, summary.decisive());
    let mean = summary.mean_duration().expect("battles ran");
    assert!(mean > 0.0 && mean <= 120.0);
}

#[tokio::test]
async fn fixed_seed_is_independent_of_worker_count() {
    let (a, b) = (challenger(1), challenger(2));
    let single = runner(1).run(&a, &b, 120).await.expect("series runs");
    let spread = runner(5).run(&a, &b, 120).await.expect("series runs");

    assert_eq!(single.first_wins, spread.first_wins);
    assert_eq!(single.second_wins, spread.second_wins);
    assert_eq!(single.draws, spread.draws);
    assert_eq!(single.yielded, spread.yielded);
    assert!((single.total_duration - spread.total_duration).abs() < 1e-6);
}

#[tokio::test]
async fn single_battle_matches_engine() {
    let (a, b) = (challenger(1), challenger(2));
    let result = runner(2).battle(&a, &b, 77).await.expect("battle runs");
    let direct = arena_core::simulate(&a, &b, 77).expect("battle runs");
    assert_eq!(result, direct);
}

#[tokio::test]
async fn rejects_empty_series_and_bad_snapshots() {
    let runner = runner(2);

    let err = runner
        .run(&challenger(1), &challenger(2), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::EmptySeries));
    assert_eq!(err.error_code(), "RUNTIME_EMPTY_SERIES");

    let err = runner
        .run(&challenger(1), &challenger(1), 10)
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Snapshot(_)));
    assert_eq!(err.severity(), ErrorSeverity::Validation);
    assert_eq!(err.error_code(), "SNAPSHOT_DUPLICATE_COMBATANT");

    let broken = challenger(2).with_yield_threshold(150.0);
    let err = runner.run(&challenger(1), &broken, 10).await.unwrap_err();
    assert!(err.to_string().contains("yield threshold"));
    assert_eq!(err.error_code(), "SNAPSHOT_YIELD_OUT_OF_RANGE");
}
