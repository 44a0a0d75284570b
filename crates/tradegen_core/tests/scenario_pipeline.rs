//! End-to-end tests: catalog -> validate -> generate -> derive.

use rust_decimal::Decimal;
use std::collections::HashSet;
use tradegen_core::prelude::*;
use tradegen_core::{DerivationSummary, FlagRule};

const THRESHOLD: i64 = 3_000_000;

#[test]
fn test_standard_day_end_to_end() {
    let catalog = ScenarioCatalog::builtin();
    let scenario = catalog.select("standard day").unwrap();
    validate(&scenario.quantity_range, &scenario.status_distribution).unwrap();

    let report = TradeGenerator::default()
        .generate(100, &scenario.quantity_range, &scenario.status_distribution)
        .unwrap();
    assert!(report.records.len() <= 100);
    assert_eq!(report.records.len() + report.skipped_count(), 100);

    let derived = derive(report.records, Decimal::from(THRESHOLD));
    assert_eq!(derived.len(), 100 - report.skipped.len());

    for row in &derived {
        if row.record.status == "FAILED" {
            assert!(row.flagged, "FAILED trade {} must be flagged", row.record.trade_id);
        }
        assert_eq!(
            row.trade_value,
            row.record.price * Decimal::from(row.record.quantity)
        );
        assert!(scenario.quantity_range.contains(row.record.quantity as i64));
        assert!(scenario.status_distribution.contains(&row.record.status));
    }
}

#[test]
fn test_every_builtin_scenario_runs() {
    let catalog = ScenarioCatalog::builtin();
    let generator = TradeGenerator::default();

    for scenario in catalog.iter() {
        let report = generator
            .generate_seeded(500, &scenario.quantity_range, &scenario.status_distribution, 17)
            .unwrap();
        assert!(report.is_complete(), "{} skipped records", scenario.name);

        let ids: HashSet<_> = report.records.iter().map(|r| r.trade_id).collect();
        assert_eq!(ids.len(), 500);
    }
}

#[test]
fn test_institutional_trades_never_fail() {
    let catalog = ScenarioCatalog::builtin();
    let scenario = catalog.select("institutional_trades").unwrap();

    let report = TradeGenerator::default()
        .generate_seeded(5_000, &scenario.quantity_range, &scenario.status_distribution, 3)
        .unwrap();
    assert!(report.records.iter().all(|r| r.status != "FAILED"));
}

#[test]
fn test_institutional_trades_mostly_flagged_as_large() {
    // 50k+ shares at ~$35 minimum already exceeds $1.7M; most exceed $3M.
    let catalog = ScenarioCatalog::builtin();
    let scenario = catalog.select("institutional_trades").unwrap();
    let rule = FlagRule::new(Decimal::from(THRESHOLD));

    let report = TradeGenerator::default()
        .generate_seeded(1_000, &scenario.quantity_range, &scenario.status_distribution, 21)
        .unwrap();
    let derived = tradegen_core::derive_with_rule(report.records, &rule);
    let summary = DerivationSummary::from_records(&derived, &rule);

    assert_eq!(summary.total, 1_000);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.flagged, summary.large);
    assert!(summary.large > summary.total / 2);
}

#[test]
fn test_invalid_scenario_aborts_before_generation() {
    let bad = Scenario::new(
        "broken",
        QuantityRange::new(10, 10),
        StatusDistribution::from_pairs([("EXECUTED", 1.0)]),
    );
    let catalog = ScenarioCatalog::builtin().with_scenario(bad);
    let scenario = catalog.select("broken").unwrap();

    let result = TradeGenerator::default().generate(
        100,
        &scenario.quantity_range,
        &scenario.status_distribution,
    );
    assert!(matches!(result, Err(ValidationError::InvalidRange(_))));
}

#[test]
fn test_parallel_and_sequential_agree_on_shape() {
    let catalog = ScenarioCatalog::builtin();
    let scenario = catalog.select("high_volume_failures").unwrap();
    let generator = TradeGenerator::default();

    let parallel = generator
        .generate_parallel(2_000, &scenario.quantity_range, &scenario.status_distribution, 5)
        .unwrap();
    let sequential = generator
        .generate_seeded(2_000, &scenario.quantity_range, &scenario.status_distribution, 5)
        .unwrap();

    assert_eq!(parallel.records.len(), sequential.records.len());
    let failed = parallel.records.iter().filter(|r| r.status == "FAILED").count();
    // ~30% failures expected
    assert!((400..800).contains(&failed), "unexpected FAILED count {}", failed);
}
