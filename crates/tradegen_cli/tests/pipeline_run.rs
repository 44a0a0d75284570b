//! End-to-end pipeline runs into temporary directories.

use tempfile::tempdir;
use tradegen_cli::prelude::*;

fn config_for(output: std::path::PathBuf, format: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.run.output_path = output;
    config.run.format = format.to_string();
    config.run.seed = Some(2024);
    config
}

#[test]
fn test_default_run_writes_spreadsheet() {
    let dir = tempdir().unwrap();
    let config = config_for(dir.path().join("output.xlsx"), "xlsx");
    assert!(config.validate().is_ok());

    let summary = run(&config).unwrap();
    assert_eq!(summary.scenario, "standard day");
    assert_eq!(summary.requested, 100);
    assert_eq!(summary.generated, 100);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.report.rows, 100);
    assert!(summary.report.warnings.is_empty());
    assert!(dir.path().join("output.xlsx").exists());
}

#[test]
fn test_csv_run_flags_match_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trades.csv");
    let mut config = config_for(path.clone(), "csv");
    config.run.scenario = "high_volume_failures".to_string();
    config.run.num_records = 300;

    let summary = run(&config).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 300);

    let flagged = rows.iter().filter(|r| &r[9] == "TRUE").count();
    let failed = rows.iter().filter(|r| &r[7] == "FAILED").count();
    assert_eq!(flagged, summary.derivation.flagged);
    assert_eq!(failed, summary.derivation.failed);
    assert!(failed > 0);
    assert!(rows.iter().filter(|r| &r[7] == "FAILED").all(|r| &r[9] == "TRUE"));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("a.csv");
    let second = dir.path().join("b.csv");

    run(&config_for(first.clone(), "csv")).unwrap();
    run(&config_for(second.clone(), "csv")).unwrap();

    assert_eq!(
        std::fs::read_to_string(first).unwrap(),
        std::fs::read_to_string(second).unwrap()
    );
}

#[test]
fn test_parallel_run() {
    let dir = tempdir().unwrap();
    let mut config = config_for(dir.path().join("parallel.csv"), "csv");
    config.run.parallel = true;
    config.run.num_records = 1_000;

    let summary = run(&config).unwrap();
    assert_eq!(summary.generated, 1_000);
}

#[test]
fn test_unknown_scenario_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("never.xlsx");
    let mut config = config_for(path.clone(), "xlsx");
    config.run.scenario = "weekend".to_string();

    let err = run(&config).unwrap_err();
    assert!(matches!(err, AppError::Catalog(_)));
    assert!(!path.exists());
}

#[test]
fn test_invalid_configured_scenario_aborts_before_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("never.csv");
    let config_path = dir.path().join("tradegen.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
            [run]
            scenario = "broken"
            output_path = "{}"
            format = "csv"

            [[scenarios]]
            name = "broken"
            quantity_range = [10, 10]
            statuses = [{{ label = "EXECUTED", weight = 1.0 }}]
            "#,
            path.display().to_string().replace('\\', "\\\\")
        ),
    )
    .unwrap();

    let config = AppConfig::load(&config_path).unwrap();
    assert!(config.validate().is_ok());

    let err = run(&config).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(!path.exists());
}

#[test]
fn test_custom_ticker_universe() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tickers.csv");
    let mut config = config_for(path.clone(), "csv");
    config.tickers = vec![TickerConfig {
        symbol: "ZZZZ".to_string(),
        base_price: 10.0,
    }];

    run(&config).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    for row in reader.records() {
        assert_eq!(&row.unwrap()[2], "ZZZZ");
    }
}

#[test]
fn test_overflowing_trade_values_are_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("big.csv");
    let config_path = dir.path().join("tradegen.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
            [run]
            scenario = "huge"
            num_records = 5
            output_path = "{}"
            format = "csv"
            seed = 1

            [[tickers]]
            symbol = "BIG"
            base_price = 1e15

            [[scenarios]]
            name = "huge"
            quantity_range = [1000000000000000, 1000000000000001]
            statuses = [{{ label = "EXECUTED", weight = 1.0 }}]
            "#,
            path.display().to_string().replace('\\', "\\\\")
        ),
    )
    .unwrap();

    let config = AppConfig::load(&config_path).unwrap();
    assert!(config.validate().is_ok());

    let summary = run(&config).unwrap();
    assert_eq!(summary.generated, 0);
    assert_eq!(summary.skipped, 5);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    assert_eq!(reader.records().count(), 0);
}
