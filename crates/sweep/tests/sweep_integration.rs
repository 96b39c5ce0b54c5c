//! Integration tests for the sweep driver and results output.

use sweep::{run_sweep, ResultsTable, SweepConfig};

fn small_sweep() -> SweepConfig {
    SweepConfig::from_str(
        r#"
        [simulation]
        grid_side_length = 5
        feature_count = 3
        traits_per_feature = 3
        max_steps = 200000

        [sweep]
        intervals = 4
        base_seed = 42
    "#,
    )
    .unwrap()
}

#[test]
fn test_sweep_one_row_per_fraction() {
    let table = run_sweep(&small_sweep()).unwrap();

    assert_eq!(table.len(), 5);
    for row in table.rows() {
        assert_eq!(row.grid_side_length, 5);
        assert_eq!(row.feature_count, 3);
        assert!((0.0..=1.0).contains(&row.final_prisonized_fraction));
        if row.converged {
            assert_eq!(row.steps % 10, 0);
        }
    }
    assert_eq!(table.rows()[0].final_prisonized_fraction, 0.0);
    assert_eq!(table.rows()[4].final_prisonized_fraction, 1.0);
}

#[test]
fn test_sweep_reproducible_from_base_seed() {
    let first = run_sweep(&small_sweep()).unwrap();
    let second = run_sweep(&small_sweep()).unwrap();

    assert_ne!(first.sweep_id, second.sweep_id);
    assert_eq!(first.rows(), second.rows());
}

#[test]
fn test_write_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results").join("sweep.json");

    let table = run_sweep(&small_sweep()).unwrap();
    table.write_json(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: ResultsTable = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, table);

    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["rows"].as_array().unwrap().len(), 5);
    assert_eq!(value["base_seed"], 42);
}

#[test]
fn test_config_file_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sweep.toml");
    std::fs::write(&path, small_sweep().to_toml().unwrap()).unwrap();

    let loaded = SweepConfig::from_file(&path).unwrap();
    assert_eq!(loaded, small_sweep());
}

#[test]
fn test_missing_config_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(SweepConfig::from_file(dir.path().join("absent.toml")).is_err());
}
