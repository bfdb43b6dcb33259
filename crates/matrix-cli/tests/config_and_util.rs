//! Integration tests for solver config loading, preferences, and file helpers.

use std::io::Write;

use matrix_cli::preferences::{
    load_preferences, load_preferences_or_initial, save_preferences, Preferences, Theme,
};
use matrix_cli::solver::config::{load_solver_config, SolverConfig};
use matrix_cli::solver::input::CellInput;
use matrix_cli::solver::load_data::validate_tsv_or_csv_file;
use matrix_cli::solver::session::Operand;
use matrix_engine::Operation;

// ---------------------------------------------------------------------------
// validate_tsv_or_csv_file
// ---------------------------------------------------------------------------

#[test]
fn validate_csv_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.csv");
    std::fs::File::create(&path).unwrap();
    assert!(validate_tsv_or_csv_file(path.to_str().unwrap()).is_ok());
}

#[test]
fn validate_wrong_extension_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.json");
    std::fs::File::create(&path).unwrap();
    assert!(validate_tsv_or_csv_file(path.to_str().unwrap()).is_err());
}

#[test]
fn validate_nonexistent_file_errors() {
    assert!(validate_tsv_or_csv_file("/nonexistent/path/a.tsv").is_err());
}

// ---------------------------------------------------------------------------
// SolverConfig
// ---------------------------------------------------------------------------

#[test]
fn solver_config_default_values() {
    let cfg = SolverConfig::default();
    assert_eq!(cfg.operation, Operation::Add);
    assert!(cfg.matrix_a.is_none());
    assert_eq!(cfg.shape_of(Operand::A).unwrap(), (2, 2));
    assert_eq!(cfg.shape_of(Operand::B).unwrap(), (2, 2));
}

#[test]
fn solver_config_round_trips_json() {
    let cfg = SolverConfig {
        operation: Operation::Multiply,
        matrix_a: Some(vec![vec![CellInput::from(1.0), CellInput::from("2")]]),
        matrix_b: None,
        shape_a: Some((1, 2)),
        shape_b: None,
    };
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("\"multiply\""));
    let cfg2: SolverConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg2.operation, Operation::Multiply);
    assert_eq!(cfg2.shape_a, Some((1, 2)));
    assert_eq!(cfg2.matrix_a, cfg.matrix_a);
}

#[test]
fn solver_config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solver.json");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(
        f,
        r#"{{"operation": "subtract", "matrix_a": [[5, "x"], [1, 1]], "shape_b": [2, 2]}}"#
    )
    .unwrap();

    let cfg = load_solver_config(&path).unwrap();
    assert_eq!(cfg.operation, Operation::Subtract);
    let session = cfg.build_session().unwrap();
    assert_eq!(
        session.matrix(Operand::A).to_rows(),
        vec![vec![5.0, 0.0], vec![1.0, 1.0]]
    );
    assert_eq!(session.shape(Operand::B), (2, 2));
}

#[test]
fn solver_config_malformed_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solver.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = load_solver_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config"));
}

#[test]
fn ragged_rows_are_padded_with_zeros() {
    let cfg = SolverConfig {
        matrix_a: Some(vec![
            vec![CellInput::from(1.0)],
            vec![CellInput::from(2.0), CellInput::from(3.0)],
        ]),
        ..SolverConfig::default()
    };
    assert_eq!(cfg.shape_of(Operand::A).unwrap(), (2, 2));
    let session = cfg.build_session().unwrap();
    assert_eq!(
        session.matrix(Operand::A).to_rows(),
        vec![vec![1.0, 0.0], vec![2.0, 3.0]]
    );
}

#[test]
fn oversized_input_is_rejected() {
    let row: Vec<CellInput> = (0..6).map(|v| CellInput::from(v as f64)).collect();
    let cfg = SolverConfig {
        matrix_b: Some(vec![row]),
        ..SolverConfig::default()
    };
    assert!(cfg.shape_of(Operand::B).is_err());
    assert!(cfg.build_session().is_err());
}

#[test]
fn built_session_calculates() {
    let cfg = SolverConfig {
        operation: Operation::ScalarMultiply,
        matrix_a: Some(vec![vec![CellInput::from(1.5), CellInput::from(-2.0)]]),
        matrix_b: Some(vec![vec![CellInput::from("4")]]),
        ..SolverConfig::default()
    };
    let mut session = cfg.build_session().unwrap();
    let result = session.calculate().unwrap();
    assert_eq!(result.to_rows(), vec![vec![6.0, -8.0]]);
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

#[test]
fn preferences_missing_file_uses_initial() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    assert_eq!(load_preferences(&path, false).unwrap().theme, Theme::Light);
    assert_eq!(load_preferences(&path, true).unwrap().theme, Theme::Dark);
}

#[test]
fn preferences_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deep").join("prefs.json");
    let prefs = Preferences { theme: Theme::Dark };
    save_preferences(&path, &prefs).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"dark\""));
    // Saved choice wins over the system preference.
    assert_eq!(load_preferences(&path, false).unwrap(), prefs);
}

#[test]
fn preferences_malformed_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, r#"{"theme": "purple"}"#).unwrap();
    assert!(load_preferences(&path, false).is_err());
}

#[test]
fn preferences_malformed_file_falls_back_to_initial() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, r#"{"theme": "purple"}"#).unwrap();
    assert_eq!(load_preferences_or_initial(&path, true).theme, Theme::Dark);
    assert_eq!(load_preferences_or_initial(&path, false).theme, Theme::Light);
}
