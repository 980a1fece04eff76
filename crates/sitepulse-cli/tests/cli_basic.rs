//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. A dev config
//! directory is used so they never touch a real user config.

use std::io::Write;
use std::process::Command;

const FIXED_NOW: &str = "2024-06-01T12:00:00Z";

/// A single snapshot: on plan for time, overspending on cost.
const SINGLE_SNAPSHOT: &str = r#"{
    "start_date": "2024-04-12T12:00:00Z",
    "end_date": "2024-07-21T12:00:00Z",
    "budget_total": 1000.0,
    "cost_executed": 900.0,
    "tasks_total": 10,
    "tasks_completed": 5
}"#;

const KEYED_SNAPSHOTS: &str = r#"{
    "harbor-bridge": {
        "start_date": "2024-04-12T12:00:00Z",
        "end_date": "2024-07-21T12:00:00Z",
        "budget_total": 1000.0,
        "cost_executed": 500.0,
        "tasks_total": 10,
        "tasks_completed": 5
    },
    "east-depot": {
        "start_date": "2024-04-12T12:00:00Z",
        "end_date": "2024-07-21T12:00:00Z",
        "budget_total": 1000.0,
        "cost_executed": 900.0,
        "tasks_total": 10,
        "tasks_completed": 2,
        "changes_count": 12,
        "tasks_reopened": 3
    }
}"#;

/// Snapshot with the planned window inverted.
const INVERTED_SNAPSHOT: &str = r#"{
    "start_date": "2024-07-21T12:00:00Z",
    "end_date": "2024-04-12T12:00:00Z",
    "tasks_total": 10,
    "tasks_completed": 5
}"#;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "sitepulse-cli", "--"])
        .args(args)
        .env("SITEPULSE_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn write_snapshot(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_health_compute_outputs_json() {
    let file = write_snapshot(SINGLE_SNAPSHOT);
    let path = file.path().to_str().unwrap();

    let (stdout, stderr, code) =
        run_cli(&["health", "compute", "--metrics", path, "--now", FIXED_NOW]);
    assert_eq!(code, 0, "compute failed: {stderr}");

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
    assert_eq!(json["status"], "healthy");
    assert!((json["score"].as_f64().unwrap() - 84.0).abs() < 1e-9);
    assert!((json["cost"]["score"].as_f64().unwrap() - 60.0).abs() < 1e-9);
    assert!(json["calculated_at"]
        .as_str()
        .unwrap()
        .starts_with("2024-06-01T12:00:00"));
}

#[test]
fn test_health_compute_is_reproducible_with_fixed_now() {
    let file = write_snapshot(SINGLE_SNAPSHOT);
    let path = file.path().to_str().unwrap();

    let first = run_cli(&["health", "compute", "--metrics", path, "--now", FIXED_NOW]);
    let second = run_cli(&["health", "compute", "--metrics", path, "--now", FIXED_NOW]);
    assert_eq!(first.2, 0);
    assert_eq!(first.0, second.0);
}

#[test]
fn test_health_report_renders_sections() {
    let file = write_snapshot(SINGLE_SNAPSHOT);
    let path = file.path().to_str().unwrap();

    let (stdout, _, code) = run_cli(&["health", "report", "--metrics", path, "--now", FIXED_NOW]);
    assert_eq!(code, 0, "report failed");
    assert!(stdout.contains("Project Health Report: default"));
    assert!(stdout.contains("Signals:"));
    assert!(stdout.contains("Stability"));
    // 900 spent over half the work projects to 1800 against a 1000 budget.
    assert!(stdout.contains("Budget projection: final cost 1800 against budget 1000 (800 over)"));
}

#[test]
fn test_health_compute_named_project() {
    let file = write_snapshot(KEYED_SNAPSHOTS);
    let path = file.path().to_str().unwrap();

    let (stdout, _, code) = run_cli(&[
        "health",
        "compute",
        "--metrics",
        path,
        "--project",
        "east-depot",
        "--now",
        FIXED_NOW,
    ]);
    assert_eq!(code, 0, "compute for named project failed");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["status"], "critical");
}

#[test]
fn test_health_unknown_project_fails() {
    let file = write_snapshot(KEYED_SNAPSHOTS);
    let path = file.path().to_str().unwrap();

    let (_, stderr, code) = run_cli(&[
        "health",
        "compute",
        "--metrics",
        path,
        "--project",
        "no-such-site",
        "--now",
        FIXED_NOW,
    ]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no-such-site"));
}

#[test]
fn test_health_portfolio_table() {
    let file = write_snapshot(KEYED_SNAPSHOTS);
    let path = file.path().to_str().unwrap();

    let (stdout, _, code) =
        run_cli(&["health", "portfolio", "--metrics", path, "--now", FIXED_NOW]);
    assert_eq!(code, 0, "portfolio failed");
    assert!(stdout.contains("harbor-bridge"));
    assert!(stdout.contains("east-depot"));
    assert!(stdout.contains("2 project(s)"));
    assert!(stdout.contains("Lowest score: east-depot"));
}

#[test]
fn test_health_portfolio_json() {
    let file = write_snapshot(KEYED_SNAPSHOTS);
    let path = file.path().to_str().unwrap();

    let (stdout, _, code) = run_cli(&[
        "health",
        "portfolio",
        "--metrics",
        path,
        "--now",
        FIXED_NOW,
        "--json",
    ]);
    assert_eq!(code, 0);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["project_count"], 2);
    assert_eq!(json["worst_project"], "east-depot");
}

#[test]
fn test_health_validate_accepts_good_snapshot() {
    let file = write_snapshot(KEYED_SNAPSHOTS);
    let path = file.path().to_str().unwrap();

    let (stdout, _, code) = run_cli(&["health", "validate", "--metrics", path]);
    assert_eq!(code, 0, "validate failed");
    assert!(stdout.contains("harbor-bridge: ok"));
    assert!(stdout.contains("east-depot: ok"));
}

#[test]
fn test_health_validate_rejects_inverted_window() {
    let file = write_snapshot(INVERTED_SNAPSHOT);
    let path = file.path().to_str().unwrap();

    let (_, stderr, code) = run_cli(&["health", "validate", "--metrics", path]);
    assert_eq!(code, 1);
    assert!(stderr.contains("default:"));
}

#[test]
fn test_health_compute_rejects_invalid_unless_skipped() {
    let file = write_snapshot(INVERTED_SNAPSHOT);
    let path = file.path().to_str().unwrap();

    let (_, _, code) = run_cli(&["health", "compute", "--metrics", path, "--now", FIXED_NOW]);
    assert_eq!(code, 1);

    let (stdout, _, code) = run_cli(&[
        "health",
        "compute",
        "--metrics",
        path,
        "--now",
        FIXED_NOW,
        "--skip-validation",
    ]);
    assert_eq!(code, 0, "skip-validation should evaluate anyway");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(json["score"].is_number());
}

#[test]
fn test_config_get() {
    let (_, _, code) = run_cli(&["config", "get", "weights.time"]);
    assert_eq!(code, 0, "Config get failed");
}

#[test]
fn test_config_get_unknown_key() {
    let (_, stderr, code) = run_cli(&["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "Config list failed");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(json["weights"]["time"].is_number());
    assert!(json["thresholds"]["healthy"].is_number());
}

#[test]
fn test_config_set_and_reset() {
    let (stdout, stderr, code) = run_cli(&["config", "set", "stability_factor", "2.5"]);
    assert_eq!(code, 0, "Config set failed: {stderr}");
    assert!(stdout.contains("ok"));

    let (stdout, _, code) = run_cli(&["config", "reset"]);
    assert_eq!(code, 0, "Config reset failed");
    assert!(stdout.contains("reset"));
}

#[test]
fn test_config_set_rejects_bad_value() {
    let (_, _, code) = run_cli(&["config", "set", "weights.time", "not-a-number"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_preset_applies_named_weights() {
    // The balanced preset matches the default weights, so tests running in
    // parallel against the same dev config see no change in tuning.
    let (stdout, stderr, code) = run_cli(&["config", "preset", "balanced"]);
    assert_eq!(code, 0, "preset failed: {stderr}");
    assert!(stdout.contains("time 0.40"));
    assert!(stdout.contains("stability 0.20"));

    let (_, stderr, code) = run_cli(&["config", "preset", "deadline"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown preset"));
}

#[test]
fn test_explicit_config_file_changes_result() {
    let snapshot = write_snapshot(SINGLE_SNAPSHOT);
    let snapshot_path = snapshot.path().to_str().unwrap();

    // Strict thresholds push the same 84-point project out of healthy.
    let mut config = tempfile::NamedTempFile::new().unwrap();
    config
        .write_all(b"[thresholds]\nhealthy = 90.0\nwarning = 60.0\n")
        .unwrap();
    let config_path = config.path().to_str().unwrap();

    let (stdout, _, code) = run_cli(&[
        "health",
        "compute",
        "--metrics",
        snapshot_path,
        "--config",
        config_path,
        "--now",
        FIXED_NOW,
    ]);
    assert_eq!(code, 0);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["status"], "warning");
}
