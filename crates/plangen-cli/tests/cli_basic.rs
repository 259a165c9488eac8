//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated config directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with `PLANGEN_HOME` pointed at `home`.
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_plangen"))
        .env("PLANGEN_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

const PLAN_ARGS: [&str; 7] = [
    "--days",
    "30",
    "--hours",
    "4",
    "--level",
    "beginner",
    "--today=2026-10-19",
];

#[test]
fn test_plan_text() {
    let home = tempfile::tempdir().unwrap();
    let mut args = vec!["plan"];
    args.extend(PLAN_ARGS);
    let (code, stdout, _) = run_cli(home.path(), &args);

    assert_eq!(code, 0, "Plan failed");
    assert!(stdout.contains("阶段 1：思维脱敏"));
    assert!(stdout.contains("Total energy: 120h"));
}

#[test]
fn test_plan_json() {
    let home = tempfile::tempdir().unwrap();
    let mut args = vec!["plan", "--json"];
    args.extend(PLAN_ARGS);
    let (code, stdout, _) = run_cli(home.path(), &args);
    assert_eq!(code, 0, "Plan JSON failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["total_energy"], 120);
    assert_eq!(parsed["pressure"], 60);
    assert_eq!(parsed["pressure_level"], "medium");
    assert_eq!(parsed["modules"].as_array().unwrap().len(), 3);
    assert_eq!(parsed["modules"][0]["date_range"], "10月19日 - 10月24日");
    assert_eq!(parsed["gauge"]["color"], "#22c55e");
}

#[test]
fn test_plan_survival_json() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &[
            "plan", "--json", "--days", "3", "--hours", "2", "--level", "sprint",
            "--knows-containers", "--knows-syntax", "--knows-normalization",
        ],
    );
    assert_eq!(code, 0);

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["pressure_level"], "survival");
    assert_eq!(parsed["modules"][0]["id"], "survival");
    assert_eq!(parsed["modules"][0]["hours_allocated"], 6);
}

#[test]
fn test_plan_rejects_zero_hours() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(home.path(), &["plan", "--days", "10", "--hours", "0"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty(), "no partial plan should be printed");
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("daily_hours"));
}

#[test]
fn test_plan_rejects_timeline_beyond_calendar() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(
        home.path(),
        &["plan", "--days", "200000000", "--hours", "1", "--today=2026-10-19"],
    );
    assert_eq!(code, 1);
    assert!(stdout.is_empty(), "no partial plan should be printed");
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("out of the calendar range"));
}

#[test]
fn test_plan_rejects_unknown_level() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        home.path(),
        &["plan", "--days", "10", "--hours", "2", "--level", "expert"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("expert"));
}

#[test]
fn test_export() {
    let home = tempfile::tempdir().unwrap();
    let mut args = vec!["export"];
    args.extend(PLAN_ARGS);
    let (code, stdout, _) = run_cli(home.path(), &args);

    assert_eq!(code, 0, "Export failed");
    assert!(stdout.starts_with("=== AI 备考指挥中枢 v3.0 ==="));
    assert!(stdout.contains("压力等级：适中"));
    assert!(stdout.trim_end().ends_with("切勿手动排查超过 10 分钟。"));
}

#[test]
fn test_config_get() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "pressure.survival_threshold_days"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "5");
}

#[test]
fn test_config_get_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["config", "get", "pressure.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_config_set_changes_plan() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(home.path(), &["config", "set", "pressure.survival_threshold_days", "10"]);
    assert_eq!(code, 0, "Config set failed");

    let (code, stdout, _) = run_cli(
        home.path(),
        &["plan", "--json", "--days", "8", "--hours", "4", "--level", "sprint"],
    );
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["pressure_level"], "survival");
}

#[test]
fn test_config_set_rejects_bad_weights() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        home.path(),
        &["config", "set", "allocation.weights.beginner.sprint", "0.9"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("sum to 1.0"));
}

#[test]
fn test_config_list_and_reset() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["allocation"]["theory_hours_total"], 12);

    let (code, _, _) = run_cli(home.path(), &["config", "reset"]);
    assert_eq!(code, 0, "Config reset failed");
}

#[test]
fn test_explicit_config_path() {
    let home = tempfile::tempdir().unwrap();
    let custom = home.path().join("custom.toml");
    let custom_str = custom.to_str().unwrap();

    let (code, _, _) = run_cli(
        home.path(),
        &["--config", custom_str, "config", "set", "allocation.theory_hours_total", "0"],
    );
    assert_eq!(code, 0);
    assert!(custom.exists());

    let (_, stdout, _) = run_cli(home.path(), &["--config", custom_str, "config", "get", "allocation.theory_hours_total"]);
    assert_eq!(stdout.trim(), "0");
}

#[test]
fn test_completions() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["completions", "bash"]);
    assert_eq!(code, 0, "Completions failed");
    assert!(stdout.contains("plangen"));
}
