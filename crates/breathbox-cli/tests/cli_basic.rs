//! Basic CLI E2E tests.
//!
//! Commands run via cargo against the dev data directory; only read-only
//! or rejected operations are exercised here.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "breathbox-cli", "--"])
        .args(args)
        .env("BREATHBOX_ENV", "dev")
        .output()
        .expect("failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn theme_show_prints_the_hour_gradient() {
    let (stdout, _, code) = run_cli(&["theme", "show", "--hour", "8"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("linear-gradient(to bottom, #82addb 0%, #ebb2b1 100%)"));
    assert!(stdout.contains("stars:    hidden"));
}

#[test]
fn theme_show_at_night_shows_stars() {
    let (stdout, _, code) = run_cli(&["theme", "show", "--hour", "22"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("period:   evening"));
    assert!(stdout.contains("stars:    visible"));
}

#[test]
fn config_get_known_key_prints_a_value() {
    let (stdout, _, code) = run_cli(&["config", "get", "inhaleTime"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().parse::<i64>().is_ok());
}

#[test]
fn config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "breathSpeed"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn session_status_is_a_state_snapshot() {
    let (stdout, _, code) = run_cli(&["session", "status"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["type"], "StateSnapshot");
    assert_eq!(parsed["phase"], "idle");
    assert_eq!(parsed["current_cycle"], 0);
}

#[test]
fn stats_complete_rejects_unknown_person() {
    let (_, _, code) = run_cli(&["stats", "complete", "Carol"]);
    assert_eq!(code, 1);
}
