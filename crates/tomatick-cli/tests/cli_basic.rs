//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway config directory and
//! verify outputs.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(config_dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_tomatick"))
        .args(args)
        .env("TOMATICK_CONFIG_DIR", config_dir.path())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn simulate(args: &[&str]) -> serde_json::Value {
    let dir = TempDir::new().unwrap();
    let mut full = vec!["simulate"];
    full.extend_from_slice(args);
    let (stdout, stderr, code) = run_cli(&dir, &full);
    assert_eq!(code, 0, "simulate failed: {stderr}");
    serde_json::from_str(&stdout).expect("simulate prints JSON")
}

#[test]
fn test_simulate_start_only() {
    let report = simulate(&[]);
    assert_eq!(report["is_running"], true);
    assert_eq!(report["session"]["kind"], "focusing");
    assert_eq!(report["session"]["remaining_secs"], 1500);
    assert_eq!(report["notifications"], 0);
    assert_eq!(report["title"], "Focusing for 25:00 minutes");
}

#[test]
fn test_simulate_focus_rolls_into_break() {
    let report = simulate(&["--ticks", "1501"]);
    assert_eq!(report["session"]["kind"], "on_break");
    assert_eq!(report["session"]["remaining_secs"], 300);
    assert_eq!(report["notifications"], 1);
    assert_eq!(report["completions"][0]["type"], "session_completed");
    assert_eq!(report["completions"][0]["completed"], "focusing");
}

#[test]
fn test_simulate_full_cycle() {
    let report = simulate(&["--focus", "5", "--break", "1", "--ticks", "362"]);
    assert_eq!(report["session"]["kind"], "focusing");
    assert_eq!(report["session"]["remaining_secs"], 300);
    assert_eq!(report["notifications"], 2);
}

#[test]
fn test_simulate_pause_holds_remaining_time() {
    let report = simulate(&["--ticks", "100", "--pause-at", "10"]);
    assert_eq!(report["is_running"], false);
    assert_eq!(report["ticks_delivered"], 10);
    assert_eq!(report["session"]["remaining_secs"], 1490);
}

#[test]
fn test_simulate_clamps_flag_durations() {
    let report = simulate(&["--focus", "999", "--break", "0"]);
    assert_eq!(report["focus_minutes"], 60);
    assert_eq!(report["break_minutes"], 1);
}

#[test]
fn test_config_get_default() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "durations.focus_minutes"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "25");
}

#[test]
fn test_config_set_then_simulate_uses_it() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["config", "set", "durations.focus_minutes", "45"]);
    assert_eq!(code, 0, "Config set failed: {stderr}");

    let (stdout, _, code) = run_cli(&dir, &["simulate"]);
    assert_eq!(code, 0);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["session"]["remaining_secs"], 45 * 60);
}

#[test]
fn test_config_set_rejects_out_of_range() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["config", "set", "durations.break_minutes", "30"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_get_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["config", "get", "durations.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_run_accepts_commands_on_stdin() {
    let dir = TempDir::new().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_tomatick"))
        .args(["run", "--no-bell"])
        .env("TOMATICK_CONFIG_DIR", dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"f+\np\np\ns\nq\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Stopped | focus 30:00 | break 05:00"));
    assert!(stdout.contains("Focusing for 30:00 minutes | 30:00 remaining"));
    assert!(stdout.contains("[PAUSED]"));
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("tomatick"));
}
