//! End-to-end checks of the headless binary

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crosswalk_trainer"))
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to launch binary")
}

#[test]
fn test_idle_run_ends_on_appearance_deadline() {
    let output = run(&["--report-every", "0"]);
    assert!(output.status.success());

    let log = String::from_utf8_lossy(&output.stderr);
    assert!(log.contains("=== SESSION COMPLETE ==="));
    assert!(log.contains("Stopped by: session ended"));
    assert!(log.contains("Terminal reason: insufficient appearances"));
    assert!(log.contains("Appearances: 1/3"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Final State ==="));
}

#[test]
fn test_scripted_quit() {
    let output = run(&["--script", "forward*10,quit", "--report-every", "0"]);
    assert!(output.status.success());

    let log = String::from_utf8_lossy(&output.stderr);
    assert!(log.contains("Stopped by: quit"));
    assert!(log.contains("Ticks run: 11"));
    assert!(log.contains("Terminal reason: running"));
}

#[test]
fn test_tick_limit_with_map() {
    let output = run(&["--ticks", "30", "--map", "--report-every", "0"]);
    assert!(output.status.success());

    let log = String::from_utf8_lossy(&output.stderr);
    assert!(log.contains("Stopped by: tick limit"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Town Map ==="));
    assert!(stdout.contains('@'));
}

#[test]
fn test_bad_script_is_rejected() {
    let output = run(&["--script", "forward,moonwalk"]);
    assert!(!output.status.success());

    let log = String::from_utf8_lossy(&output.stderr);
    assert!(log.contains("moonwalk"));
}
