#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

fn sample_recording() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../recordings/sample.toml")
}

/// Runs the binary with an isolated config directory
fn cadence(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cadence").unwrap();
    cmd.arg("--config").arg(config_dir).env_remove("CADENCE_FORMAT");
    cmd
}

fn json_report(config_dir: &Path, recording: &Path) -> Value {
    let output = cadence(config_dir)
        .arg(recording)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_sample_as_json() {
    let config = TempDir::new().unwrap();
    let report = json_report(config.path(), &sample_recording());

    assert_eq!(report["typed"], report["target"]);
    assert_eq!(report["wpm"], 59);
    assert_eq!(report["elapsedSeconds"], 9.085);

    let analytics = &report["analytics"];
    assert_eq!(analytics["keyEvents"], 45);
    assert_eq!(analytics["corrections"], 1);
    assert_eq!(analytics["pauseEvents"], 1);
    assert_eq!(analytics["accuracy"]["errorsCommitted"], 1);
    assert_eq!(analytics["problemCharacters"][0]["char"], "r");

    let tips = analytics["tips"].as_array().unwrap();
    assert!((4..=6).contains(&tips.len()));
}

#[test]
fn test_sample_as_text() {
    let config = TempDir::new().unwrap();
    cadence(config.path())
        .arg(sample_recording())
        .assert()
        .success()
        .stdout(predicates::str::contains("WPM          59"))
        .stdout(predicates::str::contains("Typing personality:"))
        .stdout(predicates::str::contains("Tips"));
}

#[test]
fn test_settings_change_format_and_thresholds() {
    let config = TempDir::new().unwrap();
    std::fs::write(
        config.path().join("settings.toml"),
        "format = \"json\"\n\n[analytics]\npause_threshold_ms = 5000\n",
    )
    .unwrap();

    let output = cadence(config.path())
        .arg(sample_recording())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["analytics"]["pauseEvents"], 0);
}

#[test]
fn test_environment_overrides_settings() {
    let config = TempDir::new().unwrap();
    let output = cadence(config.path())
        .arg(sample_recording())
        .env("CADENCE_FORMAT", "json")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(serde_json::from_slice::<Value>(&output.stdout).is_ok());
}

#[test]
fn test_unfinished_attempt() {
    let config = TempDir::new().unwrap();
    let recording = config.path().join("partial.toml");
    std::fs::write(
        &recording,
        r#"
        target = "abc def"
        keystroke = [
            { key = "a", at = 0 },
            { key = "x", at = 300 },
        ]
        "#,
    )
    .unwrap();

    let report = json_report(config.path(), &recording);
    assert_eq!(report["typed"], "ax");
    assert_eq!(report["characterClasses"]["letters"]["attempted"], 2);
    assert_eq!(report["characterClasses"]["letters"]["correct"], 1);
    assert_eq!(report["analytics"]["maxConsecutiveErrors"], 1);
}

#[test]
fn test_missing_recording() {
    let config = TempDir::new().unwrap();
    cadence(config.path())
        .arg(config.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicates::str::contains("Failed to read recording"));
}

#[test]
fn test_empty_target() {
    let config = TempDir::new().unwrap();
    let recording = config.path().join("empty.toml");
    std::fs::write(&recording, "target = \"\"\n").unwrap();

    cadence(config.path())
        .arg(&recording)
        .assert()
        .failure()
        .stderr(predicates::str::contains("no target text"));
}

#[test]
fn test_invalid_format_flag() {
    let config = TempDir::new().unwrap();
    cadence(config.path())
        .arg(sample_recording())
        .args(["--format", "yaml"])
        .assert()
        .failure();
}
