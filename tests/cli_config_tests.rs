//! End-to-end tests for `karabingen config` commands.

use std::fs;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

#[test]
fn test_config_path_honours_env() {
    let settings_dir = TempDir::new().unwrap();

    let output = isolated_command(&["config", "path"], settings_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        settings_dir.path().join("config.toml").to_str().unwrap()
    );
}

#[test]
fn test_config_show_defaults() {
    let settings_dir = TempDir::new().unwrap();

    let output = isolated_command(&["config", "show"], settings_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Profile:"));
    assert!(stdout.contains("base"));
}

#[test]
fn test_config_set_then_show_json() {
    let settings_dir = TempDir::new().unwrap();

    let output = isolated_command(
        &[
            "config",
            "set",
            "--output",
            "/tmp/karabingen-test/karabiner.json",
            "--backup",
            "false",
            "--profile",
            "desk",
            "--keyboard-type",
            "ANSI",
        ],
        settings_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(settings_dir.path().join("config.toml").exists());

    let output = isolated_command(&["config", "show", "--json"], settings_dir.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(json["output"]["path"], "/tmp/karabingen-test/karabiner.json");
    assert_eq!(json["output"]["backup"], false);
    assert_eq!(json["profile"]["name"], "desk");
    assert_eq!(json["profile"]["keyboard_type"], "ansi");
}

#[test]
fn test_config_set_requires_an_option() {
    let settings_dir = TempDir::new().unwrap();

    let output = isolated_command(&["config", "set"], settings_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("At least one setting"));
}

#[test]
fn test_config_set_invalid_keyboard_type() {
    let settings_dir = TempDir::new().unwrap();

    let output = isolated_command(
        &["config", "set", "--keyboard-type", "dvorak"],
        settings_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(!settings_dir.path().join("config.toml").exists());
}

#[test]
fn test_config_show_rejects_broken_file() {
    let settings_dir = TempDir::new().unwrap();
    fs::write(settings_dir.path().join("config.toml"), "[profile\n").unwrap();

    let output = isolated_command(&["config", "show"], settings_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load settings"));
}
