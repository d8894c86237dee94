//! End-to-end tests for `karabingen generate` command.

use serde_json::json;
use std::fs;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

#[test]
fn test_generate_creates_new_document() {
    let (config_path, _config_dir) = create_temp_config_file(LAYERS_YAML);
    let settings_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let output_path = out_dir.path().join("karabiner.json");

    let output = isolated_command(
        &[
            "generate",
            config_path.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
        ],
        settings_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Generate should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Configuration written to"));
    assert!(!stdout.contains("Backup created"));

    let doc = read_json(&output_path);
    assert_eq!(doc["global"]["show_profile_name_in_menu_bar"], true);

    let profile = &doc["profiles"][0];
    assert_eq!(profile["name"], "base");
    assert_eq!(profile["selected"], true);
    assert_eq!(profile["virtual_hid_keyboard"]["keyboard_type_v2"], "iso");

    let rules = profile["complex_modifications"]["rules"].as_array().unwrap();
    // hyper, option arrows, two sublayers
    assert_eq!(rules.len(), 4);
    assert_eq!(rules[0]["description"], "Hyper Key (caps_lock)");
}

#[test]
fn test_generate_preserves_existing_sections_and_backs_up() {
    let (config_path, _config_dir) = create_temp_config_file(MINIMAL_YAML);
    let settings_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let output_path = out_dir.path().join("karabiner.json");

    let existing = json!({
        "global": {"check_for_updates_on_startup": false},
        "profiles": [
            {"name": "work", "selected": true},
            {
                "name": "base",
                "devices": [{"identifiers": {"product_id": 832, "vendor_id": 1452}}],
                "complex_modifications": {"rules": [{"description": "stale", "manipulators": []}]}
            }
        ]
    });
    fs::write(&output_path, serde_json::to_string_pretty(&existing).unwrap()).unwrap();

    let output = isolated_command(
        &[
            "generate",
            config_path.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
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
    assert!(String::from_utf8_lossy(&output.stdout).contains("Backup created"));

    let backups = backup_files(out_dir.path());
    assert_eq!(backups.len(), 1, "Exactly one backup should be created");
    assert_eq!(read_json(&backups[0]), existing);

    let doc = read_json(&output_path);
    assert_eq!(doc["global"]["check_for_updates_on_startup"], false);
    assert_eq!(doc["profiles"][0]["name"], "work");
    assert_eq!(doc["profiles"][0]["selected"], false);
    assert_eq!(doc["profiles"][1]["selected"], true);
    assert_eq!(doc["profiles"][1]["devices"][0]["identifiers"]["vendor_id"], 1452);
    assert_ne!(
        doc["profiles"][1]["complex_modifications"]["rules"][0]["description"],
        "stale"
    );
}

#[test]
fn test_generate_no_backup() {
    let (config_path, _config_dir) = create_temp_config_file(MINIMAL_YAML);
    let settings_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let output_path = out_dir.path().join("karabiner.json");
    fs::write(&output_path, "{}").unwrap();

    let output = isolated_command(
        &[
            "generate",
            config_path.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
            "--no-backup",
        ],
        settings_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(backup_files(out_dir.path()).is_empty());
}

#[test]
fn test_generate_custom_profile() {
    let (config_path, _config_dir) = create_temp_config_file(FULL_YAML);
    let settings_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let output_path = out_dir.path().join("karabiner.json");

    let output = isolated_command(
        &[
            "generate",
            config_path.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
            "--profile",
            "laptop",
        ],
        settings_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let doc = read_json(&output_path);
    let profile = &doc["profiles"][0];
    assert_eq!(profile["name"], "laptop");
    assert_eq!(
        profile["simple_modifications"],
        json!([{
            "from": {"key_code": "grave_accent_and_tilde"},
            "to": [{"key_code": "non_us_backslash"}]
        }])
    );
}

#[test]
fn test_generate_uses_settings_defaults() {
    let (config_path, _config_dir) = create_temp_config_file(MINIMAL_YAML);
    let settings_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let output_path = out_dir.path().join("karabiner.json");

    fs::write(
        settings_dir.path().join("config.toml"),
        format!(
            "[output]\npath = {:?}\nbackup = false\n\n[profile]\nname = \"desk\"\nkeyboard_type = \"ansi\"\n",
            output_path.to_str().unwrap()
        ),
    )
    .unwrap();

    let output = isolated_command(
        &["generate", config_path.to_str().unwrap()],
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

    let doc = read_json(&output_path);
    assert_eq!(doc["profiles"][0]["name"], "desk");
    assert_eq!(doc["profiles"][0]["virtual_hid_keyboard"]["keyboard_type_v2"], "ansi");
}

#[test]
fn test_generate_rejected_conflict_leaves_output_untouched() {
    let (config_path, _config_dir) = create_temp_config_file(REJECT_CONFLICT_YAML);
    let settings_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let output_path = out_dir.path().join("karabiner.json");

    let output = isolated_command(
        &[
            "generate",
            config_path.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
        ],
        settings_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Key conflicts found"));
    assert!(!output_path.exists());
}

#[test]
fn test_generate_rejects_blank_profile() {
    let (config_path, _config_dir) = create_temp_config_file(MINIMAL_YAML);
    let settings_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let output_path = out_dir.path().join("karabiner.json");

    let output = isolated_command(
        &[
            "generate",
            config_path.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
            "--profile",
            " ",
        ],
        settings_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Profile name must not be empty"));
    assert!(!output_path.exists());
}

#[test]
fn test_generate_missing_config() {
    let settings_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let output_path = out_dir.path().join("karabiner.json");

    let output = isolated_command(
        &[
            "generate",
            "/nonexistent/remap.yaml",
            "-o",
            output_path.to_str().unwrap(),
        ],
        settings_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Config file not found"));
}
