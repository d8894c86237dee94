//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Smallest valid config: defaults only.
pub const MINIMAL_YAML: &str = "version: 1\n";

/// Hyper key on caps_lock with one app sublayer and one web sublayer.
pub const LAYERS_YAML: &str = r"
version: 1
hyperkey: caps_lock
keybindings:
  layers:
    - key: o
      type: app
      sub:
        s: /Applications/Safari.app
        t: /Applications/Terminal.app
    - key: w
      type: web
      sub:
        g: https://github.com
";

/// Every utility feature switched on (tmux excluded; it depends on the host).
pub const FULL_YAML: &str = r"
version: 1
hyperkey: caps_lock
disable_left_ctrl: true
disable_command_tab: true
switch_safari_tabs_hl: true
fix_c_c: true
fix_g502:
  enable: true
keybindings:
  option:
    s:
      type: app
      val: /Applications/Slack.app
    t:
      type: shell
      val: open -a Terminal
  layers:
    - key: o
      type: app
      sub:
        s: /Applications/Safari.app
";

/// HHKB mode and a caps_lock hyper key under the reject policy.
pub const REJECT_CONFLICT_YAML: &str = r"
version: 1
use_hhkb: true
key_conflict: reject
";

/// HHKB mode and a caps_lock hyper key under the default policy.
pub const PRECEDENCE_CONFLICT_YAML: &str = r"
version: 1
use_hhkb: true
";

/// Writes `content` to `remap.yaml` in a fresh temp dir.
///
/// Keep the `TempDir` alive for as long as the file is needed.
pub fn create_temp_config_file(content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("remap.yaml");
    fs::write(&path, content).expect("Failed to write config file");
    (path, temp_dir)
}

/// Path to the karabingen binary.
pub fn karabingen_bin() -> &'static str {
    env!("CARGO_BIN_EXE_karabingen")
}

/// Creates a Command whose settings directory is `config_dir`.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(karabingen_bin());
    cmd.env("KARABINGEN_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Reads and parses a JSON file.
pub fn read_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("Failed to read JSON file");
    serde_json::from_str(&content).expect("Failed to parse JSON file")
}

/// Files in `dir` whose name starts with `backup_`.
pub fn backup_files(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .expect("Failed to read dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("backup_"))
        .map(|entry| entry.path())
        .collect()
}
