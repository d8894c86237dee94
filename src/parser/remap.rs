//! YAML remapping configuration loading.
//!
//! # File Format
//!
//! ```yaml
//! version: 1
//! hyperkey: caps_lock
//! use_hhkb: false
//! disable_command_tab: true
//! keybindings:
//!   option:
//!     s: { type: app, val: /Applications/Slack.app }
//!   layers:
//!     - key: o
//!       type: app
//!       sub:
//!         s: /Applications/Safari.app
//! ```
//!
//! Omitted fields take the defaults documented on [`RemapConfig`].

use crate::constants::SUPPORTED_CONFIG_VERSION;
use crate::models::RemapConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Reads and parses a remapping configuration file.
pub fn load_remap_config(path: &Path) -> Result<RemapConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_remap_config(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parses a remapping configuration from YAML text.
///
/// An empty document yields the default configuration.
pub fn parse_remap_config(content: &str) -> Result<RemapConfig> {
    if content.trim().is_empty() {
        return Ok(RemapConfig::default());
    }

    let config: RemapConfig = serde_yml::from_str(content).context("Failed to parse YAML")?;

    validate_version(&config)?;

    Ok(config)
}

fn validate_version(config: &RemapConfig) -> Result<()> {
    if config.version != SUPPORTED_CONFIG_VERSION {
        anyhow::bail!(
            "Unsupported config version: {} (supported: {})",
            config.version,
            SUPPORTED_CONFIG_VERSION
        );
    }
    Ok(())
}
