//! Application settings.
//!
//! Settings live in a small TOML file in the platform config directory and
//! supply defaults for the output location and target profile. Command line
//! flags always win over settings.

use crate::constants::{
    APP_BINARY_NAME, CONFIG_DIR_ENV, DEFAULT_KEYBOARD_TYPE, DEFAULT_PROFILE_NAME,
};
use crate::generator::document::{default_document_path, DocumentOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Keyboard types accepted by `virtual_hid_keyboard.keyboard_type_v2`.
pub const KEYBOARD_TYPES: [&str; 3] = ["ansi", "iso", "jis"];

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// karabiner.json location (defaults to `~/.config/karabiner/karabiner.json`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Back up the existing file before overwriting it
    pub backup: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            backup: true,
        }
    }
}

impl OutputConfig {
    /// Configured path, or the default karabiner.json location.
    pub fn resolve_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => default_document_path(),
        }
    }
}

/// Target profile configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Profile receiving the generated rules
    pub name: String,
    /// Virtual keyboard type (ansi, iso or jis)
    pub keyboard_type: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.to_string(),
            keyboard_type: DEFAULT_KEYBOARD_TYPE.to_string(),
        }
    }
}

/// Application settings.
///
/// # File Location
///
/// - `$KARABINGEN_CONFIG_DIR/config.toml` when the variable is set
/// - Linux: `~/.config/karabingen/config.toml`
/// - macOS: `~/Library/Application Support/karabingen/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output file settings
    pub output: OutputConfig,
    /// Target profile settings
    pub profile: ProfileConfig,
}

impl Settings {
    /// Creates settings with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_BINARY_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads settings from the config file.
    ///
    /// If the file doesn't exist, returns default settings.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let settings: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;
        settings.validate()?;

        Ok(settings)
    }

    /// Saves settings to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates settings values.
    ///
    /// Checks:
    /// - profile name is not empty
    /// - keyboard type is one of ansi, iso or jis
    pub fn validate(&self) -> Result<()> {
        if self.profile.name.trim().is_empty() {
            anyhow::bail!("Profile name must not be empty");
        }

        if !KEYBOARD_TYPES.contains(&self.profile.keyboard_type.as_str()) {
            anyhow::bail!(
                "Invalid keyboard type '{}'. Must be one of: {}",
                self.profile.keyboard_type,
                KEYBOARD_TYPES.join(", ")
            );
        }

        Ok(())
    }

    /// Document options derived from the profile section.
    #[must_use]
    pub fn document_options(&self) -> DocumentOptions {
        DocumentOptions {
            profile_name: self.profile.name.clone(),
            keyboard_type: self.profile.keyboard_type.clone(),
        }
    }
}
