//! Settings management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::{Settings, KEYBOARD_TYPES};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Settings management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current settings
    Show(ConfigShowArgs),
    /// Print the settings file location
    Path,
    /// Set settings values
    Set(ConfigSetArgs),
}

/// Display current settings
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set settings values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Default karabiner.json location
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Back up karabiner.json before overwriting (true or false)
    #[arg(long, value_name = "BOOL")]
    backup: Option<bool>,

    /// Default profile name
    #[arg(long, value_name = "NAME")]
    profile: Option<String>,

    /// Virtual keyboard type (ansi, iso or jis)
    #[arg(long, value_name = "TYPE")]
    keyboard_type: Option<String>,
}

/// JSON-serializable settings for output
#[derive(Serialize, Debug)]
struct SettingsOutput {
    output: OutputSection,
    profile: ProfileSection,
}

#[derive(Serialize, Debug)]
struct OutputSection {
    path: String,
    backup: bool,
}

#[derive(Serialize, Debug)]
struct ProfileSection {
    name: String,
    keyboard_type: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Path => print_path(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let settings = Settings::load()
            .map_err(|e| CliError::validation(format!("Failed to load settings: {e:#}")))?;

        let output = SettingsOutput {
            output: OutputSection {
                path: settings
                    .output
                    .resolve_path()
                    .map_err(|e| CliError::io(format!("Failed to resolve output path: {e:#}")))?
                    .to_string_lossy()
                    .to_string(),
                backup: settings.output.backup,
            },
            profile: ProfileSection {
                name: settings.profile.name,
                keyboard_type: settings.profile.keyboard_type,
            },
        };

        if self.json {
            let json = serde_json::to_string_pretty(&output).map_err(|e| {
                CliError::io(format!("Failed to serialize configuration to JSON: {e}"))
            })?;
            println!("{json}");
        } else {
            println!("Output:");
            println!("  Path:          {}", output.output.path);
            println!("  Backup:        {}", output.output.backup);
            println!();
            println!("Profile:");
            println!("  Name:          {}", output.profile.name);
            println!("  Keyboard type: {}", output.profile.keyboard_type);
        }

        Ok(())
    }
}

fn print_path() -> CliResult<()> {
    let path = Settings::config_file_path()
        .map_err(|e| CliError::io(format!("Failed to determine config path: {e:#}")))?;
    println!("{}", path.display());
    Ok(())
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.output.is_none()
            && self.backup.is_none()
            && self.profile.is_none()
            && self.keyboard_type.is_none()
        {
            return Err(CliError::validation(
                "At least one setting must be specified: --output, --backup, --profile, or --keyboard-type",
            ));
        }

        let mut settings = Settings::load().unwrap_or_default();

        if let Some(path) = &self.output {
            settings.output.path = Some(path.clone());
        }
        if let Some(backup) = self.backup {
            settings.output.backup = backup;
        }
        if let Some(profile) = &self.profile {
            settings.profile.name.clone_from(profile);
        }
        if let Some(keyboard_type) = &self.keyboard_type {
            let keyboard_type = keyboard_type.to_lowercase();
            if !KEYBOARD_TYPES.contains(&keyboard_type.as_str()) {
                return Err(CliError::validation(format!(
                    "Invalid keyboard type. Must be one of: {}",
                    KEYBOARD_TYPES.join(", ")
                )));
            }
            settings.profile.keyboard_type = keyboard_type;
        }

        settings
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}
