//! Generate command: compile a remapping config into karabiner.json.

use crate::cli::common::{compile_config, load_config, CliError, CliResult};
use crate::config::Settings;
use crate::generator::assemble;
use clap::Args;
use std::path::PathBuf;

/// Generate karabiner.json from a remapping config
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Path to the YAML remapping config
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Output file (defaults to ~/.config/karabiner/karabiner.json)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Do not back up the existing output file
    #[arg(long)]
    pub no_backup: bool,

    /// Karabiner profile to write the rules into
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let settings = Settings::load()
            .map_err(|e| CliError::validation(format!("Failed to load settings: {e:#}")))?;

        let remap = load_config(&self.config)?;
        let layout = compile_config(&remap)?;

        let output = match &self.output {
            Some(path) => path.clone(),
            None => settings
                .output
                .resolve_path()
                .map_err(|e| CliError::io(format!("Failed to resolve output path: {e:#}")))?,
        };

        let mut options = settings.document_options();
        if let Some(profile) = &self.profile {
            if profile.trim().is_empty() {
                return Err(CliError::validation("Profile name must not be empty"));
            }
            options.profile_name.clone_from(profile);
        }
        let backup = settings.output.backup && !self.no_backup;

        let outcome = assemble(&output, &layout, &options, backup)
            .map_err(|e| CliError::io(format!("Failed to write output: {e:#}")))?;

        println!("✓ Configuration written to: {}", outcome.path.display());
        if let Some(backup) = &outcome.backup {
            println!("  Backup created: {}", backup.display());
        }
        println!(
            "  {} rules, {} manipulators (profile \"{}\")",
            layout.rules.len(),
            layout.manipulator_count(),
            options.profile_name
        );

        Ok(())
    }
}
