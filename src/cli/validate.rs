//! Validation command for remapping configs.

use crate::cli::common::{compile_config, load_config, CliError, CliResult};
use crate::generator::{CompiledLayout, ConfigValidator, KeyConflict};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Validate a remapping config for key conflicts
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to the YAML remapping config
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// JSON output of the validate command.
#[derive(Debug, Serialize)]
struct ValidationResponse {
    valid: bool,
    errors: Vec<KeyConflict>,
    warnings: Vec<KeyConflict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rules: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    manipulators: Option<usize>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let remap = load_config(&self.config)?;
        let report = ConfigValidator::new(&remap).validate();

        // Only compile what passed; a rejected config has nothing to count
        let layout = if report.is_valid() {
            Some(compile_config(&remap)?)
        } else {
            None
        };

        let response = ValidationResponse {
            valid: report.is_valid(),
            errors: report.errors.clone(),
            warnings: report.warnings.clone(),
            rules: layout.as_ref().map(|l| l.rules.len()),
            manipulators: layout.as_ref().map(CompiledLayout::manipulator_count),
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            if response.valid {
                println!("✓ Validation passed");
            } else {
                println!("✗ Validation failed");
            }

            if let (Some(rules), Some(manipulators)) = (response.rules, response.manipulators) {
                println!("  {rules} rules, {manipulators} manipulators");
            }

            let message = report.format_message();
            if !message.is_empty() {
                println!();
                print!("{message}");
            }
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && !response.warnings.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}
