//! Compile command: print the generated rules without touching karabiner.json.

use crate::cli::common::{compile_config, load_config, CliError, CliResult};
use clap::Args;
use std::path::PathBuf;

/// Print the compiled rules as JSON
#[derive(Debug, Clone, Args)]
pub struct CompileArgs {
    /// Path to the YAML remapping config
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl CompileArgs {
    /// Execute the compile command
    pub fn execute(&self) -> CliResult<()> {
        let remap = load_config(&self.config)?;
        let layout = compile_config(&remap)?;

        let json = if self.pretty {
            serde_json::to_string_pretty(&layout)
        } else {
            serde_json::to_string(&layout)
        }
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;

        println!("{json}");
        Ok(())
    }
}
