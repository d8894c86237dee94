//! Shared CLI error types and helpers.

use crate::generator::{CompiledLayout, RuleCompiler, TmuxEnvironment};
use crate::models::RemapConfig;
use crate::parser::load_remap_config;
use std::fmt;
use std::path::Path;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Input was rejected (bad config, key conflicts, strict-mode warnings)
    ValidationError = 1,
    /// Reading or writing files failed
    IoError = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to terminate with
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// I/O failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of CLI command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Loads a remapping configuration file.
///
/// A missing file is an I/O error; anything that fails to parse is a
/// validation error.
pub fn load_config(path: &Path) -> CliResult<RemapConfig> {
    if !path.exists() {
        return Err(CliError::io(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    load_remap_config(path).map_err(|e| CliError::validation(format!("{e:#}")))
}

/// Compiles `config`, detecting the tmux environment only when needed.
pub fn compile_config(config: &RemapConfig) -> CliResult<CompiledLayout> {
    let tmux_env = if config.tmux_jump.enable {
        Some(
            TmuxEnvironment::detect()
                .map_err(|e| CliError::io(format!("Failed to detect tmux environment: {e:#}")))?,
        )
    } else {
        None
    };

    let mut compiler = RuleCompiler::new(config);
    if let Some(env) = &tmux_env {
        compiler = compiler.with_tmux_environment(env);
    }

    compiler
        .compile()
        .map_err(|e| CliError::validation(e.to_string()))
}
