//! CLI command handlers for karabingen.
//!
//! Each subcommand lives in its own module and returns a [`common::CliResult`]
//! whose error kind decides the process exit code.

pub mod common;
pub mod compile;
pub mod config;
pub mod generate;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, ExitCode};
pub use compile::CompileArgs;
pub use config::ConfigArgs;
pub use generate::GenerateArgs;
pub use validate::ValidateArgs;
