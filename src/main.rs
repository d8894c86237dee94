//! karabingen - Karabiner-Elements rule generator
//!
//! Compiles a small YAML description of a hyper key, its sublayers and a few
//! utility remaps into Karabiner-Elements complex modification rules.

use clap::{Parser, Subcommand};
use karabingen::cli::{CompileArgs, ConfigArgs, ExitCode, GenerateArgs, ValidateArgs};
use karabingen::constants::APP_NAME;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Generate Karabiner-Elements rules from a YAML remapping config
#[derive(Parser, Debug)]
#[command(name = APP_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a config and write it into karabiner.json
    Generate(GenerateArgs),
    /// Check a config for key conflicts
    Validate(ValidateArgs),
    /// Print the compiled rules as JSON
    Compile(CompileArgs),
    /// Manage karabingen settings
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Command::Generate(args) => args.execute(),
        Command::Validate(args) => args.execute(),
        Command::Compile(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }

    std::process::exit(ExitCode::Success.code());
}
