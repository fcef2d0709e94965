//! termynal command-line entry point.

mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use termynal::cli::{Cli, Commands, ConfigCommands};

/// Environment variable holding the log filter (`TERMYNAL_LOG=debug`).
const LOG_ENV: &str = "TERMYNAL_LOG";

/// Log to stderr so diagnostics never mix with the animation on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_color())
        .with_target(false)
        .compact()
        .try_init();
}

fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stderr)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play(args) => commands::play::handle(&args),
        Commands::Cast(args) => commands::cast::handle(&args),
        Commands::Render(args) => commands::render::handle(&args),
        Commands::Lines(args) => commands::lines::handle(&args),
        Commands::Config(ConfigCommands::Show) => commands::config::handle_show(),
        Commands::Config(ConfigCommands::Path) => commands::config::handle_path(),
        Commands::Completions { shell } => commands::completions::handle(shell),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
