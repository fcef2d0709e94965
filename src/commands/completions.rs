//! Shell completion generation.

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

use termynal::cli::Cli;

pub fn handle(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "termynal", &mut io::stdout());
    Ok(())
}
