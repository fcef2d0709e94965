//! Development tasks: `cargo run -p xtask -- man [--out-dir DIR]`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_mangen::Man;

#[derive(Parser)]
#[command(name = "xtask", about = "termynal development tasks")]
struct Xtask {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for termynal and its subcommands
    Man {
        /// Directory to write the pages into
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().command {
        Task::Man { out_dir } => generate_man(&out_dir),
    }
}

fn generate_man(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let cmd = termynal::cli::Cli::command();
    write_page(&cmd, out_dir, "termynal")?;
    for sub in cmd.get_subcommands() {
        let name = format!("termynal-{}", sub.get_name());
        write_page(&sub.clone().name(name.clone()), out_dir, &name)?;
    }
    Ok(())
}

fn write_page(cmd: &clap::Command, out_dir: &Path, name: &str) -> Result<()> {
    let mut buffer = Vec::new();
    Man::new(cmd.clone()).render(&mut buffer)?;
    let path = out_dir.join(format!("{name}.1"));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
