//! Command-line interface definitions.
//!
//! Lives in the library so `xtask` can generate the man page from the same
//! definitions the binary parses.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::{PartialOptions, ProgressPolicy};
use crate::line::LineType;

/// Version with git SHA and build date.
#[cfg(not(feature = "release"))]
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("TERMYNAL_BUILD_DATE"),
    ")"
);

/// Version with build date.
#[cfg(feature = "release")]
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("TERMYNAL_BUILD_DATE"),
    ")"
);

/// Animated fake terminal sessions
#[derive(Debug, Parser)]
#[command(
    name = "termynal",
    version,
    long_version = LONG_VERSION,
    about = "Animated fake terminal sessions",
    long_about = "Play typed commands, output and progress bars with realistic timing.\n\n\
                  Lines come from `data-ty` markup in an HTML page or from a JSON/TOML script.\n\
                  Play them in the terminal, record them as an asciicast, or render the final page.",
    after_help = concat!(
        "Set TERMYNAL_LOG=debug for diagnostics.\nSource: https://github.com/",
        env!("TERMYNAL_REPO_NAME")
    )
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play a page or script in the terminal
    Play(PlayArgs),

    /// Record a page or script as an asciicast v3 file
    Cast(CastArgs),

    /// Run a page or script instantly and print the container's final HTML
    Render(RenderArgs),

    /// Print the lines a page or script would play, as JSON
    Lines(LinesArgs),

    /// Inspect the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the configuration file contents as TOML
    Show,
    /// Print the configuration file location
    Path,
}

/// Where lines come from.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// HTML page (.html, .htm) or script (.json, .toml)
    pub file: PathBuf,

    /// Selector of the container inside an HTML page
    #[arg(long, default_value = "#termynal")]
    pub selector: String,
}

/// Caller options; anything left unset comes from the config file or the
/// built-in defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct OptionArgs {
    /// Attribute namespace of markup lines (data-<prefix>)
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Milliseconds before the first line
    #[arg(long, value_name = "MS")]
    pub start_delay: Option<f64>,

    /// Milliseconds per typed character or progress step
    #[arg(long, value_name = "MS")]
    pub type_delay: Option<f64>,

    /// Milliseconds after each line
    #[arg(long, value_name = "MS")]
    pub line_delay: Option<f64>,

    /// Progress bar width in characters
    #[arg(long, value_name = "N")]
    pub progress_length: Option<f64>,

    /// Progress bar fill glyph
    #[arg(long, value_name = "CHAR")]
    pub progress_char: Option<String>,

    /// Percentage at which progress bars stop
    #[arg(long, value_name = "PERCENT")]
    pub progress_percent: Option<f64>,

    /// Cursor glyph shown while typing
    #[arg(long, value_name = "CHAR")]
    pub cursor: Option<String>,

    /// Extra class for rendered lines
    #[arg(long, value_name = "CLASS")]
    pub class_name: Option<String>,

    /// Type of lines that do not name one
    #[arg(long, value_name = "TYPE", value_parser = parse_line_type)]
    pub default_type: Option<LineType>,

    /// When progress bars stop: overshoot (first step past the target) or exact
    #[arg(long, value_name = "POLICY", value_parser = parse_progress_policy)]
    pub progress_policy: Option<ProgressPolicy>,
}

impl OptionArgs {
    pub fn to_partial(&self) -> PartialOptions {
        PartialOptions {
            prefix: self.prefix.clone(),
            start_delay: self.start_delay,
            type_delay: self.type_delay,
            line_delay: self.line_delay,
            progress_length: self.progress_length,
            progress_char: self.progress_char.clone(),
            progress_percent: self.progress_percent,
            cursor: self.cursor.clone(),
            autoplay: None,
            class_name: self.class_name.clone(),
            default_type: self.default_type,
            progress_policy: self.progress_policy,
        }
    }
}

fn parse_line_type(value: &str) -> Result<LineType, String> {
    LineType::parse(value).ok_or_else(|| {
        format!("unknown line type '{value}' (expected input, output or progress)")
    })
}

fn parse_progress_policy(value: &str) -> Result<ProgressPolicy, String> {
    ProgressPolicy::parse(value)
        .ok_or_else(|| format!("unknown progress policy '{value}' (expected overshoot or exact)"))
}

#[derive(Debug, Clone, Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Playback speed multiplier
    #[arg(long, default_value_t = 1.0)]
    pub speed: f64,

    /// Colour theme: classic or ocean
    #[arg(long, default_value = "classic")]
    pub theme: String,

    /// Never use colours or redraw lines in place
    #[arg(long)]
    pub plain: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CastArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Terminal width recorded in the header
    #[arg(long, default_value_t = 80)]
    pub cols: u16,

    /// Terminal height recorded in the header
    #[arg(long, default_value_t = 24)]
    pub rows: u16,

    /// Recording title
    #[arg(long)]
    pub title: Option<String>,

    /// Do not write a marker per line
    #[arg(long)]
    pub no_markers: bool,
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Print the whole document instead of just the container
    #[arg(long)]
    pub document: bool,

    /// Also print the total playback time to stderr
    #[arg(long)]
    pub timing: bool,
}

#[derive(Debug, Clone, Args)]
pub struct LinesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Resolve every field against the merged options
    #[arg(long)]
    pub resolved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn option_flags_map_to_partial_options() {
        let cli = Cli::try_parse_from([
            "termynal",
            "play",
            "demo.html",
            "--type-delay",
            "20",
            "--default-type",
            "input",
            "--progress-policy",
            "exact",
        ])
        .unwrap();

        let Commands::Play(args) = cli.command else {
            panic!("expected play");
        };
        let partial = args.options.to_partial();
        assert_eq!(partial.type_delay, Some(20.0));
        assert_eq!(partial.default_type, Some(LineType::Input));
        assert_eq!(partial.progress_policy, Some(ProgressPolicy::Exact));
        assert_eq!(partial.line_delay, None);
        assert_eq!(args.source.selector, "#termynal");
    }

    #[test]
    fn unknown_line_type_is_rejected() {
        let result = Cli::try_parse_from(["termynal", "lines", "x.json", "--default-type", "shell"]);
        assert!(result.is_err());
    }
}
