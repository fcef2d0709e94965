//! Play handler: animate lines in the current terminal.

use std::io;

use anyhow::{Context, Result};

use termynal::cli::PlayArgs;
use termynal::terminal::{RenderMode, TerminalSurface, Theme};
use termynal::{SystemClock, Termynal};

use super::Source;

pub fn handle(args: &PlayArgs) -> Result<()> {
    let theme = Theme::by_name(&args.theme).with_context(|| {
        format!(
            "Unknown theme '{}' (expected classic or ocean)",
            args.theme
        )
    })?;

    let source = Source::load(&args.source, &args.options)?;
    let markup = source.snapshot();
    let mode = if args.plain {
        RenderMode::Plain
    } else {
        RenderMode::detect()
    };

    let surface = TerminalSurface::new(io::stdout(), mode)
        .with_theme(theme)
        .with_markup(markup)
        .with_terminal_width();
    let mut player = Termynal::with_container(surface, source.options, source.lines);

    let abort = player.abort_handle();
    let handler_abort = abort.clone();
    if let Err(err) = ctrlc::set_handler(move || handler_abort.abort()) {
        tracing::warn!(error = %err, "Could not install Ctrl+C handler");
    }

    tracing::debug!(speed = args.speed, mode = ?mode, "Starting playback");
    let mut clock = SystemClock::new().with_speed(args.speed).with_abort(abort);
    player.play(&mut clock);

    player.into_container().finish()?;
    Ok(())
}
