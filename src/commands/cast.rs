//! Cast handler: record lines as an asciicast v3 file.

use anyhow::{Context, Result};

use termynal::asciicast::Header;
use termynal::cast::{record, CastSurface};
use termynal::cli::CastArgs;
use termynal::Termynal;

use super::Source;

pub fn handle(args: &CastArgs) -> Result<()> {
    let source = Source::load(&args.source, &args.options)?;
    let markup = source.snapshot();

    let header = Header::new(args.cols, args.rows).with_title(args.title.clone());
    let surface = CastSurface::new(header)
        .with_markup(markup)
        .with_markers(!args.no_markers);
    let mut player = Termynal::with_container(surface, source.options, source.lines);
    if !player.is_initialized() {
        player.init()?;
    }
    let lines = player.lines().len();

    let cast = record(player);
    cast.write(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Recorded {} line(s), {:.1}s, to {}",
        lines,
        cast.duration(),
        args.output.display()
    );
    Ok(())
}
