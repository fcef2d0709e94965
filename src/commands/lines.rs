//! Lines handler: print the line list a page or script would play.

use anyhow::Result;

use termynal::cli::LinesArgs;
use termynal::{LineData, Termynal};

use super::Source;

pub fn handle(args: &LinesArgs) -> Result<()> {
    let source = Source::load(&args.source, &args.options)?;
    let (_document, container, options, lines) = source.into_page()?;

    let mut player = Termynal::with_container(container, options, lines);
    if !player.is_initialized() {
        player.init()?;
    }

    let output = if args.resolved {
        let options = player.options();
        let filled: Vec<LineData> = player
            .lines()
            .iter()
            .map(|line| line.filled(options))
            .collect();
        serde_json::to_string_pretty(&filled)?
    } else {
        serde_json::to_string_pretty(player.lines())?
    };
    println!("{output}");
    Ok(())
}
