//! Render handler: play instantly into the HTML document and print the result.

use anyhow::Result;

use termynal::cli::RenderArgs;
use termynal::{Termynal, VirtualClock};

use super::Source;

pub fn handle(args: &RenderArgs) -> Result<()> {
    let source = Source::load(&args.source, &args.options)?;
    let (document, container, options, lines) = source.into_page()?;

    let mut player = Termynal::with_container(container, options, lines);
    let mut clock = VirtualClock::new();
    player.play(&mut clock);

    if args.document {
        println!("{}", document.to_html());
    } else {
        println!("{}", player.container().outer_html());
    }
    if args.timing {
        eprintln!("{}ms", clock.elapsed().as_millis());
    }
    Ok(())
}
