//! Line renderers.
//!
//! Input and progress lines animate over several suspensions and are driven
//! through [`Renderer::resume`]; output lines are appended in one call.

mod output;
mod progress;
mod typed;

use std::time::Duration;

pub use output::render_output;
pub use progress::{build_progress_text, percent_at, ProgressBar};
pub use typed::TypedLine;

use crate::container::{Container, LineId};

/// An animated line in progress.
#[derive(Debug, Clone)]
pub enum Renderer {
    Typed(TypedLine),
    Progress(ProgressBar),
}

impl Renderer {
    /// Advance the animation. `Some(wait)` asks to be resumed after `wait`;
    /// `None` means the line is finished.
    pub fn resume<C: Container + ?Sized>(&mut self, container: &mut C) -> Option<Duration> {
        match self {
            Self::Typed(typed) => typed.resume(container),
            Self::Progress(bar) => bar.resume(container),
        }
    }

    pub fn line(&self) -> LineId {
        match self {
            Self::Typed(typed) => typed.line(),
            Self::Progress(bar) => bar.line(),
        }
    }
}
