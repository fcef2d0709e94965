//! Terminal host.
//!
//! Plays lines into a real terminal (or any writer). In styled mode the
//! current line is redrawn in place on every change; in plain mode each
//! line is written once, when it is complete, so the output is suitable for
//! pipes and logs.

mod surface;
mod theme;

pub use surface::{RenderMode, TerminalSurface};
pub use theme::Theme;
