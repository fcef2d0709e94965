//! termynal - animated fake terminal sessions.
//!
//! A [`Termynal`] plays an ordered list of lines (typed commands, static
//! output, progress bars) into a [`Container`] with per-line timing. Lines
//! come from code, from a JSON/TOML script, or from `data-ty` markup inside
//! the container.
//!
//! Hosts:
//! - [`dom`]: an in-memory HTML document
//! - [`terminal`]: a real terminal, via crossterm
//! - [`cast`]: an asciicast v3 recording
//! - `web` (feature `web`): a live browser DOM

pub mod asciicast;
pub mod cast;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
pub mod config;
pub mod container;
pub mod dom;
pub mod error;
pub mod line;
pub mod markup;
pub mod player;
pub mod script;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;
#[cfg(feature = "web")]
pub mod web;

pub use config::{
    Config, MergedOptions, OptionField, OptionSource, Options, PartialOptions, ProgressPolicy,
};
pub use container::{Container, ContainerSnapshot, LineId, Locator, Resolve, Size};
pub use error::{Result, TermynalError};
pub use line::{LineData, LineType, ResolvedLine};
pub use markup::{extract_lines, MarkupElement};
pub use player::{
    AbortHandle, Clock, PlaybackState, Step, SystemClock, Termynal, VirtualClock,
};
pub use script::Script;
