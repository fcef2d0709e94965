//! Player state machine types.

use std::time::Duration;

use super::render::Renderer;

/// Where a player is in its run.
///
/// ```text
/// Idle -> AwaitingStartDelay -> RenderingLine(0) -> AwaitingLineDelay(0)
///      -> RenderingLine(1) -> ... -> Done
/// ```
///
/// Any state may move to `Aborted` once an abort is requested.
#[derive(Debug, Clone)]
pub enum PlaybackState {
    /// Initialised (or not yet) and waiting to be started
    Idle,
    /// Waiting out `start_delay` before the first line
    AwaitingStartDelay,
    /// An animated line is on screen and not yet complete
    RenderingLine { index: usize, renderer: Renderer },
    /// Pausing after line `index`
    AwaitingLineDelay { index: usize },
    /// Every line has rendered
    Done,
    /// Stopped early; no further mutations happen
    Aborted,
}

impl PlaybackState {
    /// Whether the run has ended, normally or not.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Index of the line being rendered or waited on, if any.
    pub fn current_line(&self) -> Option<usize> {
        match self {
            Self::RenderingLine { index, .. } | Self::AwaitingLineDelay { index } => Some(*index),
            _ => None,
        }
    }
}

/// Outcome of advancing the player by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Call `step` again once this much time has passed
    Wait(Duration),
    /// Nothing left to do
    Finished,
}
