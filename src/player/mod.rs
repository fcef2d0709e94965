//! The terminal sequencer.
//!
//! A [`Termynal`] owns a container, the merged options and the ordered line
//! list, and plays the lines one at a time:
//!
//! - `render/`: the typed, progress and output renderers
//! - `state`: the playback state machine ([`PlaybackState`], [`Step`])
//! - `clock`: time sources that turn waits into real or simulated time
//!
//! # Usage
//!
//! ```
//! use termynal::dom::Document;
//! use termynal::{LineData, PartialOptions, Termynal, VirtualClock};
//!
//! let document = Document::parse(r#"<div id="termynal"></div>"#);
//! let lines = vec![LineData::input("pip install spacy"), LineData::output("Done")];
//! let mut player = Termynal::new(&document, "#termynal", PartialOptions::default(), lines)?;
//!
//! player.init()?;
//! player.start(&mut VirtualClock::new());
//! assert_eq!(player.container().line_texts(), vec!["pip install spacy", "Done"]);
//! # Ok::<(), termynal::TermynalError>(())
//! ```

pub mod clock;
pub mod render;
pub mod state;

use std::time::Duration;

pub use clock::{AbortHandle, Clock, SystemClock, VirtualClock};
pub use state::{PlaybackState, Step};

use crate::config::{MergedOptions, Options, PartialOptions};
use crate::container::{resolve, Container, Locator, Resolve};
use crate::error::{Result, TermynalError};
use crate::line::{LineData, LineType};
use crate::markup::extract_lines;
use render::{render_output, ProgressBar, Renderer, TypedLine};

/// Attribute marking a container as taken over by a player.
pub const ACTIVE_ATTRIBUTE: &str = "data-termynal";

/// An animated terminal bound to one container.
pub struct Termynal<C: Container> {
    container: C,
    merged: MergedOptions,
    lines: Vec<LineData>,
    state: PlaybackState,
    initialized: bool,
    abort: AbortHandle,
}

impl<C: Container> Termynal<C> {
    /// Resolve `locator` against `resolver` and build a player for it.
    ///
    /// Fails with [`TermynalError::ContainerNotFound`] when the selector
    /// matches nothing; the document is left untouched in that case. When
    /// the merged `autoplay` option is set the player initialises itself
    /// immediately and is left armed: the first [`step`], [`start`] or
    /// [`play`] begins the animation.
    ///
    /// [`step`]: Termynal::step
    /// [`start`]: Termynal::start
    /// [`play`]: Termynal::play
    pub fn new<R>(
        resolver: &R,
        locator: impl Into<Locator<C>>,
        options: PartialOptions,
        lines: Vec<LineData>,
    ) -> Result<Self>
    where
        R: Resolve<Container = C>,
    {
        let container = resolve(resolver, locator.into())?;
        Ok(Self::with_container(container, options, lines))
    }

    /// Build a player for a container handle.
    pub fn with_container(container: C, options: PartialOptions, lines: Vec<LineData>) -> Self {
        let markup = PartialOptions::from_dataset(&container.dataset());
        let merged = MergedOptions::merge(&options, &markup);

        let mut player = Self {
            container,
            merged,
            lines,
            state: PlaybackState::Idle,
            initialized: false,
            abort: AbortHandle::new(),
        };
        if player.merged.options.autoplay {
            player.initialize();
        }
        player
    }

    /// One-time setup: collect markup lines, pin the container size, mark it
    /// active and clear it. Afterwards the player is armed and [`start`] or
    /// [`step`] play it.
    ///
    /// A second call fails with [`TermynalError::AlreadyInitialized`] and
    /// changes nothing.
    ///
    /// [`start`]: Termynal::start
    /// [`step`]: Termynal::step
    pub fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Err(TermynalError::AlreadyInitialized);
        }
        self.initialize();
        Ok(())
    }

    fn initialize(&mut self) {
        let attribute = self.merged.options.line_attribute();
        let elements = self.container.flagged_elements(&attribute);
        let mut lines = extract_lines(&elements, &self.merged.options);
        let from_markup = lines.len();
        lines.append(&mut self.lines);
        self.lines = lines;

        let size = self.container.computed_size();
        let width = (size.width != 0.0).then_some(size.width);
        let min_height = (size.height != 0.0).then_some(size.height);
        if width.is_some() || min_height.is_some() {
            self.container.pin_size(width, min_height);
        }

        self.container.set_attribute(ACTIVE_ATTRIBUTE, "");
        self.container.clear();
        self.initialized = true;
        self.state = PlaybackState::Idle;

        tracing::debug!(
            lines = self.lines.len(),
            from_markup,
            width = ?width,
            min_height = ?min_height,
            "Initialized terminal"
        );
    }

    /// Perform every mutation due now and report how long to wait before
    /// the next call.
    ///
    /// An uninitialised, finished or aborted player returns
    /// [`Step::Finished`] without touching the container.
    pub fn step(&mut self) -> Step {
        if self.abort.is_aborted() && !matches!(self.state, PlaybackState::Aborted) {
            self.mark_aborted();
        }
        if !self.initialized {
            return Step::Finished;
        }

        match std::mem::replace(&mut self.state, PlaybackState::Done) {
            PlaybackState::Idle => {
                self.state = PlaybackState::AwaitingStartDelay;
                Step::Wait(self.merged.options.start_delay_duration())
            }
            PlaybackState::AwaitingStartDelay => self.begin_line(0),
            PlaybackState::RenderingLine { index, renderer } => self.resume_line(index, renderer),
            PlaybackState::AwaitingLineDelay { index } => self.begin_line(index + 1),
            PlaybackState::Done => Step::Finished,
            PlaybackState::Aborted => {
                self.state = PlaybackState::Aborted;
                Step::Finished
            }
        }
    }

    /// Play to completion, letting `clock` perform every wait.
    ///
    /// Returns early when the player is aborted, or immediately when it has
    /// not been initialised.
    pub fn start<K: Clock + ?Sized>(&mut self, clock: &mut K) {
        while let Step::Wait(duration) = self.step() {
            clock.sleep(duration);
        }
    }

    /// Initialise unless autoplay already did, then play to completion.
    pub fn play<K: Clock + ?Sized>(&mut self, clock: &mut K) {
        if !self.initialized {
            self.initialize();
        }
        self.start(clock);
    }

    /// Stop playback. No container mutation happens afterwards.
    pub fn abort(&mut self) {
        self.abort.abort();
        if !matches!(self.state, PlaybackState::Aborted) {
            self.mark_aborted();
        }
    }

    /// Handle that aborts this player from elsewhere (a signal handler,
    /// another thread).
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    fn mark_aborted(&mut self) {
        tracing::debug!(line = ?self.state.current_line(), "Playback aborted");
        self.state = PlaybackState::Aborted;
    }

    fn begin_line(&mut self, index: usize) -> Step {
        let Some(line) = self.lines.get(index) else {
            tracing::debug!(lines = self.lines.len(), "Playback complete");
            self.state = PlaybackState::Done;
            return Step::Finished;
        };
        let resolved = line.resolve(&self.merged.options);
        tracing::trace!(index, line_type = %resolved.line_type, "Rendering line");
        self.container.line_started(index, resolved.line_type);

        let renderer = match resolved.line_type {
            LineType::Output => {
                render_output(&mut self.container, &resolved);
                return self.finish_line(index);
            }
            LineType::Input => Renderer::Typed(TypedLine::begin(&mut self.container, &resolved)),
            LineType::Progress => Renderer::Progress(ProgressBar::begin(
                &mut self.container,
                &resolved,
                self.merged.options.progress_policy,
            )),
        };
        self.resume_line(index, renderer)
    }

    fn resume_line(&mut self, index: usize, mut renderer: Renderer) -> Step {
        match renderer.resume(&mut self.container) {
            Some(wait) => {
                self.state = PlaybackState::RenderingLine { index, renderer };
                Step::Wait(wait)
            }
            None => self.finish_line(index),
        }
    }

    fn finish_line(&mut self, index: usize) -> Step {
        self.state = PlaybackState::AwaitingLineDelay { index };
        Step::Wait(self.line_delay(index))
    }

    /// Pause after line `index`: its own `delay`, else `lineDelay`.
    fn line_delay(&self, index: usize) -> Duration {
        self.lines
            .get(index)
            .map(|line| line.resolve(&self.merged.options).delay)
            .unwrap_or_else(|| crate::config::millis(self.merged.options.line_delay))
    }

    // === Accessors ===

    pub fn options(&self) -> &Options {
        &self.merged.options
    }

    /// Merged options with per-field provenance.
    pub fn merged_options(&self) -> &MergedOptions {
        &self.merged
    }

    /// Lines to play. Markup lines are only included after initialisation.
    pub fn lines(&self) -> &[LineData] {
        &self.lines
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn into_container(self) -> C {
        self.container
    }
}
