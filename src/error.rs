//! Error types for termynal.
//!
//! Only construction and initialisation can fail in the sequencer itself;
//! everything else about malformed input degrades to configured defaults.
//! The remaining variants belong to the hosts and script loaders.

use std::io;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, TermynalError>;

/// Errors raised by the player, its hosts and the script loaders.
#[derive(Debug, thiserror::Error)]
pub enum TermynalError {
    #[error("Termynal container not found: {locator}")]
    ContainerNotFound { locator: String },

    #[error("Termynal is already initialized")]
    AlreadyInitialized,

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Failed to parse JSON script: {0}")]
    Script(#[from] serde_json::Error),

    #[error("Failed to parse TOML script: {0}")]
    ScriptToml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl TermynalError {
    /// Build a `ContainerNotFound` error for the given locator.
    pub fn container_not_found(locator: impl Into<String>) -> Self {
        Self::ContainerNotFound {
            locator: locator.into(),
        }
    }
}
