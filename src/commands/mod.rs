//! Subcommand handlers.
//!
//! Every playback command reads its lines the same way: an HTML page is
//! parsed and its container looked up by selector, anything else is read as
//! a script. Caller options are layered config file < script < flags.

pub mod cast;
pub mod completions;
pub mod config;
pub mod lines;
pub mod play;
pub mod render;

use std::path::Path;

use anyhow::{Context, Result};

use termynal::cli::{OptionArgs, SourceArgs};
use termynal::dom::{Document, DomElement};
use termynal::{Config, ContainerSnapshot, LineData, Options, PartialOptions, Resolve, Script};

/// Page used when a script is rendered without HTML.
const SCRIPT_PAGE: &str = r#"<div id="termynal"></div>"#;

/// Lines and caller options read from a command's input file.
pub struct Source {
    /// Config file, script and flag options combined
    pub options: PartialOptions,
    /// Explicit lines (from a script); markup lines are read by the player
    pub lines: Vec<LineData>,
    /// Document and container, for HTML input
    pub page: Option<(Document, DomElement)>,
}

impl Source {
    pub fn load(source: &SourceArgs, flags: &OptionArgs) -> Result<Self> {
        let path = &source.file;
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }

        let base = load_config_options();
        if is_html(path) {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let document = Document::parse(&html);
            let container = document
                .query_selector(&source.selector)?
                .ok_or_else(|| termynal::TermynalError::container_not_found(&source.selector))?;
            tracing::debug!(selector = %source.selector, "Resolved container");

            Ok(Self {
                options: base.overlay(&flags.to_partial()),
                lines: Vec::new(),
                page: Some((document, container)),
            })
        } else {
            let script = Script::load(path)
                .with_context(|| format!("Failed to load script {}", path.display()))?;
            tracing::debug!(lines = script.lines.len(), "Loaded script");

            Ok(Self {
                options: base.overlay(&script.options).overlay(&flags.to_partial()),
                lines: script.lines,
                page: None,
            })
        }
    }

    /// Markup of the page container, for hosts that are not the page itself.
    pub fn snapshot(&self) -> ContainerSnapshot {
        match &self.page {
            Some((_, container)) => ContainerSnapshot::capture(container, &self.line_attribute()),
            None => ContainerSnapshot::default(),
        }
    }

    /// The page, or an empty one holding a `#termynal` container.
    pub fn into_page(self) -> Result<(Document, DomElement, PartialOptions, Vec<LineData>)> {
        let (document, container) = match self.page {
            Some(page) => page,
            None => {
                let document = Document::parse(SCRIPT_PAGE);
                let container = document
                    .query_selector("#termynal")?
                    .context("Script page has no container")?;
                (document, container)
            }
        };
        Ok((document, container, self.options, self.lines))
    }

    fn line_attribute(&self) -> String {
        let prefix = self
            .options
            .prefix
            .clone()
            .unwrap_or_else(|| Options::default().prefix);
        format!("data-{prefix}")
    }
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

/// Options from the config file; a broken file is reported and skipped.
fn load_config_options() -> PartialOptions {
    match Config::load() {
        Ok(config) => config.options,
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "Ignoring config file");
            PartialOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_detection_by_extension() {
        assert!(is_html(Path::new("demo.html")));
        assert!(is_html(Path::new("DEMO.HTM")));
        assert!(!is_html(Path::new("demo.json")));
        assert!(!is_html(Path::new("demo")));
    }
}
