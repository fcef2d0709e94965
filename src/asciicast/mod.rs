//! asciicast v3 reader and writer.
//!
//! Reference: https://docs.asciinema.org/manual/asciicast/v3/
//!
//! A file is a JSON header line followed by one JSON array per event,
//! `[interval, code, data]`, where `interval` is seconds since the previous
//! event. Only what recordings of a player need is modelled: terminal size,
//! timestamp, title, output and marker events.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// The only version written and accepted.
pub const VERSION: u8 = 3;

/// Terminal geometry recorded in the header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermInfo {
    pub cols: u16,
    pub rows: u16,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub term_type: Option<String>,
}

/// Header line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub version: u8,
    pub term: TermInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Header {
    /// A v3 header stamped with the current time.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            version: VERSION,
            term: TermInfo {
                cols,
                rows,
                term_type: Some("xterm-256color".to_string()),
            },
            timestamp: Some(chrono::Utc::now().timestamp()),
            title: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }
}

/// Event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// Data written to the terminal
    Output,
    /// Annotation, shown as a chapter by players
    Marker,
    /// Process exit status
    Exit,
}

impl EventType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "o" => Some(Self::Output),
            "m" => Some(Self::Marker),
            "x" => Some(Self::Exit),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Output => "o",
            Self::Marker => "m",
            Self::Exit => "x",
        }
    }
}

/// One event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Seconds since the previous event
    pub interval: f64,
    pub event_type: EventType,
    pub data: String,
}

impl Event {
    pub fn output(interval: Duration, data: impl Into<String>) -> Self {
        Self {
            interval: interval.as_secs_f64(),
            event_type: EventType::Output,
            data: data.into(),
        }
    }

    pub fn marker(interval: Duration, label: impl Into<String>) -> Self {
        Self {
            interval: interval.as_secs_f64(),
            event_type: EventType::Marker,
            data: label.into(),
        }
    }

    fn from_json(line: &str) -> Result<Self> {
        let (interval, code, data): (f64, String, serde_json::Value) =
            serde_json::from_str(line).context("Event must be a [time, code, data] array")?;
        let event_type =
            EventType::from_code(&code).with_context(|| format!("Unknown event type: {code}"))?;
        let data = match data {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        };
        Ok(Self {
            interval,
            event_type,
            data,
        })
    }

    fn to_json(&self) -> Result<String> {
        // Millisecond precision
        let interval = (self.interval * 1000.0).round() / 1000.0;
        Ok(serde_json::to_string(&(
            interval,
            self.event_type.code(),
            &self.data,
        ))?)
    }
}

/// A complete recording.
#[derive(Debug, Clone, PartialEq)]
pub struct AsciicastFile {
    pub header: Header,
    pub events: Vec<Event>,
}

impl AsciicastFile {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            events: Vec::new(),
        }
    }

    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        let header_line = lines
            .next()
            .context("File is empty")?
            .context("Failed to read header line")?;
        let header: Header =
            serde_json::from_str(&header_line).context("Failed to parse header")?;
        if header.version != VERSION {
            bail!(
                "Only asciicast v3 format is supported (got version {})",
                header.version
            );
        }

        let mut events = Vec::new();
        for (number, line) in lines.enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", number + 2))?;
            if line.trim().is_empty() {
                continue;
            }
            events.push(
                Event::from_json(&line)
                    .with_context(|| format!("Failed to parse event on line {}", number + 2))?,
            );
        }

        Ok(Self { header, events })
    }

    pub fn parse_str(content: &str) -> Result<Self> {
        Self::parse_reader(BufReader::new(content.as_bytes()))
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file =
            fs::File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
        self.write_to(&mut file)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let header = serde_json::to_string(&self.header).context("Failed to serialize header")?;
        writeln!(writer, "{header}")?;
        for event in &self.events {
            writeln!(writer, "{}", event.to_json()?)?;
        }
        Ok(())
    }

    pub fn markers(&self) -> impl Iterator<Item = &Event> {
        self.events
            .iter()
            .filter(|event| event.event_type == EventType::Marker)
    }

    /// Concatenated output data, i.e. what a viewer would have been sent.
    pub fn output_text(&self) -> String {
        self.events
            .iter()
            .filter(|event| event.event_type == EventType::Output)
            .map(|event| event.data.as_str())
            .collect()
    }

    /// Total length in seconds.
    pub fn duration(&self) -> f64 {
        self.events.iter().map(|event| event.interval).sum()
    }
}
