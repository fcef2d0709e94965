//! Script files: options plus lines, without any HTML.
//!
//! ```toml
//! [options]
//! typeDelay = 40
//!
//! [[lines]]
//! type = "input"
//! value = "pip install spacy"
//!
//! [[lines]]
//! type = "progress"
//! ```
//!
//! The same shape is accepted as JSON (`{"options": {...}, "lines": [...]}`),
//! and a bare JSON array is read as the line list.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::PartialOptions;
use crate::error::Result;
use crate::line::LineData;

/// A parsed script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub options: PartialOptions,
    pub lines: Vec<LineData>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonScript {
    Lines(Vec<LineData>),
    Full(Script),
}

impl Script {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(match serde_json::from_str(content)? {
            JsonScript::Lines(lines) => Self {
                lines,
                ..Self::default()
            },
            JsonScript::Full(script) => script,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load by extension: `.toml` as TOML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml(&content)
        } else {
            Self::from_json(&content)
        }
    }
}
