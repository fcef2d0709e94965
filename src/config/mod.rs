//! Configuration for termynal.
//!
//! - `options`: player options, the data-attribute parser and the
//!   defaults → caller → markup merge
//! - `file`: the optional user configuration file (`config.toml`)

mod file;
mod options;

pub use file::Config;
pub use options::{
    millis, Dataset, MergedOptions, OptionField, OptionSource, Options, PartialOptions,
    ProgressPolicy,
};

pub(crate) use options::{normalize_key, parse_float};
