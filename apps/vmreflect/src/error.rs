//! Errors raised outside the resolution engine.
//!
//! The engine itself reports absence with `Option`. Everything here comes
//! from configuration, discovery or file I/O.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("invalid glob pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("invalid path mapping pattern '{pattern}': {source}")]
    Mapping {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unsupported output mode '{0}' (expected human|json)")]
    Output(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
