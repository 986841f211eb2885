//! error.rs
//! Error taxonomy for one run.
//!
//! Three tiers, matching how far each failure reaches:
//! - [`ConfigError`] invalidates the invocation before any file is touched.
//! - [`LocateError`] aborts the run during file discovery.
//! - [`FileError`] is recorded for one file; the run continues.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors in the invocation itself. Fatal, reported with usage help.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown ordering directive `{0}` (expected `name` or `tag-<FIELD>`)")]
    UnknownOrderDirective(String),

    #[error("malformed tag override `{value}` at position {index}: expected `name/value`")]
    MalformedTagOverride { index: usize, value: String },

    #[error("unknown tag field `{0}`")]
    UnknownTagField(String),

    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),
}

/// Errors during file discovery. Fatal to the run, no partial output.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("cannot read directory `{}`: {source}", dir.display())]
    Walk {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Per-file errors. Logged and recorded; the failed file is skipped,
/// keeps no track-number slot, and is never saved.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("cannot load tag: {source}")]
    Load {
        #[source]
        source: id3::Error,
    },

    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),

    #[error("cannot save tag: {source}")]
    Save {
        #[source]
        source: id3::Error,
    },
}
