//! Error types for tracker operations

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can fail a tracker operation.
///
/// Invalid queries and unknown items are not errors; they are ordinary
/// answers carried by [`crate::tracker::Lookup`].
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Input source missing or unreadable
    #[error("could not open {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Export sink could not be written
    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line of an export file is not `<name> <count>`
    #[error("malformed frequency line {line}: {content:?}")]
    MalformedDump { line: usize, content: String },
}

pub type TrackerResult<T> = Result<T, TrackerError>;
