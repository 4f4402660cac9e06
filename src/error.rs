//! Error types for the genofix library.

use thiserror::Error;

/// Errors that can occur while loading or editing a genome.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A parse error occurred while reading input data.
    #[error("{0}")]
    Parse(String),

    /// A transcript names a parent gene that never appeared in the annotation.
    #[error("transcript '{transcript}' references unknown parent gene '{gene}'")]
    MissingParent { transcript: String, gene: String },
}
