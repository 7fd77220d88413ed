//! Errors raised while loading deployment documents.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load one of the JSON documents fed to the assembler.
#[derive(Debug, Error)]
pub enum DeploymentError {
    /// The document could not be read from disk.
    #[error("Failed to read '{}'", path.display())]
    Read {
        /// The document path.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The document was read but is not valid for its type.
    #[error("Failed to parse '{}'", path.display())]
    Parse {
        /// The document path.
        path: PathBuf,
        /// The underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}
