//! JSON document loaders.
//!
//! Each loader reads one file and deserializes it into the domain type the
//! assembler expects. Validation is whatever the domain type's
//! `Deserialize` impl enforces: unknown default-config keys, empty node
//! names and unknown detail levels are all rejected here, before any message
//! is built.

use std::path::Path;

use notification::{Context, DefaultConfig, RunStatusSnapshot};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::DeploymentError;

fn load<T: DeserializeOwned>(path: &Path) -> Result<T, DeploymentError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DeploymentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&raw).map_err(|source| DeploymentError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = raw.len(), "loaded document");
    Ok(value)
}

/// Loads the deployment's [`DefaultConfig`].
pub fn load_defaults(path: &Path) -> Result<DefaultConfig, DeploymentError> {
    load(path)
}

/// Loads a per-invocation [`Context`].
pub fn load_context(path: &Path) -> Result<Context, DeploymentError> {
    load(path)
}

/// Loads a [`RunStatusSnapshot`] written by the run engine.
pub fn load_run_status(path: &Path) -> Result<RunStatusSnapshot, DeploymentError> {
    load(path)
}
