//! Run notification deployment adapter.
//!
//! Implements the [`notification::OrganizationSource`] port over the chef
//! client configuration file, and loads the JSON documents the composition
//! root feeds into [`notification::MessageAssembler`]: the deployment
//! defaults, a per-invocation context, and a run-status snapshot.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** File access, path handling, and document parsing live
//! here. The [`notification`] crate sees only its own types and ports.

pub mod client_config;
pub mod errors;
pub mod loader;

pub use client_config::{ClientConfigOrganization, DEFAULT_CLIENT_CONFIG_PATH};
pub use errors::DeploymentError;
pub use loader::{load_context, load_defaults, load_run_status};
