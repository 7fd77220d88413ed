//! Run notification domain.
//!
//! Builds chat-webhook attachments describing the lifecycle of an automation
//! run: started, succeeded, or failed. Per-invocation overrides are resolved
//! against deployment defaults, optional fields are included according to the
//! configured detail levels, and the result is an ordered payload ready for
//! an external transport to deliver.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! The run engine is reached through [`RunStatusSource`] and the deployment
//! configuration through [`OrganizationSource`]; the `deployment` crate
//! supplies the file-backed implementations.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`NodeName`, `RunId`, etc.) |
//! | [`types`] | Value types (`Timestamp`, `ElapsedTime`, `Color`, detail levels) |
//! | [`errors`] | [`NotificationError`] |
//! | [`config`] | [`Context`], [`DefaultConfig`], and [`ConfigResolver`] |
//! | [`run_status`] | The [`RunStatusSource`] contract and [`RunStatusSnapshot`] |
//! | [`organization`] | The [`OrganizationSource`] port |
//! | [`payload`] | [`Field`] and [`MessagePayload`] |
//! | [`fields`] | One constructor per optional field |
//! | [`assembler`] | [`MessageAssembler`] and [`LifecycleEvent`] |

pub mod assembler;
pub mod config;
pub mod errors;
pub mod fields;
pub mod identifiers;
pub mod organization;
pub mod payload;
pub mod run_status;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use assembler::{LifecycleEvent, MessageAssembler};
pub use config::{resolve, ConfigOption, ConfigResolver, Context, DefaultConfig, OptionValue};
pub use errors::NotificationError;
pub use fields::ORGANIZATION_NOT_FOUND;
pub use identifiers::{CookbookName, EnvironmentName, NodeName, OrganizationName, RunId};
pub use organization::{FixedOrganization, OrganizationSource};
pub use payload::{Field, MarkdownTarget, MessagePayload};
pub use run_status::{CookbookVersion, RunException, RunStatusSnapshot, RunStatusSource};
pub use types::{Color, CookbookDetailLevel, ElapsedTime, MessageDetailLevel, Timestamp};
