//! Error types for the notification domain.
//!
//! Building a payload never fails: missing options degrade to omitted fields.
//! [`NotificationError`] is produced by the ports the domain calls into (the
//! organization lookup) and by parsing caller-supplied event names. The field
//! constructors convert port errors into sentinel values rather than
//! propagating them.

use thiserror::Error;

/// Errors surfaced by notification ports and parsers.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The source holding the organization name could not be read.
    ///
    /// Produced by: [`crate::OrganizationSource`] implementations.
    #[error("Organization source '{location}' is unavailable")]
    OrganizationUnavailable {
        /// Where the implementation looked (e.g. a file path).
        location: String,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// A lifecycle event name did not match any known event.
    #[error("Unknown lifecycle event '{name}' (expected start, success, failure or end)")]
    UnknownEvent {
        /// The rejected event name.
        name: String,
    },
}
