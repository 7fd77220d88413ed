//! Port for discovering which organization a node belongs to.
//!
//! The organization lives in deployment configuration the domain cannot
//! read itself. Infrastructure supplies an [`OrganizationSource`]; tests
//! supply [`FixedOrganization`].

use crate::errors::NotificationError;
use crate::identifiers::OrganizationName;

/// Looks up the organization name of the node being reported on.
///
/// ## Contract
///
/// - `Ok(Some(name))` — the organization was found.
/// - `Ok(None)` — the source was readable but names no organization.
/// - `Err(_)` — the source could not be read.
///
/// The lookup is best-effort: callers convert both `Ok(None)` and `Err(_)`
/// into a sentinel value and carry on.
pub trait OrganizationSource: Send + Sync {
    /// Performs the lookup.
    fn organization(&self) -> Result<Option<OrganizationName>, NotificationError>;
}

/// An [`OrganizationSource`] that always returns the same answer.
///
/// Useful where the organization is known up front, and as a test double.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedOrganization(Option<OrganizationName>);

impl FixedOrganization {
    /// A source that always reports `name`.
    pub fn new(name: OrganizationName) -> Self {
        Self(Some(name))
    }

    /// A source that is readable but never names an organization.
    pub fn none() -> Self {
        Self(None)
    }
}

impl OrganizationSource for FixedOrganization {
    fn organization(&self) -> Result<Option<OrganizationName>, NotificationError> {
        Ok(self.0.clone())
    }
}
