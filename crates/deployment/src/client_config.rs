//! Organization lookup over the chef client configuration file.
//!
//! Hosted configuration servers put the organization in the server URL, e.g.
//!
//! ```text
//! chef_server_url "https://api.chef.example/organizations/acme-corp"
//! ```
//!
//! [`ClientConfigOrganization`] reads the file on every lookup and returns
//! the first `/organizations/<name>` segment it finds.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use notification::{NotificationError, OrganizationName, OrganizationSource};
use regex::Regex;
use tracing::debug;

/// Where the chef client keeps its configuration.
pub const DEFAULT_CLIENT_CONFIG_PATH: &str = "/etc/chef/client.rb";

// A word, optionally followed by one hyphen and another word.
const ORGANIZATION_PATTERN: &str = r"/organizations/(\w+-?\w+)";

fn organization_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(ORGANIZATION_PATTERN).expect("Is a valid regex"))
}

/// Extracts the organization name from client configuration text.
pub fn find_organization(config: &str) -> Option<OrganizationName> {
    organization_pattern()
        .captures(config)
        .and_then(|captures| captures.get(1))
        .and_then(|m| OrganizationName::new(m.as_str()))
}

/// File-backed [`OrganizationSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfigOrganization {
    path: PathBuf,
}

impl ClientConfigOrganization {
    /// Looks the organization up in the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ClientConfigOrganization {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT_CONFIG_PATH)
    }
}

impl OrganizationSource for ClientConfigOrganization {
    fn organization(&self) -> Result<Option<OrganizationName>, NotificationError> {
        let config = std::fs::read_to_string(&self.path).map_err(|source| {
            NotificationError::OrganizationUnavailable {
                location: self.path.display().to_string(),
                source,
            }
        })?;

        let organization = find_organization(&config);
        debug!(
            path = %self.path.display(),
            found = organization.is_some(),
            "read client configuration"
        );
        Ok(organization)
    }
}
