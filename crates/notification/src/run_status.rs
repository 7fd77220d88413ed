//! The read-only view of a run that messages are built from.
//!
//! The run engine owns the facts: when the run started and ended, what it
//! changed, which cookbooks it loaded, and why it failed. The domain only
//! reads them through [`RunStatusSource`]. [`RunStatusSnapshot`] is the
//! plain-data implementation used when the facts arrive as a document.

use serde::{Deserialize, Serialize};

use crate::identifiers::{CookbookName, EnvironmentName, NodeName, RunId};
use crate::types::{ElapsedTime, Timestamp};

/// The exception that terminated a failed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunException {
    /// The exception's message text.
    pub message: String,
}

/// A cookbook loaded during the run, with the version that was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookbookVersion {
    /// Cookbook name.
    pub name: CookbookName,
    /// Resolved version string (e.g. `"1.4.2"`).
    pub version: String,
}

impl std::fmt::Display for CookbookVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// Read-only accessors for the facts of one run.
///
/// Implementations must return the same values for the lifetime of the
/// object; the assembler may call each accessor several times per build.
pub trait RunStatusSource: Send + Sync {
    /// Correlation identifier of the run, when the engine assigns one.
    fn run_id(&self) -> Option<RunId> {
        None
    }

    /// Name of the node the run executed on.
    fn node_name(&self) -> &NodeName;

    /// Environment the node belongs to.
    fn environment(&self) -> &EnvironmentName;

    /// When the run started.
    fn start_time(&self) -> Timestamp;

    /// When the run ended.
    fn end_time(&self) -> Timestamp;

    /// How long the run took.
    fn elapsed_time(&self) -> ElapsedTime;

    /// The exception that failed the run, if any.
    fn exception(&self) -> Option<&RunException>;

    /// Identifiers of resources the run updated, in update order
    /// (e.g. `"package[nginx]"`).
    fn updated_resources(&self) -> &[String];

    /// Cookbooks loaded by the run, in load order.
    fn cookbooks(&self) -> &[CookbookVersion];
}

/// A run's facts captured as plain data.
///
/// ## Wire format
///
/// ```json
/// {
///   "run_id": "0b9f2c1e-7d7c-4c57-9d3a-2f1f0f0b7a11",
///   "node_name": "web01",
///   "environment": "prod",
///   "start_time": "2023-11-14T22:12:15Z",
///   "end_time": "2023-11-14T22:13:20Z",
///   "elapsed_seconds": 65,
///   "exception": { "message": "boom" },
///   "updated_resources": ["package[nginx]"],
///   "cookbooks": [{ "name": "nginx", "version": "1.4.2" }]
/// }
/// ```
///
/// `run_id` and `exception` may be omitted; the lists default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStatusSnapshot {
    /// Correlation identifier of the run.
    #[serde(default)]
    pub run_id: Option<RunId>,
    /// Name of the node.
    pub node_name: NodeName,
    /// Environment of the node.
    pub environment: EnvironmentName,
    /// Run start time.
    pub start_time: Timestamp,
    /// Run end time.
    pub end_time: Timestamp,
    /// Run duration in seconds.
    pub elapsed_seconds: ElapsedTime,
    /// The exception that failed the run.
    #[serde(default)]
    pub exception: Option<RunException>,
    /// Updated resource identifiers.
    #[serde(default)]
    pub updated_resources: Vec<String>,
    /// Loaded cookbooks.
    #[serde(default)]
    pub cookbooks: Vec<CookbookVersion>,
}

impl RunStatusSource for RunStatusSnapshot {
    fn run_id(&self) -> Option<RunId> {
        self.run_id
    }

    fn node_name(&self) -> &NodeName {
        &self.node_name
    }

    fn environment(&self) -> &EnvironmentName {
        &self.environment
    }

    fn start_time(&self) -> Timestamp {
        self.start_time
    }

    fn end_time(&self) -> Timestamp {
        self.end_time
    }

    fn elapsed_time(&self) -> ElapsedTime {
        self.elapsed_seconds
    }

    fn exception(&self) -> Option<&RunException> {
        self.exception.as_ref()
    }

    fn updated_resources(&self) -> &[String] {
        &self.updated_resources
    }

    fn cookbooks(&self) -> &[CookbookVersion] {
        &self.cookbooks
    }
}
