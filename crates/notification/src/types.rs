//! Shared value types for run notifications.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! values that participate in formatting decisions: when a run started, how
//! long it took, which colour the attachment gets, and how much detail the
//! operator asked for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly. Serialized as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Creates a [`Timestamp`] from whole seconds since the Unix epoch.
    ///
    /// Returns `None` if `secs` is outside the range `chrono` can represent.
    #[must_use]
    pub fn from_epoch_seconds(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(Self)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Whole seconds since the Unix epoch; the value carried as `ts` on the wire.
    pub fn epoch_seconds(self) -> i64 {
        self.0.timestamp()
    }

    /// Human-readable rendering used for the `Started` field,
    /// e.g. `2023-11-14 22:13:20 +0000`.
    pub fn to_human(self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S %z").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Wall-clock duration of a run, in seconds.
///
/// Negative and non-finite inputs clamp to zero; the run engine reporting a
/// nonsensical duration must not prevent a notification from being built.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct ElapsedTime(f64);

impl ElapsedTime {
    /// Creates an [`ElapsedTime`] from fractional seconds.
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            Self(secs)
        } else {
            Self(0.0)
        }
    }

    /// Returns the duration as fractional seconds.
    pub fn as_secs_f64(self) -> f64 {
        self.0
    }

    /// Renders the duration as a zero-padded UTC time of day, `HH:MM:SS`.
    ///
    /// Fractional seconds are truncated and the clock wraps after 24 hours.
    pub fn to_clock(self) -> String {
        // Truncation is intended: the clock shows completed seconds only.
        let secs = (self.0.trunc() as u64) % SECONDS_PER_DAY;
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

impl From<f64> for ElapsedTime {
    fn from(secs: f64) -> Self {
        Self::from_secs_f64(secs)
    }
}

impl From<ElapsedTime> for f64 {
    fn from(value: ElapsedTime) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Attachment colour, one per lifecycle outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// A run has started.
    Warning,
    /// A run completed successfully.
    Good,
    /// A run failed.
    Danger,
}

/// How much run detail the success and failure messages carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDetailLevel {
    /// Node identity and start time only.
    Basic,
    /// Adds the elapsed time.
    Elapsed,
    /// Adds the elapsed time and the list of updated resources.
    Resources,
}

/// Whether the loaded cookbook versions are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookbookDetailLevel {
    /// Cookbooks are not listed.
    Off,
    /// Every loaded cookbook is listed with its version.
    All,
}
