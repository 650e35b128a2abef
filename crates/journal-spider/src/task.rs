use chrono::{DateTime, Utc};
use serde::Serialize;

/// Every stored task is anchored to New York time, whatever the listing's exchange.
pub const TIME_ZONE: &str = "America/New_York";

/// The persisted, generic task record surfaced to end users.
///
/// `uid` is the only uniqueness constraint: upserting a task with a known `uid` updates the
/// existing row instead of creating another.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SampleTask {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub metadata: String,
    /// JSON snapshot of the source record.
    pub raw: String,
    pub name: String,
    pub uid: String,
    pub available_before: Option<DateTime<Utc>>,
    /// `yyyy-MM-dd`
    pub due_date: String,
    /// `HH:MM`
    pub due_time: String,
    pub pending: bool,
    pub refreshable: bool,
    pub time_zone: String,
}

/// Outcome of one synchronization pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: Vec<i64>,
    pub modified: Vec<i64>,
    pub failed: Vec<SyncFailure>,
}

/// A record that could not be written; the rest of the batch carries on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncFailure {
    pub uid: String,
    pub reason: String,
}

impl SyncReport {
    /// Number of records the pass touched, written or not.
    pub fn processed(&self) -> usize {
        self.created.len() + self.modified.len() + self.failed.len()
    }
}

/// First `n` characters of `s`, never splitting a code point.
pub fn truncate(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}
