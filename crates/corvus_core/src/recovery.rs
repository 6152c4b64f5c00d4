use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's recorded request for administrator-mediated recovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Monotonic, process-unique.
    pub id: u64,
    pub owner: String,
    pub filename: String,
    pub created_at: DateTime<Utc>,
    pub status: TicketStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Pending,
    Resolved,
}

/// The single outstanding claim-key state for an owner.
///
/// At most one record per owner is live at any time; issuing a new key
/// overwrites the previous record and permanently invalidates its key.
#[derive(Debug, Clone)]
pub struct RecoveryRecord {
    pub owner: String,
    pub filename: String,
    /// High-entropy single-use key, see [`crate::claim_key`].
    pub key: String,
    pub issued_at: DateTime<Utc>,
    /// Set on successful redemption; a claimed record is a tombstone awaiting
    /// the sweeper and never validates again.
    pub claimed: bool,
}

impl RecoveryRecord {
    /// A record is visible to polling clients only while unclaimed.
    pub fn is_ready(&self) -> bool {
        !self.claimed
    }
}

/// What polling clients see when they ask whether a key is waiting for them.
///
/// Serializes to `{"ready":false}` or `{"ready":true,"filename":...,"key":...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryNotice {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl RecoveryNotice {
    pub fn ready(filename: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            ready: true,
            filename: Some(filename.into()),
            key: Some(key.into()),
        }
    }

    pub fn not_ready() -> Self {
        Self {
            ready: false,
            filename: None,
            key: None,
        }
    }
}
