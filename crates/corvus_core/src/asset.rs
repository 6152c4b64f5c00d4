use serde::{Deserialize, Serialize};

/// The two logical object stores an asset can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Publicly served assets.
    Live,
    /// Immutable per-owner backups, written at upload time and read only during recovery.
    Cold,
}

/// Lifecycle of an asset under the recovery protocol.
///
/// `PendingKey` is the only non-terminal intermediate state: a claim key has been
/// issued and the bytes sit in quarantine until the owner redeems it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Active,
    PendingKey,
    /// Active again, but restored from the cold tier rather than uploaded.
    /// The distinction is surfaced to UIs as a badge; structurally it behaves like `Active`.
    Reconstituted,
}

/// One user-owned file tracked by the vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Identity string, unique per user.
    pub owner: String,
    /// Logical name, unique per owner.
    pub filename: String,
    pub status: AssetStatus,
    /// Tier currently holding the authoritative copy.
    pub tier: Tier,
}

impl AssetRecord {
    /// A freshly uploaded asset: active, served from the live tier.
    pub fn uploaded(owner: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            filename: filename.into(),
            status: AssetStatus::Active,
            tier: Tier::Live,
        }
    }
}
