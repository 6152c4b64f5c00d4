use corvus_core::prelude::*;

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Authoritative per-owner claim-key state, plus the per-owner locks that
/// serialize every mutation touching one owner.
///
/// Issue, redeem and expiry all acquire the owner's mutex before touching the
/// record; redeem additionally holds it across the quarantine-to-live
/// transfer so a concurrent duplicate claim or sweep can never observe the
/// half-moved state. Different owners never contend.
///
/// Reads ([`get`](Self::get)) are lock-free snapshots for polling clients.
#[derive(Debug, Default)]
pub struct RecoveryLedger {
    records: DashMap<String, RecoveryRecord>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl RecoveryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mutation lock for one owner.
    pub(crate) fn owner_lock(&self, owner: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(owner.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Snapshot of the owner's record, if any.
    pub fn get(&self, owner: &str) -> Option<RecoveryRecord> {
        self.records.get(owner).map(|r| r.value().clone())
    }

    /// Installs a record for the owner, returning the one it displaced.
    /// Last-issued-wins: the displaced record's key is permanently invalid.
    pub(crate) fn upsert(&self, record: RecoveryRecord) -> Option<RecoveryRecord> {
        self.records.insert(record.owner.clone(), record)
    }

    pub(crate) fn mark_claimed(&self, owner: &str) {
        if let Some(mut record) = self.records.get_mut(owner) {
            record.claimed = true;
        }
    }

    pub(crate) fn remove(&self, owner: &str) -> Option<RecoveryRecord> {
        self.records.remove(owner).map(|(_, record)| record)
    }

    /// Owners with a record present, snapshotted for the sweeper.
    pub(crate) fn owners(&self) -> Vec<String> {
        self.records.iter().map(|r| r.key().clone()).collect()
    }

    #[cfg(test)]
    pub(crate) fn backdate(&self, owner: &str, by: chrono::Duration) {
        if let Some(mut record) = self.records.get_mut(owner) {
            record.issued_at -= by;
        }
    }
}
