use crate::catalog::AssetCatalog;
use crate::key;
use crate::ledger::RecoveryLedger;
use crate::tickets::TicketQueue;

use corvus_core::prelude::*;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

/// Default retention window for an unclaimed key, in hours.
pub const DEFAULT_RETENTION_HOURS: i64 = 24;

/// Ties the ticket queue, recovery ledger and asset catalog to a
/// [`TierStorage`] backend and exposes the protocol operations.
///
/// The engine is cheap to share behind an `Arc`; all methods take `&self`.
/// Capability checks (admin for issuance and ticket listing, non-guest for
/// submission) belong to the caller: the engine trusts that the identity
/// context was already resolved at the API boundary.
pub struct RecoveryEngine<S> {
    storage: S,
    tickets: TicketQueue,
    ledger: RecoveryLedger,
    catalog: AssetCatalog,
    retention: Duration,
}

impl<S: TierStorage> RecoveryEngine<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            tickets: TicketQueue::new(),
            ledger: RecoveryLedger::new(),
            catalog: AssetCatalog::new(),
            retention: Duration::hours(DEFAULT_RETENTION_HOURS),
        }
    }

    /// Overrides the retention window after which unclaimed keys expire.
    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Precondition hook for the upload collaborator: records a freshly
    /// uploaded asset as active in the live tier. The cold mirror is written
    /// by the uploader itself.
    pub fn register_asset(&self, owner: &str, filename: &str) {
        self.catalog.register(AssetRecord::uploaded(owner, filename));
    }

    pub fn asset(&self, owner: &str, filename: &str) -> Option<AssetRecord> {
        self.catalog.get(owner, filename)
    }

    /// Files a recovery request for the administrator queue.
    pub fn submit_ticket(&self, owner: &str, filename: &str) -> Result<Ticket, RecoveryError> {
        let ticket = self.tickets.submit(owner, filename)?;
        info!(owner, filename, id = ticket.id, "recovery ticket filed");
        Ok(ticket)
    }

    /// All pending tickets, oldest first.
    pub fn list_tickets(&self) -> Vec<Ticket> {
        self.tickets.pending()
    }

    /// Administrator operation: stages the cold backup into quarantine and
    /// mints a single-use claim key for the owner.
    ///
    /// Issuance is all-or-nothing: nothing in the ledger, catalog or ticket
    /// queue changes unless the quarantine write succeeded. Re-issuing while a
    /// key is outstanding is legal and permanently invalidates the old key;
    /// issuing with no matching ticket is legal direct administrator action.
    pub async fn issue_key(&self, owner: &str, filename: &str) -> Result<String, RecoveryError> {
        if owner.trim().is_empty() || filename.trim().is_empty() {
            return Err(RecoveryError::Validation(
                "owner and filename are required".into(),
            ));
        }

        let lock = self.ledger.owner_lock(owner);
        let _guard = lock.lock().await;

        if let Some(asset) = self.catalog.get(owner, filename) {
            if asset.status == AssetStatus::Reconstituted {
                return Err(RecoveryError::Conflict(format!(
                    "asset '{filename}' was already reconstituted"
                )));
            }
        }

        let cold = self.storage.cold_path(owner, filename);
        let bytes = match self.storage.fetch(Tier::Cold, &cold).await {
            Ok(bytes) => bytes,
            Err(StorageError::NotFound(_)) => {
                return Err(RecoveryError::AssetNotFound(filename.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let quarantine = self.storage.quarantine_path(owner, filename);
        self.storage.store(Tier::Live, &quarantine, bytes).await?;

        // The quarantine copy exists; everything below is in-memory and
        // cannot fail, so a record never points at bytes that don't exist.
        let record = RecoveryRecord {
            owner: owner.to_string(),
            filename: filename.to_string(),
            key: key::generate(),
            issued_at: Utc::now(),
            claimed: false,
        };
        let issued = record.key.clone();

        if let Some(prior) = self.ledger.upsert(record) {
            info!(owner, filename = %prior.filename, "prior claim key invalidated");
            if !prior.claimed && prior.filename != filename {
                self.discard_quarantine(&prior).await;
            }
        }

        self.catalog
            .set_state(owner, filename, AssetStatus::PendingKey, Tier::Cold);
        let resolved = self.tickets.resolve(owner, filename);
        info!(owner, filename, resolved_tickets = resolved, "claim key issued");

        Ok(issued)
    }

    /// Read-only poll: is a key waiting for this owner?
    ///
    /// Claimed tombstones are invisible here; polling clients see
    /// `{ready:false}` the moment the key is redeemed.
    pub fn check_recovery(&self, owner: &str) -> RecoveryNotice {
        match self.ledger.get(owner) {
            Some(record) if record.is_ready() => RecoveryNotice::ready(record.filename, record.key),
            _ => RecoveryNotice::not_ready(),
        }
    }

    /// User operation: validates the presented key and promotes the
    /// quarantined asset back into the live tier.
    ///
    /// Returns the filename of the reconstituted asset. The owner lock is held
    /// across the whole transfer; a storage failure leaves the record
    /// unclaimed so the same key can be retried once storage recovers.
    pub async fn redeem_key(&self, owner: &str, presented: &str) -> Result<String, RecoveryError> {
        let presented = presented.trim();
        if !claim_key::is_well_formed(presented) {
            return Err(RecoveryError::Validation("malformed claim key".into()));
        }

        let lock = self.ledger.owner_lock(owner);
        let _guard = lock.lock().await;

        let record = self.ledger.get(owner).ok_or(RecoveryError::NoActiveRecovery)?;

        if !key::matches(presented, &record.key) {
            return Err(RecoveryError::InvalidKey);
        }

        if record.claimed {
            return Err(RecoveryError::AlreadyClaimed);
        }

        let quarantine = self.storage.quarantine_path(owner, &record.filename);
        let live = self.storage.live_path(owner, &record.filename);

        let bytes = self.storage.fetch(Tier::Live, &quarantine).await?;
        self.storage.store(Tier::Live, &live, bytes).await?;

        if let Err(e) = self.storage.remove(Tier::Live, &quarantine).await {
            warn!(owner, error = %e, "failed to clear quarantine after promotion");
        }

        // Claimed records stay in the ledger as tombstones until the next
        // sweep; a repeated redemption is rejected instead of resurfacing as
        // "no recovery", and a new issuance may overwrite them at any time.
        self.ledger.mark_claimed(owner);
        self.catalog
            .set_state(owner, &record.filename, AssetStatus::Reconstituted, Tier::Live);
        info!(owner, filename = %record.filename, "asset reconstituted");

        Ok(record.filename)
    }

    /// Purges claimed tombstones and records whose key was never claimed
    /// within the retention window. Returns the purge count.
    pub async fn sweep_expired(&self) -> usize {
        self.sweep_at(Utc::now()).await
    }

    pub(crate) async fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut purged = 0;

        for owner in self.ledger.owners() {
            let lock = self.ledger.owner_lock(&owner);
            let _guard = lock.lock().await;

            let Some(record) = self.ledger.get(&owner) else {
                continue;
            };
            let expired = now - record.issued_at > self.retention;
            if !record.claimed && !expired {
                continue;
            }

            self.ledger.remove(&owner);
            if !record.claimed {
                self.discard_quarantine(&record).await;
            }
            purged += 1;
        }

        if purged > 0 {
            info!(purged, "routine cleanup: recovery records purged");
        }
        purged
    }

    /// Best-effort removal of a record's quarantined bytes. Losing the bytes
    /// is impossible (the cold copy is immutable), so failure is logged and
    /// swallowed.
    async fn discard_quarantine(&self, record: &RecoveryRecord) {
        let path = self
            .storage
            .quarantine_path(&record.owner, &record.filename);
        match self.storage.remove(Tier::Live, &path).await {
            Ok(()) | Err(StorageError::NotFound(_)) => {}
            Err(e) => warn!(owner = %record.owner, error = %e, "failed to discard quarantined bytes"),
        }
    }

    #[cfg(test)]
    pub(crate) fn backdate_record(&self, owner: &str, by: Duration) {
        self.ledger.backdate(owner, by);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemoryTierStorage;

    use bytes::Bytes;
    use std::sync::Arc;

    const SOURCE: &[u8] = b"int main(void) { return 0; }\n";

    /// An engine over in-memory storage with alice's `proj.c` backed up in
    /// the cold tier, as the upload collaborator would have left it.
    fn engine_with_backup() -> RecoveryEngine<MemoryTierStorage> {
        let storage = MemoryTierStorage::new();
        storage.seed(Tier::Cold, "archives/alice/proj.c", SOURCE);
        let engine = RecoveryEngine::new(storage);
        engine.register_asset("alice", "proj.c");
        engine
    }

    #[tokio::test]
    async fn full_recovery_handshake() {
        let engine = engine_with_backup();

        engine.submit_ticket("alice", "proj.c").unwrap();
        assert_eq!(engine.list_tickets().len(), 1);

        let key = engine.issue_key("alice", "proj.c").await.unwrap();
        assert!(claim_key::is_well_formed(&key));

        // Ticket resolved, key visible to polling.
        assert!(engine.list_tickets().is_empty());
        let notice = engine.check_recovery("alice");
        assert!(notice.ready);
        assert_eq!(notice.filename.as_deref(), Some("proj.c"));
        assert_eq!(notice.key.as_deref(), Some(key.as_str()));

        let filename = engine.redeem_key("alice", &key).await.unwrap();
        assert_eq!(filename, "proj.c");

        // Asset promoted to the live tier, quarantine cleared, polling quiet.
        let storage = engine.storage();
        assert_eq!(
            storage.object(Tier::Live, "active/alice/proj.c"),
            Some(Bytes::from_static(SOURCE))
        );
        assert_eq!(storage.object(Tier::Live, "quarantine/alice/proj.c"), None);
        assert!(!engine.check_recovery("alice").ready);

        let asset = engine.asset("alice", "proj.c").unwrap();
        assert_eq!(asset.status, AssetStatus::Reconstituted);
        assert_eq!(asset.tier, Tier::Live);
    }

    #[tokio::test]
    async fn issue_requires_a_cold_backup() {
        let engine = RecoveryEngine::new(MemoryTierStorage::new());

        let err = engine.issue_key("alice", "ghost.c").await.unwrap_err();
        assert!(matches!(err, RecoveryError::AssetNotFound(f) if f == "ghost.c"));
        assert!(!engine.check_recovery("alice").ready);
    }

    #[tokio::test]
    async fn issue_without_a_ticket_is_valid_admin_action() {
        let engine = engine_with_backup();

        let key = engine.issue_key("alice", "proj.c").await.unwrap();
        assert!(engine.check_recovery("alice").ready);
        engine.redeem_key("alice", &key).await.unwrap();
    }

    #[tokio::test]
    async fn reissue_invalidates_the_prior_key() {
        let engine = engine_with_backup();

        let first = engine.issue_key("alice", "proj.c").await.unwrap();
        let second = engine.issue_key("alice", "proj.c").await.unwrap();
        assert_ne!(first, second);

        let err = engine.redeem_key("alice", &first).await.unwrap_err();
        assert!(matches!(err, RecoveryError::InvalidKey));

        engine.redeem_key("alice", &second).await.unwrap();
    }

    #[tokio::test]
    async fn redeemed_keys_are_single_use() {
        let engine = engine_with_backup();
        let key = engine.issue_key("alice", "proj.c").await.unwrap();

        engine.redeem_key("alice", &key).await.unwrap();

        // Overwrite the live object to prove a second redemption moves nothing.
        let storage = engine.storage().clone();
        storage.seed(Tier::Live, "active/alice/proj.c", b"user edited this");

        let err = engine.redeem_key("alice", &key).await.unwrap_err();
        assert!(matches!(err, RecoveryError::AlreadyClaimed));
        assert_eq!(
            storage.object(Tier::Live, "active/alice/proj.c"),
            Some(Bytes::from_static(b"user edited this"))
        );
    }

    #[tokio::test]
    async fn a_typo_leaves_the_record_intact() {
        let engine = engine_with_backup();
        let key = engine.issue_key("alice", "proj.c").await.unwrap();

        // Same shape, one character off.
        let mut wrong = key.clone().into_bytes();
        wrong[0] = if wrong[0] == b'X' { b'Y' } else { b'X' };
        let wrong = String::from_utf8(wrong).unwrap();

        let err = engine.redeem_key("alice", &wrong).await.unwrap_err();
        assert!(matches!(err, RecoveryError::InvalidKey));

        // Retry with the correct key succeeds.
        assert!(engine.check_recovery("alice").ready);
        engine.redeem_key("alice", &key).await.unwrap();
    }

    #[tokio::test]
    async fn malformed_keys_never_reach_the_ledger() {
        let engine = engine_with_backup();
        engine.issue_key("alice", "proj.c").await.unwrap();

        for junk in ["", "abc", "a1b2c3-d4e5f6-g7h8i9-j0k1l2", "ABCDEF"] {
            let err = engine.redeem_key("alice", junk).await.unwrap_err();
            assert!(matches!(err, RecoveryError::Validation(_)), "key: {junk:?}");
        }
        assert!(engine.check_recovery("alice").ready);
    }

    #[tokio::test]
    async fn redeem_without_issuance_reports_no_active_recovery() {
        let engine = engine_with_backup();

        let err = engine
            .redeem_key("alice", "AAAAAA-BBBBBB-CCCCCC-DDDDDD")
            .await
            .unwrap_err();
        assert!(matches!(err, RecoveryError::NoActiveRecovery));
    }

    #[tokio::test]
    async fn failed_promotion_keeps_the_key_redeemable() {
        let engine = engine_with_backup();
        let key = engine.issue_key("alice", "proj.c").await.unwrap();

        let storage = engine.storage().clone();
        storage.fail_writes_under("active/");

        let err = engine.redeem_key("alice", &key).await.unwrap_err();
        assert!(matches!(err, RecoveryError::Storage(_)));

        // Record unclaimed, still visible to polling.
        assert!(engine.check_recovery("alice").ready);
        assert_eq!(storage.object(Tier::Live, "active/alice/proj.c"), None);

        // Storage recovers; the same key goes through.
        storage.heal();
        engine.redeem_key("alice", &key).await.unwrap();
        assert!(storage.object(Tier::Live, "active/alice/proj.c").is_some());
    }

    #[tokio::test]
    async fn failed_quarantine_write_aborts_issuance() {
        let engine = engine_with_backup();
        engine.submit_ticket("alice", "proj.c").unwrap();

        let storage = engine.storage().clone();
        storage.fail_writes_under("quarantine/");

        let err = engine.issue_key("alice", "proj.c").await.unwrap_err();
        assert!(matches!(err, RecoveryError::Storage(_)));

        // All-or-nothing: no record, ticket still pending, status untouched.
        assert!(!engine.check_recovery("alice").ready);
        assert_eq!(engine.list_tickets().len(), 1);
        assert_eq!(
            engine.asset("alice", "proj.c").unwrap().status,
            AssetStatus::Active
        );
    }

    #[tokio::test]
    async fn expired_records_vanish_after_a_sweep() {
        let engine = engine_with_backup();
        let key = engine.issue_key("alice", "proj.c").await.unwrap();

        engine.backdate_record("alice", Duration::hours(25));
        assert_eq!(engine.sweep_expired().await, 1);

        assert!(!engine.check_recovery("alice").ready);
        let err = engine.redeem_key("alice", &key).await.unwrap_err();
        assert!(matches!(err, RecoveryError::NoActiveRecovery));

        // Quarantined bytes discarded with the record.
        assert_eq!(
            engine
                .storage()
                .object(Tier::Live, "quarantine/alice/proj.c"),
            None
        );
    }

    #[tokio::test]
    async fn sweep_spares_fresh_records() {
        let engine = engine_with_backup();
        engine.issue_key("alice", "proj.c").await.unwrap();

        assert_eq!(engine.sweep_expired().await, 0);
        assert!(engine.check_recovery("alice").ready);
    }

    #[tokio::test]
    async fn sweep_collects_claimed_tombstones() {
        let engine = engine_with_backup();
        let key = engine.issue_key("alice", "proj.c").await.unwrap();
        engine.redeem_key("alice", &key).await.unwrap();

        assert_eq!(engine.sweep_expired().await, 1);

        // Deferred deletion done; a repeat redemption now reads as absent.
        let err = engine.redeem_key("alice", &key).await.unwrap_err();
        assert!(matches!(err, RecoveryError::NoActiveRecovery));
    }

    #[tokio::test]
    async fn reissue_after_reconstitution_is_a_conflict() {
        let engine = engine_with_backup();
        let key = engine.issue_key("alice", "proj.c").await.unwrap();
        engine.redeem_key("alice", &key).await.unwrap();

        let err = engine.issue_key("alice", "proj.c").await.unwrap_err();
        assert!(matches!(err, RecoveryError::Conflict(_)));
    }

    #[tokio::test]
    async fn recoveries_are_isolated_per_owner() {
        let storage = MemoryTierStorage::new();
        storage.seed(Tier::Cold, "archives/alice/proj.c", SOURCE);
        storage.seed(Tier::Cold, "archives/bob/proj.c", b"bob's copy");
        let engine = RecoveryEngine::new(storage);

        let alice_key = engine.issue_key("alice", "proj.c").await.unwrap();
        let bob_key = engine.issue_key("bob", "proj.c").await.unwrap();

        // Alice's key is useless to bob.
        let err = engine.redeem_key("bob", &alice_key).await.unwrap_err();
        assert!(matches!(err, RecoveryError::InvalidKey));

        engine.redeem_key("alice", &alice_key).await.unwrap();
        assert!(engine.check_recovery("bob").ready);
        engine.redeem_key("bob", &bob_key).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_redemptions_claim_exactly_once() {
        let engine = Arc::new(engine_with_backup());
        let key = engine.issue_key("alice", "proj.c").await.unwrap();

        let a = tokio::spawn({
            let engine = engine.clone();
            let key = key.clone();
            async move { engine.redeem_key("alice", &key).await }
        });
        let b = tokio::spawn({
            let engine = engine.clone();
            let key = key.clone();
            async move { engine.redeem_key("alice", &key).await }
        });

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        let wins = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1, "exactly one concurrent claim may succeed");

        let loss = if a.is_ok() { b } else { a };
        assert!(matches!(loss.unwrap_err(), RecoveryError::AlreadyClaimed));
    }
}
