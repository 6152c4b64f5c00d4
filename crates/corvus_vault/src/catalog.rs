use corvus_core::prelude::*;

use dashmap::DashMap;

/// Process-wide registry of assets known to the vault and their position in
/// the recovery state machine.
///
/// Entries appear when the upload collaborator registers a fresh asset, or
/// implicitly when an administrator issues a key for an asset that only
/// exists in cold storage (the cold fetch is the authoritative existence
/// check; the catalog is process-local bookkeeping).
#[derive(Debug, Default)]
pub struct AssetCatalog {
    entries: DashMap<(String, String), AssetRecord>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, record: AssetRecord) {
        self.entries
            .insert((record.owner.clone(), record.filename.clone()), record);
    }

    pub fn get(&self, owner: &str, filename: &str) -> Option<AssetRecord> {
        self.entries
            .get(&(owner.to_string(), filename.to_string()))
            .map(|r| r.value().clone())
    }

    /// Upserts the `(status, tier)` of an asset, creating the entry if the
    /// asset was not registered before.
    pub(crate) fn set_state(&self, owner: &str, filename: &str, status: AssetStatus, tier: Tier) {
        self.entries
            .entry((owner.to_string(), filename.to_string()))
            .and_modify(|r| {
                r.status = status;
                r.tier = tier;
            })
            .or_insert_with(|| AssetRecord {
                owner: owner.to_string(),
                filename: filename.to_string(),
                status,
                tier,
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_state_upserts() {
        let catalog = AssetCatalog::new();

        catalog.set_state("alice", "proj.c", AssetStatus::PendingKey, Tier::Cold);
        let rec = catalog.get("alice", "proj.c").unwrap();
        assert_eq!(rec.status, AssetStatus::PendingKey);
        assert_eq!(rec.tier, Tier::Cold);

        catalog.set_state("alice", "proj.c", AssetStatus::Reconstituted, Tier::Live);
        let rec = catalog.get("alice", "proj.c").unwrap();
        assert_eq!(rec.status, AssetStatus::Reconstituted);
        assert_eq!(rec.tier, Tier::Live);
    }

    #[test]
    fn register_records_uploads() {
        let catalog = AssetCatalog::new();

        catalog.register(AssetRecord::uploaded("alice", "proj.c"));
        let rec = catalog.get("alice", "proj.c").unwrap();
        assert_eq!(rec.status, AssetStatus::Active);
        assert_eq!(rec.tier, Tier::Live);

        assert!(catalog.get("alice", "other.c").is_none());
    }
}
