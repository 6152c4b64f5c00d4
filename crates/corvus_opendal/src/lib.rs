//! # Corvus OpenDAL Storage
//!
//! A tier storage backend powered by [Apache OpenDAL](https://opendal.apache.org/).
//!
//! Each tier is backed by its own OpenDAL `Operator`, so the live serving
//! area and the cold vault can live in separate buckets (or even separate
//! services): the file system, AWS S3, GCS, Azure Blob Storage and more.
//!
//! ## Usage
//!
//! ```no_run
//! # use corvus_opendal::OpendalTierStorage;
//! # use opendal::{Operator, services::Gcs};
//! # async fn run() {
//! let live = Gcs::default().bucket("my-live-bucket");
//! let cold = Gcs::default().bucket("my-backup-bucket");
//!
//! let storage = OpendalTierStorage::new(
//!     Operator::new(live).unwrap().finish(),
//!     Operator::new(cold).unwrap().finish(),
//! );
//! # }
//! ```

use corvus_core::prelude::*;
use bytes::Bytes;
use opendal::Operator;

#[derive(Clone)]
pub struct OpendalTierStorage {
    live: Operator,
    cold: Operator,
}

impl OpendalTierStorage {
    /// Create a new tier storage from one OpenDAL Operator per tier.
    /// Each Operator can be configured for any supported backend e.g., s3, fs, gcs, etc.
    pub fn new(live: Operator, cold: Operator) -> Self {
        Self { live, cold }
    }

    fn op(&self, tier: Tier) -> &Operator {
        match tier {
            Tier::Live => &self.live,
            Tier::Cold => &self.cold,
        }
    }
}

impl TierStorage for OpendalTierStorage {
    async fn fetch(&self, tier: Tier, path: &str) -> Result<Bytes, StorageError> {
        match self.op(tier).read(path).await {
            Ok(buffer) => Ok(buffer.to_bytes()),
            Err(e) if e.kind() == opendal::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(StorageError::System(e.to_string())),
        }
    }

    async fn store(&self, tier: Tier, path: &str, data: Bytes) -> Result<(), StorageError> {
        self.op(tier)
            .write(path, data)
            .await
            .map_err(|e| StorageError::System(format!("OpenDAL write error: {e}")))?;

        Ok(())
    }

    async fn remove(&self, tier: Tier, path: &str) -> Result<(), StorageError> {
        self.op(tier)
            .delete(path)
            .await
            .map_err(|e| StorageError::System(e.to_string()))
    }

    async fn exists(&self, tier: Tier, path: &str) -> Result<bool, StorageError> {
        self.op(tier)
            .exists(path)
            .await
            .map_err(|e| StorageError::System(e.to_string()))
    }
}
