//! In-memory [`TierStorage`] doubles for the engine tests.

use corvus_core::prelude::*;

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Whole-object map keyed by `(tier, path)`, with optional write-failure
/// injection to exercise the all-or-nothing guarantees.
#[derive(Clone, Default)]
pub(crate) struct MemoryTierStorage {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    objects: HashMap<(Tier, String), Bytes>,
    fail_prefix: Option<String>,
}

impl MemoryTierStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn seed(&self, tier: Tier, path: &str, data: &[u8]) {
        self.lock()
            .objects
            .insert((tier, path.to_string()), Bytes::copy_from_slice(data));
    }

    pub(crate) fn object(&self, tier: Tier, path: &str) -> Option<Bytes> {
        self.lock().objects.get(&(tier, path.to_string())).cloned()
    }

    /// Every `store` under this path prefix fails until [`heal`](Self::heal).
    pub(crate) fn fail_writes_under(&self, prefix: &str) {
        self.lock().fail_prefix = Some(prefix.to_string());
    }

    pub(crate) fn heal(&self) {
        self.lock().fail_prefix = None;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TierStorage for MemoryTierStorage {
    async fn fetch(&self, tier: Tier, path: &str) -> Result<Bytes, StorageError> {
        self.object(tier, path)
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn store(&self, tier: Tier, path: &str, data: Bytes) -> Result<(), StorageError> {
        let mut inner = self.lock();
        if let Some(prefix) = &inner.fail_prefix {
            if path.starts_with(prefix.as_str()) {
                return Err(StorageError::System(format!(
                    "injected write failure: {path}"
                )));
            }
        }
        inner.objects.insert((tier, path.to_string()), data);
        Ok(())
    }

    async fn remove(&self, tier: Tier, path: &str) -> Result<(), StorageError> {
        self.lock().objects.remove(&(tier, path.to_string()));
        Ok(())
    }

    async fn exists(&self, tier: Tier, path: &str) -> Result<bool, StorageError> {
        Ok(self.object(tier, path).is_some())
    }
}
