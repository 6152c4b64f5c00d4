//! # Corvus FileSystem Storage
//!
//! A local filesystem backend for Corvus.
//!
//! This crate implements the [`TierStorage`] trait, keeping each tier under
//! its own root directory so the live serving area and the cold vault can sit
//! on different volumes.
//!
//! ## Features
//!
//! * **Atomic Writes**: Uses temporary files and rename operations to ensure assets are not read partially or lost during a transfer.
//!
//! ## Usage
//!
//! ```no_run
//! use corvus_fs::FsTierStorage;
//!
//! let storage = FsTierStorage::new("./corvus_live", "./corvus_cold");
//! ```

use corvus_core::prelude::*;
use bytes::Bytes;
use std::path::PathBuf;
use tokio::fs;

async fn atomic_write(path: &std::path::Path, data: Bytes) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(StorageError::Io)?;
    }

    let tmp_path = path.with_extension("tmp");

    fs::write(&tmp_path, data).await.map_err(StorageError::Io)?;
    fs::rename(&tmp_path, path)
        .await
        .map_err(StorageError::Io)?;

    Ok(())
}

#[derive(Clone)]
pub struct FsTierStorage {
    live_root: PathBuf,
    cold_root: PathBuf,
}

impl FsTierStorage {
    pub fn new(live_root: impl Into<PathBuf>, cold_root: impl Into<PathBuf>) -> Self {
        Self {
            live_root: live_root.into(),
            cold_root: cold_root.into(),
        }
    }

    fn get_path(&self, tier: Tier, path: &str) -> PathBuf {
        match tier {
            Tier::Live => self.live_root.join(path),
            Tier::Cold => self.cold_root.join(path),
        }
    }
}

impl TierStorage for FsTierStorage {
    async fn fetch(&self, tier: Tier, path: &str) -> Result<Bytes, StorageError> {
        let path = self.get_path(tier, path);
        match fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string_lossy().to_string()))
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn store(&self, tier: Tier, path: &str, data: Bytes) -> Result<(), StorageError> {
        let path = self.get_path(tier, path);
        atomic_write(&path, data).await
    }

    async fn remove(&self, tier: Tier, path: &str) -> Result<(), StorageError> {
        let path = self.get_path(tier, path);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string_lossy().to_string()))
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn exists(&self, tier: Tier, path: &str) -> Result<bool, StorageError> {
        Ok(self.get_path(tier, path).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> (tempfile::TempDir, FsTierStorage) {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FsTierStorage::new(dir.path().join("live"), dir.path().join("cold"));
        (dir, storage)
    }

    #[tokio::test]
    async fn roundtrip_per_tier() {
        let (_dir, storage) = storage();

        storage
            .store(Tier::Cold, "archives/alice/proj.c", Bytes::from_static(b"cold"))
            .await
            .unwrap();
        storage
            .store(Tier::Live, "active/alice/proj.c", Bytes::from_static(b"live"))
            .await
            .unwrap();

        // Same relative path, different roots.
        let cold = storage.fetch(Tier::Cold, "archives/alice/proj.c").await.unwrap();
        assert_eq!(cold, Bytes::from_static(b"cold"));
        assert!(!storage.exists(Tier::Live, "archives/alice/proj.c").await.unwrap());
    }

    #[tokio::test]
    async fn fetch_missing_is_not_found() {
        let (_dir, storage) = storage();

        let err = storage.fetch(Tier::Live, "active/alice/ghost.c").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn store_overwrites() {
        let (_dir, storage) = storage();

        storage
            .store(Tier::Live, "active/alice/proj.c", Bytes::from_static(b"v1"))
            .await
            .unwrap();
        storage
            .store(Tier::Live, "active/alice/proj.c", Bytes::from_static(b"v2"))
            .await
            .unwrap();

        let data = storage.fetch(Tier::Live, "active/alice/proj.c").await.unwrap();
        assert_eq!(data, Bytes::from_static(b"v2"));
    }

    #[tokio::test]
    async fn remove_then_exists_is_false() {
        let (_dir, storage) = storage();

        storage
            .store(Tier::Live, "quarantine/alice/proj.c", Bytes::from_static(b"x"))
            .await
            .unwrap();
        storage.remove(Tier::Live, "quarantine/alice/proj.c").await.unwrap();

        assert!(!storage.exists(Tier::Live, "quarantine/alice/proj.c").await.unwrap());
        let err = storage.remove(Tier::Live, "quarantine/alice/proj.c").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
