use crate::asset::Tier;
use crate::error::*;

use bytes::Bytes;

/// A trait for injecting two-tier object storage into the vault.
///
/// Every call is a direct round trip to the underlying store; implementations
/// must not cache. Objects are whole-file and written atomically, so there are
/// no partial-object semantics to handle.
pub trait TierStorage: Send + Sync + 'static + Clone {
    /// Reads a whole object from the given tier.
    fn fetch(
        &self,
        tier: Tier,
        path: &str,
    ) -> impl Future<Output = Result<Bytes, StorageError>> + Send;

    /// Writes a whole object to the given tier, replacing any previous one.
    fn store(
        &self,
        tier: Tier,
        path: &str,
        data: Bytes,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Removes an object from the given tier.
    fn remove(&self, tier: Tier, path: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Checks if an object exists in the given tier.
    fn exists(&self, tier: Tier, path: &str)
    -> impl Future<Output = Result<bool, StorageError>> + Send;

    /// Canonical live location of an owner's active asset.
    fn live_path(&self, owner: &str, filename: &str) -> String {
        format!("active/{owner}/{filename}")
    }

    /// Immutable per-owner backup, written at upload time.
    fn cold_path(&self, owner: &str, filename: &str) -> String {
        format!("archives/{owner}/{filename}")
    }

    /// Staging location holding bytes between key issuance and redemption.
    ///
    /// Lives in the live tier's store but is never served as a normal asset.
    fn quarantine_path(&self, owner: &str, filename: &str) -> String {
        format!("quarantine/{owner}/{filename}")
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub scopes: Vec<String>,
}

impl User {
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

/// A trait for injecting authentication logic into the server.
///
/// Login flows (OAuth and friends) live in the hosting application; the vault
/// only consumes the verified identity.
pub trait AuthProvider: Send + Sync + 'static + Clone {
    /// Verifies a token and returns a User identity if successful.
    fn verify(&self, token: &str) -> impl Future<Output = Result<User, AuthError>> + Send;
}
