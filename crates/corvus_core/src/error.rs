use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    /// Low-level I/O error.
    /// Maps to **HTTP 500 Internal Server Error**.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    /// Maps to **HTTP 500 Internal Server Error**.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The requested object was not found in the tier.
    /// Maps to **HTTP 404 Not Found**.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The request was invalid (e.g., bad path format).
    /// Maps to **HTTP 400 Bad Request**.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic system or backend-specific failure (e.g., object store SDK error).
    /// Transient from the caller's perspective; ledger state is never mutated on it.
    /// Maps to **HTTP 500 Internal Server Error**.
    #[error("Storage system failure: {0}")]
    System(String),

    /// The requested feature is not supported by the configured backend.
    /// Maps to **HTTP 501 Not Implemented**.
    #[error("Feature not supported: {0}")]
    Unsupported(String),
}

#[derive(Error, Debug)]
pub enum AuthError {
    /// The token is invalid.
    /// Maps to **HTTP 401 Unauthorized**.
    #[error("Unauthorized: Credentials invalid")]
    Invalid,

    /// The token is valid but has expired.
    /// Maps to **HTTP 401**.
    #[error("Unauthorized: Credentials expired")]
    Expired,

    /// The token is missing.
    /// Maps to **HTTP 401**.
    #[error("Unauthorized: Credentials missing")]
    Missing,

    /// The user is authenticated but lacks the required scope. Rejected before
    /// any state mutation.
    /// Maps to **HTTP 403 Forbidden**.
    #[error("Insufficient permissions: {0}")]
    Forbidden(String),

    /// Generic system or provider failure.
    /// Maps to **HTTP 500 Internal Server Error**.
    #[error("Auth system failure: {0}")]
    System(String),
}

/// Failures of the recovery protocol itself.
#[derive(Error, Debug)]
pub enum RecoveryError {
    /// The asset has no backup in the cold tier. Fatal to key issuance and
    /// surfaced verbatim to the administrator.
    /// Maps to **HTTP 404 Not Found**.
    #[error("Asset [{0}] not found in the cold vault")]
    AssetNotFound(String),

    /// A pending ticket already exists for this `(owner, filename)` pair.
    /// Duplicate submissions are rejected, not queued.
    /// Maps to **HTTP 409 Conflict**.
    #[error("A recovery ticket for '{filename}' is already pending")]
    DuplicateTicket { owner: String, filename: String },

    /// No unclaimed recovery is outstanding for this owner.
    /// Maps to **HTTP 404 Not Found**.
    #[error("No active recovery for this account")]
    NoActiveRecovery,

    /// The presented key does not match the issued one. The record is left
    /// untouched so the owner can retry after a typo.
    /// Maps to **HTTP 403 Forbidden**.
    #[error("Invalid verification key")]
    InvalidKey,

    /// The key was already redeemed once; the asset is not moved twice.
    /// Maps to **HTTP 409 Conflict**.
    #[error("Claim key already redeemed")]
    AlreadyClaimed,

    /// The operation conflicts with the asset's current state, e.g. issuing a
    /// key for an asset that was already reconstituted.
    /// Maps to **HTTP 409 Conflict**.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Malformed input: bad key format, empty owner or filename.
    /// Maps to **HTTP 400 Bad Request**.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The underlying tier storage failed mid-operation. Ledger state is
    /// rolled back to the pre-operation state; the caller may retry.
    /// Maps to the wrapped [`StorageError`]'s status.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
