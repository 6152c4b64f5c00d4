//! # Corvus Core
//!
//! Types and traits for the ecosystem.
//!
//! Defines the protocol used by clients, servers and storage backends.
//!
//! - **[`TierStorage`](traits::TierStorage)**: Trait for the two-tier object stores (`Live` serving
//!   area, `Cold` immutable backups) the vault moves assets between.
//! - **[`AuthProvider`](traits::AuthProvider)**: Trait for implementing user verification strategies.
//! - **[`Ticket`](recovery::Ticket)** / **[`RecoveryRecord`](recovery::RecoveryRecord)**: The state
//!   carried by the recovery ledger between ticket submission and key redemption.
//! - **[`claim_key`]**: The wire format of the single-use claim key.

pub mod asset;
pub mod claim_key;
pub mod claims;
pub mod constants;
pub mod error;
pub mod recovery;
pub mod traits;

pub mod prelude {
    pub use super::asset::*;
    pub use super::claim_key;
    pub use super::claims::*;
    pub use super::error::*;
    pub use super::recovery::*;
    pub use super::traits::*;
}
