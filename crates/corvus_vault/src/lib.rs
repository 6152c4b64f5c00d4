//! # Corvus Vault
//!
//! The asset reconstitution protocol: the workflow by which a user's file,
//! archived into the cold tier, is brought back into the live tier through an
//! administrator-mediated, single-use claim-key handshake.
//!
//! The moving parts, leaf first:
//!
//! - **[`TicketQueue`](tickets::TicketQueue)**: pending recovery requests, consumed by the administrator in FIFO order.
//! - **[`RecoveryLedger`](ledger::RecoveryLedger)**: at most one outstanding claim-key record per owner,
//!   plus the per-owner locks that serialize every mutation touching that owner.
//! - **[`AssetCatalog`](catalog::AssetCatalog)**: which assets exist and where they stand in the
//!   `Active -> PendingKey -> Reconstituted` state machine.
//! - **[`RecoveryEngine`](engine::RecoveryEngine)**: ties the above to a [`TierStorage`] backend and exposes
//!   the protocol operations: submit-ticket, issue-key, check-recovery, redeem-key.
//! - **[`sweeper`]**: background purge of keys that were never claimed within the retention window.
//!
//! ## Example
//!
//! ```no_run
//! use corvus_vault::prelude::*;
//! # async fn run<S: corvus_core::traits::TierStorage>(storage: S) -> Result<(), corvus_core::error::RecoveryError> {
//! let engine = RecoveryEngine::new(storage);
//!
//! engine.submit_ticket("alice", "proj.c")?;
//! let key = engine.issue_key("alice", "proj.c").await?;
//! let filename = engine.redeem_key("alice", &key).await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`TierStorage`]: corvus_core::traits::TierStorage

pub mod catalog;
pub mod engine;
pub mod key;
pub mod ledger;
pub mod sweeper;
pub mod tickets;

#[cfg(test)]
mod testutil;

pub mod prelude {
    pub use super::catalog::*;
    pub use super::engine::*;
    pub use super::ledger::*;
    pub use super::sweeper;
    pub use super::tickets::*;
}
