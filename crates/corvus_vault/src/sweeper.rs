//! Background purge of recovery records that outlived the retention window.
//!
//! Runs on a fixed interval (24 hours in the default configuration, matching
//! the retention window). Each record is swept under its owner's lock, so a
//! sweep can never race an in-flight redemption for the same owner.

use crate::engine::RecoveryEngine;

use corvus_core::traits::TierStorage;

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Drives [`RecoveryEngine::sweep_expired`] forever on the given period.
pub async fn run<S: TierStorage>(engine: Arc<RecoveryEngine<S>>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; a sweep at startup would be a
    // no-op against an empty ledger.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        engine.sweep_expired().await;
    }
}

/// Spawns [`run`] on the current runtime.
pub fn spawn<S: TierStorage>(engine: Arc<RecoveryEngine<S>>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(run(engine, period))
}
