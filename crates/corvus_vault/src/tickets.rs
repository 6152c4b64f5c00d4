use corvus_core::prelude::*;

use chrono::Utc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// FIFO queue of pending recovery requests, consumed by the administrator.
///
/// Holds at most one pending ticket per `(owner, filename)` pair. The lock is
/// never held across an await point.
#[derive(Debug)]
pub struct TicketQueue {
    next_id: AtomicU64,
    entries: Mutex<Vec<Ticket>>,
}

impl Default for TicketQueue {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl TicketQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new pending ticket.
    ///
    /// Duplicate submissions for a pair that already has a pending ticket are
    /// rejected with [`RecoveryError::DuplicateTicket`], not queued.
    pub fn submit(&self, owner: &str, filename: &str) -> Result<Ticket, RecoveryError> {
        if owner.trim().is_empty() || filename.trim().is_empty() {
            return Err(RecoveryError::Validation(
                "owner and filename are required".into(),
            ));
        }

        let mut entries = self.lock_entries();

        if entries
            .iter()
            .any(|t| t.status == TicketStatus::Pending && t.owner == owner && t.filename == filename)
        {
            return Err(RecoveryError::DuplicateTicket {
                owner: owner.to_string(),
                filename: filename.to_string(),
            });
        }

        let ticket = Ticket {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            owner: owner.to_string(),
            filename: filename.to_string(),
            created_at: Utc::now(),
            status: TicketStatus::Pending,
        };
        entries.push(ticket.clone());

        Ok(ticket)
    }

    /// All pending tickets, oldest first, so the administrator processes
    /// requests fairly.
    pub fn pending(&self) -> Vec<Ticket> {
        self.lock_entries()
            .iter()
            .filter(|t| t.status == TicketStatus::Pending)
            .cloned()
            .collect()
    }

    /// Removes pending tickets matching the pair, returning how many were
    /// resolved. Called only from the key issuer on success; tickets are never
    /// dropped independently.
    pub(crate) fn resolve(&self, owner: &str, filename: &str) -> usize {
        let mut entries = self.lock_entries();
        let before = entries.len();
        entries.retain(|t| {
            !(t.status == TicketStatus::Pending && t.owner == owner && t.filename == filename)
        });
        before - entries.len()
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, Vec<Ticket>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
