//! Last-request-wins ordering for list fetches.

use std::sync::atomic::{AtomicU64, Ordering};

/// Generation number handed out when a list fetch is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets; only the newest one is current.
///
/// A response is applied only if its ticket is still current when it
/// resolves, so a slow response for an older filter can never overwrite
/// the result of a newer request.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    generation: AtomicU64,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every earlier ticket.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Supersedes any in-flight request without starting a new one.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
