//! Bulk approve/reject coordination.
//!
//! `BulkActionCoordinator` turns the current selection into one batch
//! decision, submits it once, and on success asks its host to refetch the
//! dataset and then clear the selection.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use kitgrid_core::api::{BatchDecision, Decision, DecisionGateway};
use kitgrid_core::error::{GridError, Result};
use kitgrid_core::selection::SelectionEntry;

/// The screen state a bulk action resets after a successful submit.
#[async_trait]
pub trait SelectionHost: Send + Sync {
    /// Full dataset refetch with the active filters.
    ///
    /// Returns `Ok(false)` when a newer fetch superseded this one.
    async fn refetch(&self) -> Result<bool>;

    /// Empties the selection store.
    async fn clear_selection(&self);
}

/// Outcome of a successful bulk action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkActionReport {
    pub batch: BatchDecision,
    /// `false` if the post-submit refetch failed or was superseded; the
    /// selection is cleared anyway.
    pub refreshed: bool,
}

/// Submits batch decisions, one at a time.
pub struct BulkActionCoordinator {
    gateway: Arc<dyn DecisionGateway>,
    in_flight: AtomicBool,
}

/// Resets the in-flight flag when the submission finishes or is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl BulkActionCoordinator {
    pub fn new(gateway: Arc<dyn DecisionGateway>) -> Self {
        Self {
            gateway,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn acquire(&self) -> Result<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| InFlightGuard(&self.in_flight))
            .map_err(|_| GridError::SubmissionInFlight)
    }

    /// Submits `decision` for every entry of `selection`.
    ///
    /// # Errors
    ///
    /// - `Validation` if `selection` is empty; nothing is sent
    /// - `SubmissionInFlight` if another submission is still running
    /// - whatever the gateway returned; the host is left untouched so the
    ///   same selection can be retried
    pub async fn submit(
        &self,
        decision: Decision,
        selection: &[SelectionEntry],
        host: &dyn SelectionHost,
    ) -> Result<BulkActionReport> {
        if selection.is_empty() {
            return Err(GridError::validation(
                "select at least one record before submitting a bulk action",
            ));
        }

        let _guard = self.acquire().inspect_err(|_| {
            tracing::warn!("[BulkAction] Submission already in flight, ignoring trigger");
        })?;

        let batch = BatchDecision::new(decision, selection);
        tracing::info!(
            "[BulkAction] Submitting {} for {} record(s)",
            decision,
            batch.ids.len()
        );

        if let Err(e) = self.gateway.submit(&batch).await {
            tracing::warn!("[BulkAction] Submission failed, selection kept: {}", e);
            return Err(e);
        }

        let refreshed = match host.refetch().await {
            Ok(true) => true,
            Ok(false) => {
                tracing::debug!("[BulkAction] Refetch after submission was superseded");
                false
            }
            Err(e) => {
                tracing::warn!("[BulkAction] Refetch after submission failed: {}", e);
                false
            }
        };
        host.clear_selection().await;

        tracing::info!(
            "[BulkAction] {} applied to {:?}",
            decision.label(),
            batch.ids
        );
        Ok(BulkActionReport { batch, refreshed })
    }
}
