//! Collaborator traits for the list fetch and the batch decision submit.

use async_trait::async_trait;

use super::model::{BatchDecision, ListFilter};
use crate::error::Result;
use crate::record::{Record, RecordId};

/// Source of the candidate record array for the active high-level filters.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetches every record matching `filter`.
    ///
    /// The result is the full dataset snapshot; client-side filtering and
    /// paging happen afterwards.
    async fn fetch(&self, filter: &ListFilter) -> Result<Vec<Record>>;

    /// Fetches a single record for a detail view.
    ///
    /// # Errors
    ///
    /// Returns `GridError::NotFound` if the id is unknown upstream.
    async fn fetch_detail(&self, id: RecordId) -> Result<Record>;
}

/// Receiver of one batch decision.
#[async_trait]
pub trait DecisionGateway: Send + Sync {
    /// Applies the decision to every id of the batch, all or nothing.
    async fn submit(&self, batch: &BatchDecision) -> Result<()>;
}
