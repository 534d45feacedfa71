//! Selection eligibility.
//!
//! Eligibility is always evaluated against the record snapshot the caller
//! currently holds. Nothing here caches a verdict.

use crate::config::EligibilityConfig;
use crate::record::Record;

/// Classifies whether a record may currently be selected for a bulk action.
pub trait EligibilityPredicate: Send + Sync {
    fn is_eligible(&self, record: &Record) -> bool;
}

impl<F> EligibilityPredicate for F
where
    F: Fn(&Record) -> bool + Send + Sync,
{
    fn is_eligible(&self, record: &Record) -> bool {
        self(record)
    }
}

/// Default rule: the primary status must be open and the secondary status
/// must not already carry a final decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReviewRule {
    primary_status: String,
    closed_secondary_statuses: Vec<String>,
}

impl PendingReviewRule {
    pub fn new(primary_status: impl Into<String>, closed_secondary_statuses: Vec<String>) -> Self {
        Self {
            primary_status: primary_status.into(),
            closed_secondary_statuses,
        }
    }
}

impl Default for PendingReviewRule {
    fn default() -> Self {
        Self::from(&EligibilityConfig::default())
    }
}

impl From<&EligibilityConfig> for PendingReviewRule {
    fn from(config: &EligibilityConfig) -> Self {
        Self::new(
            config.primary_status.clone(),
            config.closed_secondary_statuses.clone(),
        )
    }
}

impl EligibilityPredicate for PendingReviewRule {
    fn is_eligible(&self, record: &Record) -> bool {
        let primary_open = record.store_request_status.as_deref() == Some(self.primary_status.as_str());
        let secondary_closed = record
            .operation_order_status
            .as_deref()
            .is_some_and(|status| self.closed_secondary_statuses.iter().any(|c| c == status));

        primary_open && !secondary_closed
    }
}
