//! Record domain module.
//!
//! A record is one administrative entity (for example a uniform request)
//! rendered as one grid row.
//!
//! # Module Structure
//!
//! - `model`: the `Record` entity and its column accessors
//! - `eligibility`: the predicate deciding whether a record may be selected

mod eligibility;
mod model;

pub use eligibility::{EligibilityPredicate, PendingReviewRule};
pub use model::{OPERATION_ORDER_STATUS, Record, RecordId, STORE_REQUEST_STATUS};
