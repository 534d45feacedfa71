//! External collaborator contracts.
//!
//! - `model`: batch decision payload, backend response and list filters
//! - `repository`: async traits implemented by the infrastructure adapters

mod model;
pub mod repository;

pub use model::{BatchDecision, Decision, DecisionResponse, ListFilter, PROJECT, REQUEST_DATE};
pub use repository::{DecisionGateway, RecordSource};
