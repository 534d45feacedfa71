//! Domain layer for KITGRID.
//!
//! Record eligibility, page derivation, the cross-page selection store and
//! the grid view-model builder. Nothing here performs I/O; the list fetch
//! and the decision submit are reached through the traits in [`api`].

pub mod api;
pub mod config;
pub mod error;
pub mod paging;
pub mod record;
pub mod selection;
pub mod view;

// Re-export common error type
pub use error::GridError;
