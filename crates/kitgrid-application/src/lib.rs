//! Application layer for KITGRID.
//!
//! This crate wires the domain pieces of `kitgrid-core` into a screen
//! controller: ordered list fetches, bulk decision submission and the
//! per-render grid view.

pub mod approval_grid;
pub mod bulk_action;
pub mod fetch_sequencer;

pub use approval_grid::ApprovalGridScreen;
pub use bulk_action::{BulkActionCoordinator, BulkActionReport, SelectionHost};
pub use fetch_sequencer::{FetchSequencer, FetchTicket};
