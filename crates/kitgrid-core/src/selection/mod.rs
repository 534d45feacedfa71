//! Selection domain module.
//!
//! The store lives above the per-page grid and is the only place a selected
//! record is tracked while it is off-screen. The grid's own checkbox state
//! is disposable and rebuilt from the store on every render.

mod checkbox;
mod store;

pub use checkbox::RowCheckState;
pub use store::{
    HeaderCheckState, ReconcileReport, SelectionEntry, SelectionStore, ToggleOutcome,
};
