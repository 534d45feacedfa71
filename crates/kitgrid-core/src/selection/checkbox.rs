//! Local checkbox state of one rendered grid page.

use std::collections::HashSet;

use crate::record::RecordId;

/// What the currently mounted page shows as checked.
///
/// The grid is re-instantiated whenever the visible rows change, so this
/// state is rebuilt per page and filled back in by
/// [`SelectionStore::reconcile`](super::SelectionStore::reconcile).
/// `revision` only moves when a checkbox actually flips, which is what a
/// renderer keys its notifications on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowCheckState {
    page_ids: Vec<RecordId>,
    checked: HashSet<RecordId>,
    revision: u64,
}

impl RowCheckState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts the grid for `page_ids`.
    ///
    /// Returns `true` if the row set differs from the mounted one, in which
    /// case every checkbox starts out unchecked again.
    pub fn mount(&mut self, page_ids: &[RecordId]) -> bool {
        if self.page_ids == page_ids {
            return false;
        }
        self.page_ids = page_ids.to_vec();
        if !self.checked.is_empty() {
            self.checked.clear();
            self.revision += 1;
        }
        true
    }

    pub fn page_ids(&self) -> &[RecordId] {
        &self.page_ids
    }

    pub fn is_checked(&self, id: RecordId) -> bool {
        self.checked.contains(&id)
    }

    /// Returns `true` only if the row was not already checked.
    pub fn mark_checked(&mut self, id: RecordId) -> bool {
        if !self.page_ids.contains(&id) || !self.checked.insert(id) {
            return false;
        }
        self.revision += 1;
        true
    }

    /// Returns `true` only if the row was checked before.
    pub fn mark_unchecked(&mut self, id: RecordId) -> bool {
        if !self.checked.remove(&id) {
            return false;
        }
        self.revision += 1;
        true
    }

    /// Checked ids in page order.
    pub fn checked_ids(&self) -> Vec<RecordId> {
        self.page_ids
            .iter()
            .copied()
            .filter(|id| self.checked.contains(id))
            .collect()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
