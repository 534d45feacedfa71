//! Cross-page selection store.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::checkbox::RowCheckState;
use crate::record::{EligibilityPredicate, Record, RecordId};

/// Snapshot of a record taken at the moment it was selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionEntry {
    pub record: Record,
    pub selected_at: DateTime<Utc>,
}

impl SelectionEntry {
    pub fn new(record: Record) -> Self {
        Self {
            record,
            selected_at: Utc::now(),
        }
    }

    pub fn id(&self) -> RecordId {
        self.record.id
    }
}

/// Result of a single row toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The record was not selected and is not eligible right now.
    Ignored,
}

/// Tri-state of the page header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeaderCheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

/// Checkbox flips performed by one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub checked: usize,
    pub unchecked: usize,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.checked == 0 && self.unchecked == 0
    }
}

/// Persistent, deduplicated selection that survives pagination.
///
/// Membership is keyed purely by `Id`. Eligibility is checked when a record
/// is added and again by the caller at submit time; the store never caches
/// a verdict. Entries iterate in ascending `Id` order.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    entries: BTreeMap<RecordId, SelectionEntry>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a selected record unconditionally, or adds it if eligible.
    pub fn toggle(&mut self, record: &Record, predicate: &dyn EligibilityPredicate) -> ToggleOutcome {
        if self.entries.remove(&record.id).is_some() {
            tracing::debug!("[SelectionStore] Deselected record {}", record.id);
            return ToggleOutcome::Removed;
        }

        if !predicate.is_eligible(record) {
            tracing::debug!(
                "[SelectionStore] Ignored toggle of ineligible record {}",
                record.id
            );
            return ToggleOutcome::Ignored;
        }

        self.entries
            .insert(record.id, SelectionEntry::new(record.clone()));
        tracing::debug!("[SelectionStore] Selected record {}", record.id);
        ToggleOutcome::Added
    }

    /// Removes an entry by id, whatever its current eligibility.
    pub fn remove(&mut self, id: RecordId) -> Option<SelectionEntry> {
        self.entries.remove(&id)
    }

    /// Adds every eligible, not yet selected record of the page.
    ///
    /// Returns how many records were added.
    pub fn select_all_eligible_on_page(
        &mut self,
        page_records: &[Record],
        predicate: &dyn EligibilityPredicate,
    ) -> usize {
        let mut added = 0;
        for record in page_records {
            if self.entries.contains_key(&record.id) || !predicate.is_eligible(record) {
                continue;
            }
            self.entries
                .insert(record.id, SelectionEntry::new(record.clone()));
            added += 1;
        }
        tracing::debug!(
            "[SelectionStore] Select-all added {} of {} page rows",
            added,
            page_records.len()
        );
        added
    }

    /// Removes the page's eligible rows from the selection.
    ///
    /// Selected rows that have since become ineligible are left alone; the
    /// operator clears those one by one.
    pub fn deselect_eligible_on_page(
        &mut self,
        page_records: &[Record],
        predicate: &dyn EligibilityPredicate,
    ) -> usize {
        let before = self.entries.len();
        for record in page_records.iter().filter(|r| predicate.is_eligible(r)) {
            self.entries.remove(&record.id);
        }
        before - self.entries.len()
    }

    /// Header click: clears the page when fully checked, otherwise selects
    /// every eligible row. Returns the header state afterwards.
    pub fn toggle_all_on_page(
        &mut self,
        page_records: &[Record],
        predicate: &dyn EligibilityPredicate,
    ) -> HeaderCheckState {
        match self.header_state(page_records, predicate) {
            HeaderCheckState::Checked => {
                self.deselect_eligible_on_page(page_records, predicate);
            }
            HeaderCheckState::Unchecked | HeaderCheckState::Indeterminate => {
                self.select_all_eligible_on_page(page_records, predicate);
            }
        }
        self.header_state(page_records, predicate)
    }

    /// Header checkbox state from `selected eligible / eligible` on the page.
    pub fn header_state(
        &self,
        page_records: &[Record],
        predicate: &dyn EligibilityPredicate,
    ) -> HeaderCheckState {
        let (eligible, selected) = page_records
            .iter()
            .filter(|r| predicate.is_eligible(r))
            .fold((0usize, 0usize), |(eligible, selected), r| {
                (eligible + 1, selected + usize::from(self.contains(r.id)))
            });

        match (eligible, selected) {
            (0, _) | (_, 0) => HeaderCheckState::Unchecked,
            (e, s) if e == s => HeaderCheckState::Checked,
            _ => HeaderCheckState::Indeterminate,
        }
    }

    /// Reflects the selection onto the checkbox state of the mounted page.
    ///
    /// Only rows of `page_records` are touched. Running it again without a
    /// selection change flips nothing and leaves the revision untouched.
    pub fn reconcile(&self, page_records: &[Record], checks: &mut RowCheckState) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        for record in page_records {
            if self.contains(record.id) {
                if checks.mark_checked(record.id) {
                    report.checked += 1;
                }
            } else if checks.mark_unchecked(record.id) {
                report.unchecked += 1;
            }
        }
        if !report.is_noop() {
            tracing::debug!(
                "[SelectionStore] Reconciled page: {} checked, {} unchecked",
                report.checked,
                report.unchecked
            );
        }
        report
    }

    /// Drops entries whose record no longer exists upstream.
    ///
    /// `latest_ids` must come from a full refetch, not from a client-side
    /// filtered view. Returns the removed ids in ascending order.
    pub fn prune_absent(&mut self, latest_ids: &HashSet<RecordId>) -> Vec<RecordId> {
        let removed: Vec<RecordId> = self
            .entries
            .keys()
            .copied()
            .filter(|id| !latest_ids.contains(id))
            .collect();
        for id in &removed {
            self.entries.remove(id);
        }
        if !removed.is_empty() {
            tracing::debug!(
                "[SelectionStore] Pruned {} entries absent from refetch: {:?}",
                removed.len(),
                removed
            );
        }
        removed
    }

    /// Selected ids whose current snapshot in `current` is no longer eligible.
    pub fn stale_entries(
        &self,
        current: &[Record],
        predicate: &dyn EligibilityPredicate,
    ) -> Vec<RecordId> {
        current
            .iter()
            .filter(|r| self.contains(r.id) && !predicate.is_eligible(r))
            .map(|r| r.id)
            .collect()
    }

    pub fn clear(&mut self) {
        tracing::debug!("[SelectionStore] Cleared {} entries", self.entries.len());
        self.entries.clear();
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: RecordId) -> Option<&SelectionEntry> {
        self.entries.get(&id)
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.entries.keys().copied().collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::page;
    use crate::record::PendingReviewRule;

    fn pending(id: RecordId) -> Record {
        Record::new(id).with_statuses("Pending", None)
    }

    fn approved(id: RecordId) -> Record {
        Record::new(id).with_statuses("Pending", Some("Approved"))
    }

    fn ids(records: &[Record]) -> Vec<RecordId> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let rule = PendingReviewRule::default();
        let mut store = SelectionStore::new();
        let row = pending(1);

        assert_eq!(store.toggle(&row, &rule), ToggleOutcome::Added);
        assert_eq!(store.count(), 1);
        assert_eq!(store.toggle(&row, &rule), ToggleOutcome::Removed);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_toggle_ineligible_leaves_count_unchanged() {
        let rule = PendingReviewRule::default();
        let mut store = SelectionStore::new();
        store.toggle(&pending(1), &rule);

        assert_eq!(store.toggle(&approved(2), &rule), ToggleOutcome::Ignored);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_removal_allowed_after_record_became_ineligible() {
        let rule = PendingReviewRule::default();
        let mut store = SelectionStore::new();
        store.toggle(&pending(5), &rule);

        assert_eq!(store.toggle(&approved(5), &rule), ToggleOutcome::Removed);
        assert!(store.is_empty());
    }

    #[test]
    fn test_no_duplicate_ids() {
        let rule = PendingReviewRule::default();
        let mut store = SelectionStore::new();
        let rows: Vec<Record> = (1..=3).map(pending).collect();

        store.toggle(&rows[0], &rule);
        store.select_all_eligible_on_page(&rows, &rule);
        store.select_all_eligible_on_page(&rows, &rule);

        assert_eq!(store.count(), 3);
        assert_eq!(store.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_select_all_counts_only_new_eligible_rows() {
        let rule = PendingReviewRule::default();
        let mut store = SelectionStore::new();
        let rows = vec![pending(1), approved(2), pending(3), approved(4), pending(5)];
        store.toggle(&rows[0], &rule);

        let added = store.select_all_eligible_on_page(&rows, &rule);

        assert_eq!(added, 2);
        assert_eq!(store.count(), 3);
        assert!(!store.contains(2));
        assert!(!store.contains(4));
    }

    #[test]
    fn test_header_states_with_ineligible_rows() {
        let rule = PendingReviewRule::default();
        let mut store = SelectionStore::new();
        let rows = vec![pending(1), approved(2), pending(3), approved(4), pending(5)];

        assert_eq!(store.header_state(&rows, &rule), HeaderCheckState::Unchecked);

        store.toggle(&rows[0], &rule);
        assert_eq!(
            store.header_state(&rows, &rule),
            HeaderCheckState::Indeterminate
        );

        assert_eq!(store.select_all_eligible_on_page(&rows, &rule), 2);
        assert_eq!(store.header_state(&rows, &rule), HeaderCheckState::Checked);
    }

    #[test]
    fn test_header_unchecked_when_page_has_no_eligible_rows() {
        let rule = PendingReviewRule::default();
        let store = SelectionStore::new();
        let rows = vec![approved(1), approved(2)];
        assert_eq!(store.header_state(&rows, &rule), HeaderCheckState::Unchecked);
    }

    #[test]
    fn test_toggle_all_on_page_round_trip() {
        let rule = PendingReviewRule::default();
        let mut store = SelectionStore::new();
        let rows = vec![pending(1), approved(2), pending(3)];
        store.toggle(&pending(99), &rule);

        assert_eq!(store.toggle_all_on_page(&rows, &rule), HeaderCheckState::Checked);
        assert_eq!(store.count(), 3);

        assert_eq!(
            store.toggle_all_on_page(&rows, &rule),
            HeaderCheckState::Unchecked
        );
        assert_eq!(store.ids(), vec![99]);
    }

    #[test]
    fn test_selection_survives_pagination() {
        let rule = PendingReviewRule::default();
        let mut store = SelectionStore::new();
        let dataset: Vec<Record> = (1..=10).map(pending).collect();
        let mut checks = RowCheckState::new();

        let page1 = page(&dataset, 5, 1);
        checks.mount(&ids(page1));
        store.toggle(&page1[1], &rule);
        store.toggle(&page1[3], &rule);
        store.reconcile(page1, &mut checks);
        assert_eq!(checks.checked_ids(), vec![2, 4]);

        let page2 = page(&dataset, 5, 2);
        checks.mount(&ids(page2));
        store.reconcile(page2, &mut checks);
        assert!(checks.checked_ids().is_empty());

        checks.mount(&ids(page1));
        store.reconcile(page1, &mut checks);
        assert_eq!(checks.checked_ids(), vec![2, 4]);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let rule = PendingReviewRule::default();
        let mut store = SelectionStore::new();
        let rows: Vec<Record> = (1..=5).map(pending).collect();
        let mut checks = RowCheckState::new();
        checks.mount(&ids(&rows));
        store.toggle(&rows[0], &rule);
        store.toggle(&rows[2], &rule);

        let first = store.reconcile(&rows, &mut checks);
        let revision = checks.revision();
        let second = store.reconcile(&rows, &mut checks);

        assert_eq!(first.checked, 2);
        assert!(second.is_noop());
        assert_eq!(checks.revision(), revision);
    }

    #[test]
    fn test_reconcile_unchecks_rows_after_clear() {
        let rule = PendingReviewRule::default();
        let mut store = SelectionStore::new();
        let rows: Vec<Record> = (1..=3).map(pending).collect();
        let mut checks = RowCheckState::new();
        checks.mount(&ids(&rows));
        store.select_all_eligible_on_page(&rows, &rule);
        store.reconcile(&rows, &mut checks);

        store.clear();
        let report = store.reconcile(&rows, &mut checks);

        assert_eq!(report.unchecked, 3);
        assert!(checks.checked_ids().is_empty());
    }

    #[test]
    fn test_prune_absent_keeps_present_entries() {
        let rule = PendingReviewRule::default();
        let mut store = SelectionStore::new();
        for id in [1, 2, 3, 4] {
            store.toggle(&pending(id), &rule);
        }

        let latest: HashSet<RecordId> = [1, 3, 4, 8].into_iter().collect();
        let removed = store.prune_absent(&latest);

        assert_eq!(removed, vec![2]);
        assert_eq!(store.ids(), vec![1, 3, 4]);
    }

    #[test]
    fn test_stale_entries_reports_drift_without_removing() {
        let rule = PendingReviewRule::default();
        let mut store = SelectionStore::new();
        store.toggle(&pending(1), &rule);
        store.toggle(&pending(2), &rule);

        let current = vec![pending(1), approved(2), pending(3)];
        assert_eq!(store.stale_entries(&current, &rule), vec![2]);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_entry_keeps_selection_time_snapshot() {
        let rule = PendingReviewRule::default();
        let mut store = SelectionStore::new();
        let row = pending(7).with_field("Requester", "A. Leroy");
        store.toggle(&row, &rule);

        let entry = store.get(7).unwrap();
        assert_eq!(entry.id(), 7);
        assert_eq!(entry.record.text_field("Requester").as_deref(), Some("A. Leroy"));
    }
}
