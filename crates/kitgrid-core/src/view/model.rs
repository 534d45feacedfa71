//! Framework-free grid view-model.
//!
//! The widget that draws the grid is a thin renderer over [`GridView`]: it
//! receives rows and checked ids, and only emits [`GridEvent`]s back.

use serde::Serialize;

use crate::api::Decision;
use crate::paging::PageWindow;
use crate::record::{EligibilityPredicate, Record, RecordId};
use crate::selection::{HeaderCheckState, RowCheckState, SelectionStore};
use crate::view::sort::SortSpec;

/// Selection inputs for one render pass.
pub struct SelectionSpec<'a> {
    pub store: &'a SelectionStore,
    pub predicate: &'a dyn EligibilityPredicate,
    /// `false` while a bulk action is in flight.
    pub selectable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub record: Record,
    pub checked: bool,
    pub selectable: bool,
}

/// Everything the grid needs to draw one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridView {
    pub rows: Vec<RowView>,
    pub selectable: bool,
    pub checked_ids: Vec<RecordId>,
    pub header: HeaderCheckState,
    pub page_index: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub selected_count: usize,
}

/// Events a grid renderer may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    ToggleRow(RecordId),
    ToggleSelectAll,
}

/// State of an approve/reject button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkActionButton {
    pub label: String,
    pub enabled: bool,
}

impl BulkActionButton {
    pub fn new(decision: Decision, selected: usize, in_flight: bool) -> Self {
        Self {
            label: format!("{} Selected ({})", decision.label(), selected),
            enabled: selected > 0 && !in_flight,
        }
    }
}

/// Builds the renderable page for `rows` (already filtered).
///
/// Sorting and paging are applied here; `checks` is remounted when the page
/// changes and reconciled against the store every time.
pub fn build_grid_view(
    rows: &[Record],
    sort: &SortSpec,
    window: PageWindow,
    selection: &SelectionSpec<'_>,
    checks: &mut RowCheckState,
) -> GridView {
    let mut ordered = rows.to_vec();
    sort.apply(&mut ordered);

    let page = window.slice(&ordered);
    let page_ids: Vec<RecordId> = page.iter().map(|r| r.id).collect();
    checks.mount(&page_ids);
    selection.store.reconcile(page, checks);

    let row_views = page
        .iter()
        .map(|record| RowView {
            checked: checks.is_checked(record.id),
            selectable: selection.selectable && selection.predicate.is_eligible(record),
            record: record.clone(),
        })
        .collect();

    GridView {
        rows: row_views,
        selectable: selection.selectable,
        checked_ids: checks.checked_ids(),
        header: selection.store.header_state(page, selection.predicate),
        page_index: window.page_index,
        total_pages: window.total_pages(ordered.len()),
        total_rows: ordered.len(),
        selected_count: selection.store.count(),
    }
}
