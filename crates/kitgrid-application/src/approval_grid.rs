//! Approval grid screen controller.
//!
//! `ApprovalGridScreen` owns everything a batch-approval screen keeps alive
//! between renders: the fetched dataset, the client-side view filter, the
//! sort, the page window and the selection store. The grid widget itself
//! only receives [`GridView`]s and sends back [`GridEvent`]s.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use kitgrid_core::api::{Decision, DecisionGateway, ListFilter, RecordSource};
use kitgrid_core::config::GridConfig;
use kitgrid_core::error::{GridError, Result};
use kitgrid_core::paging::PageWindow;
use kitgrid_core::record::{EligibilityPredicate, PendingReviewRule, Record, RecordId};
use kitgrid_core::selection::{
    HeaderCheckState, RowCheckState, SelectionEntry, SelectionStore, ToggleOutcome,
};
use kitgrid_core::view::{
    BulkActionButton, GridEvent, GridView, SelectionSpec, SortSpec, build_grid_view,
};
use tokio::sync::RwLock;

use crate::bulk_action::{BulkActionCoordinator, BulkActionReport, SelectionHost};
use crate::fetch_sequencer::FetchSequencer;

struct ScreenState {
    filter: ListFilter,
    dataset: Vec<Record>,
    view_filter: String,
    sort: SortSpec,
    window: PageWindow,
    selection: SelectionStore,
    checks: RowCheckState,
    error: Option<GridError>,
    loading: bool,
}

impl ScreenState {
    fn new(page_size: usize) -> Self {
        Self {
            filter: ListFilter::default(),
            dataset: Vec::new(),
            view_filter: String::new(),
            sort: SortSpec::default(),
            window: PageWindow::first(page_size),
            selection: SelectionStore::new(),
            checks: RowCheckState::new(),
            error: None,
            loading: false,
        }
    }

    /// Dataset narrowed by the client-side view filter, in fetch order.
    fn filtered_rows(&self) -> Vec<Record> {
        self.dataset
            .iter()
            .filter(|r| r.matches_text(&self.view_filter))
            .cloned()
            .collect()
    }

    fn current_page(&self) -> Vec<Record> {
        let mut rows = self.filtered_rows();
        self.sort.apply(&mut rows);
        self.window.slice(&rows).to_vec()
    }

    fn snapshot(&self, id: RecordId) -> Option<&Record> {
        self.dataset.iter().find(|r| r.id == id)
    }

    fn apply_dataset(&mut self, records: Vec<Record>) {
        let latest: HashSet<RecordId> = records.iter().map(|r| r.id).collect();
        let pruned = self.selection.prune_absent(&latest);
        if !pruned.is_empty() {
            tracing::info!(
                "[ApprovalGrid] Dropped {} selected record(s) no longer returned upstream",
                pruned.len()
            );
        }
        self.dataset = records;
        self.window.reset();
        self.error = None;
    }
}

/// Screen-level coordination of fetch, paging, selection and bulk actions.
pub struct ApprovalGridScreen {
    source: Arc<dyn RecordSource>,
    predicate: Arc<dyn EligibilityPredicate>,
    coordinator: BulkActionCoordinator,
    sequencer: FetchSequencer,
    state: RwLock<ScreenState>,
}

impl ApprovalGridScreen {
    /// Creates an empty screen; nothing is fetched until [`load`](Self::load).
    pub fn new(
        source: Arc<dyn RecordSource>,
        gateway: Arc<dyn DecisionGateway>,
        predicate: Arc<dyn EligibilityPredicate>,
        page_size: usize,
    ) -> Self {
        Self {
            source,
            predicate,
            coordinator: BulkActionCoordinator::new(gateway),
            sequencer: FetchSequencer::new(),
            state: RwLock::new(ScreenState::new(page_size)),
        }
    }

    /// Creates a screen using the configured page size and eligibility rule.
    pub fn from_config(
        config: &GridConfig,
        source: Arc<dyn RecordSource>,
        gateway: Arc<dyn DecisionGateway>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            source,
            gateway,
            Arc::new(PendingReviewRule::from(&config.eligibility)),
            config.page_size,
        ))
    }

    // ============================================================================
    // Dataset
    // ============================================================================

    /// Fetches the dataset for `filter`.
    ///
    /// Returns `Ok(false)` when a newer fetch was issued before this one
    /// resolved; the stale response is dropped without touching any state.
    pub async fn load(&self, filter: ListFilter) -> Result<bool> {
        let ticket = self.sequencer.begin();
        {
            let mut state = self.state.write().await;
            state.filter = filter.clone();
            state.loading = true;
        }

        tracing::debug!(
            "[ApprovalGrid] Fetch generation {} started: {:?}",
            ticket.generation(),
            filter
        );
        let result = self.source.fetch(&filter).await;

        let mut state = self.state.write().await;
        if !self.sequencer.is_current(ticket) {
            tracing::warn!(
                "[ApprovalGrid] Discarding stale response of fetch generation {}",
                ticket.generation()
            );
            return Ok(false);
        }
        state.loading = false;

        match result {
            Ok(records) => {
                tracing::info!(
                    "[ApprovalGrid] Fetch generation {} applied: {} record(s)",
                    ticket.generation(),
                    records.len()
                );
                state.apply_dataset(records);
                Ok(true)
            }
            Err(e) => {
                tracing::warn!("[ApprovalGrid] Fetch failed: {}", e);
                state.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Refetches with the active filter.
    pub async fn refresh(&self) -> Result<bool> {
        let filter = self.state.read().await.filter.clone();
        self.load(filter).await
    }

    pub async fn record_detail(&self, id: RecordId) -> Result<Record> {
        match self.source.fetch_detail(id).await {
            Ok(record) => Ok(record),
            Err(e) => {
                self.state.write().await.error = Some(e.clone());
                Err(e)
            }
        }
    }

    // ============================================================================
    // View state
    // ============================================================================

    /// Sets the client-side text filter. The selection is not pruned.
    pub async fn set_view_filter(&self, text: impl Into<String>) {
        let mut state = self.state.write().await;
        state.view_filter = text.into();
        state.window.reset();
    }

    pub async fn set_sort(&self, sort: SortSpec) {
        self.state.write().await.sort = sort;
    }

    pub async fn go_to_page(&self, page_index: usize) {
        self.state.write().await.window.go_to(page_index);
    }

    pub async fn next_page(&self) -> bool {
        let mut state = self.state.write().await;
        let len = state.filtered_rows().len();
        state.window.next(len)
    }

    pub async fn previous_page(&self) -> bool {
        self.state.write().await.window.previous()
    }

    /// Builds the current page and reconciles the grid's checkbox state.
    pub async fn render(&self) -> GridView {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let rows = state.filtered_rows();
        build_grid_view(
            &rows,
            &state.sort,
            state.window,
            &SelectionSpec {
                store: &state.selection,
                predicate: self.predicate.as_ref(),
                selectable: !self.coordinator.is_in_flight(),
            },
            &mut state.checks,
        )
    }

    // ============================================================================
    // Selection
    // ============================================================================

    /// Toggles a row by id against its current dataset snapshot.
    ///
    /// An id missing from the dataset can still be deselected.
    pub async fn toggle_row(&self, id: RecordId) -> ToggleOutcome {
        if self.coordinator.is_in_flight() {
            tracing::debug!("[ApprovalGrid] Toggle of {} ignored during submission", id);
            return ToggleOutcome::Ignored;
        }

        let mut state = self.state.write().await;
        match state.snapshot(id).cloned() {
            Some(record) => state.selection.toggle(&record, self.predicate.as_ref()),
            None => match state.selection.remove(id) {
                Some(_) => ToggleOutcome::Removed,
                None => ToggleOutcome::Ignored,
            },
        }
    }

    /// Header checkbox click on the visible page.
    pub async fn toggle_select_all(&self) -> HeaderCheckState {
        let mut state = self.state.write().await;
        let page = state.current_page();
        if self.coordinator.is_in_flight() {
            return state.selection.header_state(&page, self.predicate.as_ref());
        }
        state
            .selection
            .toggle_all_on_page(&page, self.predicate.as_ref())
    }

    /// Adds every eligible row of the visible page; returns how many were new.
    pub async fn select_all_eligible_on_page(&self) -> usize {
        if self.coordinator.is_in_flight() {
            return 0;
        }
        let mut state = self.state.write().await;
        let page = state.current_page();
        state
            .selection
            .select_all_eligible_on_page(&page, self.predicate.as_ref())
    }

    pub async fn handle_event(&self, event: GridEvent) {
        match event {
            GridEvent::ToggleRow(id) => {
                self.toggle_row(id).await;
            }
            GridEvent::ToggleSelectAll => {
                self.toggle_select_all().await;
            }
        }
    }

    pub async fn selection_count(&self) -> usize {
        self.state.read().await.selection.count()
    }

    pub async fn selected_ids(&self) -> Vec<RecordId> {
        self.state.read().await.selection.ids()
    }

    pub async fn selected_entries(&self) -> Vec<SelectionEntry> {
        self.state.read().await.selection.entries().cloned().collect()
    }

    /// Selected ids whose current snapshot is no longer eligible.
    pub async fn stale_selection(&self) -> Vec<RecordId> {
        let state = self.state.read().await;
        state
            .selection
            .stale_entries(&state.dataset, self.predicate.as_ref())
    }

    // ============================================================================
    // Bulk action
    // ============================================================================

    pub async fn bulk_action_button(&self, decision: Decision) -> BulkActionButton {
        let count = self.selection_count().await;
        BulkActionButton::new(decision, count, self.coordinator.is_in_flight())
    }

    pub fn is_submitting(&self) -> bool {
        self.coordinator.is_in_flight()
    }

    /// Submits `decision` for the current selection.
    ///
    /// Eligibility is re-checked against the current dataset: selected
    /// records that are no longer eligible are left out of the batch. On
    /// failure the selection is kept and the error is stored for display.
    pub async fn submit(&self, decision: Decision) -> Result<BulkActionReport> {
        let (payload, selected) = {
            let state = self.state.read().await;
            let mut payload = Vec::with_capacity(state.selection.count());
            for entry in state.selection.entries() {
                match state.snapshot(entry.id()) {
                    Some(current) if self.predicate.is_eligible(current) => {
                        payload.push(SelectionEntry {
                            record: current.clone(),
                            selected_at: entry.selected_at,
                        });
                    }
                    _ => tracing::debug!(
                        "[ApprovalGrid] Record {} is no longer eligible, left out of batch",
                        entry.id()
                    ),
                }
            }
            (payload, state.selection.count())
        };

        let result = if payload.is_empty() && selected > 0 {
            Err(GridError::validation(format!(
                "none of the {} selected record(s) is still eligible",
                selected
            )))
        } else {
            self.coordinator.submit(decision, &payload, self).await
        };

        if let Err(e) = &result
            && !e.is_in_flight()
        {
            self.state.write().await.error = Some(e.clone());
        }
        result
    }

    // ============================================================================
    // Status
    // ============================================================================

    pub async fn error(&self) -> Option<GridError> {
        self.state.read().await.error.clone()
    }

    pub async fn dismiss_error(&self) {
        self.state.write().await.error = None;
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn filter(&self) -> ListFilter {
        self.state.read().await.filter.clone()
    }

    pub async fn dataset(&self) -> Vec<Record> {
        self.state.read().await.dataset.clone()
    }
}

#[async_trait]
impl SelectionHost for ApprovalGridScreen {
    async fn refetch(&self) -> Result<bool> {
        self.refresh().await
    }

    async fn clear_selection(&self) {
        self.state.write().await.selection.clear();
    }
}
