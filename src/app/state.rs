//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin shows: the
//! fetched machine list, the branch and text filters, the selection, and the
//! tracker popup. Every update replaces whole values (the list, the lookup
//! result) rather than patching them, and the view model is recomputed from a
//! snapshot on each render.
//!
//! # Example
//!
//! ```rust
//! use machine_tracker::app::AppState;
//! use machine_tracker::domain::{BranchFilter, MachineRecord};
//! use machine_tracker::repository::ApiEndpoints;
//! use machine_tracker::ui::Theme;
//!
//! let endpoints = ApiEndpoints::new("http://localhost:5000", "/api/machines", "/api/lookup/{code}");
//! let mut state = AppState::new(endpoints, BranchFilter::All, Theme::default());
//! state.machines = vec![MachineRecord::new("A1", "S1")];
//! state.apply_filters();
//! let viewmodel = state.compute_viewmodel(24, 120);
//! assert_eq!(viewmodel.rows.len(), 1);
//! ```

use super::actions::Action;
use super::modes::{InputMode, SearchFocus};
use crate::domain::{Branch, BranchFilter, ItemLocationDetails, LocateError, MachineRecord};
use crate::inventory::{self, validate_code, ListStatus, LookupSequence};
use crate::repository::ApiEndpoints;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BranchBarInfo, ColumnInfo, DisplayRow, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo,
    TrackerBody, TrackerPopupInfo, UIViewModel,
};

/// Table columns: title and display width in characters.
const COLUMNS: [(&str, usize); 7] = [
    ("ITEM CODE", 14),
    ("SERIAL NO", 18),
    ("NAME", 22),
    ("DESCRIPTION", 16),
    ("BRANCH", 13),
    ("MODEL NO", 14),
    ("BOX NO", 8),
];

/// Spaces between table columns.
pub const COLUMN_GAP: usize = 1;

/// Lines used by chrome in normal mode: blank, header, branch bar, border,
/// column titles, border, footer.
const NORMAL_CHROME_ROWS: usize = 7;

/// Extra lines taken by the search box.
const SEARCH_BAR_ROWS: usize = 3;

/// Phase of the tracker popup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrackerStatus {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A lookup is in flight.
    Loading {
        /// Id of the in-flight request.
        request_id: u64,
    },
    /// The latest lookup produced details.
    Found(ItemLocationDetails),
    /// The latest lookup (or its validation) failed.
    Failed(LocateError),
}

/// Contents of the tracker popup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackerState {
    /// Item code being typed.
    pub query: String,
    /// Outcome of the latest submission.
    pub status: TrackerStatus,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Every machine from the last successful fetch, in API order.
    pub machines: Vec<MachineRecord>,

    /// Machines passing the branch and text filters.
    ///
    /// Recomputed by [`AppState::apply_filters`].
    pub filtered_machines: Vec<MachineRecord>,

    /// Zero-based index into `filtered_machines`.
    pub selected_index: usize,

    pub input_mode: InputMode,

    /// Text filter matched against item code and serial number.
    pub search_query: String,

    /// Active branch selector.
    pub branch: BranchFilter,

    /// Outcome of the machine list fetch.
    pub list_status: ListStatus,

    /// Tracker popup contents; kept while closed but reset on open.
    pub tracker: TrackerState,

    /// Ids for lookups, used to drop superseded answers.
    pub lookups: LookupSequence,

    /// Inventory API endpoints.
    pub endpoints: ApiEndpoints,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates a state with an empty, still loading machine list.
    #[must_use]
    pub fn new(endpoints: ApiEndpoints, branch: BranchFilter, theme: Theme) -> Self {
        Self {
            machines: vec![],
            filtered_machines: vec![],
            selected_index: 0,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            branch,
            list_status: ListStatus::Loading,
            tracker: TrackerState::default(),
            lookups: LookupSequence::default(),
            endpoints,
            theme,
        }
    }

    /// Moves the selection down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.filtered_machines.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered_machines.len();
    }

    /// Moves the selection up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.filtered_machines.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.filtered_machines.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_machine(&self) -> Option<&MachineRecord> {
        self.filtered_machines.get(self.selected_index)
    }

    /// Replaces the machine list wholesale and re-filters.
    pub fn replace_machines(&mut self, machines: Vec<MachineRecord>, status: ListStatus) {
        self.machines = machines;
        self.list_status = status;
        self.apply_filters();
    }

    /// Recomputes `filtered_machines` from the branch and text filters and
    /// clamps the selection.
    pub fn apply_filters(&mut self) {
        let _span = tracing::debug_span!("apply_filters",
            total_machines = self.machines.len(),
            query_len = self.search_query.len(),
            branch = %self.branch
        )
        .entered();

        self.filtered_machines = inventory::filter(&self.machines, self.branch, &self.search_query)
            .into_iter()
            .cloned()
            .collect();

        if self.filtered_machines.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.filtered_machines.len() - 1);
        }

        tracing::debug!(filtered_count = self.filtered_machines.len(), "filters applied");
    }

    /// Opens the tracker popup with `query` prefilled and no previous result.
    pub fn open_tracker(&mut self, query: String) {
        self.tracker = TrackerState {
            query,
            status: TrackerStatus::Idle,
        };
        self.input_mode = InputMode::Tracker;
    }

    /// Closes the tracker popup, clearing the query and ignoring any lookup
    /// still in flight.
    pub fn close_tracker(&mut self) {
        self.tracker = TrackerState::default();
        self.lookups.invalidate();
        self.input_mode = InputMode::Normal;
    }

    /// Submits the tracker query.
    ///
    /// Blank input fails immediately with [`LocateError::EmptyInput`] and
    /// returns `None`. Otherwise the popup switches to loading and the lookup
    /// request to perform is returned.
    pub fn begin_lookup(&mut self) -> Option<Action> {
        let code = match validate_code(&self.tracker.query) {
            Ok(code) => code.to_string(),
            Err(e) => {
                tracing::debug!("lookup submitted without an item code");
                self.tracker.status = TrackerStatus::Failed(e);
                return None;
            }
        };

        let request_id = self.lookups.issue();
        self.tracker.status = TrackerStatus::Loading { request_id };
        tracing::debug!(request_id, code = %code, "lookup started");

        Some(Action::LookupItem {
            request_id,
            url: self.endpoints.lookup_url(&code),
            code,
        })
    }

    /// Stores the result of lookup `request_id` if it is still the latest.
    ///
    /// Returns `false` when the answer was stale and nothing changed.
    pub fn finish_lookup(
        &mut self,
        request_id: u64,
        result: Result<ItemLocationDetails, LocateError>,
    ) -> bool {
        if !self.lookups.is_current(request_id) {
            tracing::debug!(request_id, "discarding stale lookup result");
            return false;
        }

        self.tracker.status = match result {
            Ok(details) => TrackerStatus::Found(details),
            Err(e) => TrackerStatus::Failed(e),
        };
        true
    }

    /// Computes a renderable view model for a `rows` × `cols` pane.
    ///
    /// Only the window of rows that fits is included; the window follows the
    /// selection, keeping it near the middle.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let columns = Self::visible_columns(cols);
        let available_rows = self.calculate_available_rows(rows);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.filtered_machines.len());
        if visible_end - visible_start < available_rows
            && self.filtered_machines.len() >= available_rows
        {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let highlight_query = if self.search_query.is_empty() {
            None
        } else {
            Some(self.search_query.as_str())
        };

        let display_rows = self.filtered_machines[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, machine)| {
                let is_selected = visible_start + relative_idx == self.selected_index;
                Self::compute_display_row(machine, &columns, is_selected, highlight_query)
            })
            .collect();

        UIViewModel {
            rows: display_rows,
            selected_index: self.selected_index.saturating_sub(visible_start),
            columns,
            header: self.compute_header(),
            branch_bar: self.compute_branch_bar(),
            footer: self.compute_footer(),
            empty_state: self.compute_empty_state(),
            search_bar: self.compute_search_bar(),
            tracker: self.compute_tracker(),
        }
    }

    /// Columns that fit in `cols`; the item code and serial number always show.
    fn visible_columns(cols: usize) -> Vec<ColumnInfo> {
        let mut used = 0;
        COLUMNS
            .iter()
            .enumerate()
            .take_while(|(idx, (_, width))| {
                let fits = used + width <= cols || *idx < 2;
                used += width + COLUMN_GAP;
                fits
            })
            .map(|(_, (title, width))| ColumnInfo {
                title: (*title).to_string(),
                width: *width,
            })
            .collect()
    }

    fn compute_display_row(
        machine: &MachineRecord,
        columns: &[ColumnInfo],
        is_selected: bool,
        query: Option<&str>,
    ) -> DisplayRow {
        let cells: Vec<String> = machine
            .cells()
            .iter()
            .zip(columns)
            .map(|(cell, column)| truncate(cell, column.width))
            .collect();

        // Only the two searchable columns get match highlighting.
        let highlights = cells
            .iter()
            .zip(columns)
            .enumerate()
            .map(|(idx, (cell, column))| match query {
                Some(q) if idx < 2 => inventory::match_ranges(cell, q)
                    .into_iter()
                    .filter(|(start, _)| *start < column.width)
                    .map(|(start, end)| (start, end.min(cell.chars().count())))
                    .collect(),
                _ => vec![],
            })
            .collect();

        DisplayRow {
            cells,
            highlights,
            is_selected,
            is_repairing: machine.is_repairing(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: format!(
                " Machine Details Report ({}/{}) | Branch: {} ",
                self.filtered_machines.len(),
                self.machines.len(),
                self.branch
            ),
        }
    }

    fn compute_branch_bar(&self) -> BranchBarInfo {
        let filters: Vec<BranchFilter> = std::iter::once(BranchFilter::All)
            .chain(Branch::ALL.into_iter().map(BranchFilter::Only))
            .collect();

        BranchBarInfo {
            labels: filters.iter().map(|f| f.label().to_string()).collect(),
            active: filters.iter().position(|f| *f == self.branch).unwrap_or(0),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Normal => {
                "j/k: navigate  h/l: branch  /: search  t: track  Enter: track selected  r: refresh  q: quit"
            }
            InputMode::Search(SearchFocus::Typing) => {
                "ESC: exit search  Enter: browse results  Tab: branch  Type to filter"
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "ESC: exit search  /: edit query  j/k: navigate  Enter: track selected"
            }
            InputMode::Tracker => "Enter: search  ESC: close  Type an item code",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.filtered_machines.is_empty() {
            return None;
        }

        let subtitle = match &self.list_status {
            ListStatus::Loading => "Loading machines...".to_string(),
            ListStatus::Unavailable(reason) => format!("Inventory API unavailable: {reason}"),
            ListStatus::Ready if self.machines.is_empty() => "The inventory is empty".to_string(),
            ListStatus::Ready => format!(
                "Nothing matches branch {} and search \"{}\"",
                self.branch, self.search_query
            ),
        };

        Some(EmptyState {
            message: "No machines found".to_string(),
            subtitle,
        })
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        self.input_mode.is_search().then(|| SearchBarInfo {
            query: self.search_query.clone(),
        })
    }

    fn compute_tracker(&self) -> Option<TrackerPopupInfo> {
        if self.input_mode != InputMode::Tracker {
            return None;
        }

        let body = match &self.tracker.status {
            TrackerStatus::Idle => TrackerBody::Prompt,
            TrackerStatus::Loading { .. } => TrackerBody::Loading,
            TrackerStatus::Failed(e) => TrackerBody::Error(e.to_string()),
            TrackerStatus::Found(details) => TrackerBody::Details(
                details
                    .display_lines()
                    .into_iter()
                    .map(|(label, value)| (label.to_string(), value))
                    .collect(),
            ),
        };

        Some(TrackerPopupInfo {
            query: self.tracker.query.clone(),
            body,
        })
    }

    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Search(_) => total_rows.saturating_sub(NORMAL_CHROME_ROWS + SEARCH_BAR_ROWS),
            InputMode::Normal | InputMode::Tracker => total_rows.saturating_sub(NORMAL_CHROME_ROWS),
        }
    }
}

/// Shortens `text` to at most `width` characters, marking the cut with `...`.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut shortened: String = text.chars().take(keep).collect();
    shortened.push_str("...");
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Branch;

    fn state_with(machines: Vec<MachineRecord>) -> AppState {
        let endpoints = ApiEndpoints::new("http://api", "/machines", "/lookup/{code}");
        let mut state = AppState::new(endpoints, BranchFilter::All, Theme::default());
        state.replace_machines(machines, ListStatus::Ready);
        state
    }

    fn sample() -> Vec<MachineRecord> {
        vec![
            MachineRecord::new("A1", "S1").with_branch("Hettipola"),
            MachineRecord::new("A2", "S2").with_branch("Mathara").with_description("Repairing"),
            MachineRecord::new("B7", "S3").with_branch("Mathara"),
        ]
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = state_with(sample());
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn filtering_clamps_selection() {
        let mut state = state_with(sample());
        state.selected_index = 2;
        state.branch = BranchFilter::Only(Branch::Hettipola);
        state.apply_filters();
        assert_eq!(state.filtered_machines.len(), 1);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn blank_lookup_fails_without_request() {
        let mut state = state_with(sample());
        state.open_tracker("  ".to_string());
        assert_eq!(state.begin_lookup(), None);
        assert_eq!(
            state.tracker.status,
            TrackerStatus::Failed(LocateError::EmptyInput)
        );
    }

    #[test]
    fn lookup_request_uses_trimmed_code() {
        let mut state = state_with(sample());
        state.open_tracker(" A1 ".to_string());
        let action = state.begin_lookup();
        assert_eq!(
            action,
            Some(Action::LookupItem {
                request_id: 1,
                code: "A1".to_string(),
                url: "http://api/lookup/A1".to_string(),
            })
        );
        assert_eq!(state.tracker.status, TrackerStatus::Loading { request_id: 1 });
    }

    #[test]
    fn stale_lookup_result_is_discarded() {
        let mut state = state_with(sample());
        state.open_tracker("A1".to_string());
        let _ = state.begin_lookup();
        let _ = state.begin_lookup();
        assert!(!state.finish_lookup(1, Err(LocateError::NotFound)));
        assert_eq!(state.tracker.status, TrackerStatus::Loading { request_id: 2 });
        assert!(state.finish_lookup(2, Err(LocateError::NotFound)));
    }

    #[test]
    fn closing_tracker_ignores_in_flight_lookup() {
        let mut state = state_with(sample());
        state.open_tracker("A1".to_string());
        let _ = state.begin_lookup();
        state.close_tracker();
        assert!(!state.finish_lookup(1, Err(LocateError::NotFound)));
        assert_eq!(state.tracker, TrackerState::default());
    }

    #[test]
    fn viewmodel_marks_repairing_and_placeholders() {
        let state = state_with(sample());
        let vm = state.compute_viewmodel(24, 140);
        assert_eq!(vm.columns.len(), 7);
        assert!(vm.rows[1].is_repairing);
        assert_eq!(vm.rows[0].cells[2], "N/A");
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn narrow_pane_keeps_identifying_columns() {
        let state = state_with(sample());
        let vm = state.compute_viewmodel(24, 20);
        assert_eq!(vm.columns.len(), 2);
        assert_eq!(vm.rows[0].cells.len(), 2);
    }

    #[test]
    fn viewmodel_highlights_search_matches() {
        let mut state = state_with(sample());
        state.search_query = "a".to_string();
        state.apply_filters();
        let vm = state.compute_viewmodel(24, 140);
        assert_eq!(vm.rows[0].highlights[0], vec![(0, 1)]);
        assert!(vm.rows[0].highlights[2].is_empty());
    }

    #[test]
    fn window_follows_selection() {
        let machines = (0..50)
            .map(|i| MachineRecord::new(format!("M{i}"), format!("S{i}")))
            .collect();
        let mut state = state_with(machines);
        state.selected_index = 40;
        let vm = state.compute_viewmodel(17, 140);
        assert_eq!(vm.rows.len(), 10);
        assert!(vm.rows[vm.selected_index].is_selected);
        assert_eq!(vm.rows[vm.selected_index].cells[0], "M40");
    }

    #[test]
    fn empty_state_explains_unavailable_api() {
        let mut state = state_with(vec![]);
        state.replace_machines(vec![], ListStatus::Unavailable("boom".into()));
        let vm = state.compute_viewmodel(24, 80);
        let empty = vm.empty_state.expect("empty state shown");
        assert_eq!(empty.message, "No machines found");
        assert!(empty.subtitle.contains("boom"));
    }

    #[test]
    fn truncate_respects_width() {
        assert_eq!(truncate("abcdefgh", 6), "abc...");
        assert_eq!(truncate("abc", 6), "abc");
    }
}
