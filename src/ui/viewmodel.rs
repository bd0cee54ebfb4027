//! View model types representing renderable UI state.
//!
//! View models are created by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold only display-ready data: truncated cells, match
//! ranges and labels.

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Rows in the visible window of the table.
    pub rows: Vec<DisplayRow>,

    /// Index of the selected row within `rows`.
    pub selected_index: usize,

    /// Columns that fit the pane width, in display order.
    pub columns: Vec<ColumnInfo>,

    pub header: HeaderInfo,
    pub branch_bar: BranchBarInfo,
    pub footer: FooterInfo,

    /// Present when no machine passes the filters.
    pub empty_state: Option<EmptyState>,

    /// Present in search mode.
    pub search_bar: Option<SearchBarInfo>,

    /// Present while the tracker popup is open.
    pub tracker: Option<TrackerPopupInfo>,
}

/// A table column title and its width in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub title: String,
    pub width: usize,
}

/// One machine row of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Cell text already truncated to its column, one per visible column.
    pub cells: Vec<String>,

    /// Per cell, character ranges `(start, end)` matching the search query.
    pub highlights: Vec<Vec<(usize, usize)>>,

    pub is_selected: bool,

    /// Drawn with the repairing colors.
    pub is_repairing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Branch selector shown under the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchBarInfo {
    /// "All" followed by every branch.
    pub labels: Vec<String>,
    /// Index of the active label.
    pub active: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Shown in place of the table when no row is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    /// Why the list is empty.
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
}

/// Tracker popup contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerPopupInfo {
    /// Item code being typed.
    pub query: String,
    pub body: TrackerBody,
}

/// What the tracker popup shows under the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerBody {
    /// Nothing submitted yet.
    Prompt,
    Loading,
    /// User-facing error message.
    Error(String),
    /// Labelled detail lines of a found item.
    Details(Vec<(String, String)>),
}
