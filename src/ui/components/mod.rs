//! Composable UI component renderers.
//!
//! - [`header`]: Report title and branch bar
//! - [`footer`]: Keybinding hints
//! - [`search`]: Search input box
//! - [`table`]: Machine table
//! - [`empty`]: Message shown instead of an empty table
//! - [`tracker`]: Item lookup popup
//!
//! [`render_layout`] stacks them top to bottom:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Branch bar]
//! [Border]
//! [Search bar, search mode only]
//! [Column titles]
//! [Rows or empty message]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod search;
mod table;
mod tracker;

pub use tracker::render_tracker_popup;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use header::{render_branch_bar, render_header};
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line. Returns the next free row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders everything except the tracker popup.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_branch_bar(current_row, &vm.branch_bar, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    current_row = render_table_headers(current_row, &vm.columns, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        render_table_rows(current_row, &vm.rows, &vm.columns, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
