//! Search bar component renderer.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Spaces left and right of the search box.
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the three-line bordered search box. Returns the next free row.
///
/// ```text
///      ┌──────────────────────────────┐
///      │ Search item code / serial: a1│
///      └──────────────────────────────┘
/// ```
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset());

    let search_text: String = format!(" Search item code / serial: {}", search.query)
        .chars()
        .take(inner_width)
        .collect();
    let padding = inner_width.saturating_sub(char_len(&search_text));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{border}│{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}└{}┘{}", "─".repeat(inner_width), Theme::reset());

    row + 3
}
