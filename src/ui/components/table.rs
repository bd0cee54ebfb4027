//! Machine table renderer.
//!
//! Every column has a fixed width taken from the view model. Repairing rows
//! are drawn in the repairing colors; the selection colors win over them.

use crate::app::state::COLUMN_GAP;
use crate::ui::helpers::{self, char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnInfo, DisplayRow};

/// Renders the bold column titles. Returns the next free row.
pub fn render_table_headers(row: usize, columns: &[ColumnInfo], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));

    let mut used = 0;
    for column in columns {
        print!("{:<width$}", column.title, width = column.width);
        print!("{}", " ".repeat(COLUMN_GAP));
        used += column.width + COLUMN_GAP;
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders `rows` one per line. Returns the next free row.
pub fn render_table_rows(
    row: usize,
    rows: &[DisplayRow],
    columns: &[ColumnInfo],
    theme: &Theme,
    cols: usize,
) -> usize {
    rows.iter().fold(row, |current_row, display_row| {
        render_table_row(current_row, display_row, columns, theme, cols)
    })
}

fn row_style(display_row: &DisplayRow, theme: &Theme) -> String {
    if display_row.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else if display_row.is_repairing {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.repairing_fg),
            Theme::bg(&theme.colors.repairing_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    }
}

fn render_table_row(
    row: usize,
    display_row: &DisplayRow,
    columns: &[ColumnInfo],
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(row, 1);
    let style = row_style(display_row, theme);
    print!("{style}");

    let mut used = 0;
    for (idx, (cell, column)) in display_row.cells.iter().zip(columns).enumerate() {
        let ranges = display_row.highlights.get(idx).map_or(&[][..], Vec::as_slice);
        helpers::render_highlighted_text(cell, ranges, theme, &style);

        print!("{}", " ".repeat(column.width.saturating_sub(char_len(cell)) + COLUMN_GAP));
        used += column.width + COLUMN_GAP;
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    print!("{}", Theme::reset());
    row + 1
}
