//! Header and branch bar renderers.

use crate::ui::helpers::{centered_padding, char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BranchBarInfo, HeaderInfo};

/// Renders the centered, bold report title. Returns the next free row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = char_len(&header.title);
    let padding = centered_padding(title_len, cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders the branch selector with the active branch inverted.
///
/// ```text
///  All  Hettipola  Bakamuna1 ...
/// ```
pub fn render_branch_bar(row: usize, bar: &BranchBarInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let mut used = 0;

    for (idx, label) in bar.labels.iter().enumerate() {
        let cell = format!(" {label} ");
        let cell_len = char_len(&cell);
        if used + cell_len > cols {
            break;
        }

        if idx == bar.active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.branch_active_fg));
            print!("{}", Theme::bg(&theme.colors.branch_active_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{cell}");
        print!("{}", Theme::reset());
        used += cell_len;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
