//! Tracker popup renderer.
//!
//! The popup is drawn last, over whatever the table left on screen.

use crate::ui::helpers::{centered_padding, char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{TrackerBody, TrackerPopupInfo};

const POPUP_MAX_WIDTH: usize = 64;
const POPUP_TITLE: &str = " MACHINE TRACKER ";
const LABEL_WIDTH: usize = 21;

/// A run of text printed in one style.
type Segment = (String, String);

/// Renders the popup centered in a `rows` × `cols` pane.
///
/// ```text
/// ┌ MACHINE TRACKER ─────────────┐
/// │ Item code: A1_               │
/// │                              │
/// │ Name:                Drill   │
/// └──────────────────────────────┘
/// ```
pub fn render_tracker_popup(popup: &TrackerPopupInfo, theme: &Theme, rows: usize, cols: usize) {
    let width = cols.saturating_sub(4).min(POPUP_MAX_WIDTH);
    let inner_width = width.saturating_sub(2);
    let body = body_lines(&popup.body, theme);
    let height = body.len() + 4;

    let left = centered_padding(width, cols) + 1;
    let top = centered_padding(height, rows) + 1;
    let border = Theme::fg(&theme.colors.popup_border);

    let title: String = POPUP_TITLE.chars().take(inner_width).collect();
    position_cursor(top, left);
    print!("{border}┌{}{title}{}{border}", Theme::bold(), Theme::reset());
    print!("{}┐{}", "─".repeat(inner_width.saturating_sub(char_len(&title))), Theme::reset());

    let normal = Theme::fg(&theme.colors.text_normal);
    let input = vec![(normal, format!(" Item code: {}_", popup.query))];
    render_line(top + 1, left, &input, &border, inner_width);
    render_line(top + 2, left, &[], &border, inner_width);

    for (offset, segments) in body.iter().enumerate() {
        render_line(top + 3 + offset, left, segments, &border, inner_width);
    }

    position_cursor(top + 3 + body.len(), left);
    print!("{border}└{}┘{}", "─".repeat(inner_width), Theme::reset());
}

fn body_lines(body: &TrackerBody, theme: &Theme) -> Vec<Vec<Segment>> {
    let single = |color: &str, text: &str| vec![vec![(Theme::fg(color), format!(" {text}"))]];

    match body {
        TrackerBody::Prompt => single(&theme.colors.text_dim, "Type an item code and press Enter"),
        TrackerBody::Loading => single(&theme.colors.text_dim, "Loading..."),
        TrackerBody::Error(message) => single(&theme.colors.error_fg, message.as_str()),
        TrackerBody::Details(fields) => fields
            .iter()
            .map(|(label, value)| {
                vec![
                    (
                        Theme::fg(&theme.colors.popup_label_fg),
                        format!(" {:<LABEL_WIDTH$}", format!("{label}:")),
                    ),
                    (Theme::fg(&theme.colors.text_normal), value.clone()),
                ]
            })
            .collect(),
    }
}

/// Prints one framed line, cutting or padding the segments to `width` characters.
fn render_line(row: usize, left: usize, segments: &[Segment], border: &str, width: usize) {
    position_cursor(row, left);
    print!("{border}│{}", Theme::reset());

    let mut used = 0;
    for (style, text) in segments {
        let shown: String = text.chars().take(width - used.min(width)).collect();
        used += char_len(&shown);
        print!("{style}{shown}");
    }

    print!("{}", Theme::reset());
    print!("{}", " ".repeat(width.saturating_sub(used)));
    print!("{border}│{}", Theme::reset());
}
