//! Input mode state types.
//!
//! The plugin is always in one of three input modes:
//! - **Normal**: table navigation, branch cycling, commands
//! - **Search**: editing or navigating the text filter
//! - **Tracker**: the item lookup popup owns the keyboard
//!
//! # Example
//!
//! ```rust
//! use machine_tracker::app::modes::{InputMode, SearchFocus};
//!
//! let mode = InputMode::Search(SearchFocus::Typing);
//! assert!(mode.is_search());
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Characters go into the search query.
    Typing,

    /// j/k move through the filtered rows; `/` returns to typing.
    Navigating,
}

/// Current input handling mode.
///
/// Determines the footer text and how keys are mapped to events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// j/k navigate, h/l cycle branches, `/` search, `t` track, `q` quit.
    #[default]
    Normal,

    /// Text filter active, with the given focus.
    Search(SearchFocus),

    /// Tracker popup open; characters go into the item code field.
    Tracker,
}

impl InputMode {
    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search(_))
    }

    /// Whether typed characters should be treated as text rather than commands.
    #[must_use]
    pub const fn captures_text(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing) | Self::Tracker)
    }
}
