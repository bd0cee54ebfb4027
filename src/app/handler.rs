//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where state changes. It receives user
//! input already mapped to [`Event`]s plus the answers to earlier web
//! requests, and returns whether a re-render is needed together with the
//! [`Action`]s the plugin runtime must perform.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `NextBranch`, `PrevBranch`
//! - **Input**: `Char`, `Backspace`, `Escape`
//! - **Mode switching**: `SearchMode`, `FocusResults`, `FocusSearchBar`,
//!   `ExitSearch`, `OpenTracker`, `TrackSelected`, `CloseTracker`
//! - **Network**: `Refresh`, `SubmitLookup`, `MachinesFetched`, `LookupCompleted`
//! - **System**: `PermissionsGranted`, `PermissionsDenied`
//!
//! # Example
//!
//! ```rust
//! use machine_tracker::app::{handle_event, AppState, Event};
//! use machine_tracker::domain::BranchFilter;
//! use machine_tracker::repository::ApiEndpoints;
//! use machine_tracker::ui::Theme;
//!
//! let endpoints = ApiEndpoints::new("http://localhost:5000", "/api/machines", "/api/lookup/{code}");
//! let mut state = AppState::new(endpoints, BranchFilter::All, Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::NextBranch)?;
//! assert!(should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), machine_tracker::TrackerError>(())
//! ```

use futures_util::FutureExt;

use super::modes::{InputMode, SearchFocus};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::LocateError;
use crate::inventory::{load_machines, ItemLocator, ListStatus};
use crate::repository::CompletedExchange;

/// Events triggered by user input or by answers to web requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection down (wraps to top).
    KeyDown,
    /// Moves the selection up (wraps to bottom).
    KeyUp,
    /// Selects the next branch filter.
    NextBranch,
    /// Selects the previous branch filter.
    PrevBranch,
    /// Hides the plugin pane.
    CloseFocus,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Moves focus from the search box to the results.
    FocusResults,
    /// Moves focus from the results back to the search box.
    FocusSearchBar,
    /// Leaves search mode and clears the text filter.
    ExitSearch,

    /// Types a character into whichever field has focus.
    Char(char),
    /// Deletes the last character of whichever field has focus.
    Backspace,
    /// Backs out of the current mode.
    Escape,

    /// Opens the tracker popup with an empty item code.
    OpenTracker,
    /// Opens the tracker popup for the selected machine and submits at once.
    TrackSelected,
    /// Submits the item code typed in the tracker popup.
    SubmitLookup,
    /// Closes the tracker popup.
    CloseTracker,

    /// Fetches the machine list again.
    Refresh,

    /// Answer to [`Action::FetchMachines`].
    MachinesFetched {
        status: u16,
        body: Vec<u8>,
    },

    /// Answer to [`Action::LookupItem`].
    LookupCompleted {
        request_id: u64,
        code: String,
        status: u16,
        body: Vec<u8>,
    },

    /// Web access was granted; the initial fetch may start.
    PermissionsGranted,

    /// Web access was refused; the list can never load.
    PermissionsDenied,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned flag is `true` when the UI should re-render.
///
/// # Errors
///
/// Returns an error only when an already-received answer cannot be replayed,
/// which would mean the exchange future was not ready.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::NextBranch | Event::PrevBranch => {
            state.branch = if *event == Event::NextBranch {
                state.branch.next()
            } else {
                state.branch.prev()
            };
            tracing::debug!(branch = %state.branch, "branch filter changed");
            state.apply_filters();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.search_query.is_empty() {
                state.input_mode = InputMode::Normal;
                return Ok((true, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.search_query, "exiting search mode");
            state.input_mode = InputMode::Normal;
            state.search_query.clear();
            state.apply_filters();
            Ok((true, vec![]))
        }
        Event::Char(c) => match state.input_mode {
            InputMode::Search(_) => {
                state.search_query.push(*c);
                tracing::trace!(query = %state.search_query, "search query updated");
                state.apply_filters();
                Ok((true, vec![]))
            }
            InputMode::Tracker => {
                state.tracker.query.push(*c);
                Ok((true, vec![]))
            }
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Search(_) => {
                state.search_query.pop();
                state.apply_filters();
                Ok((true, vec![]))
            }
            InputMode::Tracker => {
                state.tracker.query.pop();
                Ok((true, vec![]))
            }
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::Escape => match state.input_mode {
            InputMode::Tracker => handle_event(state, &Event::CloseTracker),
            InputMode::Search(_) => handle_event(state, &Event::ExitSearch),
            InputMode::Normal => Ok((false, vec![Action::CloseFocus])),
        },
        Event::OpenTracker => {
            state.open_tracker(String::new());
            Ok((true, vec![]))
        }
        Event::TrackSelected => {
            let Some(code) = state
                .selected_machine()
                .and_then(|m| m.item_code.clone())
            else {
                tracing::debug!("no machine with an item code selected");
                return Ok((false, vec![]));
            };
            tracing::debug!(item_code = %code, "tracking selected machine");
            state.open_tracker(code);
            Ok((true, state.begin_lookup().into_iter().collect()))
        }
        Event::SubmitLookup => {
            if state.input_mode != InputMode::Tracker {
                return Ok((false, vec![]));
            }
            Ok((true, state.begin_lookup().into_iter().collect()))
        }
        Event::CloseTracker => {
            state.close_tracker();
            Ok((true, vec![]))
        }
        Event::Refresh | Event::PermissionsGranted => {
            tracing::debug!("requesting machine list");
            state.list_status = ListStatus::Loading;
            Ok((
                true,
                vec![Action::FetchMachines {
                    url: state.endpoints.machines_url(),
                }],
            ))
        }
        Event::PermissionsDenied => {
            tracing::warn!("web access denied, machine list unavailable");
            state.replace_machines(
                vec![],
                ListStatus::Unavailable("web access permission denied".to_string()),
            );
            Ok((true, vec![]))
        }
        Event::MachinesFetched { status, body } => {
            let exchange = CompletedExchange::new(*status, body.clone());
            let (machines, list_status) = load_machines(&exchange)
                .now_or_never()
                .ok_or_else(|| replay_error("machine list"))?;
            state.replace_machines(machines, list_status);
            Ok((true, vec![]))
        }
        Event::LookupCompleted {
            request_id,
            code,
            status,
            body,
        } => {
            if !state.lookups.is_current(*request_id) {
                tracing::debug!(request_id, item_code = %code, "ignoring superseded lookup");
                return Ok((false, vec![]));
            }
            let locator = ItemLocator::new(CompletedExchange::new(*status, body.clone()));
            let outcome: std::result::Result<_, LocateError> = locator
                .locate(code)
                .now_or_never()
                .ok_or_else(|| replay_error("lookup"))?;
            Ok((state.finish_lookup(*request_id, outcome), vec![]))
        }
    }
}

const fn replay_error(what: &'static str) -> crate::domain::TrackerError {
    crate::domain::TrackerError::ReplayNotReady { what }
}

impl Event {
    /// Short name used in tracing spans; bodies are never logged.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::KeyDown => "key_down",
            Self::KeyUp => "key_up",
            Self::NextBranch => "next_branch",
            Self::PrevBranch => "prev_branch",
            Self::CloseFocus => "close_focus",
            Self::SearchMode => "search_mode",
            Self::FocusResults => "focus_results",
            Self::FocusSearchBar => "focus_search_bar",
            Self::ExitSearch => "exit_search",
            Self::Char(_) => "char",
            Self::Backspace => "backspace",
            Self::Escape => "escape",
            Self::OpenTracker => "open_tracker",
            Self::TrackSelected => "track_selected",
            Self::SubmitLookup => "submit_lookup",
            Self::CloseTracker => "close_tracker",
            Self::Refresh => "refresh",
            Self::MachinesFetched { .. } => "machines_fetched",
            Self::LookupCompleted { .. } => "lookup_completed",
            Self::PermissionsGranted => "permissions_granted",
            Self::PermissionsDenied => "permissions_denied",
        }
    }
}
