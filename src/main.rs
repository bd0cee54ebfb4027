//! Zellij plugin wrapper and entry point.
//!
//! Translates Zellij events into library [`Event`]s, runs them through
//! [`handle_event`], and performs the returned [`Action`]s. Web requests are
//! tagged with a context map so their answers can be routed back:
//!
//! - `kind = machines` → `Event::MachinesFetched`
//! - `kind = lookup`, `request_id`, `code` → `Event::LookupCompleted`
//!
//! # Keybindings
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up`: Move selection (also `Ctrl+n`/`Ctrl+p`)
//! - `h`/`Left`, `l`/`Right`, `Tab`/`Shift+Tab`: Cycle branch
//! - `/`: Search
//! - `t`: Open tracker
//! - `Enter`: Track selected machine
//! - `r`: Refresh
//! - `q`/`Esc`: Close
//!
//! Search mode:
//! - Typing: characters edit the query, `Enter` browses results, `Esc` exits
//! - Browsing: `j`/`k` move, `/` edits the query, `Enter` tracks, `Esc` exits
//!
//! Tracker popup:
//! - Characters edit the item code, `Enter` looks it up, `Esc` closes

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use machine_tracker::{handle_event, Action, Config, Event, InputMode, SearchFocus};

register_plugin!(State);

const CONTEXT_KIND: &str = "kind";
const KIND_MACHINES: &str = "machines";
const KIND_LOOKUP: &str = "lookup";
const CONTEXT_REQUEST_ID: &str = "request_id";
const CONTEXT_CODE: &str = "code";

struct State {
    app: machine_tracker::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: machine_tracker::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        machine_tracker::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(api_url = %config.api_url, "parsed configuration");

        self.app = machine_tracker::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _guard = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_response(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                Event::PermissionsGranted
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                Event::PermissionsDenied
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled"
                );
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        machine_tracker::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);
        let shift = key.has_modifiers(&[KeyModifier::Shift]);

        match self.app.input_mode {
            InputMode::Tracker => Some(match key.bare_key {
                BareKey::Esc => Event::CloseTracker,
                BareKey::Enter => Event::SubmitLookup,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !ctrl => Event::Char(c),
                _ => return None,
            }),
            _ if ctrl => match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            },
            InputMode::Search(SearchFocus::Typing) => Some(match key.bare_key {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter => Event::FocusResults,
                BareKey::Backspace => Event::Backspace,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Tab if shift => Event::PrevBranch,
                BareKey::Tab => Event::NextBranch,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Search(SearchFocus::Navigating) => Some(match key.bare_key {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter => Event::TrackSelected,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char('/') => Event::FocusSearchBar,
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Left | BareKey::Char('h') => Event::PrevBranch,
                BareKey::Right | BareKey::Char('l') => Event::NextBranch,
                BareKey::Tab if shift => Event::PrevBranch,
                BareKey::Tab => Event::NextBranch,
                _ => return None,
            }),
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Esc => Event::Escape,
                BareKey::Char('q') => Event::CloseFocus,
                BareKey::Enter => Event::TrackSelected,
                BareKey::Char('/') => Event::SearchMode,
                BareKey::Char('t') => Event::OpenTracker,
                BareKey::Char('r') => Event::Refresh,
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Left | BareKey::Char('h') => Event::PrevBranch,
                BareKey::Right | BareKey::Char('l') => Event::NextBranch,
                BareKey::Tab if shift => Event::PrevBranch,
                BareKey::Tab => Event::NextBranch,
                _ => return None,
            }),
        }
    }

    /// Routes a web response by the context it was requested with.
    fn map_web_response(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        tracing::debug!(status, body_len = body.len(), "web response received");

        match context.get(CONTEXT_KIND).map(String::as_str) {
            Some(KIND_MACHINES) => Some(Event::MachinesFetched { status, body }),
            Some(KIND_LOOKUP) => {
                let request_id = context.get(CONTEXT_REQUEST_ID)?.parse().ok()?;
                let code = context.get(CONTEXT_CODE)?.clone();
                Some(Event::LookupCompleted {
                    request_id,
                    code,
                    status,
                    body,
                })
            }
            other => {
                tracing::debug!(kind = ?other, "ignoring web response with unknown context");
                None
            }
        }
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::FetchMachines { url } => {
                let context = BTreeMap::from([(CONTEXT_KIND.to_string(), KIND_MACHINES.to_string())]);
                web_request(url, HttpVerb::Get, json_headers(), vec![], context);
            }
            Action::LookupItem {
                request_id,
                code,
                url,
            } => {
                let context = BTreeMap::from([
                    (CONTEXT_KIND.to_string(), KIND_LOOKUP.to_string()),
                    (CONTEXT_REQUEST_ID.to_string(), request_id.to_string()),
                    (CONTEXT_CODE.to_string(), code.clone()),
                ]);
                web_request(url, HttpVerb::Get, json_headers(), vec![], context);
            }
        }
    }
}

fn json_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("Accept".to_string(), "application/json".to_string())])
}
