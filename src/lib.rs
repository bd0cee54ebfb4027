//! Machine Tracker: a Zellij plugin for browsing a machine inventory.
//!
//! The plugin fetches the machine list from an inventory HTTP API and shows it
//! as a table that can be narrowed by branch and by a text query over item
//! codes and serial numbers. A tracker popup looks up where an item was last
//! scanned.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, web requests
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← events → state → actions
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Inventory     │   │ Repository    │
//! │ (ui/)         │   │ (inventory/)  │   │ (repository/) │
//! │ - Rendering   │   │ - Filtering   │   │ - Endpoints   │
//! │ - Theming     │   │ - Locating    │   │ - Decoding    │
//! │ - Components  │   │ - Sequencing  │   │ - Exchanges   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and Infrastructure (infrastructure/) │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/machine-tracker.wasm" {
//!         api_url "http://inventory.local:5000"
//!         branch "Mathara"
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use machine_tracker::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert_eq!(
//!     actions,
//!     vec![Action::FetchMachines { url: "http://localhost:5000/api/machines".into() }]
//! );
//! # Ok::<(), machine_tracker::TrackerError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod inventory;
pub mod repository;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{BranchFilter, LocateError, MachineRecord, Result, TrackerError};
pub use ui::Theme;

use repository::ApiEndpoints;
use std::collections::BTreeMap;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_MACHINES_ENDPOINT: &str = "/api/machines";
const DEFAULT_LOOKUP_ENDPOINT: &str = "/api/itemcount/last-scanned/{code}";
const DEFAULT_TRACE_LEVEL: &str = "info";

/// Plugin configuration parsed from Zellij's KDL plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the inventory API.
    pub api_url: String,

    /// Path of the machine list endpoint.
    pub machines_endpoint: String,

    /// Path of the lookup endpoint; `{code}` is replaced by the item code.
    pub lookup_endpoint: String,

    /// Branch filter active when the plugin opens.
    pub branch: BranchFilter,

    /// Built-in theme name. Ignored when `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme; `~` maps to the sandbox home.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for the trace file.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            machines_endpoint: DEFAULT_MACHINES_ENDPOINT.to_string(),
            lookup_endpoint: DEFAULT_LOOKUP_ENDPOINT.to_string(),
            branch: BranchFilter::All,
            theme_name: None,
            theme_file: None,
            trace_level: DEFAULT_TRACE_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Parses the configuration map Zellij hands to `load`.
    ///
    /// Missing or blank values keep their defaults. An unknown `branch` falls
    /// back to `All`.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use machine_tracker::{BranchFilter, Config};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "http://10.0.0.5:8080".to_string());
    /// map.insert("branch".to_string(), "nowhere".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_url, "http://10.0.0.5:8080");
    /// assert_eq!(config.branch, BranchFilter::All);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();

        let branch = value("branch").map_or(BranchFilter::All, |name| {
            name.parse().unwrap_or_else(|e| {
                tracing::debug!(branch = %name, error = %e, "unknown branch, showing all");
                BranchFilter::All
            })
        });

        Self {
            api_url: value("api_url").unwrap_or(defaults.api_url),
            machines_endpoint: value("machines_endpoint").unwrap_or(defaults.machines_endpoint),
            lookup_endpoint: value("lookup_endpoint").unwrap_or(defaults.lookup_endpoint),
            branch,
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level").unwrap_or(defaults.trace_level),
        }
    }

    /// Endpoints built from the API settings.
    #[must_use]
    pub fn endpoints(&self) -> ApiEndpoints {
        ApiEndpoints::new(&*self.api_url, &*self.machines_endpoint, &*self.lookup_endpoint)
    }

    /// Resolves the theme: file first, then name, then the default.
    ///
    /// Load failures are logged and fall back to the default theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial state: empty list still loading, configured branch and theme.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, branch = %config.branch, "initializing machine tracker");
    AppState::new(config.endpoints(), config.branch, config.theme())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Branch;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_every_key() {
        let config = Config::from_zellij(&map(&[
            ("api_url", "http://inv:9000/"),
            ("machines_endpoint", "/m"),
            ("lookup_endpoint", "/l/{code}"),
            ("branch", "sample room"),
            ("theme", "catppuccin-latte"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.branch, BranchFilter::Only(Branch::SampleRoom));
        assert_eq!(config.trace_level, "debug");
        assert_eq!(config.endpoints().machines_url(), "http://inv:9000/m");
        assert_eq!(config.endpoints().lookup_url("X"), "http://inv:9000/l/X");
        assert_eq!(config.theme().name, "catppuccin-latte");
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config = Config::from_zellij(&map(&[("api_url", "  "), ("trace_level", "")]));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.trace_level, DEFAULT_TRACE_LEVEL);
    }

    #[test]
    fn bad_theme_settings_fall_back() {
        let config = Config {
            theme_name: Some("neon".into()),
            ..Config::default()
        };
        assert_eq!(config.theme(), Theme::default());

        let config = Config {
            theme_file: Some("/no/such/theme.toml".into()),
            ..Config::default()
        };
        assert_eq!(config.theme(), Theme::default());
    }

    #[test]
    fn theme_file_wins_over_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let latte = Theme::from_name("catppuccin-latte").unwrap();
        file.write_all(toml::to_string(&latte).unwrap().as_bytes())
            .unwrap();

        let config = Config {
            theme_name: Some("catppuccin-mocha".into()),
            theme_file: Some(file.path().display().to_string()),
            ..Config::default()
        };
        assert_eq!(config.theme(), latte);
    }

    #[test]
    fn initialize_applies_branch() {
        let config = Config {
            branch: BranchFilter::Only(Branch::Welioya),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.branch, BranchFilter::Only(Branch::Welioya));
        assert!(state.machines.is_empty());
    }
}
