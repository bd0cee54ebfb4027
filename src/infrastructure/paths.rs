//! Paths inside the Zellij plugin sandbox.

use std::path::PathBuf;

/// Directory for the plugin's trace files.
///
/// `/host` is usually the user's home, making this
/// `~/.local/share/zellij/machine-tracker` on the host.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("machine-tracker")
}

/// Rewrites a `~`-prefixed path to its sandbox location under `/host`.
///
/// Used for the `theme_file` option. Other paths are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path == "~" {
        "/host".to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("/host/{rest}")
    } else {
        path.to_string()
    }
}
