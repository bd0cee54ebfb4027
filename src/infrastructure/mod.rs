//! Zellij sandbox filesystem conventions.
//!
//! Inside the plugin sandbox the host directory Zellij was started from is
//! mounted at `/host`.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
