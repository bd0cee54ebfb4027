//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the inventory and
//! repository layers.
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Web Requests
//!                           ↑                                           ↓
//!                           └────────────── Web Responses ──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode state machine types
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, SearchFocus};
pub use state::{AppState, TrackerState, TrackerStatus};
