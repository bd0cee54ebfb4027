//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij directly. It returns a list of
//! [`Action`]s and the shim in `main.rs` performs them: hiding the pane or
//! issuing web requests whose answers come back as events.
//!
//! # Example
//!
//! ```rust
//! use machine_tracker::app::Action;
//!
//! let actions = vec![Action::FetchMachines {
//!     url: "http://localhost:5000/api/machines".to_string(),
//! }];
//! ```

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Requests the full machine list.
    ///
    /// The answer arrives as [`crate::app::Event::MachinesFetched`].
    FetchMachines {
        /// Absolute URL of the list endpoint.
        url: String,
    },

    /// Requests the last-scanned location of an item.
    ///
    /// The answer arrives as [`crate::app::Event::LookupCompleted`] carrying
    /// the same `request_id` and `code`.
    LookupItem {
        /// Id used to discard answers that have been superseded.
        request_id: u64,
        /// Trimmed item code being looked up.
        code: String,
        /// Absolute URL of the lookup endpoint for this code.
        url: String,
    },
}
