//! Domain layer for the machine tracker.
//!
//! Plain data types with no Zellij or transport dependencies.
//!
//! - [`error`]: Error types and result aliases
//! - [`branch`]: Branch sites and the branch selector
//! - [`machine`]: Machine records shown in the table
//! - [`location`]: Last-scanned location returned by item lookups

pub mod branch;
pub mod error;
mod lenient;
pub mod location;
pub mod machine;

pub use branch::{Branch, BranchFilter};
pub use error::{LocateError, Result, TrackerError};
pub use location::{Category, ItemLocationDetails, LookupResponse, ScannedItem};
pub use machine::{display_or_placeholder, MachineRecord, MISSING_FIELD};
