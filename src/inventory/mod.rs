//! Inventory logic: filtering the machine list and locating items.
//!
//! - [`filter`]: Branch and text filtering of machine records
//! - [`locator`]: Last-scanned item lookup with error normalization
//! - [`loader`]: Machine list loading that degrades to an empty list
//! - [`sequence`]: Request ids that let stale lookup answers be dropped

pub mod filter;
pub mod loader;
pub mod locator;
pub mod sequence;

pub use filter::{filter, fold_case, match_ranges, matches_query};
pub use loader::{load_machines, ListStatus};
pub use locator::{interpret_response, validate_code, ItemLocator};
pub use sequence::LookupSequence;
