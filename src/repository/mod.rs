//! Repository seam between the tracker core and the inventory API.
//!
//! The core only depends on the two traits below. Transport lives elsewhere:
//! inside the plugin, requests go out through Zellij's `web_request` and the
//! responses come back as events, which [`CompletedExchange`] replays into the
//! same trait so lookups always run through [`crate::inventory::ItemLocator`].
//!
//! # Modules
//!
//! - [`wire`]: Decoding of response bodies, including list shape normalization
//! - [`http`]: Endpoint configuration and URL building
//! - [`exchange`]: Repositories backed by an already received response

pub mod exchange;
pub mod http;
pub mod wire;

pub use exchange::CompletedExchange;
pub use http::ApiEndpoints;

use crate::domain::{LookupResponse, MachineRecord, Result};
use std::future::Future;

/// Source of the full machine list.
pub trait MachineRepository {
    /// Fetches every machine record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has an
    /// unexpected shape.
    fn list_all(&self) -> impl Future<Output = Result<Vec<MachineRecord>>>;
}

/// Source of last-scanned item locations.
pub trait ItemRepository {
    /// Asks for the most recent scan of `code`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the request itself fails. A reachable API
    /// that knows nothing about the code answers `Ok` with `success: false`.
    fn find_last_scanned(&self, code: &str) -> impl Future<Output = Result<LookupResponse>>;
}
