//! Repositories backed by a response that has already arrived.
//!
//! Zellij delivers web responses as events rather than futures. When one
//! arrives the plugin wraps its status and body in a [`CompletedExchange`] and
//! runs the ordinary repository consumers against it; the returned futures are
//! always ready, so they can be resolved with
//! [`futures_util::FutureExt::now_or_never`].

use super::wire::{decode_lookup, decode_machine_list, ensure_success};
use super::{ItemRepository, MachineRepository};
use crate::domain::{LookupResponse, MachineRecord, Result};

/// A finished HTTP exchange: status code plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedExchange {
    status: u16,
    body: Vec<u8>,
}

impl CompletedExchange {
    #[must_use]
    pub const fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    fn body(&self) -> Result<Vec<u8>> {
        ensure_success(self.status, self.body.clone())
    }
}

impl MachineRepository for CompletedExchange {
    async fn list_all(&self) -> Result<Vec<MachineRecord>> {
        decode_machine_list(&self.body()?)
    }
}

impl ItemRepository for CompletedExchange {
    async fn find_last_scanned(&self, code: &str) -> Result<LookupResponse> {
        tracing::debug!(code = %code, status = self.status, "replaying lookup response");
        decode_lookup(&self.body()?)
    }
}
