//! Loading the machine list with graceful degradation.

use crate::domain::MachineRecord;
use crate::repository::MachineRepository;

/// Where the machine list currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListStatus {
    /// The initial fetch has not answered yet.
    #[default]
    Loading,
    /// The list was fetched (it may still be empty).
    Ready,
    /// The fetch failed; the table shows an empty list.
    Unavailable(String),
}

/// Fetches every machine, falling back to an empty list on failure.
///
/// Failures are logged and reported through [`ListStatus::Unavailable`]
/// instead of propagating, so the table stays usable without the API.
pub async fn load_machines<R: MachineRepository>(repository: &R) -> (Vec<MachineRecord>, ListStatus) {
    match repository.list_all().await {
        Ok(records) => {
            tracing::debug!(machine_count = records.len(), "machine list loaded");
            (records, ListStatus::Ready)
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch machines");
            (vec![], ListStatus::Unavailable(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::CompletedExchange;
    use futures_util::FutureExt;

    #[test]
    fn unexpected_shape_degrades_to_empty() {
        let exchange = CompletedExchange::new(200, br#"{"data":[]}"#.to_vec());
        let (records, status) = load_machines(&exchange).now_or_never().expect("ready");
        assert!(records.is_empty());
        assert_eq!(
            status,
            ListStatus::Unavailable("Unexpected API response format".into())
        );
    }

    #[test]
    fn successful_fetch_is_ready() {
        let exchange = CompletedExchange::new(200, br#"[{"item_code":"A1"}]"#.to_vec());
        let (records, status) = load_machines(&exchange).now_or_never().expect("ready");
        assert_eq!(records.len(), 1);
        assert_eq!(status, ListStatus::Ready);
    }
}
