//! Item lookup: where was this item scanned last?
//!
//! [`ItemLocator`] validates the code, makes exactly one repository call, and
//! folds every possible answer into either [`ItemLocationDetails`] or a
//! [`LocateError`]. It does not cache, retry, or cancel.

use crate::domain::{ItemLocationDetails, LocateError, LookupResponse};
use crate::repository::ItemRepository;
use tracing::Instrument;

/// Looks up last-scanned item locations through an [`ItemRepository`].
#[derive(Debug, Clone)]
pub struct ItemLocator<R> {
    repository: R,
}

impl<R: ItemRepository> ItemLocator<R> {
    #[must_use]
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Looks up the last scan of `code`.
    ///
    /// # Errors
    ///
    /// - [`LocateError::EmptyInput`] if `code` is blank; the repository is not called
    /// - [`LocateError::NotFound`] if the API has no usable record for the code
    /// - [`LocateError::LookupFailed`] if the repository call itself fails
    pub async fn locate(&self, code: &str) -> Result<ItemLocationDetails, LocateError> {
        let code = validate_code(code)?;
        let span = tracing::debug_span!("locate", code = %code);

        let response = self
            .repository
            .find_last_scanned(code)
            .instrument(span)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "item lookup request failed");
                LocateError::from(e)
            })?;

        interpret_response(response)
    }
}

/// Trims `code` and rejects it if nothing is left.
///
/// # Errors
///
/// Returns [`LocateError::EmptyInput`] for blank input.
pub fn validate_code(code: &str) -> Result<&str, LocateError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        Err(LocateError::EmptyInput)
    } else {
        Ok(trimmed)
    }
}

/// Turns a lookup response into details, or `NotFound` for any other shape.
///
/// # Errors
///
/// Returns [`LocateError::NotFound`] when `success` is not `true`, the payload
/// is missing or not an object, or the payload does not decode.
pub fn interpret_response(response: LookupResponse) -> Result<ItemLocationDetails, LocateError> {
    if !response.success {
        tracing::debug!("lookup reported no success");
        return Err(LocateError::NotFound);
    }

    match response.latest_item_count {
        Some(payload) if !payload.is_object() => {
            tracing::debug!("lookup succeeded without an object payload");
            Err(LocateError::NotFound)
        }
        None => {
            tracing::debug!("lookup succeeded without a payload");
            Err(LocateError::NotFound)
        }
        Some(payload) => serde_json::from_value(payload).map_err(|e| {
            tracing::debug!(error = %e, "lookup payload is malformed");
            LocateError::NotFound
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Result, ScannedItem, TrackerError};
    use crate::repository::CompletedExchange;
    use futures_util::FutureExt;
    use std::cell::{Cell, RefCell};

    enum Reply {
        Respond(LookupResponse),
        Fail,
    }

    struct FakeItems {
        reply: Reply,
        calls: Cell<usize>,
        last_code: RefCell<Option<String>>,
    }

    impl FakeItems {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: Cell::new(0),
                last_code: RefCell::new(None),
            }
        }
    }

    impl ItemRepository for &FakeItems {
        async fn find_last_scanned(&self, code: &str) -> Result<LookupResponse> {
            self.calls.set(self.calls.get() + 1);
            *self.last_code.borrow_mut() = Some(code.to_string());
            match &self.reply {
                Reply::Respond(response) => Ok(response.clone()),
                Reply::Fail => Err(TrackerError::Http { status: 500 }),
            }
        }
    }

    fn details() -> ItemLocationDetails {
        ItemLocationDetails {
            item: ScannedItem {
                name: Some("Lockstitch".into()),
                serial_no: Some("SN-77".into()),
            },
            category: Category {
                cat_name: Some("Sewing".into()),
            },
            scanned_date: Some("2024-03-01T10:20:30Z".into()),
            current_branch: Some("Mathara".into()),
            owner_branch: Some("Hettipola".into()),
        }
    }

    fn run(repo: &FakeItems, code: &str) -> std::result::Result<ItemLocationDetails, LocateError> {
        ItemLocator::new(repo)
            .locate(code)
            .now_or_never()
            .expect("fake repository resolves immediately")
    }

    #[test]
    fn empty_input_never_calls_repository() {
        let repo = FakeItems::new(Reply::Respond(LookupResponse::found(&details())));
        assert_eq!(run(&repo, ""), Err(LocateError::EmptyInput));
        assert_eq!(run(&repo, "   \t"), Err(LocateError::EmptyInput));
        assert_eq!(repo.calls.get(), 0);
    }

    #[test]
    fn success_returns_payload_unchanged() {
        let repo = FakeItems::new(Reply::Respond(LookupResponse::found(&details())));
        assert_eq!(run(&repo, "XYZ"), Ok(details()));
        assert_eq!(repo.calls.get(), 1);
    }

    #[test]
    fn code_is_trimmed_before_the_call() {
        let repo = FakeItems::new(Reply::Respond(LookupResponse::found(&details())));
        let _ = run(&repo, "  XYZ ");
        assert_eq!(repo.last_code.borrow().as_deref(), Some("XYZ"));
    }

    #[test]
    fn explicit_failure_is_not_found() {
        let repo = FakeItems::new(Reply::Respond(LookupResponse::missing()));
        assert_eq!(run(&repo, "XYZ"), Err(LocateError::NotFound));
    }

    #[test]
    fn success_without_payload_is_not_found() {
        let repo = FakeItems::new(Reply::Respond(LookupResponse {
            success: true,
            latest_item_count: Some(serde_json::Value::Null),
        }));
        assert_eq!(run(&repo, "XYZ"), Err(LocateError::NotFound));

        let repo = FakeItems::new(Reply::Respond(LookupResponse {
            success: true,
            latest_item_count: None,
        }));
        assert_eq!(run(&repo, "XYZ"), Err(LocateError::NotFound));
    }

    #[test]
    fn malformed_payload_is_not_found() {
        let repo = FakeItems::new(Reply::Respond(LookupResponse {
            success: true,
            latest_item_count: Some(serde_json::json!({"Item": "not an object"})),
        }));
        assert_eq!(run(&repo, "XYZ"), Err(LocateError::NotFound));
    }

    #[test]
    fn transport_failure_is_lookup_failed() {
        let repo = FakeItems::new(Reply::Fail);
        assert!(matches!(run(&repo, "XYZ"), Err(LocateError::LookupFailed(_))));
        assert_eq!(repo.calls.get(), 1);
    }

    fn replay(status: u16, body: &str) -> std::result::Result<ItemLocationDetails, LocateError> {
        ItemLocator::new(CompletedExchange::new(status, body.as_bytes().to_vec()))
            .locate("XYZ")
            .now_or_never()
            .expect("replayed exchange resolves immediately")
    }

    #[test]
    fn odd_json_answers_are_not_found() {
        for body in [
            "null",
            "[]",
            r#"{"success":null}"#,
            r#"{"success":"true","latestItemCount":null}"#,
            r#"{"success":true,"latestItemCount":[]}"#,
            r#"{"success":true,"latestItemCount":"gone"}"#,
        ] {
            assert_eq!(replay(200, body), Err(LocateError::NotFound), "{body}");
        }
    }

    #[test]
    fn non_json_or_error_status_is_lookup_failed() {
        assert!(matches!(replay(200, "<html>"), Err(LocateError::LookupFailed(_))));
        assert!(matches!(
            replay(404, r#"{"success":true}"#),
            Err(LocateError::LookupFailed(_))
        ));
    }

    #[test]
    fn naive_scan_time_is_found_as_sent() {
        let details = replay(
            200,
            r#"{"success":true,"latestItemCount":{
                "Item":{"name":null,"serial_no":"SN-1"},
                "Category":{"cat_name":"Sewing"},
                "scanned_date":"2024-03-01T08:30:00",
                "current_branch":null,
                "branch":"Mathara"
            }}"#,
        )
        .expect("payload is usable");
        assert_eq!(details.scanned_date.as_deref(), Some("2024-03-01T08:30:00"));
        assert!(details.item.name.is_none());
        assert!(details.current_branch.is_none());
    }
}
