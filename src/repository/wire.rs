//! Response body decoding.
//!
//! The machine list endpoint has been seen answering either with a bare JSON
//! array or with an object wrapping the array under `items`. Both are accepted
//! here so the filter only ever sees a plain list.

use crate::domain::{LookupResponse, MachineRecord, Result, TrackerError};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum MachineListBody {
    Bare(Vec<Value>),
    Enveloped { items: Vec<Value> },
}

/// Decodes a machine list body.
///
/// Entries that are not JSON objects are skipped with a warning; the rest of
/// the list is kept.
///
/// # Errors
///
/// - [`TrackerError::Decode`] if the body is not JSON
/// - [`TrackerError::UnexpectedShape`] if it is JSON of any other shape
///
/// # Examples
///
/// ```
/// use machine_tracker::repository::wire::decode_machine_list;
///
/// let bare = decode_machine_list(br#"[{"item_code":"A1"}]"#).unwrap();
/// let wrapped = decode_machine_list(br#"{"items":[{"item_code":"A1"}]}"#).unwrap();
/// assert_eq!(bare, wrapped);
/// ```
pub fn decode_machine_list(body: &[u8]) -> Result<Vec<MachineRecord>> {
    let value: Value = serde_json::from_slice(body)?;
    let body = MachineListBody::deserialize(value).map_err(|_| TrackerError::UnexpectedShape)?;

    let entries = match body {
        MachineListBody::Bare(items) | MachineListBody::Enveloped { items } => items,
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| decode_record(index, entry))
        .collect())
}

fn decode_record(index: usize, entry: Value) -> Option<MachineRecord> {
    if !entry.is_object() {
        tracing::warn!(index, "skipping machine list entry that is not an object");
        return None;
    }
    MachineRecord::deserialize(entry)
        .map_err(|e| tracing::warn!(index, error = %e, "skipping undecodable machine record"))
        .ok()
}

/// Decodes a lookup body.
///
/// Any JSON that is not an object reads as a response without success, so
/// that only a body which is not JSON at all counts as a failed request.
///
/// # Errors
///
/// Returns [`TrackerError::Decode`] if the body is not JSON.
pub fn decode_lookup(body: &[u8]) -> Result<LookupResponse> {
    let value: Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        tracing::debug!("lookup body is not an object");
        return Ok(LookupResponse::missing());
    }
    Ok(LookupResponse::deserialize(value)?)
}

/// Maps a Zellij web response to its body, rejecting non-2xx statuses.
///
/// # Errors
///
/// Returns [`TrackerError::Http`] for any status outside `200..300`.
pub fn ensure_success(status: u16, body: Vec<u8>) -> Result<Vec<u8>> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(TrackerError::Http { status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_is_accepted() {
        let records = decode_machine_list(br#"[{"item_code":"A1","serial_no":"S1"}]"#)
            .expect("bare list decodes");
        assert_eq!(records, vec![MachineRecord::new("A1", "S1")]);
    }

    #[test]
    fn items_envelope_is_accepted() {
        let records = decode_machine_list(br#"{"items":[{"item_code":"A1"}],"total":1}"#)
            .expect("envelope decodes");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn other_shapes_are_rejected() {
        assert!(matches!(
            decode_machine_list(br#"{"machines":[]}"#),
            Err(TrackerError::UnexpectedShape)
        ));
        assert!(matches!(
            decode_machine_list(br#""nope""#),
            Err(TrackerError::UnexpectedShape)
        ));
        assert!(matches!(
            decode_machine_list(b"<html>"),
            Err(TrackerError::Decode(_))
        ));
    }

    #[test]
    fn loosely_typed_record_keeps_the_whole_list() {
        let records =
            decode_machine_list(br#"[{"item_code":"A1","serial_no":"S1","box_no":12},{"item_code":"A2","serial_no":"S2"}]"#)
                .expect("list decodes");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].box_no.as_deref(), Some("12"));
        assert_eq!(records[1], MachineRecord::new("A2", "S2"));
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let records = decode_machine_list(br#"{"items":[null,{"item_code":"A1"},7,["x"]]}"#)
            .expect("list decodes");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item_code.as_deref(), Some("A1"));
    }

    #[test]
    fn any_json_lookup_body_decodes() {
        let bodies: [&[u8]; 5] = [b"null", b"[]", b"\"ok\"", b"3", br#"{"success":null}"#];
        for body in bodies {
            let response = decode_lookup(body).expect("JSON body decodes");
            assert!(!response.success);
        }
        assert!(matches!(decode_lookup(b"<html>"), Err(TrackerError::Decode(_))));
    }

    #[test]
    fn non_success_status_is_an_error() {
        assert!(ensure_success(204, vec![]).is_ok());
        assert!(matches!(
            ensure_success(404, vec![]),
            Err(TrackerError::Http { status: 404 })
        ));
    }
}
