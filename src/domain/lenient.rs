//! Tolerant field decoders for inventory API payloads.
//!
//! The API is loosely typed: codes arrive as strings or numbers, flags as
//! anything. These helpers are used with `#[serde(deserialize_with)]` so a
//! single odd value degrades to "missing" instead of failing the record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings as-is, numbers in their JSON spelling, anything else as `None`.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// `true` only for a JSON `true`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(
        Option::<Value>::deserialize(deserializer)?,
        Some(Value::Bool(true))
    ))
}

/// A nested object, or its default when the key holds `null`.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "text")]
        code: Option<String>,
        #[serde(default, deserialize_with = "flag")]
        ok: bool,
    }

    fn decode(json: &str) -> Sample {
        serde_json::from_str(json).expect("object decodes")
    }

    #[test]
    fn text_accepts_strings_and_numbers() {
        assert_eq!(decode(r#"{"code":"A1"}"#).code.as_deref(), Some("A1"));
        assert_eq!(decode(r#"{"code":12}"#).code.as_deref(), Some("12"));
        assert_eq!(decode(r#"{"code":1.5}"#).code.as_deref(), Some("1.5"));
    }

    #[test]
    fn text_drops_other_values() {
        assert!(decode(r#"{"code":null}"#).code.is_none());
        assert!(decode(r#"{"code":true}"#).code.is_none());
        assert!(decode(r#"{"code":{"a":1}}"#).code.is_none());
        assert!(decode("{}").code.is_none());
    }

    #[test]
    fn flag_is_true_only_for_true() {
        assert!(decode(r#"{"ok":true}"#).ok);
        for json in [r#"{"ok":null}"#, r#"{"ok":"true"}"#, r#"{"ok":1}"#, "{}"] {
            assert!(!decode(json).ok, "{json}");
        }
    }
}
