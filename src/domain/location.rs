//! Last-scanned location of an item, as returned by the lookup endpoint.

use super::lenient;
use super::machine::display_or_placeholder;
use serde::{Deserialize, Serialize};

/// Location details of the most recent scan of an item.
///
/// Key names mirror the lookup payload (`Item`, `Category`, `scanned_date`,
/// `current_branch`, `branch`). Values are kept exactly as the API sent them;
/// `scanned_date` in particular is not reinterpreted, since the API does not
/// always attach a zone to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLocationDetails {
    #[serde(rename = "Item", default, deserialize_with = "lenient::or_default")]
    pub item: ScannedItem,

    #[serde(rename = "Category", default, deserialize_with = "lenient::or_default")]
    pub category: Category,

    /// When the item was last scanned.
    #[serde(default, deserialize_with = "lenient::text")]
    pub scanned_date: Option<String>,

    /// Branch where the item was last scanned.
    #[serde(default, deserialize_with = "lenient::text")]
    pub current_branch: Option<String>,

    /// Branch that owns the item.
    #[serde(rename = "branch", default, deserialize_with = "lenient::text")]
    pub owner_branch: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub serial_no: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "lenient::text")]
    pub cat_name: Option<String>,
}

impl ItemLocationDetails {
    /// Labelled lines for the tracker popup, in display order.
    #[must_use]
    pub fn display_lines(&self) -> Vec<(&'static str, String)> {
        [
            ("Name", &self.item.name),
            ("Serial No", &self.item.serial_no),
            ("Category", &self.category.cat_name),
            ("Last Scanned Date", &self.scanned_date),
            ("Last Scanned Branch", &self.current_branch),
            ("Owner Branch", &self.owner_branch),
        ]
        .into_iter()
        .map(|(label, value)| (label, display_or_placeholder(value.as_deref()).to_string()))
        .collect()
    }
}

/// Raw response of the lookup endpoint.
///
/// The payload is kept as untyped JSON so that a malformed payload can be
/// told apart from a body that is not JSON at all.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub success: bool,

    #[serde(rename = "latestItemCount", default)]
    pub latest_item_count: Option<serde_json::Value>,
}

impl LookupResponse {
    /// A successful response carrying `details`.
    #[must_use]
    pub fn found(details: &ItemLocationDetails) -> Self {
        Self {
            success: true,
            latest_item_count: serde_json::to_value(details).ok(),
        }
    }

    /// A response reporting that nothing is known about the code.
    #[must_use]
    pub fn missing() -> Self {
        Self::default()
    }
}
