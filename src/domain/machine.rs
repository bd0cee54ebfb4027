//! Machine record domain model.
//!
//! A [`MachineRecord`] is one physical asset as returned by the inventory API.
//! Every field is optional on the wire: partial records are displayed with
//! `N/A` placeholders instead of being rejected.

use super::lenient;
use serde::{Deserialize, Serialize};

/// Placeholder rendered for a missing or empty field.
pub const MISSING_FIELD: &str = "N/A";

/// Description value that marks a machine as under repair.
const REPAIRING: &str = "repairing";

/// One physical asset registered in the inventory.
///
/// Field names follow the API's snake case JSON keys. Numeric values are
/// kept in their JSON spelling; any other non-string value reads as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub item_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub serial_no: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub branch: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub model_no: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub box_no: Option<String>,
}

impl MachineRecord {
    /// Creates a record with the identifying fields set.
    ///
    /// # Examples
    ///
    /// ```
    /// use machine_tracker::domain::MachineRecord;
    ///
    /// let machine = MachineRecord::new("A1", "S1").with_branch("Hettipola");
    /// assert_eq!(machine.item_code.as_deref(), Some("A1"));
    /// assert_eq!(machine.branch.as_deref(), Some("Hettipola"));
    /// ```
    #[must_use]
    pub fn new(item_code: impl Into<String>, serial_no: impl Into<String>) -> Self {
        Self {
            item_code: Some(item_code.into()),
            serial_no: Some(serial_no.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the machine is flagged as under repair.
    ///
    /// The comparison ignores case: `"Repairing"` and `"REPAIRING"` both count.
    #[must_use]
    pub fn is_repairing(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase() == REPAIRING)
    }

    /// The table cells for this record, in column order, with placeholders
    /// substituted for missing values.
    #[must_use]
    pub fn cells(&self) -> [&str; 7] {
        [
            display_or_placeholder(self.item_code.as_deref()),
            display_or_placeholder(self.serial_no.as_deref()),
            display_or_placeholder(self.name.as_deref()),
            display_or_placeholder(self.description.as_deref()),
            display_or_placeholder(self.branch.as_deref()),
            display_or_placeholder(self.model_no.as_deref()),
            display_or_placeholder(self.box_no.as_deref()),
        ]
    }
}

/// Returns the value, or [`MISSING_FIELD`] when absent or empty.
#[must_use]
pub fn display_or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => MISSING_FIELD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repairing_flag_ignores_case() {
        assert!(MachineRecord::new("A", "S").with_description("Repairing").is_repairing());
        assert!(MachineRecord::new("A", "S").with_description("REPAIRING").is_repairing());
        assert!(!MachineRecord::new("A", "S").with_description("repairing soon").is_repairing());
        assert!(!MachineRecord::new("A", "S").is_repairing());
    }

    #[test]
    fn missing_and_empty_cells_use_placeholder() {
        let mut machine = MachineRecord::new("A1", "");
        machine.name = Some("Overlock".into());
        let cells = machine.cells();
        assert_eq!(cells[0], "A1");
        assert_eq!(cells[1], MISSING_FIELD);
        assert_eq!(cells[2], "Overlock");
        assert_eq!(cells[6], MISSING_FIELD);
    }

    #[test]
    fn deserializes_partial_records() {
        let machine: MachineRecord =
            serde_json::from_str(r#"{"item_code":"A9","branch":"Mathara","extra":1}"#)
                .expect("partial record should decode");
        assert_eq!(machine.item_code.as_deref(), Some("A9"));
        assert!(machine.serial_no.is_none());
    }

    #[test]
    fn numeric_and_odd_fields_do_not_reject_the_record() {
        let machine: MachineRecord = serde_json::from_str(
            r#"{"item_code":"A1","serial_no":"S1","box_no":12,"model_no":7.5,"name":null,"branch":false}"#,
        )
        .expect("loosely typed record should decode");
        assert_eq!(machine.box_no.as_deref(), Some("12"));
        assert_eq!(machine.model_no.as_deref(), Some("7.5"));
        assert!(machine.name.is_none());
        assert!(machine.branch.is_none());
        assert_eq!(machine.cells()[6], "12");
    }
}
