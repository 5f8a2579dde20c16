use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A user-named output key fed from a source column.
///
/// `field_name` is written to the record verbatim; it never goes through the
/// label table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub field_name: String,
    pub source_header: String,
}

impl CustomField {
    pub fn new(field_name: impl Into<String>, source_header: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            source_header: source_header.into(),
        }
    }
}

/// One transformed row: final key to cell value.
pub type OutputRecord = BTreeMap<String, String>;

/// JSON body posted to the upload endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPayload {
    pub csv_data: Vec<OutputRecord>,
    /// Every label of the label table, whether mapped or not.
    pub selected_columns: Vec<String>,
    pub custom_fields: Vec<String>,
}

impl UploadPayload {
    pub fn record_count(&self) -> usize {
        self.csv_data.len()
    }
}
