//! Header-to-field transform.
//!
//! Lookups that miss (unknown header, short row) resolve to the empty string.
//! The transform never fails.

use csvmap_model::{FieldLabelTable, OutputRecord, RawTable};

use crate::state::MappingState;

/// Position of the first header equal to `name`, `None` when absent.
pub fn header_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|header| header == name)
}

/// Output keys and their resolved column positions, in write order.
///
/// Fixed fields come first, custom fields after them in list order, so a
/// custom field that reuses a key overwrites the earlier value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformPlan {
    columns: Vec<(String, Option<usize>)>,
}

impl TransformPlan {
    pub fn new(headers: &[String], state: &MappingState, labels: &FieldLabelTable) -> Self {
        let fixed = state
            .selections()
            .map(|(field, header)| (labels.label(field).to_string(), header_index(headers, header)));
        let custom = state.custom_fields().iter().map(|field| {
            (
                field.field_name.clone(),
                header_index(headers, &field.source_header),
            )
        });
        Self {
            columns: fixed.chain(custom).collect(),
        }
    }

    /// Build one record from one data row.
    pub fn apply(&self, row: &[String]) -> OutputRecord {
        let mut record = OutputRecord::new();
        for (key, index) in &self.columns {
            let value = index
                .and_then(|idx| row.get(idx))
                .cloned()
                .unwrap_or_default();
            record.insert(key.clone(), value);
        }
        record
    }

    pub fn columns(&self) -> &[(String, Option<usize>)] {
        &self.columns
    }
}

/// Map every data row to an output record, preserving row order 1:1.
pub fn transform_rows(
    headers: &[String],
    rows: &[Vec<String>],
    state: &MappingState,
    labels: &FieldLabelTable,
) -> Vec<OutputRecord> {
    let plan = TransformPlan::new(headers, state, labels);
    rows.iter().map(|row| plan.apply(row)).collect()
}

/// [`transform_rows`] over a loaded table.
pub fn transform(
    table: &RawTable,
    state: &MappingState,
    labels: &FieldLabelTable,
) -> Vec<OutputRecord> {
    transform_rows(&table.headers, &table.rows, state, labels)
}
