//! Upload payload assembly.

use tracing::error;

use csvmap_map::{MappingState, transform};
use csvmap_model::{FieldLabelTable, RawTable, UploadPayload};

use crate::error::{Result, SubmitError};

/// Run the transform and wrap the records with the static metadata.
///
/// `selected_columns` is always the whole label table, independent of which
/// fields were mapped.
pub fn build_payload(
    table: &RawTable,
    state: &MappingState,
    labels: &FieldLabelTable,
) -> UploadPayload {
    UploadPayload {
        csv_data: transform(table, state, labels),
        selected_columns: labels.labels(),
        custom_fields: state.custom_field_names(),
    }
}

/// [`build_payload`] behind the submit guard: at least one fixed field must be mapped.
pub fn prepare_payload(
    table: &RawTable,
    state: &MappingState,
    labels: &FieldLabelTable,
) -> Result<UploadPayload> {
    if !state.has_selection() {
        error!("No columns selected");
        return Err(SubmitError::NoSelection);
    }
    Ok(build_payload(table, state, labels))
}

/// Pretty JSON of the request body, as a dry run prints it.
pub fn render_payload(payload: &UploadPayload) -> serde_json::Result<String> {
    serde_json::to_string_pretty(payload)
}

#[cfg(test)]
mod tests {
    use csvmap_model::{CustomField, FieldKey};

    use super::*;

    #[test]
    fn custom_field_names_keep_list_order() {
        let table = RawTable::new(vec!["A".to_string()], vec![]);
        let state = MappingState::new()
            .select_header_for(FieldKey::Email, "A")
            .push_custom_field(CustomField::new("Zeta", "A"))
            .push_custom_field(CustomField::new("Alpha", "A"));

        let payload = build_payload(&table, &state, &FieldLabelTable::STANDARD);
        assert!(payload.csv_data.is_empty());
        assert_eq!(payload.custom_fields, vec!["Zeta", "Alpha"]);
        assert_eq!(payload.selected_columns.len(), 8);
    }

    #[test]
    fn rendered_payload_has_the_three_top_level_keys() {
        let payload = UploadPayload::default();
        let json: serde_json::Value =
            serde_json::from_str(&render_payload(&payload).unwrap()).unwrap();
        let mut keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["csv_data", "custom_fields", "selected_columns"]);
    }
}
