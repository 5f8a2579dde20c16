pub mod error;
pub mod field;
pub mod mapping;
pub mod table;

pub use error::{ModelError, Result};
pub use field::{FieldKey, FieldLabelTable};
pub use mapping::{CustomField, OutputRecord, UploadPayload};
pub use table::RawTable;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_backend_keys() {
        let mut record = OutputRecord::new();
        record.insert("Email".to_string(), "a@x.com".to_string());
        let payload = UploadPayload {
            csv_data: vec![record],
            selected_columns: FieldLabelTable::STANDARD.labels(),
            custom_fields: vec!["Notes".to_string()],
        };
        let json = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(json["csv_data"][0]["Email"], "a@x.com");
        assert_eq!(json["selected_columns"].as_array().map(Vec::len), Some(8));
        assert_eq!(json["custom_fields"][0], "Notes");
    }
}
