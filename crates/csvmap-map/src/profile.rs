//! Mapping profiles: a [`MappingState`] saved as JSON so a mapping can be reused
//! across uploads with the same layout.
//!
//! ```json
//! {
//!   "selections": { "firstName": "Name", "email": "Mail" },
//!   "custom_fields": [{ "field_name": "Notes", "source_header": "Comment" }]
//! }
//! ```

use std::path::Path;

use crate::error::{MappingError, Result};
use crate::state::MappingState;

pub fn load_profile(path: &Path) -> Result<MappingState> {
    let text = std::fs::read_to_string(path).map_err(|source| MappingError::ProfileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| MappingError::ProfileFormat {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_profile(path: &Path, state: &MappingState) -> Result<()> {
    let json = serde_json::to_string_pretty(state).map_err(|source| MappingError::ProfileFormat {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| MappingError::ProfileWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use csvmap_model::{CustomField, FieldKey};

    use super::*;

    #[test]
    fn profile_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.json");
        let state = MappingState::new()
            .select_header_for(FieldKey::LinkedinUrl, "Profile")
            .push_custom_field(CustomField::new("Notes", "Comment"));

        save_profile(&path, &state).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"linkedin_url\": \"Profile\""));
        assert_eq!(load_profile(&path).unwrap(), state);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.json");
        std::fs::write(&path, r#"{"selections":{"email":"Mail"}}"#).unwrap();

        let state = load_profile(&path).unwrap();
        assert_eq!(state.selection(FieldKey::Email), Some("Mail"));
        assert!(state.custom_fields().is_empty());
    }

    #[test]
    fn unknown_field_key_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.json");
        std::fs::write(&path, r#"{"selections":{"phone":"Tel"}}"#).unwrap();

        assert!(matches!(
            load_profile(&path),
            Err(MappingError::ProfileFormat { .. })
        ));
    }

    #[test]
    fn empty_header_in_profile_leaves_field_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.json");
        std::fs::write(&path, r#"{"selections":{"email":"","firstName":"Name"}}"#).unwrap();

        let state = load_profile(&path).unwrap();
        assert_eq!(state.selection(FieldKey::Email), None);
        assert_eq!(state.selection(FieldKey::FirstName), Some("Name"));
        assert_eq!(state.summary(&[]).mapped_fields, 1);
    }
}
