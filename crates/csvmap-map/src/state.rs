//! Mapping state for the interactive mapping workflow.
//!
//! Every edit returns a new [`MappingState`]; the value it was called on is
//! never touched. A failed edit therefore leaves the caller's state intact.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use csvmap_model::{CustomField, FieldKey};

use crate::error::{MappingError, Result};
use crate::transform::header_index;

/// Chosen header per logical field, plus the ordered custom fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingState {
    /// Logical field -> chosen source header. Unset fields are absent.
    #[serde(default, deserialize_with = "non_empty_selections")]
    selections: BTreeMap<FieldKey, String>,
    /// User-defined output keys, in the order they are applied.
    #[serde(default)]
    custom_fields: Vec<CustomField>,
}

impl MappingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point `field` at `header`.
    ///
    /// The header is not checked against the loaded file. An empty header
    /// unsets the field, which is what picking the placeholder option does.
    #[must_use]
    pub fn select_header_for(&self, field: FieldKey, header: &str) -> Self {
        let mut next = self.clone();
        if header.is_empty() {
            next.selections.remove(&field);
        } else {
            next.selections.insert(field, header.to_string());
        }
        next
    }

    /// Append an empty custom field.
    #[must_use]
    pub fn add_custom_field(&self) -> Self {
        let mut next = self.clone();
        next.custom_fields.push(CustomField::default());
        next
    }

    /// Rename the custom field at `index`.
    pub fn set_custom_field_name(&self, index: usize, value: &str) -> Result<Self> {
        self.with_custom_field(index, |field| field.field_name = value.to_string())
    }

    /// Change the source header of the custom field at `index`.
    pub fn set_custom_field_source(&self, index: usize, value: &str) -> Result<Self> {
        self.with_custom_field(index, |field| field.source_header = value.to_string())
    }

    /// Drop the custom field at `index`; later entries shift left.
    pub fn remove_custom_field(&self, index: usize) -> Result<Self> {
        self.check_index(index)?;
        let mut next = self.clone();
        next.custom_fields.remove(index);
        Ok(next)
    }

    /// Convenience for the add + rename + pick-source sequence.
    #[must_use]
    pub fn push_custom_field(&self, field: CustomField) -> Self {
        let mut next = self.clone();
        next.custom_fields.push(field);
        next
    }

    fn with_custom_field(&self, index: usize, edit: impl FnOnce(&mut CustomField)) -> Result<Self> {
        self.check_index(index)?;
        let mut next = self.clone();
        edit(&mut next.custom_fields[index]);
        Ok(next)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.custom_fields.len() {
            Ok(())
        } else {
            Err(MappingError::CustomFieldOutOfRange {
                index,
                len: self.custom_fields.len(),
            })
        }
    }

    /// Header chosen for `field`, if any.
    pub fn selection(&self, field: FieldKey) -> Option<&str> {
        self.selections.get(&field).map(String::as_str)
    }

    /// Set selections in field order.
    pub fn selections(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.selections
            .iter()
            .filter(|(_, header)| !header.is_empty())
            .map(|(field, header)| (*field, header.as_str()))
    }

    pub fn custom_fields(&self) -> &[CustomField] {
        &self.custom_fields
    }

    /// True once at least one logical field is mapped to a non-empty header.
    pub fn has_selection(&self) -> bool {
        self.selections().next().is_some()
    }

    /// Output names of the custom fields, in list order.
    pub fn custom_field_names(&self) -> Vec<String> {
        self.custom_fields
            .iter()
            .map(|field| field.field_name.clone())
            .collect()
    }

    /// Summary counts against the currently loaded header row.
    pub fn summary(&self, headers: &[String]) -> MappingSummary {
        let stale_selections = self
            .selections()
            .filter(|(_, header)| header_index(headers, header).is_none())
            .map(|(field, header)| (field, header.to_string()))
            .collect();
        let unresolved_custom_fields = self
            .custom_fields
            .iter()
            .filter(|field| header_index(headers, &field.source_header).is_none())
            .count();

        MappingSummary {
            total_fields: FieldKey::ALL.len(),
            mapped_fields: self.selections().count(),
            custom_fields: self.custom_fields.len(),
            stale_selections,
            unresolved_custom_fields,
        }
    }
}

/// An empty header in a saved profile means "unset", same as `select_header_for`.
fn non_empty_selections<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<FieldKey, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut selections = BTreeMap::<FieldKey, String>::deserialize(deserializer)?;
    selections.retain(|_, header| !header.is_empty());
    Ok(selections)
}

/// Summary of mapping counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSummary {
    /// Number of logical fields that can be mapped.
    pub total_fields: usize,
    /// Logical fields with a header chosen.
    pub mapped_fields: usize,
    /// Custom fields defined.
    pub custom_fields: usize,
    /// Selections naming a header the loaded file does not have.
    pub stale_selections: Vec<(FieldKey, String)>,
    /// Custom fields whose source header is not in the loaded file.
    pub unresolved_custom_fields: usize,
}
