//! The column mapper session: loaded table, mapping state, preview, submit.
//!
//! The session holds exactly one [`RawTable`] and one [`MappingState`]. Both
//! are only ever replaced wholesale, so a failed load or a rejected edit leaves
//! the previous values in place.

use std::path::Path;

use tracing::{Level, debug, error, info, trace, warn};

use csvmap_ingest::{IngestError, parse_csv_text, read_csv_text};
use csvmap_map::{MappingError, MappingState, MappingSummary, transform};
use csvmap_model::{CustomField, FieldKey, FieldLabelTable, OutputRecord, RawTable, UploadPayload};
use csvmap_submit::{SubmitReceipt, SubmitSettings, Submitter, Transport, prepare_payload};

use crate::logging::redact_value;

/// One discrete mapping action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingEdit {
    /// Pick (or with an empty header, clear) the header for a fixed field.
    Select { field: FieldKey, header: String },
    /// Append a custom field and fill in its name and source header.
    AddCustom { name: String, source: String },
    /// Rename an existing custom field.
    RenameCustom { index: usize, name: String },
    /// Point an existing custom field at another header.
    RetargetCustom { index: usize, source: String },
    /// Remove a custom field.
    RemoveCustom { index: usize },
}

#[derive(Debug, Default)]
pub struct ColumnMapper {
    table: RawTable,
    mapping: MappingState,
    labels: FieldLabelTable,
}

impl ColumnMapper {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_labels(mut self, labels: FieldLabelTable) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_mapping(mut self, mapping: MappingState) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn table(&self) -> &RawTable {
        &self.table
    }

    pub fn mapping(&self) -> &MappingState {
        &self.mapping
    }

    pub fn labels(&self) -> FieldLabelTable {
        self.labels
    }

    /// Parse `text` and replace the loaded table.
    ///
    /// On failure the error is logged and the previous table stays loaded.
    /// The mapping is kept either way, even if it names headers the new file
    /// does not have; call [`Self::warn_stale_selections`] once edits are done.
    pub fn load_csv_text(&mut self, text: &str) -> Result<&RawTable, IngestError> {
        match parse_csv_text(text) {
            Ok(table) => Ok(self.replace_table(table)),
            Err(err) => {
                error!(error = %err, "CSV data is not formatted as expected");
                Err(err)
            }
        }
    }

    /// Read `path` through the upload boundary and replace the loaded table.
    pub fn load_csv_file(&mut self, path: &Path) -> Result<&RawTable, IngestError> {
        let text = read_csv_text(path).inspect_err(|err| {
            error!(path = %path.display(), error = %err, "failed to read upload");
        })?;
        info!(path = %path.display(), "loading csv");
        self.load_csv_text(&text)
    }

    fn replace_table(&mut self, table: RawTable) -> &RawTable {
        info!(
            columns = table.column_count(),
            rows = table.row_count(),
            "csv loaded"
        );
        debug!(headers = ?table.headers, "header row");
        self.table = table;
        &self.table
    }

    /// Apply one mapping action. A rejected action leaves the mapping untouched.
    pub fn apply(&mut self, edit: &MappingEdit) -> Result<(), MappingError> {
        let next = match edit {
            MappingEdit::Select { field, header } => {
                Ok(self.mapping.select_header_for(*field, header))
            }
            MappingEdit::AddCustom { name, source } => {
                let added = self.mapping.add_custom_field();
                let index = added.custom_fields().len() - 1;
                added
                    .set_custom_field_name(index, name)
                    .and_then(|state| state.set_custom_field_source(index, source))
            }
            MappingEdit::RenameCustom { index, name } => {
                self.mapping.set_custom_field_name(*index, name)
            }
            MappingEdit::RetargetCustom { index, source } => {
                self.mapping.set_custom_field_source(*index, source)
            }
            MappingEdit::RemoveCustom { index } => self.mapping.remove_custom_field(*index),
        }?;
        debug!(?edit, "mapping updated");
        self.mapping = next;
        Ok(())
    }

    /// Apply actions in order, stopping at the first rejected one.
    pub fn apply_all<'a>(
        &mut self,
        edits: impl IntoIterator<Item = &'a MappingEdit>,
    ) -> Result<(), MappingError> {
        for edit in edits {
            self.apply(edit)?;
        }
        Ok(())
    }

    /// Replace the whole mapping, e.g. with a loaded profile.
    pub fn replace_mapping(&mut self, mapping: MappingState) {
        self.mapping = mapping;
    }

    pub fn summary(&self) -> MappingSummary {
        self.mapping.summary(&self.table.headers)
    }

    /// Records for the current table and mapping.
    pub fn records(&self) -> Vec<OutputRecord> {
        let records = transform(&self.table, &self.mapping, &self.labels);
        if tracing::enabled!(Level::TRACE) {
            for (row, record) in records.iter().enumerate() {
                let rendered = format!("{record:?}");
                trace!(row, record = redact_value(&rendered), "mapped record");
            }
        }
        records
    }

    /// Payload a submit would send, or `NoSelection` when nothing is mapped.
    pub fn payload(&self) -> csvmap_submit::Result<UploadPayload> {
        prepare_payload(&self.table, &self.mapping, &self.labels)
    }

    /// Transform and post through `transport`.
    pub fn submit<T: Transport>(
        &self,
        transport: T,
        settings: &SubmitSettings,
    ) -> csvmap_submit::Result<SubmitReceipt> {
        Submitter::new(transport, settings.clone())
            .with_labels(self.labels)
            .submit(&self.table, &self.mapping)
    }

    pub fn custom_fields(&self) -> &[CustomField] {
        self.mapping.custom_fields()
    }

    /// Log every selection that names a header the loaded file lacks.
    ///
    /// Stale selections are kept; they resolve to empty values.
    pub fn warn_stale_selections(&self) {
        if self.table.is_empty() {
            return;
        }
        for (field, header) in self.summary().stale_selections {
            warn!(field = %field, header = %header, "selected header not found in loaded file");
        }
    }
}
