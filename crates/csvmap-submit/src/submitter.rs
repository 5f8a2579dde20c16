//! Submit step: guard, transform, post, log.

use tracing::{error, info};

use csvmap_map::MappingState;
use csvmap_model::{FieldLabelTable, RawTable, UploadPayload};

use crate::error::{Result, SubmitError};
use crate::payload::prepare_payload;
use crate::settings::SubmitSettings;
use crate::transport::Transport;

/// What a successful submit sent and got back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub records: usize,
    pub status: u16,
    pub body: String,
}

/// Sends the mapped records through a [`Transport`].
pub struct Submitter<T> {
    transport: T,
    settings: SubmitSettings,
    labels: FieldLabelTable,
}

impl<T: Transport> Submitter<T> {
    pub fn new(transport: T, settings: SubmitSettings) -> Self {
        Self {
            transport,
            settings,
            labels: FieldLabelTable::STANDARD,
        }
    }

    #[must_use]
    pub fn with_labels(mut self, labels: FieldLabelTable) -> Self {
        self.labels = labels;
        self
    }

    pub fn settings(&self) -> &SubmitSettings {
        &self.settings
    }

    /// Build the payload without sending it.
    ///
    /// Fails with [`SubmitError::NoSelection`] when no logical field is mapped.
    pub fn prepare(&self, table: &RawTable, state: &MappingState) -> Result<UploadPayload> {
        prepare_payload(table, state, &self.labels)
    }

    /// Transform and post in one go.
    ///
    /// Every failure is logged here before it is returned; nothing is retried.
    pub fn submit(&self, table: &RawTable, state: &MappingState) -> Result<SubmitReceipt> {
        let payload = self.prepare(table, state)?;
        let url = self.settings.endpoint_url().inspect_err(|err| {
            error!(error = %err, "Error uploading data");
        })?;

        info!(
            endpoint = %url,
            records = payload.record_count(),
            custom_fields = payload.custom_fields.len(),
            "Uploading mapped records"
        );

        match self.transport.post_json(&url, &payload) {
            Ok(response) => {
                info!(status = response.status, body = %response.body, "Upload successful");
                Ok(SubmitReceipt {
                    records: payload.record_count(),
                    status: response.status,
                    body: response.body,
                })
            }
            Err(err) => {
                match &err {
                    SubmitError::Status { status, body } => {
                        error!(status, body = %body, "Error uploading data");
                    }
                    other => error!(error = %other, "Error uploading data"),
                }
                Err(err)
            }
        }
    }
}
