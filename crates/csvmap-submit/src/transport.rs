//! Outbound HTTP boundary.

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use tracing::debug;

use csvmap_model::UploadPayload;

use crate::error::{Result, SubmitError};
use crate::settings::SubmitSettings;

/// Successful response from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Something that can deliver a payload as a single JSON POST.
pub trait Transport {
    /// Post `payload` to `url`. A non-success status is an error.
    fn post_json(&self, url: &Url, payload: &UploadPayload) -> Result<TransportResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_json(&self, url: &Url, payload: &UploadPayload) -> Result<TransportResponse> {
        (**self).post_json(url, payload)
    }
}

/// Blocking `reqwest` transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a client with the configured request timeout.
    pub fn new(settings: &SubmitSettings) -> Result<Self> {
        let client = Client::builder().timeout(settings.timeout()).build()?;
        Ok(Self { client })
    }

    /// Wrap a preconfigured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &Url, payload: &UploadPayload) -> Result<TransportResponse> {
        debug!(%url, records = payload.record_count(), "posting upload payload");

        let response = self
            .client
            .post(url.clone())
            .header(USER_AGENT, format!("csvmap/{}", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()?;

        let status = response.status();
        let body = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());

        if !status.is_success() {
            return Err(SubmitError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(TransportResponse {
            status: status.as_u16(),
            body,
        })
    }
}
