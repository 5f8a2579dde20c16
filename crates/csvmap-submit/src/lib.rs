//! Upload of mapped records.
//!
//! The submit step runs the transform once, wraps the records with the static
//! label list and the custom field names, and posts the result as JSON:
//!
//! ```json
//! {
//!   "csv_data": [{ "Email": "a@x.com" }],
//!   "selected_columns": ["First Name", "Last Name", "..."],
//!   "custom_fields": ["Notes"]
//! }
//! ```
//!
//! There is no retry and no deduplication; a second submit sends a second
//! request.

#![warn(clippy::all)]

pub mod error;
pub mod payload;
pub mod settings;
pub mod submitter;
pub mod transport;

pub use error::{Result, SubmitError};
pub use payload::{build_payload, prepare_payload, render_payload};
pub use settings::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, SubmitSettings};
pub use submitter::{SubmitReceipt, Submitter};
pub use reqwest::Url;
pub use transport::{HttpTransport, Transport, TransportResponse};
