#![deny(unsafe_code)]

pub mod error;
pub mod profile;
pub mod state;
pub mod transform;

pub use error::{MappingError, Result};
pub use profile::{load_profile, save_profile};
pub use state::{MappingState, MappingSummary};
pub use transform::{TransformPlan, header_index, transform, transform_rows};
