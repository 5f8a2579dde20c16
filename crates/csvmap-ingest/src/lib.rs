pub mod csv_table;
pub mod discovery;
pub mod error;

pub use csv_table::{has_csv_extension, parse_csv_text, read_csv_file, read_csv_text};
pub use discovery::list_csv_files;
pub use error::{IngestError, Result};
