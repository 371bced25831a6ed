//! Output module: everything that touches the local filesystem.
//!
//! - `paths`: pure path and filename helpers
//! - `writer`: directory creation and file writes

pub mod paths;
pub mod writer;

pub use paths::{normalize_path, page_data_filename, relative_reference, sanitize_filename};
pub use writer::{create_directory, write_file, write_json};
