//! Filesystem module.
//!
//! Provides:
//! - Archive directory layout
//! - Filename validation and media file naming

pub mod naming;
pub mod paths;

pub use naming::{media_file_name, sanitize_filename, sanitize_path_component};
pub use paths::{ensure_dir, StorageLayout, MEDIA_DIR};
