//! Configuration module for the blog-archiver.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - CLI argument parsing and merging
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{AccountConfig, ApiConfig, Config, OptionsConfig, RetryConfig, TargetConfig};
pub use modes::FeedKind;
pub use validation::{normalize_handle, validate_config};
