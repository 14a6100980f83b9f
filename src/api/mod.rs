//! Blog API module.
//!
//! This module provides:
//! - HTTP client for metadata pages and media files
//! - Request signing
//! - Path-based lookups over response payloads

pub mod client;
pub mod signer;
pub mod tree;

pub use client::BlogApi;
pub use signer::{ApiKeySigner, FeedRequest, RequestSigner, PAGE_SIZE};
pub use tree::Tree;
