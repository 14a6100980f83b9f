//! Blog Archiver - pages through blog feeds and saves their media.
//!
//! For every blog the archiver walks the posts (or likes) feed twenty posts
//! at a time, stores each raw page as JSON, and hands the media the posts
//! reference to a fixed pool of download workers.
//!
//! # Features
//!
//! - Posts or likes feeds
//! - Exponential backoff on metadata requests
//! - Concurrent, idempotent media downloads
//! - Per-blog or global media directories
//! - Optional skipping of reblogs
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use blog_archiver::{Archiver, BlogApi, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.account.api_key = "your-api-key-here".into();
//!     config.targets.blogs = vec!["staff".into()];
//!
//!     let api = Arc::new(BlogApi::from_config(&config)?);
//!     let summary = Archiver::new(Arc::new(config), api).run().await?;
//!     println!("{} files saved", summary.downloads.saved);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;
pub mod retry;

// Re-exports for convenience
pub use api::{BlogApi, RequestSigner};
pub use config::{Config, FeedKind};
pub use download::{Archiver, RunSummary};
pub use error::{Error, Result};
pub use media::{MediaExtractor, MediaJob};
