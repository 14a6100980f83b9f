//! Download module for the ingestion pipeline.
//!
//! This module provides:
//! - Metadata page fetching and persistence
//! - Paginated per-blog crawling
//! - The media download worker pool
//! - Media file downloading
//! - Orchestration across blogs

pub mod archive;
pub mod crawler;
pub mod media;
pub mod page;
pub mod pool;
pub mod state;

pub use archive::Archiver;
pub use crawler::CollectionCrawler;
pub use media::MediaDownloader;
pub use page::{Page, PageFetcher};
pub use pool::{DownloadOutcome, JobHandler, JobQueue, PoolStats, PoolSummary, WorkerPool};
pub use state::{Collection, CollectionState, RunSummary};
