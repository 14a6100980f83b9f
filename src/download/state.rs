//! Collection identity and crawl statistics.

use std::path::{Path, PathBuf};

use crate::download::pool::PoolSummary;
use crate::error::Result;
use crate::fs::StorageLayout;

/// One blog being archived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    handle: String,
    dir: PathBuf,
}

impl Collection {
    /// Resolve a blog handle against the storage layout.
    pub fn new(handle: impl Into<String>, layout: &StorageLayout) -> Result<Self> {
        let handle = handle.into();
        let dir = layout.collection_dir(&handle)?;
        Ok(Self { handle, dir })
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Directory the blog's metadata pages are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Per-blog crawl statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionState {
    pub handle: String,
    pub pages_fetched: u64,
    pub posts_seen: u64,
    pub jobs_queued: u64,
}

impl CollectionState {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            ..Default::default()
        }
    }

    /// Record a fetched page and the number of posts on it.
    pub fn record_page(&mut self, posts: usize) {
        self.pages_fetched += 1;
        self.posts_seen += posts as u64;
    }

    pub fn increment_queued(&mut self) {
        self.jobs_queued += 1;
    }
}

/// Statistics for a whole run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub collections: Vec<CollectionState>,
    pub failed: Vec<String>,
    pub downloads: PoolSummary,
}

impl RunSummary {
    /// Add statistics from a completed crawl.
    pub fn add_collection(&mut self, state: CollectionState) {
        self.collections.push(state);
    }

    /// Mark a blog whose crawl was aborted.
    pub fn mark_failed(&mut self, handle: &str) {
        self.failed.push(handle.to_string());
    }

    pub fn collections_processed(&self) -> usize {
        self.collections.len()
    }

    pub fn collections_failed(&self) -> usize {
        self.failed.len()
    }

    pub fn total_jobs_queued(&self) -> u64 {
        self.collections.iter().map(|c| c.jobs_queued).sum()
    }
}
