//! Paginated crawl of one blog.

use crate::api::PAGE_SIZE;
use crate::download::page::PageFetcher;
use crate::download::pool::JobQueue;
use crate::download::state::{Collection, CollectionState};
use crate::error::Result;
use crate::fs::ensure_dir;
use crate::media::MediaExtractor;

/// Walks a blog's feed page by page and queues its media.
pub struct CollectionCrawler<'a> {
    fetcher: &'a PageFetcher,
    extractor: &'a MediaExtractor,
    queue: &'a JobQueue,
}

impl<'a> CollectionCrawler<'a> {
    pub fn new(fetcher: &'a PageFetcher, extractor: &'a MediaExtractor, queue: &'a JobQueue) -> Self {
        Self {
            fetcher,
            extractor,
            queue,
        }
    }

    /// Crawl offsets 0, 20, 40, ... until the first empty page.
    ///
    /// Any error aborts this collection; pages already fetched stay on disk
    /// and queued jobs still run.
    pub async fn crawl(&self, collection: &Collection) -> Result<CollectionState> {
        let handle = collection.handle();
        ensure_dir(collection.dir()).await?;

        let mut state = CollectionState::new(handle);
        let mut offset: u32 = 0;

        loop {
            let page = self.fetcher.fetch_page(collection, offset).await?;
            let posts = page.posts();
            state.record_page(posts.len());

            tracing::debug!(
                blog = handle,
                offset = offset,
                posts = posts.len(),
                "Fetched page"
            );

            if !page.has_more() {
                break;
            }

            self.extractor.prepare(handle).await?;

            for job in self.extractor.extract(handle, posts) {
                self.queue.submit(job).await?;
                state.increment_queued();
            }

            offset += PAGE_SIZE;
        }

        tracing::info!(
            "Finished {} of \"{}\": {} pages, {} posts, {} media queued",
            self.fetcher.kind(),
            handle,
            state.pages_fetched,
            state.posts_seen,
            state.jobs_queued
        );

        Ok(state)
    }
}
