//! Run orchestration across blogs.

use std::sync::Arc;

use crate::api::BlogApi;
use crate::config::{normalize_handle, Config};
use crate::download::crawler::CollectionCrawler;
use crate::download::media::MediaDownloader;
use crate::download::page::PageFetcher;
use crate::download::pool::WorkerPool;
use crate::download::state::{Collection, RunSummary};
use crate::error::{Error, Result};
use crate::fs::{ensure_dir, StorageLayout};
use crate::media::{ExtractOptions, MediaExtractor};

/// Archives every configured blog with one shared download pool.
pub struct Archiver {
    config: Arc<Config>,
    api: Arc<BlogApi>,
    layout: Arc<StorageLayout>,
}

impl Archiver {
    pub fn new(config: Arc<Config>, api: Arc<BlogApi>) -> Self {
        let layout = Arc::new(StorageLayout::from_config(&config));
        Self {
            config,
            api,
            layout,
        }
    }

    /// Crawl all blogs in order, then wait for every queued download.
    ///
    /// Only a failure to create the global media directory is returned as an
    /// error. A blog whose crawl fails is logged, recorded in the summary and
    /// skipped.
    pub async fn run(&self) -> Result<RunSummary> {
        let config = &self.config;

        if config.saves_media() && self.layout.is_global_media() {
            let dir = self.layout.global_media_dir();
            ensure_dir(&dir).await.map_err(|e| {
                Error::Config(format!(
                    "Cannot create media directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        let downloader = Arc::new(MediaDownloader::new(
            Arc::clone(&self.api),
            Arc::clone(&self.layout),
            config.options.show_downloads,
        ));
        let (queue, pool) = WorkerPool::start(
            config.effective_conns(),
            config.options.queue_depth,
            downloader,
        );

        let fetcher = PageFetcher::new(Arc::clone(&self.api), config.options.feed);
        let extractor = MediaExtractor::new(
            ExtractOptions::from_config(config),
            Arc::clone(&self.layout),
        );
        let crawler = CollectionCrawler::new(&fetcher, &extractor, &queue);

        let mut summary = RunSummary::default();

        for handle in &config.targets.blogs {
            let handle = normalize_handle(handle);
            tracing::info!("Starting archiver on \"{}\"", handle);

            let result = match Collection::new(handle, &self.layout) {
                Ok(collection) => crawler.crawl(&collection).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(state) => summary.add_collection(state),
                Err(e) => {
                    tracing::error!("Aborting \"{}\": {}", handle, e);
                    summary.mark_failed(handle);
                }
            }
        }

        tracing::debug!(
            "Crawl finished, waiting for {} download workers",
            pool.size()
        );
        summary.downloads = pool.shutdown(queue).await;

        Ok(summary)
    }
}
