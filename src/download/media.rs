//! Media file downloading.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use indicatif::MultiProgress;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::api::BlogApi;
use crate::download::pool::{DownloadOutcome, JobHandler};
use crate::error::Result;
use crate::fs::{media_file_name, StorageLayout};
use crate::media::MediaJob;
use crate::output::create_download_bar;

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Downloads media jobs into the archive.
pub struct MediaDownloader {
    api: Arc<BlogApi>,
    layout: Arc<StorageLayout>,
    progress: Option<MultiProgress>,
}

impl MediaDownloader {
    pub fn new(api: Arc<BlogApi>, layout: Arc<StorageLayout>, show_progress: bool) -> Self {
        Self {
            api,
            layout,
            progress: show_progress.then(MultiProgress::new),
        }
    }

    /// Where a job's file is saved.
    pub fn destination(&self, job: &MediaJob) -> Result<PathBuf> {
        let file_name = media_file_name(job.url())?;
        Ok(self.layout.media_dir(job.collection())?.join(file_name))
    }

    /// Download one job. Never fails from the caller's point of view.
    ///
    /// The destination is created exclusively before any request is made, so
    /// an existing file means the job was satisfied by an earlier run. Any
    /// failure after creation removes the file again.
    pub async fn download(&self, job: &MediaJob) -> DownloadOutcome {
        let path = match self.destination(job) {
            Ok(path) => path,
            Err(e) => {
                return DownloadOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return DownloadOutcome::AlreadyPresent { path };
            }
            Err(e) => {
                return DownloadOutcome::Failed {
                    reason: format!("Failed to create {}: {}", path.display(), e),
                }
            }
        };

        match self.transfer(job, file).await {
            Ok(bytes) => DownloadOutcome::Saved { path, bytes },
            Err(e) => {
                remove_partial(&path).await;
                DownloadOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Fetch the media and stream it into `file`.
    async fn transfer(&self, job: &MediaJob, mut file: File) -> Result<u64> {
        let response = self.api.download_file(job.url()).await?;

        let progress = match (&self.progress, response.content_length()) {
            (Some(multi), Some(len)) if len > PROGRESS_THRESHOLD => {
                Some(multi.add(create_download_bar(len)))
            }
            _ => None,
        };

        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            if let Some(ref pb) = progress {
                pb.set_position(downloaded);
            }
        }

        file.flush().await?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(downloaded)
    }
}

#[async_trait]
impl JobHandler for MediaDownloader {
    async fn handle(&self, job: &MediaJob) -> DownloadOutcome {
        self.download(job).await
    }
}

/// Best-effort removal of a partially written file.
async fn remove_partial(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!("Failed to remove partial file {}: {}", path.display(), e);
    }
}
