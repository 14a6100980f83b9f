//! Download worker pool.
//!
//! A fixed number of workers share one bounded FIFO queue. The crawl submits
//! jobs through [`JobQueue`]; once it is done, [`WorkerPool::shutdown`] closes
//! the queue and waits until every queued job has been handled. Job failures
//! never leave the worker: they are logged and counted in [`PoolStats`].

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::error::{Error, Result};
use crate::media::MediaJob;

/// Result of handling one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was downloaded.
    Saved { path: PathBuf, bytes: u64 },
    /// The destination already existed; nothing was written.
    AlreadyPresent { path: PathBuf },
    /// The job was abandoned.
    Failed { reason: String },
}

/// Something that can process media jobs.
#[async_trait]
pub trait JobHandler: Send + Sync {
    async fn handle(&self, job: &MediaJob) -> DownloadOutcome;
}

/// Counters shared by all workers.
#[derive(Debug, Default)]
pub struct PoolStats {
    saved: AtomicU64,
    skipped: AtomicU64,
    failed: AtomicU64,
    bytes: AtomicU64,
}

impl PoolStats {
    pub fn record(&self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Saved { bytes, .. } => {
                self.saved.fetch_add(1, Ordering::Relaxed);
                self.bytes.fetch_add(*bytes, Ordering::Relaxed);
            }
            DownloadOutcome::AlreadyPresent { .. } => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
            }
            DownloadOutcome::Failed { .. } => {
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn snapshot(&self) -> PoolSummary {
        PoolSummary {
            saved: self.saved.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            bytes: self.bytes.load(Ordering::Relaxed),
        }
    }
}

/// Final download counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolSummary {
    pub saved: u64,
    pub skipped: u64,
    pub failed: u64,
    pub bytes: u64,
}

impl PoolSummary {
    pub fn total(&self) -> u64 {
        self.saved + self.skipped + self.failed
    }
}

/// Producer side of the job queue.
///
/// Dropping it (or passing it to [`WorkerPool::shutdown`]) closes the queue.
pub struct JobQueue {
    tx: mpsc::Sender<MediaJob>,
}

impl JobQueue {
    /// Enqueue a job, waiting while the queue is full.
    pub async fn submit(&self, job: MediaJob) -> Result<()> {
        self.tx.send(job).await.map_err(|_| Error::QueueClosed)
    }
}

/// The running workers.
pub struct WorkerPool {
    workers: Vec<JoinHandle<()>>,
    stats: Arc<PoolStats>,
}

impl WorkerPool {
    /// Start `workers` workers behind a queue holding up to `queue_depth`
    /// waiting jobs.
    ///
    /// With zero workers nothing consumes the queue and every submit fails
    /// with [`Error::QueueClosed`].
    pub fn start(
        workers: usize,
        queue_depth: usize,
        handler: Arc<dyn JobHandler>,
    ) -> (JobQueue, WorkerPool) {
        let (tx, rx) = mpsc::channel(queue_depth.max(1));
        let rx = Arc::new(Mutex::new(rx));
        let stats = Arc::new(PoolStats::default());

        let handles = (0..workers)
            .map(|id| {
                tokio::spawn(run_worker(
                    id,
                    Arc::clone(&rx),
                    Arc::clone(&handler),
                    Arc::clone(&stats),
                ))
            })
            .collect();

        tracing::debug!(workers, queue_depth, "Started download workers");

        (
            JobQueue { tx },
            WorkerPool {
                workers: handles,
                stats,
            },
        )
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Close the queue and wait for the workers to drain it.
    pub async fn shutdown(self, queue: JobQueue) -> PoolSummary {
        drop(queue);

        for worker in self.workers {
            if let Err(e) = worker.await {
                tracing::error!("Download worker stopped abnormally: {}", e);
            }
        }

        self.stats.snapshot()
    }
}

async fn run_worker(
    id: usize,
    rx: Arc<Mutex<mpsc::Receiver<MediaJob>>>,
    handler: Arc<dyn JobHandler>,
    stats: Arc<PoolStats>,
) {
    loop {
        // Only the receive happens under the lock; jobs run concurrently.
        let job = { rx.lock().await.recv().await };
        let Some(job) = job else {
            break;
        };

        let outcome = handler.handle(&job).await;
        match &outcome {
            DownloadOutcome::Saved { path, bytes } => {
                tracing::info!(worker = id, bytes, "Got media: {} -> {}", job.url(), path.display());
            }
            DownloadOutcome::AlreadyPresent { path } => {
                tracing::debug!(worker = id, "Skipping existing file: {}", path.display());
            }
            DownloadOutcome::Failed { reason } => {
                tracing::warn!(worker = id, "Failed to download media ({}): {}", job.url(), reason);
            }
        }
        stats.record(&outcome);
    }

    tracing::debug!(worker = id, "Download worker finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio_test::assert_ok;

    #[derive(Default)]
    struct CountingHandler {
        handled: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    #[async_trait]
    impl JobHandler for CountingHandler {
        async fn handle(&self, job: &MediaJob) -> DownloadOutcome {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.handled.fetch_add(1, Ordering::SeqCst);

            if job.url().ends_with("bad") {
                DownloadOutcome::Failed {
                    reason: "bad".into(),
                }
            } else {
                DownloadOutcome::Saved {
                    path: PathBuf::from(job.url()),
                    bytes: 10,
                }
            }
        }
    }

    fn job(url: &str) -> MediaJob {
        MediaJob::new("staff", url).unwrap()
    }

    #[tokio::test]
    async fn test_two_workers_drain_five_jobs() {
        let handler = Arc::new(CountingHandler::default());
        let (queue, pool) = WorkerPool::start(2, 1, handler.clone());
        assert_eq!(pool.size(), 2);

        for i in 0..5 {
            assert_ok!(queue.submit(job(&format!("https://x/{}", i))).await);
        }

        let summary = tokio::time::timeout(Duration::from_secs(5), pool.shutdown(queue))
            .await
            .expect("pool drained");

        assert_eq!(handler.handled.load(Ordering::SeqCst), 5);
        assert_eq!(summary.saved, 5);
        assert_eq!(summary.bytes, 50);
        assert!(handler.max_in_flight.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_failures_are_counted_not_propagated() {
        let handler = Arc::new(CountingHandler::default());
        let (queue, pool) = WorkerPool::start(3, 4, handler.clone());

        queue.submit(job("https://x/ok")).await.unwrap();
        queue.submit(job("https://x/bad")).await.unwrap();
        queue.submit(job("https://x/also-bad")).await.unwrap();

        let summary = pool.shutdown(queue).await;
        assert_eq!(summary.saved, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.total(), 3);
    }

    #[tokio::test]
    async fn test_shutdown_with_empty_queue() {
        let handler = Arc::new(CountingHandler::default());
        let (queue, pool) = WorkerPool::start(4, 1, handler.clone());

        let summary = tokio::time::timeout(Duration::from_secs(5), pool.shutdown(queue))
            .await
            .expect("workers exit on closed empty queue");
        assert_eq!(summary, PoolSummary::default());
    }

    #[tokio::test]
    async fn test_zero_workers_rejects_jobs() {
        let handler = Arc::new(CountingHandler::default());
        let (queue, pool) = WorkerPool::start(0, 1, handler.clone());

        let result = queue.submit(job("https://x/1")).await;
        assert!(matches!(result, Err(Error::QueueClosed)));

        let summary = pool.shutdown(queue).await;
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_stats_record() {
        let stats = PoolStats::default();
        stats.record(&DownloadOutcome::AlreadyPresent {
            path: PathBuf::from("a"),
        });
        stats.record(&DownloadOutcome::Saved {
            path: PathBuf::from("b"),
            bytes: 7,
        });

        let summary = stats.snapshot();
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.saved, 1);
        assert_eq!(summary.bytes, 7);
    }
}
