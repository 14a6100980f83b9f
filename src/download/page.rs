//! Metadata page fetching.

use std::path::Path;
use std::sync::Arc;

use futures::StreamExt;
use reqwest::Response;
use serde_json::Value;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::{BlogApi, FeedRequest, Tree};
use crate::config::FeedKind;
use crate::download::state::Collection;
use crate::error::{Error, Result};

/// Upper bound on the buffer reserved up front from `Content-Length`.
const PREALLOC_LIMIT: u64 = 1 << 20;

/// One fetched and parsed page of a feed.
#[derive(Debug)]
pub struct Page {
    kind: FeedKind,
    document: Value,
}

impl Page {
    /// Posts on this page.
    pub fn posts(&self) -> &[Value] {
        self.document.array_at(&["response", self.kind.posts_key()])
    }

    /// Whether another page may follow. False exactly when the page is empty.
    pub fn has_more(&self) -> bool {
        !self.posts().is_empty()
    }
}

/// Fetches, persists and parses metadata pages.
pub struct PageFetcher {
    api: Arc<BlogApi>,
    kind: FeedKind,
}

impl PageFetcher {
    pub fn new(api: Arc<BlogApi>, kind: FeedKind) -> Self {
        Self { api, kind }
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    /// Fetch the page at `offset`.
    ///
    /// The request is retried under the backoff policy. The raw body is
    /// written to the collection directory (overwriting an earlier snapshot)
    /// while it is read, then parsed. Parse failures are not retried.
    pub async fn fetch_page(&self, collection: &Collection, offset: u32) -> Result<Page> {
        let handle = collection.handle();
        let request = FeedRequest::new(self.kind, handle, offset);

        let response = self
            .api
            .get_page(&request)
            .await
            .map_err(|e| e.at_page(handle, offset))?;

        let path = collection.dir().join(self.kind.metadata_file_name(offset));
        let raw = persist_body(response, &path)
            .await
            .map_err(|e| e.at_page(handle, offset))?;

        let document: Value =
            serde_json::from_slice(&raw).map_err(|source| Error::MetadataParse {
                handle: handle.to_string(),
                offset,
                source,
            })?;

        Ok(Page {
            kind: self.kind,
            document,
        })
    }
}

/// Stream a response body to `path` (create or truncate), returning the bytes.
async fn persist_body(response: Response, path: &Path) -> Result<Vec<u8>> {
    let mut file = File::create(path).await?;
    let hint = response.content_length().unwrap_or(0).min(PREALLOC_LIMIT);
    let mut body = Vec::with_capacity(hint as usize);
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        body.extend_from_slice(&chunk);
    }

    file.flush().await?;

    Ok(body)
}
