//! Media job representation.

use std::fmt;
use std::sync::Arc;

/// One media file to fetch for a blog.
///
/// The URL is never empty; [`MediaJob::new`] refuses empty candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaJob {
    collection: Arc<str>,
    url: String,
}

impl MediaJob {
    /// Create a job, or `None` when the URL is empty.
    pub fn new(collection: impl Into<Arc<str>>, url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        if url.is_empty() {
            return None;
        }
        Some(Self {
            collection: collection.into(),
            url,
        })
    }

    /// Handle of the blog the media belongs to.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for MediaJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.url, self.collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_url() {
        assert!(MediaJob::new("staff", "").is_none());

        let job = MediaJob::new("staff", "https://example.com/a.jpg").unwrap();
        assert_eq!(job.collection(), "staff");
        assert_eq!(job.url(), "https://example.com/a.jpg");
    }
}
