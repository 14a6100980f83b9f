//! Media extraction from post payloads.

use std::sync::Arc;

use crate::api::Tree;
use crate::config::Config;
use crate::error::Result;
use crate::fs::{ensure_dir, StorageLayout};
use crate::media::job::MediaJob;

/// Kind of a post, from its `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Photo,
    Video,
    Audio,
    Other,
}

impl PostKind {
    pub fn of<T: Tree>(post: &T) -> Self {
        match post.string_at(&["type"]) {
            "photo" => PostKind::Photo,
            "video" => PostKind::Video,
            "audio" => PostKind::Audio,
            _ => PostKind::Other,
        }
    }
}

/// Video sub-type hosted by the platform itself; other video types are embeds.
const NATIVE_VIDEO_TYPE: &str = "tumblr";

/// Options that decide which posts yield media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub save_media: bool,
    pub skip_reblogs: bool,
}

impl ExtractOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            save_media: config.saves_media(),
            skip_reblogs: config.options.no_reblogs,
        }
    }
}

/// Turns pages of posts into media jobs.
#[derive(Debug, Clone)]
pub struct MediaExtractor {
    options: ExtractOptions,
    layout: Arc<StorageLayout>,
}

impl MediaExtractor {
    pub fn new(options: ExtractOptions, layout: Arc<StorageLayout>) -> Self {
        Self { options, layout }
    }

    /// Make sure the blog's media directory exists before jobs are queued.
    ///
    /// Does nothing when media is disabled or saved to the global directory.
    pub async fn prepare(&self, handle: &str) -> Result<()> {
        if !self.options.save_media || self.layout.is_global_media() {
            return Ok(());
        }
        ensure_dir(&self.layout.media_dir(handle)?).await
    }

    /// Media jobs for `posts`, in post order.
    pub fn extract<T: Tree>(&self, handle: &str, posts: &[T]) -> Vec<MediaJob> {
        if !self.options.save_media {
            return Vec::new();
        }

        let collection: Arc<str> = Arc::from(handle);
        let mut jobs = Vec::new();

        for post in posts {
            if self.options.skip_reblogs && post.exists(&["reblogged_from_id"]) {
                continue;
            }
            jobs.extend(post_media(&collection, post));
        }

        jobs
    }
}

fn post_media<T: Tree>(collection: &Arc<str>, post: &T) -> Vec<MediaJob> {
    match PostKind::of(post) {
        PostKind::Photo => post
            .array_at(&["photos"])
            .iter()
            .filter_map(|photo| {
                MediaJob::new(collection.clone(), photo.string_at(&["original_size", "url"]))
            })
            .collect(),
        PostKind::Video => {
            if post.string_at(&["video_type"]) != NATIVE_VIDEO_TYPE {
                return Vec::new();
            }
            let url = post.string_at(&["video_url"]);
            match MediaJob::new(collection.clone(), url) {
                Some(job) => vec![job],
                None => {
                    tracing::debug!(
                        blog = %collection,
                        "Native video post has no video_url, nothing to download"
                    );
                    Vec::new()
                }
            }
        }
        PostKind::Audio => {
            let mut url = post.string_at(&["audio_url"]);
            if url.is_empty() {
                url = post.string_at(&["audio_source_url"]);
            }
            MediaJob::new(collection.clone(), url).into_iter().collect()
        }
        PostKind::Other => Vec::new(),
    }
}
