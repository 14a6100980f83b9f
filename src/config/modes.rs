//! Feed kind definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which feed of a blog gets archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    /// The blog's own posts (default).
    #[default]
    Posts,
    /// Posts the blog has liked.
    Likes,
}

impl FeedKind {
    /// API path segment for this feed.
    pub fn path_segment(&self) -> &'static str {
        match self {
            FeedKind::Posts => "posts",
            FeedKind::Likes => "likes",
        }
    }

    /// Key under `response` that holds the post list.
    pub fn posts_key(&self) -> &'static str {
        match self {
            FeedKind::Posts => "posts",
            FeedKind::Likes => "liked_posts",
        }
    }

    /// File name the raw page at `offset` is persisted under.
    pub fn metadata_file_name(&self, offset: u32) -> String {
        match self {
            FeedKind::Posts => format!("{}.json", offset),
            FeedKind::Likes => format!("likes-{}.json", offset),
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for FeedKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "posts" => Ok(FeedKind::Posts),
            "likes" => Ok(FeedKind::Likes),
            _ => Err(format!("Unknown feed kind: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_file_names() {
        assert_eq!(FeedKind::Posts.metadata_file_name(0), "0.json");
        assert_eq!(FeedKind::Posts.metadata_file_name(40), "40.json");
        assert_eq!(FeedKind::Likes.metadata_file_name(20), "likes-20.json");
    }

    #[test]
    fn test_posts_key() {
        assert_eq!(FeedKind::Posts.posts_key(), "posts");
        assert_eq!(FeedKind::Likes.posts_key(), "liked_posts");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Likes".parse::<FeedKind>().unwrap(), FeedKind::Likes);
        assert!("reblogs".parse::<FeedKind>().is_err());
    }
}
