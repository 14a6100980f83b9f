//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, FeedKind};

/// Blog archiver CLI.
#[derive(Parser, Debug)]
#[command(
    name = "blog-archiver",
    version,
    about = "Archive blog posts or likes together with their media",
    long_about = "Pages through each blog's posts (or likes), saves every page of raw metadata \
                  and downloads the photos, native videos and audio it references."
)]
pub struct Args {
    /// Blog handle(s) to archive.
    pub blogs: Vec<String>,

    /// Connections for media downloads.
    #[arg(short = 'n', long)]
    pub conns: Option<usize>,

    /// API key.
    #[arg(short = 'k', long = "api-key", env = "TUMBLR_API_KEY")]
    pub api_key: Option<String>,

    /// Don't save media.
    #[arg(long)]
    pub no_media: bool,

    /// Save all media in the same directory.
    #[arg(long)]
    pub global_media: bool,

    /// Don't save media of reblogs.
    #[arg(long)]
    pub no_reblogs: bool,

    /// Save likes instead of posts.
    #[arg(long)]
    pub likes: bool,

    /// Base directory for the archive.
    #[arg(short = 'd', long = "directory")]
    pub output_directory: Option<PathBuf>,

    /// Media jobs allowed to wait in the queue before crawling pauses.
    #[arg(long)]
    pub queue_depth: Option<usize>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "archive.toml")]
    pub config: PathBuf,

    /// Hide per-file download messages and progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if !self.blogs.is_empty() {
            config.targets.blogs = self.blogs;
        }

        if let Some(api_key) = self.api_key {
            config.account.api_key = api_key;
        }

        if let Some(conns) = self.conns {
            config.options.conns = conns;
        }

        if let Some(depth) = self.queue_depth {
            config.options.queue_depth = depth;
        }

        if let Some(dir) = self.output_directory {
            config.options.output_directory = Some(dir);
        }

        // Boolean flags (only override if set to non-default)
        if self.no_media {
            config.options.no_media = true;
        }

        if self.global_media {
            config.options.global_media = true;
        }

        if self.no_reblogs {
            config.options.no_reblogs = true;
        }

        if self.likes {
            config.options.feed = FeedKind::Likes;
        }

        if self.quiet {
            config.options.show_downloads = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "blog-archiver",
            "--conns",
            "8",
            "--api-key",
            "0123456789abcdef",
            "--likes",
            "--no-reblogs",
            "--global-media",
            "staff",
            "engineering",
        ]);

        let mut config = Config::default();
        config.targets.blogs = vec!["from-file".into()];
        args.merge_into_config(&mut config);

        assert_eq!(config.targets.blogs, vec!["staff", "engineering"]);
        assert_eq!(config.options.conns, 8);
        assert_eq!(config.account.api_key, "0123456789abcdef");
        assert_eq!(config.options.feed, FeedKind::Likes);
        assert!(config.options.no_reblogs);
        assert!(config.options.global_media);
        assert!(!config.options.no_media);
    }

    #[test]
    fn test_no_args_keep_file_values() {
        let args = Args::parse_from(["blog-archiver"]);

        let mut config = Config::default();
        config.targets.blogs = vec!["from-file".into()];
        config.options.conns = 2;
        args.merge_into_config(&mut config);

        assert_eq!(config.targets.blogs, vec!["from-file"]);
        assert_eq!(config.options.conns, 2);
        assert_eq!(config.options.feed, FeedKind::Posts);
    }
}
