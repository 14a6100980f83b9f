//! Configuration structures and loading logic.

use crate::config::modes::FeedKind;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
///
/// Built once at startup (file, then CLI overrides, then validation) and
/// shared read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub targets: TargetConfig,

    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub retry: RetryConfig,
}

/// Which blogs to archive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Blog handles, processed in order.
    #[serde(default)]
    pub blogs: Vec<String>,
}

/// API credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// API consumer key.
    #[serde(default)]
    pub api_key: String,

    /// User agent sent with metadata requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            user_agent: default_user_agent(),
        }
    }
}

/// Archive options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Number of concurrent media download workers.
    #[serde(default = "default_conns")]
    pub conns: usize,

    /// Jobs that may wait in the queue before the crawl blocks.
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,

    /// Don't save media at all.
    #[serde(default)]
    pub no_media: bool,

    /// Save all media in one top-level `media` directory.
    #[serde(default)]
    pub global_media: bool,

    /// Don't save media of reblogged posts.
    #[serde(default)]
    pub no_reblogs: bool,

    /// Feed to archive (posts or likes).
    #[serde(default)]
    pub feed: FeedKind,

    /// Base directory for the archive.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// Whether to show per-file download messages and progress bars.
    #[serde(default = "default_true")]
    pub show_downloads: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            conns: default_conns(),
            queue_depth: default_queue_depth(),
            no_media: false,
            global_media: false,
            no_reblogs: false,
            feed: FeedKind::default(),
            output_directory: None,
            show_downloads: true,
        }
    }
}

/// API endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Exponential backoff policy for metadata requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_initial_interval_ms")]
    pub initial_interval_ms: u64,

    /// Each delay is drawn from `interval * (1 ± randomization_factor)`.
    #[serde(default = "default_randomization_factor")]
    pub randomization_factor: f64,

    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    #[serde(default = "default_max_interval_ms")]
    pub max_interval_ms: u64,

    /// Stop retrying once this much time has passed since the first attempt.
    #[serde(default = "default_max_elapsed_ms")]
    pub max_elapsed_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: default_initial_interval_ms(),
            randomization_factor: default_randomization_factor(),
            multiplier: default_multiplier(),
            max_interval_ms: default_max_interval_ms(),
            max_elapsed_ms: default_max_elapsed_ms(),
        }
    }
}

impl RetryConfig {
    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    pub fn max_interval(&self) -> Duration {
        Duration::from_millis(self.max_interval_ms)
    }

    pub fn max_elapsed(&self) -> Duration {
        Duration::from_millis(self.max_elapsed_ms)
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)".to_string()
}

fn default_base_url() -> String {
    "https://api-http2.tumblr.com".to_string()
}

fn default_conns() -> usize {
    4
}

fn default_queue_depth() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_initial_interval_ms() -> u64 {
    500
}

fn default_randomization_factor() -> f64 {
    0.5
}

fn default_multiplier() -> f64 {
    1.5
}

fn default_max_interval_ms() -> u64 {
    60_000
}

fn default_max_elapsed_ms() -> u64 {
    15 * 60 * 1000
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective archive root directory.
    pub fn output_directory(&self) -> PathBuf {
        self.options
            .output_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Whether media extraction and downloading run at all.
    ///
    /// Zero workers means nothing would ever drain the queue, so it disables
    /// media the same way `no_media` does.
    pub fn saves_media(&self) -> bool {
        !self.options.no_media && self.options.conns > 0
    }

    /// Worker count actually started.
    pub fn effective_conns(&self) -> usize {
        if self.saves_media() {
            self.options.conns
        } else {
            0
        }
    }
}
