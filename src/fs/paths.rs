//! Archive layout on disk.
//!
//! ```text
//! <root>/<handle>/{offset}.json        page metadata (likes-{offset}.json for likes)
//! <root>/<handle>/media/<file>         per-blog media
//! <root>/media/<file>                  all media, when global media is on
//! ```

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::fs::naming::sanitize_path_component;

/// Name of the media directory, both per blog and global.
pub const MEDIA_DIR: &str = "media";

/// Resolves where pages and media are stored.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    root: PathBuf,
    global_media: bool,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>, global_media: bool) -> Self {
        Self {
            root: root.into(),
            global_media,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.output_directory(), config.options.global_media)
    }

    pub fn is_global_media(&self) -> bool {
        self.global_media
    }

    /// Directory holding a blog's page metadata.
    pub fn collection_dir(&self, handle: &str) -> Result<PathBuf> {
        Ok(self.root.join(sanitize_path_component(handle)?))
    }

    /// Directory a blog's media is saved to.
    pub fn media_dir(&self, handle: &str) -> Result<PathBuf> {
        if self.global_media {
            Ok(self.global_media_dir())
        } else {
            Ok(self.collection_dir(handle)?.join(MEDIA_DIR))
        }
    }

    /// Shared media directory used in global mode.
    pub fn global_media_dir(&self) -> PathBuf {
        self.root.join(MEDIA_DIR)
    }
}

/// Ensure a directory exists, creating parents as needed.
///
/// Existing directories are not an error.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}
