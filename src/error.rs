//! Error types for the blog-archiver application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // API errors
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Giving up after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("Page at offset {offset} of \"{handle}\" failed: {source}")]
    PageFetch {
        handle: String,
        offset: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to parse metadata at offset {offset} of \"{handle}\": {source}")]
    MetadataParse {
        handle: String,
        offset: u32,
        #[source]
        source: serde_json::Error,
    },

    // Download errors
    #[error("Job queue is closed")]
    QueueClosed,

    // File system errors
    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a fetch failure with the page it belongs to.
    pub fn at_page(self, handle: &str, offset: u32) -> Self {
        Error::PageFetch {
            handle: handle.to_string(),
            offset,
            source: Box::new(self),
        }
    }

    /// Whether this error came from configuration loading or validation.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_)
        )
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_ERROR: i32 = 3;
    pub const UNEXPECTED_ERROR: i32 = 5;
    pub const SOME_COLLECTIONS_FAILED: i32 = 6;
}
