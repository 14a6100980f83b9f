//! Media module for job representation and extraction.

pub mod extractor;
pub mod job;

pub use extractor::{ExtractOptions, MediaExtractor, PostKind};
pub use job::MediaJob;
