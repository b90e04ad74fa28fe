//! Job posting retrieval: fetch a page, strip non-content markup, keep bounded text.
//!
//! Failures never escape as panics or raw transport errors; every fetch resolves
//! to either a `JobPosting` or a `FetchError` with a readable message.

pub mod extract;
pub mod fetcher;
pub mod handlers;

use thiserror::Error;

pub use extract::truncate_chars;
pub use fetcher::{HttpFetcher, JobPostingFetcher};

/// Text extracted from a job posting page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPosting {
    pub title: String,
    /// `title + "\n\n" + body text`, capped at `MAX_CONTENT_CHARS` characters.
    pub content: String,
    /// Whether the cap cut anything off.
    pub truncated: bool,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error fetching website: URL is empty")]
    EmptyUrl,

    #[error("Error fetching website: request to {url} timed out after {timeout:?}")]
    Timeout {
        url: String,
        timeout: std::time::Duration,
    },

    #[error("Error fetching website: {url} responded with HTTP {status}")]
    Status { status: u16, url: String },

    #[error("Error fetching website: {0}")]
    Network(String),

    #[error("Error fetching website: could not parse page ({0})")]
    Parse(String),
}
