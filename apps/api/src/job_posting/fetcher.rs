//! Outbound HTTP fetch for job posting pages.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use super::extract::extract_job_posting;
use super::{FetchError, JobPosting};

/// Identity sent with every fetch; many job boards refuse non-browser agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36";

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieves the text of a job posting.
///
/// Carried in `AppState` as `Arc<dyn JobPostingFetcher>` so handlers can be
/// exercised against a stub.
#[async_trait]
pub trait JobPostingFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<JobPosting, FetchError>;
}

/// reqwest-backed fetcher. One GET per call, no retries, no caching.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build job posting HTTP client")?;
        Ok(Self { client, timeout })
    }

    fn classify(&self, url: &str, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl JobPostingFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<JobPosting, FetchError> {
        if url.trim().is_empty() {
            return Err(FetchError::EmptyUrl);
        }

        info!("Fetching job posting: {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Job posting fetch returned {status} for {url}");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response.text().await.map_err(|e| self.classify(url, e))?;
        let posting = extract_job_posting(&html)?;

        info!(
            "Extracted job posting '{}' ({} chars, truncated: {})",
            posting.title,
            posting.content.chars().count(),
            posting.truncated
        );

        Ok(posting)
    }
}
