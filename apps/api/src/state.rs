use std::sync::Arc;

use crate::job_posting::JobPostingFetcher;
use crate::llm_client::ChatClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn JobPostingFetcher>,
    pub llm: Arc<dyn ChatClient>,
}
