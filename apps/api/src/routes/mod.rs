pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::errors::AppError;
use crate::job_posting::handlers as job_posting;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/api/analyze-job", post(analysis::handle_analyze_job))
        .route(
            "/api/generate-cover-letter",
            post(analysis::handle_generate_cover_letter),
        )
        .route(
            "/api/fetch-job-posting",
            post(job_posting::handle_fetch_job_posting),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::job_posting::{FetchError, JobPosting, JobPostingFetcher};
    use crate::llm_client::{ChatClient, CompletionOptions, LlmError};

    enum StubFetch {
        Page(String),
        Timeout,
    }

    struct StubFetcher(StubFetch);

    #[async_trait]
    impl JobPostingFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<JobPosting, FetchError> {
            match &self.0 {
                StubFetch::Page(content) => Ok(JobPosting {
                    title: "Stub".to_string(),
                    content: content.clone(),
                    truncated: false,
                }),
                StubFetch::Timeout => Err(FetchError::Timeout {
                    url: url.to_string(),
                    timeout: Duration::from_secs(10),
                }),
            }
        }
    }

    /// Replies with a canned result and remembers what it was asked.
    struct StubLlm {
        reply: Result<&'static str, &'static str>,
        calls: Mutex<Vec<(String, CompletionOptions)>>,
    }

    impl StubLlm {
        fn replying(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatClient for StubLlm {
        async fn complete(
            &self,
            _system: &str,
            user: &str,
            options: CompletionOptions,
        ) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push((user.to_string(), options));
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(message) => Err(LlmError::Api {
                    status: 429,
                    message: message.to_string(),
                }),
            }
        }
    }

    const REPORT: &str = r#"{
        "match_percentage": 83,
        "strengths": ["Rust"],
        "improvements": ["Add metrics"],
        "missing_skills": ["Go"],
        "summary": "Good fit."
    }"#;

    fn app(fetch: StubFetch, llm: Arc<StubLlm>) -> Router {
        build_router(AppState {
            fetcher: Arc::new(StubFetcher(fetch)),
            llm,
        })
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_root_reports_name_and_version() {
        let app = app(StubFetch::Page("".into()), StubLlm::replying(""));
        let (status, body) = send(app, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "AI Job Booster API");
        assert_eq!(body["version"], "1.0.0");
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(StubFetch::Page("".into()), StubLlm::replying(""));
        let (status, body) = send(app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_path_is_json_not_found() {
        let app = app(StubFetch::Page("".into()), StubLlm::replying(""));
        let (status, body) = send(app, "GET", "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Not Found");
    }

    #[tokio::test]
    async fn test_wrong_method_is_json_method_not_allowed() {
        let app = app(StubFetch::Page("".into()), StubLlm::replying(""));
        let (status, body) = send(app, "GET", "/api/analyze-job", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["detail"], "Method Not Allowed");
    }

    #[tokio::test]
    async fn test_analyze_job_returns_report_and_preview() {
        let page = "Title\n\nRust role. ".repeat(100);
        let llm = StubLlm::replying(REPORT);
        let app = app(StubFetch::Page(page), llm.clone());

        let (status, body) = send(
            app,
            "POST",
            "/api/analyze-job",
            Some(json!({
                "cv_content": "Rust engineer",
                "job_posting_url": "https://jobs.example.com/1"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysis"]["match_percentage"], 83.0);
        assert_eq!(body["analysis"]["missing_skills"], json!(["Go"]));
        assert_eq!(body["job_content"].as_str().unwrap().chars().count(), 500);

        let calls = llm.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].1.json_object);
        assert!((calls[0].1.temperature - 0.7).abs() < f32::EPSILON);
        assert!(calls[0].0.contains("CV Content:\nRust engineer"));
    }

    #[tokio::test]
    async fn test_analyze_job_fetch_timeout_is_bad_request() {
        let llm = StubLlm::replying(REPORT);
        let app = app(StubFetch::Timeout, llm.clone());

        let (status, body) = send(
            app,
            "POST",
            "/api/analyze-job",
            Some(json!({
                "cv_content": "Rust engineer",
                "job_posting_url": "https://slow.example.com/job"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.contains("timed out"));
        assert!(llm.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_job_malformed_llm_json_is_server_error() {
        let app = app(
            StubFetch::Page("Title\n\nBody".into()),
            StubLlm::replying("{\"match_percentage\": 80, \"strengths\": ["),
        );

        let (status, body) = send(
            app,
            "POST",
            "/api/analyze-job",
            Some(json!({ "cv_content": "cv", "job_posting_url": "https://x.example" })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Invalid LLM response"));
    }

    #[tokio::test]
    async fn test_analyze_job_out_of_range_percentage_is_server_error() {
        let app = app(
            StubFetch::Page("Title\n\nBody".into()),
            StubLlm::replying(
                r#"{"match_percentage": 140, "strengths": [], "improvements": [], "missing_skills": [], "summary": ""}"#,
            ),
        );

        let (status, _) = send(
            app,
            "POST",
            "/api/analyze-job",
            Some(json!({ "cv_content": "cv", "job_posting_url": "https://x.example" })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_analyze_job_provider_error_is_server_error() {
        let app = app(
            StubFetch::Page("Title\n\nBody".into()),
            StubLlm::failing("Rate limit reached"),
        );

        let (status, body) = send(
            app,
            "POST",
            "/api/analyze-job",
            Some(json!({ "cv_content": "cv", "job_posting_url": "https://x.example" })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].as_str().unwrap().contains("Rate limit reached"));
    }

    #[tokio::test]
    async fn test_analyze_job_missing_field_is_bad_request() {
        let app = app(StubFetch::Page("".into()), StubLlm::replying(REPORT));

        let (status, body) = send(
            app,
            "POST",
            "/api/analyze-job",
            Some(json!({ "cv_content": "cv" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("job_posting_url"));
    }

    #[tokio::test]
    async fn test_cover_letter_uses_text_mode() {
        let llm = StubLlm::replying("Dear Hiring Manager,\n\nI am excited...");
        let app = app(StubFetch::Page("".into()), llm.clone());

        let (status, body) = send(
            app,
            "POST",
            "/api/generate-cover-letter",
            Some(json!({
                "cv_content": "Rust engineer",
                "job_posting_content": "Backend role",
                "match_percentage": 83.5
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["cover_letter"]
            .as_str()
            .unwrap()
            .starts_with("Dear Hiring Manager"));

        let calls = llm.calls.lock().unwrap();
        assert!(!calls[0].1.json_object);
        assert!((calls[0].1.temperature - 0.8).abs() < f32::EPSILON);
        assert!(calls[0].0.contains("Match Percentage: 83.5%"));
    }

    #[tokio::test]
    async fn test_cover_letter_empty_reply_is_server_error() {
        let app = app(StubFetch::Page("".into()), StubLlm::replying("   "));

        let (status, _) = send(
            app,
            "POST",
            "/api/generate-cover-letter",
            Some(json!({
                "cv_content": "cv",
                "job_posting_content": "job",
                "match_percentage": 50
            })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_fetch_job_posting_requires_url() {
        for payload in [json!({ "url": "" }), json!({})] {
            let app = app(StubFetch::Page("unused".into()), StubLlm::replying(""));
            let (status, body) = send(app, "POST", "/api/fetch-job-posting", Some(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["detail"], "URL is required");
        }
    }

    #[tokio::test]
    async fn test_fetch_job_posting_returns_full_content() {
        let page = "x".repeat(10_000);
        let app = app(StubFetch::Page(page), StubLlm::replying(""));

        let (status, body) = send(
            app,
            "POST",
            "/api/fetch-job-posting",
            Some(json!({ "url": "https://jobs.example.com/7" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["url"], "https://jobs.example.com/7");
        assert_eq!(body["content"].as_str().unwrap().len(), 10_000);
    }

    #[tokio::test]
    async fn test_fetch_job_posting_failure_is_bad_request() {
        let app = app(StubFetch::Timeout, StubLlm::replying(""));

        let (status, body) = send(
            app,
            "POST",
            "/api/fetch-job-posting",
            Some(json!({ "url": "https://slow.example.com" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body["detail"].as_str().unwrap().is_empty());
    }
}
