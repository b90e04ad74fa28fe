//! Match report — LLM judgement of how well a CV fits a job posting.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::analysis::prompts::build_analysis_prompt;
use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, ChatClient, CompletionOptions};

/// Analysis runs in JSON mode with some room for judgement language.
pub const ANALYSIS_OPTIONS: CompletionOptions = CompletionOptions::json(0.7);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// 0 – 100, validated, never clamped.
    pub match_percentage: f64,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub missing_skills: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("response is not a valid match report: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("match_percentage {0} is outside 0-100")]
    OutOfRange(f64),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        AppError::ResponseValidation(err.to_string())
    }
}

impl MatchReport {
    /// Parses raw LLM output into a report, rejecting missing keys, wrong
    /// types, and percentages outside [0, 100].
    pub fn parse(raw: &str) -> Result<Self, ReportError> {
        let report: MatchReport = serde_json::from_str(strip_json_fences(raw))?;
        if !(0.0..=100.0).contains(&report.match_percentage) {
            return Err(ReportError::OutOfRange(report.match_percentage));
        }
        Ok(report)
    }
}

/// Asks the LLM to compare a CV against job posting text and validates the reply.
pub async fn analyze_match(
    cv: &str,
    job_content: &str,
    llm: &dyn ChatClient,
) -> Result<MatchReport, AppError> {
    let prompt = build_analysis_prompt(cv, job_content);
    let raw = llm
        .complete(&prompt.system, &prompt.user, ANALYSIS_OPTIONS)
        .await?;

    let report = MatchReport::parse(&raw)?;
    info!(
        "Match analysis complete: {}% ({} strengths, {} missing skills)",
        report.match_percentage,
        report.strengths.len(),
        report.missing_skills.len()
    );
    Ok(report)
}
