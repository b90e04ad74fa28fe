//! Cover letter drafting.

use tracing::info;

use crate::analysis::prompts::build_cover_letter_prompt;
use crate::errors::AppError;
use crate::llm_client::{ChatClient, CompletionOptions, LlmError};

/// Free-text mode, warmer temperature for more varied prose.
pub const COVER_LETTER_OPTIONS: CompletionOptions = CompletionOptions::text(0.8);

/// Returns the model's cover letter as-is; only an empty reply is rejected.
pub async fn generate_cover_letter(
    cv: &str,
    job_content: &str,
    match_percentage: f64,
    llm: &dyn ChatClient,
) -> Result<String, AppError> {
    let prompt = build_cover_letter_prompt(cv, job_content, match_percentage);
    let letter = llm
        .complete(&prompt.system, &prompt.user, COVER_LETTER_OPTIONS)
        .await?;

    if letter.trim().is_empty() {
        return Err(LlmError::EmptyContent.into());
    }

    info!("Generated cover letter ({} chars)", letter.chars().count());
    Ok(letter)
}
