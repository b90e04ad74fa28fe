//! Prompt construction for the analysis and cover-letter tasks.
//!
//! Pure functions: the same inputs always produce byte-identical prompts.

use crate::job_posting::truncate_chars;

/// Per-field cap on CV and job text embedded in a prompt, in characters.
pub const MAX_PROMPT_FIELD_CHARS: usize = 3_000;

/// System prompt for CV ↔ job analysis. The keys listed here are the ones
/// `MatchReport` requires.
pub const ANALYSIS_SYSTEM: &str = "\
You are an expert career advisor and recruiter. Analyze the CV and job posting to provide:
1. A match percentage (0-100)
2. Key strengths that match the job requirements
3. Areas that need improvement
4. Specific skills or experiences missing

Respond in JSON format with these keys:
- match_percentage: number
- strengths: array of strings
- improvements: array of strings
- missing_skills: array of strings
- summary: string (brief analysis)";

pub const COVER_LETTER_SYSTEM: &str = "\
You are a professional career coach helping write compelling cover letters.
Create a personalized, professional cover letter that:
1. Highlights relevant experience from the CV
2. Addresses key requirements from the job posting
3. Shows enthusiasm for the role
4. Is concise (3-4 paragraphs)
5. Is written in a professional but warm tone

Respond with the cover letter text only, no additional commentary.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

pub fn build_analysis_prompt(cv: &str, job: &str) -> PromptPair {
    let cv = truncate_chars(cv, MAX_PROMPT_FIELD_CHARS);
    let job = truncate_chars(job, MAX_PROMPT_FIELD_CHARS);

    PromptPair {
        system: ANALYSIS_SYSTEM.to_string(),
        user: format!(
            "CV Content:\n{cv}\n\n\
             Job Posting:\n{job}\n\n\
             Analyze how well the CV matches the job posting. Be specific and actionable."
        ),
    }
}

/// `match_percentage` is embedded as given; callers decide whether it is sane.
pub fn build_cover_letter_prompt(cv: &str, job_content: &str, match_percentage: f64) -> PromptPair {
    let cv = truncate_chars(cv, MAX_PROMPT_FIELD_CHARS);
    let job = truncate_chars(job_content, MAX_PROMPT_FIELD_CHARS);

    PromptPair {
        system: COVER_LETTER_SYSTEM.to_string(),
        user: format!(
            "CV Content:\n{cv}\n\n\
             Job Posting:\n{job}\n\n\
             Match Percentage: {match_percentage}%\n\n\
             Generate a compelling cover letter for this job application."
        ),
    }
}
