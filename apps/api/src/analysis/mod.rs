// CV ↔ job posting analysis and cover letter drafting.
// All LLM calls go through llm_client::ChatClient; no direct provider calls here.

pub mod cover_letter;
pub mod handlers;
pub mod match_report;
pub mod prompts;
