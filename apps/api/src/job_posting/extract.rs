//! HTML → plain text for job postings.

use scraper::{Html, Selector};

use super::{FetchError, JobPosting};

/// Hard cap on the composed `title + "\n\n" + body` text, in characters.
pub const MAX_CONTENT_CHARS: usize = 10_000;

pub const NO_TITLE: &str = "No title found";

/// Elements under `<body>` that never carry posting content.
const NOISE_SELECTOR: &str = "script, style, img, input, nav, footer, header";

/// Returns the longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// html5ever synthesizes a `<body>` for any input, so whether the page really
/// had one is decided from the source.
fn has_body_tag(html: &str) -> bool {
    let lower = html.to_ascii_lowercase();
    lower.match_indices("<body").any(|(idx, tag)| {
        matches!(
            lower[idx + tag.len()..].chars().next(),
            Some('>' | '/' | ' ' | '\t' | '\n' | '\r' | '\x0c')
        )
    })
}

/// Parses an HTML document and extracts its title and visible body text.
/// A source without a `<body>` tag yields empty body text.
pub fn extract_job_posting(html: &str) -> Result<JobPosting, FetchError> {
    let title_selector = selector("title")?;
    let body_selector = selector("body")?;
    let noise_selector = selector(NOISE_SELECTOR)?;

    let mut document = Html::parse_document(html);

    let title = document
        .select(&title_selector)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let has_body = has_body_tag(html);

    let noise: Vec<_> = document
        .select(&body_selector)
        .next()
        .map(|body| body.select(&noise_selector).map(|el| el.id()).collect())
        .unwrap_or_default();

    for id in noise {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    let body_text = document
        .select(&body_selector)
        .next()
        .filter(|_| has_body)
        .map(|body| {
            body.text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    let composed = format!("{title}\n\n{body_text}");
    let content = truncate_chars(&composed, MAX_CONTENT_CHARS);
    let truncated = content.len() < composed.len();

    Ok(JobPosting {
        title,
        content: content.to_string(),
        truncated,
    })
}

fn selector(css: &str) -> Result<Selector, FetchError> {
    Selector::parse(css).map_err(|e| FetchError::Parse(format!("selector '{css}': {e}")))
}
