use tracing::debug;

use super::generator::{GenerationError, GenerationParams, TextGenerator};
use super::outdated::starts_with_year;
use crate::domain::refresh::OutdatedSpan;

pub(crate) const CHUNK_CHARS: usize = 500;
const KEYWORDS_IN_PROMPT: usize = 5;
const TITLE_MAX_CHARS: usize = 255;

pub(crate) struct RewriteInput<'a> {
    pub(crate) content: &'a str,
    pub(crate) title: &'a str,
    /// Appended to the title before generation so repeated runs differ.
    pub(crate) variation: &'a str,
    pub(crate) outdated: &'a [OutdatedSpan],
    pub(crate) trends: &'a [String],
    pub(crate) keywords: &'a [String],
    pub(crate) topic: &'a str,
    pub(crate) current_year: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Rewritten {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) new_keywords: String,
}

pub(crate) async fn rewrite(
    generator: &dyn TextGenerator,
    input: RewriteInput<'_>,
) -> Result<Rewritten, GenerationError> {
    let content = refresh_years(input.content, input.outdated, input.current_year);
    let new_keywords = build_new_keywords(input.keywords, input.topic, input.current_year);
    let trends = input.trends.join(" ");

    let title_input = match input.variation {
        "" => input.title.to_string(),
        variation => format!("{} {variation}", input.title),
    };
    let title_prompt = format!(
        "Rewrite this title to be SEO-friendly with keywords '{new_keywords}' \
         and current year {}: {title_input}",
        input.current_year
    );
    let title = generator
        .generate(&title_prompt, GenerationParams::TITLE)
        .await?;
    let title = truncate_chars(title.trim(), TITLE_MAX_CHARS);
    if title.is_empty() {
        return Err(GenerationError::EmptyOutput);
    }

    let chunks = chunk_chars(&content, CHUNK_CHARS);
    debug!(chunks = chunks.len(), "rewriting content");

    let mut rewritten_chunks = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let prompt = format!(
            "Update this blog content to be SEO-friendly, replace outdated info with: {trends}, \
             incorporate keywords: {new_keywords}, preserve original tone: {chunk}"
        );
        rewritten_chunks.push(generator.generate(&prompt, GenerationParams::CHUNK).await?);
    }

    let content = rewritten_chunks.join(" ");
    if content.trim().is_empty() {
        return Err(GenerationError::EmptyOutput);
    }

    Ok(Rewritten {
        title,
        content,
        new_keywords,
    })
}

/// Replaces every outdated span whose text opens with four digits by
/// `current_year`, whatever its label.
///
/// All offsets refer to `content` as given; the output is assembled in one pass
/// so earlier replacements never shift later ones. Overlapping spans after the
/// first are ignored.
pub(crate) fn refresh_years(content: &str, spans: &[OutdatedSpan], current_year: i32) -> String {
    let mut targets: Vec<&OutdatedSpan> = spans
        .iter()
        .filter(|span| starts_with_year(&span.text))
        .filter(|span| span.start <= span.end && content.get(span.start..span.end).is_some())
        .collect();
    targets.sort_by_key(|span| span.start);

    let year = current_year.to_string();
    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    for span in targets {
        if span.start < cursor {
            continue;
        }
        out.push_str(&content[cursor..span.start]);
        out.push_str(&year);
        cursor = span.end;
    }
    out.push_str(&content[cursor..]);
    out
}

pub(crate) fn build_new_keywords(keywords: &[String], topic: &str, current_year: i32) -> String {
    keywords
        .iter()
        .take(KEYWORDS_IN_PROMPT)
        .cloned()
        .chain([
            format!("best {topic} {current_year}"),
            format!("AI-powered {topic}"),
        ])
        .collect::<Vec<_>>()
        .join(", ")
}

/// Left-to-right, non-overlapping chunks of at most `size` characters.
pub(crate) fn chunk_chars(text: &str, size: usize) -> Vec<&str> {
    if size == 0 {
        return Vec::new();
    }
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in text.char_indices() {
        if count == size {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}
