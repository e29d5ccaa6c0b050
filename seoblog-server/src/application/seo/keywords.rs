use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::error;

pub(crate) const MAX_KEYWORDS: usize = 10;
const MAX_INPUT_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub(crate) enum KeywordError {
    #[error("input of {0} bytes is too large for keyword extraction")]
    InputTooLarge(usize),
}

pub(crate) trait KeywordExtractor: Send + Sync {
    /// Ranked phrases, best first.
    fn extract(&self, text: &str) -> Result<Vec<String>, KeywordError>;
}

/// Extracts ranked keywords, degrading to an empty list when the extractor fails.
pub(crate) fn extract_keywords(extractor: &dyn KeywordExtractor, text: &str) -> Vec<String> {
    match extractor.extract(text) {
        Ok(mut phrases) => {
            phrases.truncate(MAX_KEYWORDS);
            phrases
        }
        Err(err) => {
            error!(error = %err, "keyword extraction failed");
            Vec::new()
        }
    }
}

/// Rapid automatic keyword extraction.
///
/// Candidate phrases are maximal runs of words that are neither stop words nor
/// punctuation. Each word scores `degree / frequency`, where degree counts the
/// length of every phrase the word occurs in; a phrase scores the sum of its words.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct RakeExtractor;

impl KeywordExtractor for RakeExtractor {
    fn extract(&self, text: &str) -> Result<Vec<String>, KeywordError> {
        if text.len() > MAX_INPUT_BYTES {
            return Err(KeywordError::InputTooLarge(text.len()));
        }

        let lowered = text.to_lowercase();
        let phrases = candidate_phrases(&lowered);

        let mut frequency: HashMap<&str, f64> = HashMap::new();
        let mut degree: HashMap<&str, f64> = HashMap::new();
        for phrase in &phrases {
            let len = phrase.len() as f64;
            for word in phrase {
                *frequency.entry(*word).or_default() += 1.0;
                *degree.entry(*word).or_default() += len;
            }
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut ranked: Vec<(f64, String)> = Vec::new();
        for phrase in &phrases {
            let joined = phrase.join(" ");
            if !seen.insert(joined.clone()) {
                continue;
            }
            let score = phrase
                .iter()
                .map(|word| degree[word] / frequency[word])
                .sum::<f64>();
            ranked.push((score, joined));
        }

        // stable: equal scores keep first-occurrence order
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        Ok(ranked.into_iter().map(|(_, phrase)| phrase).collect())
    }
}

fn candidate_phrases(text: &str) -> Vec<Vec<&str>> {
    let mut phrases = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for token in tokenize(text) {
        let is_word = token.chars().all(is_word_char);
        if is_word && !STOP_WORDS.contains(&token) {
            current.push(token);
        } else if !current.is_empty() {
            phrases.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        phrases.push(current);
    }
    phrases
}

/// Splits into runs of word characters and runs of punctuation, dropping whitespace.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<(usize, bool)> = None;

    for (idx, ch) in text.char_indices() {
        let kind = if ch.is_whitespace() {
            None
        } else {
            Some(is_word_char(ch))
        };
        match (start, kind) {
            (Some((_, word)), Some(next)) if word == next => {}
            (Some((begin, _)), _) => {
                tokens.push(&text[begin..idx]);
                start = kind.map(|word| (idx, word));
            }
            (None, Some(word)) => start = Some((idx, word)),
            (None, None) => {}
        }
    }
    if let Some((begin, _)) = start {
        tokens.push(&text[begin..]);
    }
    tokens
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Apostrophe contractions are covered by their fragments ("don", "t", "ll")
/// because the tokenizer splits on `'`.
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
    "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn",
    "mustn", "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

#[cfg(test)]
mod tests {
    use super::{
        KeywordError, KeywordExtractor, MAX_KEYWORDS, RakeExtractor, extract_keywords, tokenize,
    };

    #[test]
    fn tokenize_separates_words_and_punctuation() {
        assert_eq!(
            tokenize("seo, done... right!"),
            vec!["seo", ",", "done", "...", "right", "!"]
        );
    }

    #[test]
    fn phrases_are_ranked_by_degree_over_frequency() {
        let text = "Keyword extraction is useful; keyword extraction helps search.";
        let ranked = RakeExtractor.extract(text).expect("extraction must succeed");

        assert_eq!(
            ranked,
            vec![
                "keyword extraction helps search".to_string(),
                "keyword extraction".to_string(),
                "useful".to_string(),
            ]
        );
    }

    #[test]
    fn only_stop_words_yield_nothing() {
        let ranked = RakeExtractor
            .extract("It is what it is, and that is that.")
            .expect("extraction must succeed");
        assert!(ranked.is_empty());
    }

    #[test]
    fn extract_keywords_keeps_top_ten() {
        let text = (0..15)
            .map(|i| format!("phrase{i} word{i}"))
            .collect::<Vec<_>>()
            .join(". ");
        let keywords = extract_keywords(&RakeExtractor, &text);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
    }

    #[test]
    fn many_distinct_phrases_are_each_kept_once() {
        let text = (0..20_000)
            .map(|i| format!("alpha{i} beta{i}"))
            .chain((0..20_000).map(|i| format!("alpha{i} beta{i}")))
            .collect::<Vec<_>>()
            .join(" the ");

        let ranked = RakeExtractor.extract(&text).expect("extraction must succeed");

        assert_eq!(ranked.len(), 20_000);
        assert_eq!(ranked[0], "alpha0 beta0");
        assert_eq!(ranked[19_999], "alpha19999 beta19999");
    }

    #[test]
    fn contraction_fragments_are_stop_words() {
        let ranked = RakeExtractor
            .extract("You're sure it's great; don't stop")
            .expect("extraction must succeed");

        assert_eq!(ranked, vec!["sure".to_string(), "great".to_string(), "stop".to_string()]);
    }

    struct FailingExtractor;

    impl KeywordExtractor for FailingExtractor {
        fn extract(&self, text: &str) -> Result<Vec<String>, KeywordError> {
            Err(KeywordError::InputTooLarge(text.len()))
        }
    }

    #[test]
    fn extractor_failure_degrades_to_empty_list() {
        let keywords = extract_keywords(&FailingExtractor, "anything at all");
        assert!(keywords.is_empty());
    }
}
