use serde_json::Value;

use crate::domain::post::MetaTags;

const DESCRIPTION_CHARS: usize = 150;

/// Refreshes `title` unconditionally. `description` and `keywords` are only
/// replaced when the post already carries them.
pub(crate) fn merge_meta_tags(
    existing: &MetaTags,
    new_keywords: &str,
    title: &str,
    content: &str,
) -> MetaTags {
    let mut merged = existing.clone();

    if merged.contains_key("description") {
        merged.insert(
            "description".to_string(),
            Value::String(describe(content)),
        );
    }
    if merged.contains_key("keywords") {
        merged.insert(
            "keywords".to_string(),
            Value::String(new_keywords.to_string()),
        );
    }
    merged.insert("title".to_string(), Value::String(title.to_string()));

    merged
}

fn describe(content: &str) -> String {
    let head: String = content.chars().take(DESCRIPTION_CHARS).collect();
    let collapsed = head.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{collapsed}...")
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::merge_meta_tags;
    use crate::domain::post::MetaTags;

    fn tags(value: Value) -> MetaTags {
        match value {
            Value::Object(map) => map,
            _ => panic!("meta tags fixture must be an object"),
        }
    }

    #[test]
    fn absent_keys_stay_absent_but_title_is_always_set() {
        let merged = merge_meta_tags(&MetaTags::new(), "seo, best seo 2026", "New", "Body");
        assert_eq!(Value::Object(merged), json!({ "title": "New" }));
    }

    #[test]
    fn present_keys_are_replaced_and_others_kept() {
        let existing = tags(json!({
            "description": "old",
            "keywords": "old, words",
            "title": "Old",
            "og:image": "cover.png",
        }));
        let content = format!("Fresh   content\nwith\tspacing {}", "z".repeat(200));

        let merged = merge_meta_tags(&existing, "a, b", "New title", &content);

        assert_eq!(merged["title"], json!("New title"));
        assert_eq!(merged["keywords"], json!("a, b"));
        assert_eq!(merged["og:image"], json!("cover.png"));

        let description = merged["description"].as_str().expect("description is text");
        assert!(description.starts_with("Fresh content with spacing z"));
        assert!(description.ends_with("..."));
        assert!(description.chars().count() <= 150 + 3);
    }

    #[test]
    fn description_of_short_content_keeps_it_whole() {
        let existing = tags(json!({ "description": "" }));
        let merged = merge_meta_tags(&existing, "", "T", "Короткий текст");
        assert_eq!(merged["description"], json!("Короткий текст..."));
    }
}
