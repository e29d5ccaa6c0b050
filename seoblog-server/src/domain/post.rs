use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::DomainError;
use super::refresh::StagedRefresh;

pub(crate) type MetaTags = Map<String, Value>;

const TITLE_MAX_CHARS: usize = 255;
const TOPIC_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) topic: Option<String>,
    pub(crate) meta_tags: MetaTags,
    pub(crate) author_id: i64,
    pub(crate) author: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) preview_data: Option<StagedRefresh>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) topic: Option<String>,
    pub(crate) meta_tags: Option<MetaTags>,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
            topic: normalize_topic(self.topic.as_deref())?,
            meta_tags: Some(self.meta_tags.unwrap_or_default()),
        })
    }
}

/// PUT and PATCH share this request; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) topic: Option<String>,
    pub(crate) meta_tags: Option<MetaTags>,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let title = self.title.as_deref().map(normalize_title).transpose()?;
        let content = self.content.as_deref().map(normalize_content).transpose()?;
        // blank topic clears it
        let topic = match self.topic.as_deref() {
            Some(raw) => Some(normalize_topic(Some(raw))?.unwrap_or_default()),
            None => None,
        };

        Ok(Self {
            title,
            content,
            topic,
            meta_tags: self.meta_tags,
        })
    }
}

impl Post {
    pub(crate) fn validated(self) -> Result<Self, DomainError> {
        validate_positive_i64("id", self.id)?;
        validate_positive_i64("author_id", self.author_id)?;
        let title = normalize_title(&self.title)?;
        let content = normalize_content(&self.content)?;
        let topic = normalize_topic(self.topic.as_deref())?;

        if self.updated_at < self.created_at {
            return Err(DomainError::Validation {
                field: "updated_at",
                message: "must be >= created_at",
            });
        }

        Ok(Self {
            title,
            content,
            topic,
            ..self
        })
    }
}

fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > TITLE_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: "must not be empty",
        });
    }
    Ok(content.to_string())
}

fn normalize_topic(topic: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(topic) = topic.map(str::trim).filter(|topic| !topic.is_empty()) else {
        return Ok(None);
    };
    if topic.chars().count() > TOPIC_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "topic",
            message: "must be at most 100 chars",
        });
    }
    Ok(Some(topic.to_string()))
}

#[cfg(test)]
pub(crate) fn sample_post(id: i64, title: &str, content: &str, author_id: i64) -> Post {
    let now = Utc::now();
    Post {
        id,
        title: title.to_string(),
        content: content.to_string(),
        topic: Some("marketing".to_string()),
        meta_tags: MetaTags::new(),
        author_id,
        author: format!("user_{author_id}"),
        created_at: now,
        updated_at: now,
        preview_data: None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use serde_json::json;

    use super::{CreatePostRequest, DomainError, UpdatePostRequest, sample_post};

    #[test]
    fn create_post_request_validate_rejects_empty_title() {
        let req = CreatePostRequest {
            title: "   ".to_string(),
            content: "valid content".to_string(),
            topic: None,
            meta_tags: None,
        };

        let err = req.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn create_post_request_defaults_meta_tags_and_drops_blank_topic() {
        let req = CreatePostRequest {
            title: "  title  ".to_string(),
            content: "  content  ".to_string(),
            topic: Some("   ".to_string()),
            meta_tags: None,
        };

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, "title");
        assert_eq!(validated.content, "content");
        assert!(validated.topic.is_none());
        assert_eq!(validated.meta_tags.expect("meta_tags default").len(), 0);
    }

    #[test]
    fn create_post_request_rejects_long_topic() {
        let req = CreatePostRequest {
            title: "title".to_string(),
            content: "content".to_string(),
            topic: Some("x".repeat(101)),
            meta_tags: None,
        };

        let err = req.validate().expect_err("topic must be rejected");
        assert_validation_field(err, "topic");
    }

    #[test]
    fn update_post_request_validate_rejects_empty_content() {
        let req = UpdatePostRequest {
            content: Some("   ".to_string()),
            ..UpdatePostRequest::default()
        };

        let err = req.validate().expect_err("content must be rejected");
        assert_validation_field(err, "content");
    }

    #[test]
    fn update_post_request_keeps_omitted_fields_absent() {
        let req = UpdatePostRequest {
            title: Some("  new title ".to_string()),
            meta_tags: json!({"keywords": "a, b"}).as_object().cloned(),
            ..UpdatePostRequest::default()
        };

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title.as_deref(), Some("new title"));
        assert!(validated.content.is_none());
        assert!(validated.topic.is_none());
        assert!(validated.meta_tags.is_some());
    }

    #[test]
    fn update_post_request_blank_topic_means_clear() {
        let req = UpdatePostRequest {
            topic: Some("  ".to_string()),
            ..UpdatePostRequest::default()
        };

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.topic.as_deref(), Some(""));
    }

    #[test]
    fn post_validated_normalizes_fields() {
        let mut post = sample_post(1, "  Title  ", "  Content  ", 10);
        post.topic = Some("  seo ".to_string());

        let post = post.validated().expect("post should be valid");
        assert_eq!(post.title, "Title");
        assert_eq!(post.content, "Content");
        assert_eq!(post.topic.as_deref(), Some("seo"));
    }

    #[test]
    fn post_validated_rejects_non_positive_author_id() {
        let post = sample_post(1, "Title", "Content", 0);
        let err = post.validated().expect_err("author_id must be > 0");
        assert_validation_field(err, "author_id");
    }

    #[test]
    fn post_validated_rejects_updated_before_created() {
        let mut post = sample_post(1, "Title", "Content", 10);
        post.created_at = post.updated_at + Duration::seconds(1);

        let err = post
            .validated()
            .expect_err("updated_at < created_at must fail");
        assert_validation_field(err, "updated_at");
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
