pub(crate) mod generator;
pub(crate) mod keywords;
pub(crate) mod meta;
pub(crate) mod outdated;
pub(crate) mod rewriter;
pub(crate) mod trends;

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::{error::DomainError, post::Post, refresh::StagedRefresh};
use generator::TextGenerator;
use keywords::{KeywordExtractor, extract_keywords};
use outdated::{EntityRecognizer, detect_outdated};
use rewriter::{RewriteInput, rewrite};
use trends::TrendSource;

/// Outdated-entity detection, keyword extraction, trend lookup, rewriting and
/// metadata merge, run in that order against one post.
#[derive(Clone)]
pub(crate) struct SeoPipeline {
    recognizer: Arc<dyn EntityRecognizer>,
    keywords: Arc<dyn KeywordExtractor>,
    trends: Arc<dyn TrendSource>,
    generator: Arc<dyn TextGenerator>,
}

impl SeoPipeline {
    pub(crate) fn new(
        recognizer: Arc<dyn EntityRecognizer>,
        keywords: Arc<dyn KeywordExtractor>,
        trends: Arc<dyn TrendSource>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            recognizer,
            keywords,
            trends,
            generator,
        }
    }

    pub(crate) async fn run(
        &self,
        post: &Post,
        current_year: i32,
    ) -> Result<StagedRefresh, DomainError> {
        let topic = post
            .topic
            .as_deref()
            .filter(|topic| !topic.trim().is_empty())
            .ok_or(DomainError::Validation {
                field: "topic",
                message: "post has no topic to refresh against",
            })?;

        let outdated = detect_outdated(self.recognizer.as_ref(), &post.content, current_year);
        let keywords = extract_keywords(self.keywords.as_ref(), &post.content);
        let trends_used = self.trends.current_trends(topic, current_year);
        debug!(
            post_id = post.id,
            outdated = outdated.len(),
            keywords = keywords.len(),
            "seo analysis done"
        );

        let variation = format!(
            "rewrite in SEO-friendly way with unique style variation {}",
            Utc::now().timestamp_millis()
        );
        let rewritten = rewrite(
            self.generator.as_ref(),
            RewriteInput {
                content: &post.content,
                title: &post.title,
                variation: &variation,
                outdated: &outdated,
                trends: &trends_used,
                keywords: &keywords,
                topic,
                current_year,
            },
        )
        .await
        .map_err(|err| {
            warn!(post_id = post.id, error = %err, "seo rewrite failed");
            DomainError::Generation(err.to_string())
        })?;

        let meta_tags = meta::merge_meta_tags(
            &post.meta_tags,
            &rewritten.new_keywords,
            &rewritten.title,
            &rewritten.content,
        );

        Ok(StagedRefresh {
            title: rewritten.title,
            content: rewritten.content,
            meta_tags,
            trends_used,
        })
    }
}
