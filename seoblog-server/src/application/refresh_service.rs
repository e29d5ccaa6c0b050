use chrono::{Datelike, Utc};
use tracing::info;

use crate::application::seo::SeoPipeline;
use crate::data::post_repository::{PostRepository, RefreshedFields};
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::refresh::StagedRefresh;

#[derive(Debug, Clone)]
pub(crate) struct ConfirmedRefresh {
    pub(crate) post: Post,
    pub(crate) trends_used: Vec<String>,
}

pub(crate) struct RefreshService<R: PostRepository> {
    repo: R,
    pipeline: SeoPipeline,
    current_year: fn() -> i32,
}

fn calendar_year() -> i32 {
    Utc::now().year()
}

impl<R: PostRepository> RefreshService<R> {
    pub(crate) fn new(repo: R, pipeline: SeoPipeline) -> Self {
        Self {
            repo,
            pipeline,
            current_year: calendar_year,
        }
    }

    #[cfg(test)]
    fn with_year(repo: R, pipeline: SeoPipeline, current_year: fn() -> i32) -> Self {
        Self {
            repo,
            pipeline,
            current_year,
        }
    }

    /// Runs the pipeline and stages the result in `preview_data`.
    pub(crate) async fn preview(&self, post_id: i64) -> Result<StagedRefresh, DomainError> {
        let post = self.load(post_id).await?;
        let staged = self.pipeline.run(&post, (self.current_year)()).await?;

        self.repo
            .stage_preview(post_id, &staged)
            .await?
            .ok_or_else(|| not_found(post_id))?;

        info!(post_id, "seo refresh staged");
        Ok(staged)
    }

    /// Recomputes the refresh and writes it into the canonical fields.
    /// A previously staged preview is neither required nor reused.
    pub(crate) async fn confirm(&self, post_id: i64) -> Result<ConfirmedRefresh, DomainError> {
        let post = self.load(post_id).await?;
        let staged = self.pipeline.run(&post, (self.current_year)()).await?;

        let fields = RefreshedFields {
            title: staged.title,
            content: staged.content,
            meta_tags: staged.meta_tags,
        };
        let post = self
            .repo
            .apply_refresh(post_id, fields)
            .await?
            .ok_or_else(|| not_found(post_id))?;

        info!(post_id, "seo refresh applied");
        Ok(ConfirmedRefresh {
            post,
            trends_used: staged.trends_used,
        })
    }

    async fn load(&self, post_id: i64) -> Result<Post, DomainError> {
        self.repo
            .get_post(post_id)
            .await?
            .ok_or_else(|| not_found(post_id))
    }
}

fn not_found(post_id: i64) -> DomainError {
    DomainError::NotFound(format!("post id: {post_id}"))
}
