use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::{MetaTags, Post};
use crate::domain::refresh::StagedRefresh;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) topic: Option<String>,
    pub(crate) meta_tags: MetaTags,
    pub(crate) author_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) topic: Option<String>,
    pub(crate) meta_tags: MetaTags,
}

/// Canonical fields written by a confirmed refresh.
#[derive(Debug, Clone)]
pub(crate) struct RefreshedFields {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) meta_tags: MetaTags,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Pagination {
    pub(crate) limit: i64,
    pub(crate) offset: i64,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError>;
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, DomainError>;
    async fn total_posts(&self) -> Result<i64, DomainError>;
    /// Writes `preview_data` only; canonical fields stay untouched.
    async fn stage_preview(
        &self,
        post_id: i64,
        staged: &StagedRefresh,
    ) -> Result<Option<Post>, DomainError>;
    /// Overwrites title/content/meta_tags and clears `preview_data`.
    async fn apply_refresh(
        &self,
        post_id: i64,
        fields: RefreshedFields,
    ) -> Result<Option<Post>, DomainError>;
}
