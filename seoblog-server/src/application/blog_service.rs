use crate::data::post_repository::{NewPost, Pagination, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};

#[derive(Debug, Clone)]
pub(crate) struct ListPostsResult {
    pub(crate) posts: Vec<Post>,
    pub(crate) limit: i64,
    pub(crate) offset: i64,
    pub(crate) total: i64,
}

pub(crate) struct BlogService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> BlogService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_post(
        &self,
        author_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            title: req.title,
            content: req.content,
            topic: req.topic,
            meta_tags: req.meta_tags.unwrap_or_default(),
            author_id,
        };
        self.repo.create_post(new_post).await
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.repo
            .get_post(id)
            .await?
            .ok_or_else(|| post_not_found(id))
    }

    /// Applies the fields present in `req` on top of the stored post.
    pub(crate) async fn update_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;
        let current = self.owned_post(actor_user_id, post_id).await?;

        let topic = match req.topic {
            Some(topic) if topic.is_empty() => None,
            Some(topic) => Some(topic),
            None => current.topic,
        };
        let patch = PostPatch {
            title: req.title.unwrap_or(current.title),
            content: req.content.unwrap_or(current.content),
            topic,
            meta_tags: req.meta_tags.unwrap_or(current.meta_tags),
        };

        self.repo
            .update_post_owned(post_id, actor_user_id, patch)
            .await?
            .ok_or_else(|| post_not_found(post_id))
    }

    pub(crate) async fn delete_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
    ) -> Result<(), DomainError> {
        self.owned_post(actor_user_id, post_id).await?;

        if !self.repo.delete_post(post_id).await? {
            return Err(post_not_found(post_id));
        }
        Ok(())
    }

    pub(crate) async fn list_posts(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<ListPostsResult, DomainError> {
        let posts = self.repo.list_posts(Pagination { limit, offset }).await?;
        let total = self.repo.total_posts().await?;

        Ok(ListPostsResult {
            posts,
            limit,
            offset,
            total,
        })
    }

    async fn owned_post(&self, actor_user_id: i64, post_id: i64) -> Result<Post, DomainError> {
        let post = self.get_post(post_id).await?;
        if post.author_id != actor_user_id {
            return Err(DomainError::Forbidden);
        }
        Ok(post)
    }
}

fn post_not_found(id: i64) -> DomainError {
    DomainError::NotFound(format!("post id: {id}"))
}
