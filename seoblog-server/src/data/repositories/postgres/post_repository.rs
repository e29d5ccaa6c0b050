use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};

use crate::data::post_repository::{
    NewPost, Pagination, PostPatch, PostRepository, RefreshedFields,
};
use crate::domain::error::DomainError;
use crate::domain::post::{MetaTags, Post};
use crate::domain::refresh::StagedRefresh;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    topic: Option<String>,
    meta_tags: Value,
    author_id: i64,
    author: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    preview_data: Option<Value>,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH inserted AS (
                INSERT INTO posts (title, content, topic, meta_tags, author_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT
                p.id, p.title, p.content, p.topic, p.meta_tags, p.author_id,
                u.username AS author, p.created_at, p.updated_at, p.preview_data
            FROM inserted p
            JOIN users u ON u.id = p.author_id
            "#,
        )
        .bind(input.title)
        .bind(input.content)
        .bind(input.topic)
        .bind(Value::Object(input.meta_tags))
        .bind(input.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                p.id, p.title, p.content, p.topic, p.meta_tags, p.author_id,
                u.username AS author, p.created_at, p.updated_at, p.preview_data
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH updated AS (
                UPDATE posts
                SET title = $3,
                    content = $4,
                    topic = $5,
                    meta_tags = $6,
                    updated_at = NOW()
                WHERE id = $1 AND author_id = $2
                RETURNING *
            )
            SELECT
                p.id, p.title, p.content, p.topic, p.meta_tags, p.author_id,
                u.username AS author, p.created_at, p.updated_at, p.preview_data
            FROM updated p
            JOIN users u ON u.id = p.author_id
            "#,
        )
        .bind(post_id)
        .bind(owner_id)
        .bind(patch.title)
        .bind(patch.content)
        .bind(patch.topic)
        .bind(Value::Object(patch.meta_tags))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                p.id, p.title, p.content, p.topic, p.meta_tags, p.author_id,
                u.username AS author, p.created_at, p.updated_at, p.preview_data
            FROM posts p
            JOIN users u ON u.id = p.author_id
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $1
            OFFSET $2
            "#,
        )
        .bind(pagination.limit)
        .bind(pagination.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn total_posts(&self) -> Result<i64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM posts
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(count)
    }

    async fn stage_preview(
        &self,
        post_id: i64,
        staged: &StagedRefresh,
    ) -> Result<Option<Post>, DomainError> {
        let preview = serde_json::to_value(staged)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH staged AS (
                UPDATE posts
                SET preview_data = $2
                WHERE id = $1
                RETURNING *
            )
            SELECT
                p.id, p.title, p.content, p.topic, p.meta_tags, p.author_id,
                u.username AS author, p.created_at, p.updated_at, p.preview_data
            FROM staged p
            JOIN users u ON u.id = p.author_id
            "#,
        )
        .bind(post_id)
        .bind(preview)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn apply_refresh(
        &self,
        post_id: i64,
        fields: RefreshedFields,
    ) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH refreshed AS (
                UPDATE posts
                SET title = $2,
                    content = $3,
                    meta_tags = $4,
                    preview_data = NULL,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT
                p.id, p.title, p.content, p.topic, p.meta_tags, p.author_id,
                u.username AS author, p.created_at, p.updated_at, p.preview_data
            FROM refreshed p
            JOIN users u ON u.id = p.author_id
            "#,
        )
        .bind(post_id)
        .bind(fields.title)
        .bind(fields.content)
        .bind(Value::Object(fields.meta_tags))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    let meta_tags = match row.meta_tags {
        Value::Object(map) => map,
        Value::Null => MetaTags::new(),
        other => {
            return Err(DomainError::Unexpected(format!(
                "post {} has non-object meta_tags: {other}",
                row.id
            )));
        }
    };
    let preview_data = row
        .preview_data
        .filter(|value| !value.is_null())
        .map(serde_json::from_value::<StagedRefresh>)
        .transpose()
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;

    Post {
        id: row.id,
        title: row.title,
        content: row.content,
        topic: row.topic,
        meta_tags,
        author_id: row.author_id,
        author: row.author,
        created_at: row.created_at,
        updated_at: row.updated_at,
        preview_data,
    }
    .validated()
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503") {
            return DomainError::NotFound("author".to_string());
        }
    DomainError::Unexpected(err.to_string())
}
