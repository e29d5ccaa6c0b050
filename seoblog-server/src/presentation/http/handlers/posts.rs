use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::blog_service::ListPostsResult;
use crate::domain::post::{CreatePostRequest, MetaTags, Post, UpdatePostRequest};
use crate::domain::refresh::StagedRefresh;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::extract::AppJson;
use crate::presentation::http::middleware::auth::AuthenticatedUser;

const DEFAULT_LIMIT: i64 = 20;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
    #[validate(length(max = 100))]
    pub(crate) topic: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub(crate) meta_tags: Option<MetaTags>,
}

/// Body of `PUT`: title and content are required, the rest is kept when omitted.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct ReplacePostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
    #[validate(length(max = 100))]
    pub(crate) topic: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub(crate) meta_tags: Option<MetaTags>,
}

/// Body of `PATCH`: every field optional. An empty `topic` clears it.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub(crate) struct PatchPostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: Option<String>,
    #[validate(length(min = 1))]
    pub(crate) content: Option<String>,
    #[validate(length(max = 100))]
    pub(crate) topic: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub(crate) meta_tags: Option<MetaTags>,
}

#[derive(Debug, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub(crate) struct PaginationQuery {
    /// Items per page (1..=100, default 20)
    #[validate(range(min = 1, max = 100))]
    pub(crate) limit: Option<i64>,
    /// Offset from the newest post (>= 0)
    #[validate(range(min = 0))]
    pub(crate) offset: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct StagedRefreshDto {
    pub(crate) title: String,
    pub(crate) content: String,
    #[schema(value_type = Object)]
    pub(crate) meta_tags: MetaTags,
    pub(crate) trends_used: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) topic: Option<String>,
    #[schema(value_type = Object)]
    pub(crate) meta_tags: MetaTags,
    pub(crate) author_id: i64,
    pub(crate) author: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) preview_data: Option<StagedRefreshDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) posts: Vec<PostDto>,
    pub(crate) limit: i64,
    pub(crate) offset: i64,
    pub(crate) total: i64,
}

impl From<StagedRefresh> for StagedRefreshDto {
    fn from(staged: StagedRefresh) -> Self {
        Self {
            title: staged.title,
            content: staged.content,
            meta_tags: staged.meta_tags,
            trends_used: staged.trends_used,
        }
    }
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            topic: post.topic,
            meta_tags: post.meta_tags,
            author_id: post.author_id,
            author: post.author,
            created_at: post.created_at,
            updated_at: post.updated_at,
            preview_data: post.preview_data.map(StagedRefreshDto::from),
        }
    }
}

impl From<ListPostsResult> for ListPostsResponseDto {
    fn from(result: ListPostsResult) -> Self {
        Self {
            posts: result.posts.into_iter().map(PostDto::from).collect(),
            limit: result.limit,
            offset: result.offset,
            total: result.total,
        }
    }
}

impl From<ReplacePostDto> for UpdatePostRequest {
    fn from(dto: ReplacePostDto) -> Self {
        Self {
            title: Some(dto.title),
            content: Some(dto.content),
            topic: dto.topic,
            meta_tags: dto.meta_tags,
        }
    }
}

impl From<PatchPostDto> for UpdatePostRequest {
    fn from(dto: PatchPostDto) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
            topic: dto.topic,
            meta_tags: dto.meta_tags,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/blogs/",
    tag = "blogs",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Posts listed, newest first", body = ListPostsResponseDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    query.validate()?;
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = query.offset.unwrap_or(0);

    let result = state.blog_service.list_posts(limit, offset).await?;

    Ok((StatusCode::OK, Json(ListPostsResponseDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/api/blogs/{id}/",
    tag = "blogs",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let post = state.blog_service.get_post(id).await?;

    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    post,
    path = "/api/blogs/",
    tag = "blogs",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppJson(dto): AppJson<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;
    let req = CreatePostRequest {
        title: dto.title,
        content: dto.content,
        topic: dto.topic,
        meta_tags: dto.meta_tags,
    };

    let post = state.blog_service.create_post(auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

#[utoipa::path(
    put,
    path = "/api/blogs/{id}/",
    tag = "blogs",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = ReplacePostDto,
    responses(
        (status = 200, description = "Post updated", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn replace_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<ReplacePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;

    let post = state
        .blog_service
        .update_post(auth.user_id, id, dto.into())
        .await?;
    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    patch,
    path = "/api/blogs/{id}/",
    tag = "blogs",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = PatchPostDto,
    responses(
        (status = 200, description = "Post updated", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn patch_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<PatchPostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;

    let post = state
        .blog_service
        .update_post(auth.user_id, id, dto.into())
        .await?;
    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    delete,
    path = "/api/blogs/{id}/",
    tag = "blogs",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.blog_service.delete_post(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use validator::Validate;

    use super::{PaginationQuery, PatchPostDto, PostDto, ReplacePostDto};
    use crate::domain::post::{UpdatePostRequest, sample_post};

    #[test]
    fn pagination_limit_is_bounded() {
        let too_big = PaginationQuery {
            limit: Some(101),
            offset: None,
        };
        assert!(too_big.validate().is_err());

        let negative_offset = PaginationQuery {
            limit: Some(10),
            offset: Some(-1),
        };
        assert!(negative_offset.validate().is_err());

        let ok = PaginationQuery {
            limit: None,
            offset: Some(0),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn put_always_sets_title_and_content_while_patch_may_omit_them() {
        let put: UpdatePostRequest = ReplacePostDto {
            title: "t".to_string(),
            content: "c".to_string(),
            topic: None,
            meta_tags: None,
        }
        .into();
        assert_eq!(put.title.as_deref(), Some("t"));
        assert_eq!(put.content.as_deref(), Some("c"));

        let patch: UpdatePostRequest = PatchPostDto::default().into();
        assert!(patch.title.is_none() && patch.content.is_none());
    }

    #[test]
    fn patch_rejects_empty_title() {
        let dto = PatchPostDto {
            title: Some(String::new()),
            ..PatchPostDto::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn post_dto_serializes_author_and_meta_tags() {
        let mut post = sample_post(3, "Title", "Body", 9);
        post.meta_tags = json!({ "keywords": "a, b" })
            .as_object()
            .cloned()
            .expect("object literal");

        let value = serde_json::to_value(PostDto::from(post)).expect("dto must serialize");
        assert_eq!(value["author"], json!("user_9"));
        assert_eq!(value["meta_tags"]["keywords"], json!("a, b"));
        assert_eq!(value["topic"], json!("marketing"));
        assert!(value["preview_data"].is_null());
    }
}
