use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::post::MetaTags;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::handlers::posts::{PostDto, StagedRefreshDto};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct RefreshPreviewDto {
    pub(crate) message: String,
    pub(crate) preview_data: StagedRefreshDto,
    pub(crate) preview_title: String,
    pub(crate) preview_content: String,
    #[schema(value_type = Object)]
    pub(crate) preview_meta_tags: MetaTags,
    pub(crate) trends_used: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct RefreshConfirmDto {
    pub(crate) message: String,
    pub(crate) updated_blog: PostDto,
    pub(crate) trends_used: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/refresh-blog/{id}/preview/",
    tag = "refresh",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Refresh staged in preview_data", body = RefreshPreviewDto),
        (status = 400, description = "Post has no topic"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Content generation failed")
    )
)]
pub(crate) async fn preview_refresh(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<RefreshPreviewDto>)> {
    info!(post_id = id, requested_by = %auth.username, "seo refresh preview requested");
    let staged = state.refresh_service.preview(id).await?;

    Ok((
        StatusCode::OK,
        Json(RefreshPreviewDto {
            message: format!("Preview generated for Blog ID {id}"),
            preview_title: staged.title.clone(),
            preview_content: staged.content.clone(),
            preview_meta_tags: staged.meta_tags.clone(),
            trends_used: staged.trends_used.clone(),
            preview_data: staged.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/refresh-blog/{id}/confirm/",
    tag = "refresh",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Refresh applied to the post", body = RefreshConfirmDto),
        (status = 400, description = "Post has no topic"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Content generation failed")
    )
)]
pub(crate) async fn confirm_refresh(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<RefreshConfirmDto>)> {
    info!(post_id = id, requested_by = %auth.username, "seo refresh confirm requested");
    let confirmed = state.refresh_service.confirm(id).await?;

    Ok((
        StatusCode::OK,
        Json(RefreshConfirmDto {
            message: format!("Blog ID {id} refreshed successfully"),
            updated_blog: confirmed.post.into(),
            trends_used: confirmed.trends_used,
        }),
    ))
}
