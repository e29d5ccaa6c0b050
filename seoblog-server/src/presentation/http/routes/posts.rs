use axum::Router;
use axum::routing::{get, post, put};

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::{
    create_post, delete_post, get_post, list_posts, patch_post, replace_post,
};

pub(crate) fn public() -> Router<AppState> {
    Router::new()
        .route("/api/blogs/", get(list_posts))
        .route("/api/blogs/{id}/", get(get_post))
}

pub(crate) fn protected() -> Router<AppState> {
    Router::new()
        .route("/api/blogs/", post(create_post))
        .route(
            "/api/blogs/{id}/",
            put(replace_post).patch(patch_post).delete(delete_post),
        )
}
