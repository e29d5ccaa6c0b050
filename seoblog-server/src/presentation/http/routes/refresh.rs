use axum::Router;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::refresh::{confirm_refresh, preview_refresh};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/api/refresh-blog/{id}/preview/", get(preview_refresh))
        .route("/api/refresh-blog/{id}/confirm/", post(confirm_refresh))
}
