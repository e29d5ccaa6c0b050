use axum::{Router, extract::DefaultBodyLimit};
use tower::limit::ConcurrencyLimitLayer;

use crate::infrastructure::settings::Settings;

/// Caps request body size and the number of requests served at once.
pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    router
        .layer(DefaultBodyLimit::max(settings.http_request_body_limit_bytes))
        .layer(ConcurrencyLimitLayer::new(settings.http_concurrency_limit))
}
