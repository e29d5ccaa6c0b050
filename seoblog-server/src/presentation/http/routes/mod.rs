use axum::{Router, middleware};

use crate::presentation::AppState;
use crate::presentation::http::middleware::auth::jwt_auth_middleware;

pub(crate) mod auth;
pub(crate) mod posts;
pub(crate) mod refresh;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let protected = posts::protected()
        .merge(refresh::router())
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    Router::new()
        .merge(auth::router())
        .merge(posts::public())
        .merge(protected)
}
