use axum::extract::FromRequest;

use super::app_error::AppError;

/// `axum::Json` whose rejections render through [`AppError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub(crate) struct AppJson<T>(pub(crate) T);
