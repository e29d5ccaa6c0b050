use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `seoblog-client`.
pub enum BlogClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Требуется авторизация (отсутствует/некорректен токен или неверный пароль).
    #[error("unauthorized")]
    Unauthorized,

    /// Операция разрешена только автору поста.
    #[error("forbidden")]
    Forbidden,

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Некорректный запрос или бизнес-ошибка валидации.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Ошибка на стороне сервера, например сбой генерации текста.
    #[error("server error: {0}")]
    Server(String),
}

/// Результат операций `seoblog-client`.
pub type BlogClientResult<T> = Result<T, BlogClientError>;

impl BlogClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = || message.clone().unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::UNAUTHORIZED => Self::Unauthorized,
            reqwest::StatusCode::FORBIDDEN => Self::Forbidden,
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            status if status.is_server_error() => Self::Server(message()),
            _ => Self::InvalidRequest(message()),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::BlogClientError;

    #[test]
    fn statuses_map_to_variants() {
        assert!(matches!(
            BlogClientError::from_http_status(StatusCode::UNAUTHORIZED, None),
            BlogClientError::Unauthorized
        ));
        assert!(matches!(
            BlogClientError::from_http_status(StatusCode::FORBIDDEN, None),
            BlogClientError::Forbidden
        ));
        assert!(matches!(
            BlogClientError::from_http_status(StatusCode::NOT_FOUND, None),
            BlogClientError::NotFound
        ));
    }

    #[test]
    fn server_message_is_kept() {
        let err = BlogClientError::from_http_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some("content generation failed: timeout".to_string()),
        );
        assert!(
            matches!(err, BlogClientError::Server(ref msg) if msg == "content generation failed: timeout")
        );

        let err = BlogClientError::from_http_status(StatusCode::BAD_REQUEST, None);
        assert!(matches!(err, BlogClientError::InvalidRequest(ref msg) if msg.contains("400")));
    }
}
