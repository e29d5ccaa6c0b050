//! Клиентская библиотека для работы с `seoblog-server` по HTTP.
//!
//! `BlogClient` покрывает CRUD постов, регистрацию и вход, а также
//! SEO-обновление поста в два шага: предпросмотр (`preview_refresh`) и
//! применение (`confirm_refresh`).
//!
//! Клиент хранит JWT-токен после `login` и автоматически использует его в
//! защищённых операциях.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{BlogClientError, BlogClientResult};
pub use models::{
    AuthResponse, ListPostsResponse, MetaTags, Post, PostInput, RefreshConfirm, RefreshPreview,
    RegisterResponse, StagedRefresh, User,
};

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Клиент блог-сервиса.
pub struct BlogClient {
    http: HttpClient,
    token: Option<String>,
}

impl BlogClient {
    /// Создаёт клиент для сервера с базовым URL, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> BlogClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
            token: None,
        })
    }

    /// Устанавливает JWT-токен вручную.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Возвращает текущий JWT-токен, если он установлен.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Очищает сохранённый JWT-токен.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Регистрирует пользователя. Токен не выдаётся: после регистрации нужен `login`.
    pub async fn register(
        &self,
        username: &str,
        email: Option<&str>,
        password: &str,
    ) -> BlogClientResult<RegisterResponse> {
        self.http.register(username, email, password).await
    }

    /// Выполняет вход пользователя и сохраняет полученный JWT-токен в клиенте.
    pub async fn login(&mut self, username: &str, password: &str) -> BlogClientResult<AuthResponse> {
        let result = self.http.login(username, password).await?;
        self.token = Some(result.access_token.clone());
        Ok(result)
    }

    /// Создаёт новый пост. `title` и `content` обязательны.
    ///
    /// Требует установленный JWT-токен.
    pub async fn create_post(&self, input: &PostInput) -> BlogClientResult<Post> {
        if input.title.is_none() || input.content.is_none() {
            return Err(BlogClientError::InvalidRequest(
                "title and content are required".to_string(),
            ));
        }
        self.http.create_post(self.require_token()?, input).await
    }

    /// Возвращает пост по идентификатору.
    pub async fn get_post(&self, id: i64) -> BlogClientResult<Post> {
        self.http.get_post(id).await
    }

    /// Обновляет пост по идентификатору; незаданные поля не меняются.
    ///
    /// Требует установленный JWT-токен. Изменять пост может только автор.
    pub async fn update_post(&self, id: i64, input: &PostInput) -> BlogClientResult<Post> {
        self.http.update_post(self.require_token()?, id, input).await
    }

    /// Удаляет пост по идентификатору.
    ///
    /// Требует установленный JWT-токен. Удалять пост может только автор.
    pub async fn delete_post(&self, id: i64) -> BlogClientResult<()> {
        self.http.delete_post(self.require_token()?, id).await
    }

    /// Возвращает список постов (новые первыми) с пагинацией `limit/offset`.
    pub async fn list_posts(&self, limit: i64, offset: i64) -> BlogClientResult<ListPostsResponse> {
        self.http.list_posts(limit, offset).await
    }

    /// Генерирует SEO-обновление поста и сохраняет его как предпросмотр.
    ///
    /// Требует установленный JWT-токен и заданную тему поста.
    pub async fn preview_refresh(&self, id: i64) -> BlogClientResult<RefreshPreview> {
        self.http.preview_refresh(self.require_token()?, id).await
    }

    /// Заново генерирует SEO-обновление и применяет его к посту.
    ///
    /// Требует установленный JWT-токен и заданную тему поста.
    pub async fn confirm_refresh(&self, id: i64) -> BlogClientResult<RefreshConfirm> {
        self.http.confirm_refresh(self.require_token()?, id).await
    }

    fn require_token(&self) -> BlogClientResult<&str> {
        self.token.as_deref().ok_or(BlogClientError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::{BlogClient, BlogClientError, PostInput};

    #[tokio::test]
    async fn protected_calls_fail_fast_without_token() {
        let client = BlogClient::new("http://127.0.0.1:9").expect("client must build");

        let err = client.delete_post(1).await.expect_err("token is required");
        assert!(matches!(err, BlogClientError::Unauthorized));

        let err = client
            .preview_refresh(1)
            .await
            .expect_err("token is required");
        assert!(matches!(err, BlogClientError::Unauthorized));
    }

    #[tokio::test]
    async fn create_requires_title_and_content() {
        let mut client = BlogClient::new("http://127.0.0.1:9").expect("client must build");
        client.set_token("token");

        let input = PostInput {
            title: Some("only title".to_string()),
            ..PostInput::default()
        };
        let err = client.create_post(&input).await.expect_err("content missing");
        assert!(matches!(err, BlogClientError::InvalidRequest(_)));
    }

    #[test]
    fn token_can_be_set_and_cleared() {
        let mut client = BlogClient::new("http://127.0.0.1:9").expect("client must build");
        assert!(client.get_token().is_none());

        client.set_token("abc");
        assert_eq!(client.get_token(), Some("abc"));

        client.clear_token();
        assert!(client.get_token().is_none());
    }
}
