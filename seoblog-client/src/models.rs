use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// SEO-метаданные поста: произвольный JSON-объект (`title`, `description`, `keywords`, ...).
pub type MetaTags = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичная модель пользователя.
pub struct User {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Логин.
    pub username: String,
    /// Email, если был указан при регистрации.
    pub email: Option<String>,
    /// Дата и время создания пользователя (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Результат SEO-обновления, сохранённый в `preview_data`.
pub struct StagedRefresh {
    /// Новый заголовок.
    pub title: String,
    /// Новое содержимое.
    pub content: String,
    /// Новые метаданные.
    pub meta_tags: MetaTags,
    /// Тренды, использованные при генерации.
    pub trends_used: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичная модель поста.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Содержимое поста.
    pub content: String,
    /// Тема поста; без неё SEO-обновление невозможно.
    pub topic: Option<String>,
    /// SEO-метаданные.
    pub meta_tags: MetaTags,
    /// Идентификатор автора.
    pub author_id: i64,
    /// Логин автора.
    pub author: String,
    /// Дата и время создания поста (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата и время последнего обновления поста (UTC).
    pub updated_at: DateTime<Utc>,
    /// Подготовленное, но ещё не применённое SEO-обновление.
    pub preview_data: Option<StagedRefresh>,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Поля для создания или изменения поста. `None` означает «не менять».
pub struct PostInput {
    /// Заголовок.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Содержимое.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Тема; пустая строка очищает тему.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// SEO-метаданные.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_tags: Option<MetaTags>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Ответ после успешной регистрации.
pub struct RegisterResponse {
    /// Сообщение сервера.
    pub message: String,
    /// Созданный пользователь.
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Ответ после успешного входа.
pub struct AuthResponse {
    /// JWT access token.
    pub access_token: String,
    /// Данные пользователя.
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Ответ списка постов с параметрами пагинации.
pub struct ListPostsResponse {
    /// Список постов на текущей странице, новые первыми.
    pub posts: Vec<Post>,
    /// Размер страницы.
    pub limit: i64,
    /// Смещение от начала выборки.
    pub offset: i64,
    /// Общее количество постов.
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Предпросмотр SEO-обновления; пост при этом не меняется.
pub struct RefreshPreview {
    /// Сообщение сервера.
    pub message: String,
    /// Предлагаемый заголовок.
    pub preview_title: String,
    /// Предлагаемое содержимое.
    pub preview_content: String,
    /// Предлагаемые метаданные.
    pub preview_meta_tags: MetaTags,
    /// Тренды, использованные при генерации.
    pub trends_used: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Результат применения SEO-обновления.
pub struct RefreshConfirm {
    /// Сообщение сервера.
    pub message: String,
    /// Пост после обновления.
    pub updated_blog: Post,
    /// Тренды, использованные при генерации.
    pub trends_used: Vec<String>,
}
