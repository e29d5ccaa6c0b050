use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{BlogClientError, BlogClientResult};
use crate::models::{
    AuthResponse, ListPostsResponse, Post, PostInput, RefreshConfirm, RefreshPreview,
    RegisterResponse,
};

#[derive(Debug, Serialize)]
struct RegisterRequestDto<'a> {
    username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListPostsResponseDto {
    posts: Vec<Post>,
    limit: i64,
    offset: i64,
    total: i64,
}

#[derive(Serialize)]
struct ListPostsQuery {
    limit: i64,
    offset: i64,
}

impl From<ListPostsResponseDto> for ListPostsResponse {
    fn from(value: ListPostsResponseDto) -> Self {
        Self {
            posts: value.posts,
            limit: value.limit,
            offset: value.offset,
            total: value.total.max(0) as u64,
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API `seoblog-server`.
pub(crate) struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    // генерация текста на сервере может идти минутами
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

    pub(crate) fn new(base_url: impl Into<String>) -> BlogClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Self::REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.client.request(method, self.endpoint(path));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn decode_error(response: reqwest::Response) -> BlogClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body.error,
            Err(_) => None,
        };
        BlogClientError::from_http_status(status, message)
    }

    async fn execute(request: RequestBuilder) -> BlogClientResult<reqwest::Response> {
        let response = request.send().await.map_err(BlogClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    async fn execute_json<T: DeserializeOwned>(request: RequestBuilder) -> BlogClientResult<T> {
        Self::execute(request)
            .await?
            .json::<T>()
            .await
            .map_err(BlogClientError::from_reqwest)
    }

    pub(crate) async fn register(
        &self,
        username: &str,
        email: Option<&str>,
        password: &str,
    ) -> BlogClientResult<RegisterResponse> {
        let payload = RegisterRequestDto {
            username,
            email,
            password,
        };
        Self::execute_json(self.request(Method::POST, "/api/register/", None).json(&payload))
            .await
    }

    pub(crate) async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> BlogClientResult<AuthResponse> {
        let payload = LoginRequestDto { username, password };
        Self::execute_json(self.request(Method::POST, "/api/token/", None).json(&payload)).await
    }

    pub(crate) async fn create_post(&self, token: &str, input: &PostInput) -> BlogClientResult<Post> {
        Self::execute_json(
            self.request(Method::POST, "/api/blogs/", Some(token))
                .json(input),
        )
        .await
    }

    pub(crate) async fn get_post(&self, id: i64) -> BlogClientResult<Post> {
        Self::execute_json(self.request(Method::GET, &format!("/api/blogs/{id}/"), None)).await
    }

    /// `PUT` при заданных title и content, иначе `PATCH`.
    pub(crate) async fn update_post(
        &self,
        token: &str,
        id: i64,
        input: &PostInput,
    ) -> BlogClientResult<Post> {
        let method = if input.title.is_some() && input.content.is_some() {
            Method::PUT
        } else {
            Method::PATCH
        };
        Self::execute_json(
            self.request(method, &format!("/api/blogs/{id}/"), Some(token))
                .json(input),
        )
        .await
    }

    pub(crate) async fn delete_post(&self, token: &str, id: i64) -> BlogClientResult<()> {
        Self::execute(self.request(Method::DELETE, &format!("/api/blogs/{id}/"), Some(token)))
            .await?;
        Ok(())
    }

    pub(crate) async fn list_posts(
        &self,
        limit: i64,
        offset: i64,
    ) -> BlogClientResult<ListPostsResponse> {
        let query = ListPostsQuery { limit, offset };
        let dto: ListPostsResponseDto =
            Self::execute_json(self.request(Method::GET, "/api/blogs/", None).query(&query))
                .await?;
        Ok(dto.into())
    }

    pub(crate) async fn preview_refresh(
        &self,
        token: &str,
        id: i64,
    ) -> BlogClientResult<RefreshPreview> {
        Self::execute_json(self.request(
            Method::GET,
            &format!("/api/refresh-blog/{id}/preview/"),
            Some(token),
        ))
        .await
    }

    pub(crate) async fn confirm_refresh(
        &self,
        token: &str,
        id: i64,
    ) -> BlogClientResult<RefreshConfirm> {
        Self::execute_json(self.request(
            Method::POST,
            &format!("/api/refresh-blog/{id}/confirm/"),
            Some(token),
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("http://localhost:8080/").expect("client must build");
        let full = client.endpoint("/api/blogs/");
        assert_eq!(full, "http://localhost:8080/api/blogs/");
    }

    #[test]
    fn list_posts_response_clamps_negative_total() {
        let dto: ListPostsResponseDto = serde_json::from_value(serde_json::json!({
            "posts": [{
                "id": 1,
                "title": "t",
                "content": "c",
                "topic": null,
                "meta_tags": {},
                "author_id": 2,
                "author": "alice",
                "created_at": "2026-01-01T00:00:00Z",
                "updated_at": "2026-01-02T00:00:00Z",
                "preview_data": null
            }],
            "limit": 10,
            "offset": 0,
            "total": -7
        }))
        .expect("dto must decode");

        let mapped = ListPostsResponse::from(dto);
        assert_eq!(mapped.total, 0);
        assert_eq!(mapped.posts.len(), 1);
        assert_eq!(mapped.posts[0].author, "alice");
    }

    #[test]
    fn partial_input_omits_unset_fields() {
        let input = PostInput {
            topic: Some("seo".to_string()),
            ..PostInput::default()
        };
        let value = serde_json::to_value(&input).expect("input must serialize");
        assert_eq!(value, serde_json::json!({ "topic": "seo" }));
    }
}
