use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::http::handlers::auth::{
    LoginDto, RegisterDto, RegisterResponseDto, TokenResponseDto, UserDto,
};
use crate::presentation::http::handlers::posts::{
    CreatePostDto, ListPostsResponseDto, PatchPostDto, PostDto, ReplacePostDto, StagedRefreshDto,
};
use crate::presentation::http::handlers::refresh::{RefreshConfirmDto, RefreshPreviewDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::auth::register,
        crate::presentation::http::handlers::auth::login,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::replace_post,
        crate::presentation::http::handlers::posts::patch_post,
        crate::presentation::http::handlers::posts::delete_post,
        crate::presentation::http::handlers::refresh::preview_refresh,
        crate::presentation::http::handlers::refresh::confirm_refresh
    ),
    components(
        schemas(
            RegisterDto,
            RegisterResponseDto,
            LoginDto,
            TokenResponseDto,
            UserDto,
            CreatePostDto,
            ReplacePostDto,
            PatchPostDto,
            PostDto,
            StagedRefreshDto,
            ListPostsResponseDto,
            RefreshPreviewDto,
            RefreshConfirmDto
        )
    ),
    tags(
        (name = "auth", description = "Registration and token issue"),
        (name = "blogs", description = "Blog post CRUD"),
        (name = "refresh", description = "SEO refresh preview and confirm")
    ),
    modifiers(&BearerAuth)
)]
pub(crate) struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_every_route_with_trailing_slash() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/register/",
            "/api/token/",
            "/api/blogs/",
            "/api/blogs/{id}/",
            "/api/refresh-blog/{id}/preview/",
            "/api/refresh-blog/{id}/confirm/",
        ] {
            assert!(paths.contains(&expected), "missing path {expected}");
        }

        let components = doc.components.expect("components must be present");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
