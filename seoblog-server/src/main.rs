use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::AuthService;
use application::blog_service::BlogService;
use application::refresh_service::RefreshService;
use application::seo::SeoPipeline;
use application::seo::keywords::RakeExtractor;
use application::seo::outdated::RuleBasedRecognizer;
use application::seo::trends::MockTrendSource;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::generator::HttpTextGenerator;
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url, settings.database_max_connections).await?;
    run_migrations(&pool).await?;

    let jwt = JwtService::new(&settings.jwt_secret, settings.jwt_ttl_seconds);

    let generator = HttpTextGenerator::new(&settings.generator)
        .context("failed to build text generator client")?;
    let recognizer = RuleBasedRecognizer::new().context("failed to compile entity patterns")?;
    let pipeline = SeoPipeline::new(
        Arc::new(recognizer),
        Arc::new(RakeExtractor),
        Arc::new(MockTrendSource),
        Arc::new(generator),
    );
    info!(generator_url = %settings.generator.url, "seo pipeline ready");

    let auth_service = AuthService::new(PostgresUserRepository::new(pool.clone()), jwt.clone());
    let blog_service = BlogService::new(PostgresPostRepository::new(pool.clone()));
    let refresh_service = RefreshService::new(PostgresPostRepository::new(pool.clone()), pipeline);

    let state = AppState::new(
        pool,
        Arc::new(auth_service),
        Arc::new(blog_service),
        Arc::new(refresh_service),
        Arc::new(jwt),
    );

    server::run_http(&settings, state).await
}
