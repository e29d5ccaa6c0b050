use std::fs;
use std::io;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use seoblog_client::{
    BlogClient, BlogClientError, ListPostsResponse, MetaTags, Post, PostInput, RefreshConfirm,
    RefreshPreview, User,
};

const TOKEN_FILE: &str = ".blog_token";
const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";
const SERVER_ENV: &str = "SEOBLOG_SERVER";

#[derive(Debug, Parser)]
#[command(name = "seoblog-cli", version, about = "CLI клиент для seoblog-server")]
struct Cli {
    /// Адрес HTTP сервера. По умолчанию берётся из SEOBLOG_SERVER или localhost:8080.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация пользователя (токен не выдаётся, нужен login).
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: String,
    },
    /// Вход пользователя, токен сохраняется в .blog_token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Выход: удаляет сохранённый токен.
    Logout,
    /// Создание поста (требует токен).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        topic: Option<String>,
        /// Метатеги в виде JSON-объекта, например '{"robots":"index"}'.
        #[arg(long)]
        meta_tags: Option<String>,
    },
    /// Получение поста по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Обновление поста (требует токен). Незаданные поля не меняются.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Пустая строка очищает тему.
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        meta_tags: Option<String>,
    },
    /// Удаление поста (требует токен).
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Список постов.
    List {
        #[arg(long, default_value_t = 20)]
        limit: i64,
        #[arg(long, default_value_t = 0)]
        offset: i64,
    },
    /// Предпросмотр SEO-обновления поста (требует токен).
    Preview {
        #[arg(long)]
        id: i64,
    },
    /// Применение SEO-обновления поста (требует токен).
    Confirm {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server, std::env::var(SERVER_ENV).ok());
    let mut client = BlogClient::new(server).map_err(map_client_error)?;

    if let Some(token) = load_token().context("не удалось прочитать .blog_token")? {
        client.set_token(token);
    }

    match cli.command {
        Command::Register {
            username,
            email,
            password,
        } => {
            let registered = client
                .register(&username, email.as_deref(), &password)
                .await
                .map_err(map_client_error)?;
            println!("{}", registered.message);
            print_user(&registered.user);
        }
        Command::Login { username, password } => {
            let auth = client
                .login(&username, &password)
                .await
                .map_err(map_client_error)?;
            persist_token(&client).context("не удалось сохранить токен")?;
            println!("Вход выполнен");
            println!("token: {}", auth.access_token);
            print_user(&auth.user);
        }
        Command::Logout => {
            remove_token().context("не удалось удалить .blog_token")?;
            println!("Токен удалён");
        }
        Command::Create {
            title,
            content,
            topic,
            meta_tags,
        } => {
            let input = PostInput {
                title: Some(title),
                content: Some(content),
                topic,
                meta_tags: parse_meta_tags(meta_tags.as_deref())?,
            };
            let post = client
                .create_post(&input)
                .await
                .map_err(map_client_error)?;
            print_post("Пост создан", &post);
        }
        Command::Get { id } => {
            let post = client.get_post(id).await.map_err(map_client_error)?;
            print_post("Пост", &post);
        }
        Command::Update {
            id,
            title,
            content,
            topic,
            meta_tags,
        } => {
            let input = PostInput {
                title,
                content,
                topic,
                meta_tags: parse_meta_tags(meta_tags.as_deref())?,
            };
            let post = client
                .update_post(id, &input)
                .await
                .map_err(map_client_error)?;
            print_post("Пост обновлён", &post);
        }
        Command::Delete { id } => {
            client.delete_post(id).await.map_err(map_client_error)?;
            println!("Пост удалён: id={id}");
        }
        Command::List { limit, offset } => {
            let list = client
                .list_posts(limit, offset)
                .await
                .map_err(map_client_error)?;
            print_list(&list);
        }
        Command::Preview { id } => {
            let preview = client
                .preview_refresh(id)
                .await
                .map_err(map_client_error)?;
            print_preview(&preview);
        }
        Command::Confirm { id } => {
            let confirmed = client
                .confirm_refresh(id)
                .await
                .map_err(map_client_error)?;
            print_confirm(&confirmed);
        }
    }

    Ok(())
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .filter(|server| !server.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw.trim().to_string())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_meta_tags(raw: Option<&str>) -> Result<Option<MetaTags>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let tags: MetaTags =
        serde_json::from_str(raw).context("--meta-tags должен быть JSON-объектом")?;
    Ok(Some(tags))
}

fn parse_token_content(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn load_token() -> io::Result<Option<String>> {
    if !Path::new(TOKEN_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(TOKEN_FILE)?;
    Ok(parse_token_content(&raw))
}

fn persist_token(client: &BlogClient) -> io::Result<()> {
    if let Some(token) = client.get_token() {
        fs::write(TOKEN_FILE, token)?;
    }
    Ok(())
}

fn remove_token() -> io::Result<()> {
    match fs::remove_file(TOKEN_FILE) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

fn map_client_error(err: BlogClientError) -> anyhow::Error {
    let message = match err {
        BlogClientError::Unauthorized => {
            "требуется авторизация: выполните `seoblog-cli login ...`".to_string()
        }
        BlogClientError::Forbidden => "доступ запрещён: пост принадлежит другому автору".to_string(),
        BlogClientError::NotFound => "ресурс не найден".to_string(),
        BlogClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        BlogClientError::Server(message) => format!("ошибка сервера: {message}"),
        BlogClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn format_meta_tags(tags: &MetaTags) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "{}".to_string())
}

fn print_user(user: &User) {
    println!("user:");
    println!("  id: {}", user.id);
    println!("  username: {}", user.username);
    println!("  email: {}", user.email.as_deref().unwrap_or("-"));
    println!("  created_at: {}", user.created_at);
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("content: {}", post.content);
    println!("topic: {}", post.topic.as_deref().unwrap_or("-"));
    println!("meta_tags: {}", format_meta_tags(&post.meta_tags));
    println!("author: {} (id={})", post.author, post.author_id);
    println!("created_at: {}", post.created_at);
    println!("updated_at: {}", post.updated_at);
    if post.preview_data.is_some() {
        println!("preview: есть неприменённое SEO-обновление");
    }
}

fn print_list(list: &ListPostsResponse) {
    println!(
        "Постов: {} (limit={}, offset={}, total={})",
        list.posts.len(),
        list.limit,
        list.offset,
        list.total
    );

    for post in &list.posts {
        println!("- [{}] {} (author={})", post.id, post.title, post.author);
    }
}

fn print_trends(trends: &[String]) {
    println!("trends_used:");
    for trend in trends {
        println!("  - {trend}");
    }
}

fn print_preview(preview: &RefreshPreview) {
    println!("{}", preview.message);
    println!("title: {}", preview.preview_title);
    println!("content: {}", preview.preview_content);
    println!("meta_tags: {}", format_meta_tags(&preview.preview_meta_tags));
    print_trends(&preview.trends_used);
}

fn print_confirm(confirmed: &RefreshConfirm) {
    print_post(&confirmed.message, &confirmed.updated_blog);
    print_trends(&confirmed.trends_used);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8080".to_string());
        assert_eq!(s, "http://127.0.0.1:8080");
    }

    #[test]
    fn resolve_server_prefers_flag_then_env_then_default() {
        assert_eq!(resolve_server(None, None), DEFAULT_SERVER);
        assert_eq!(
            resolve_server(None, Some("env-host:9000".to_string())),
            "http://env-host:9000"
        );
        assert_eq!(
            resolve_server(
                Some("localhost:9999".to_string()),
                Some("env-host:9000".to_string())
            ),
            "http://localhost:9999"
        );
        assert_eq!(resolve_server(Some("  ".to_string()), None), DEFAULT_SERVER);
    }

    #[test]
    fn parse_meta_tags_accepts_objects_only() {
        let tags = parse_meta_tags(Some(r#"{"robots":"index"}"#))
            .expect("object must parse")
            .expect("tags must be present");
        assert_eq!(tags["robots"], "index");

        assert!(parse_meta_tags(None).expect("absent is fine").is_none());
        assert!(parse_meta_tags(Some("[1,2]")).is_err());
    }

    #[test]
    fn parse_token_content_trims_whitespace() {
        let token = parse_token_content("  abc.def.ghi  ");
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_token_content_rejects_blank() {
        let token = parse_token_content("   ");
        assert!(token.is_none());
    }

    #[test]
    fn cli_parses_update_with_partial_fields() {
        let cli = Cli::try_parse_from(["seoblog-cli", "update", "--id", "3", "--topic", ""])
            .expect("args must parse");
        match cli.command {
            Command::Update {
                id, title, topic, ..
            } => {
                assert_eq!(id, 3);
                assert!(title.is_none());
                assert_eq!(topic.as_deref(), Some(""));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
