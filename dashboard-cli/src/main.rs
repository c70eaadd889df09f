use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dashboard_client::{BASE_URL_ENV, DashboardClientError, Post, PostsClient};

#[derive(Debug, Parser)]
#[command(name = "dashboard-cli", version, about = "CLI клиент для API постов")]
struct Cli {
    /// Базовый URL API постов (по умолчанию берётся из POSTS_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Список постов.
    List,
    /// Получение поста по id.
    Get {
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

    let base_url = resolve_base_url(cli.api_url, std::env::var(BASE_URL_ENV).ok());
    let client = PostsClient::new(base_url).map_err(map_client_error)?;

    match cli.command {
        Command::List => {
            let posts = client.fetch_posts().await.map_err(map_client_error)?;
            print_list(&posts);
        }
        Command::Get { id } => {
            let post = client.fetch_post(id).await.map_err(map_client_error)?;
            print_post("Пост", &post);
        }
    }

    Ok(())
}

/// `--api-url` важнее переменной окружения.
fn resolve_base_url(flag: Option<String>, env: Option<String>) -> Option<String> {
    flag.or(env)
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(normalize_api_url)
}

fn normalize_api_url(api_url: String) -> String {
    if api_url.starts_with("http://") || api_url.starts_with("https://") {
        return api_url;
    }

    format!("http://{api_url}")
}

fn map_client_error(err: DashboardClientError) -> anyhow::Error {
    let message = match err {
        DashboardClientError::MissingBaseUrl(env) => {
            format!("не задан адрес API: передайте --api-url или установите {env}")
        }
        DashboardClientError::FetchFailed { status, path } => {
            format!("не удалось получить {path}: HTTP {status}")
        }
        DashboardClientError::Http(err) => format!("ошибка HTTP: {err}"),
        DashboardClientError::Decode(err) => format!("некорректный ответ API: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("user_id: {}", post.user_id);
    println!("title: {}", post.title);
    println!("body: {}", post.body);
}

fn print_list(posts: &[Post]) {
    println!("Постов: {}", posts.len());

    for post in posts {
        println!("{}", format_list_line(post));
    }
}

fn format_list_line(post: &Post) -> String {
    format!("- [{}] {} (user_id={})", post.id, post.title, post.user_id)
}
