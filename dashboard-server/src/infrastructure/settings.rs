use anyhow::{Context, Result, anyhow};

use super::logging::LogFormat;
use crate::domain::image_selection::MAX_FILES;

#[derive(Debug, Clone)]
pub struct Settings {
    pub posts_api_url: Option<String>,
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub log_format: LogFormat,
    pub guard_matchers: Vec<String>,
    pub guard_login_path: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
    pub preview_capacity: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        // отсутствие POSTS_API_URL не мешает старту: ошибка возникает при запросе постов
        let posts_api_url = get_optional("POSTS_API_URL");

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let cors_origins = parse_csv(
            std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string()),
        );
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let log_format = LogFormat::parse(&std::env::var("LOG_FORMAT").unwrap_or_default())?;

        let guard_matchers = parse_csv(
            std::env::var("GUARD_MATCHERS")
                .unwrap_or_else(|_| "/dashboards/:path*,/admin/:path*".to_string()),
        );
        let guard_login_path =
            std::env::var("GUARD_LOGIN_PATH").unwrap_or_else(|_| "/auth/login".to_string());
        if !guard_login_path.starts_with('/') {
            return Err(anyhow!("GUARD_LOGIN_PATH must start with '/'"));
        }

        let http_request_body_limit_bytes = parse_usize(
            "HTTP_REQUEST_BODY_LIMIT_BYTES",
            std::env::var("HTTP_REQUEST_BODY_LIMIT_BYTES").ok(),
            64 * 1024 * 1024,
        )?;
        let http_concurrency_limit = parse_usize(
            "HTTP_CONCURRENCY_LIMIT",
            std::env::var("HTTP_CONCURRENCY_LIMIT").ok(),
            256,
        )?;
        let http_request_timeout_secs = parse_u64(
            "HTTP_REQUEST_TIMEOUT_SECS",
            std::env::var("HTTP_REQUEST_TIMEOUT_SECS").ok(),
            10,
        )?;
        let preview_capacity = parse_preview_capacity(std::env::var("PREVIEW_CAPACITY").ok())?;

        Ok(Self {
            posts_api_url,
            http_addr,
            cors_origins,
            log_level,
            log_format,
            guard_matchers,
            guard_login_path,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
            preview_capacity,
        })
    }
}

fn get_optional(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_csv(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_usize(key: &str, raw: Option<String>, default: usize) -> Result<usize> {
    let value = raw
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_u64(key: &str, raw: Option<String>, default: u64) -> Result<u64> {
    let value = raw
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

// хранилище должно вмещать полный набор изображений одной формы
fn parse_preview_capacity(raw: Option<String>) -> Result<usize> {
    let value = parse_usize("PREVIEW_CAPACITY", raw, 256)?;
    if value < MAX_FILES {
        return Err(anyhow!("PREVIEW_CAPACITY must be >= {MAX_FILES}"));
    }
    Ok(value)
}
