use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{DashboardClientError, DashboardClientResult};
use crate::models::Post;

/// Переменная окружения с базовым URL posts API.
pub const BASE_URL_ENV: &str = "POSTS_API_URL";

#[derive(Debug, Clone)]
/// HTTP-клиент для внешнего posts API.
pub struct PostsClient {
    base_url: Option<String>,
    client: Client,
}

impl PostsClient {
    /// Создаёт клиент. Пустой или отсутствующий `base_url` не является ошибкой
    /// здесь: запросы вернут `DashboardClientError::MissingBaseUrl`.
    pub fn new(base_url: Option<String>) -> DashboardClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(DashboardClientError::Http)?;

        let base_url = base_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(Self { base_url, client })
    }

    /// Создаёт клиент, читая базовый URL из `POSTS_API_URL`.
    pub fn from_env() -> DashboardClientResult<Self> {
        Self::new(std::env::var(BASE_URL_ENV).ok())
    }

    /// Базовый URL, если он задан.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn endpoint(&self, path: &str) -> DashboardClientResult<String> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(DashboardClientError::MissingBaseUrl(BASE_URL_ENV))?;

        Ok(format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> DashboardClientResult<T> {
        let url = self.endpoint(path)?;

        let response = self
            .client
            .request(Method::GET, url)
            .send()
            .await
            .map_err(DashboardClientError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardClientError::FetchFailed {
                status,
                path: path.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(DashboardClientError::from_reqwest)
    }

    /// Получает все посты: `GET <base-url>/posts`.
    pub async fn fetch_posts(&self) -> DashboardClientResult<Vec<Post>> {
        self.get_json("posts").await
    }

    /// Получает пост по идентификатору: `GET <base-url>/posts/<id>`.
    pub async fn fetch_post(&self, id: i64) -> DashboardClientResult<Post> {
        self.get_json(&format!("posts/{id}")).await
    }
}
