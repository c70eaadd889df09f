use async_trait::async_trait;
use dashboard_client::{DashboardClientError, Post, PostsClient};
use tracing::{debug, warn};

use super::post_source::PostSource;
use crate::domain::error::DomainError;

pub(crate) struct HttpPostSource {
    client: PostsClient,
}

impl HttpPostSource {
    pub(crate) fn new(client: PostsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let posts = self.client.fetch_posts().await.map_err(map_client_error)?;
        debug!(count = posts.len(), "fetched posts");
        Ok(posts)
    }

    async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.client.fetch_post(id).await.map_err(map_client_error)
    }
}

fn map_client_error(err: DashboardClientError) -> DomainError {
    warn!(error = %err, "posts API request failed");
    match err {
        DashboardClientError::MissingBaseUrl(var) => {
            DomainError::MissingConfiguration(format!("{var} is not defined"))
        }
        DashboardClientError::FetchFailed { status, path } if status.as_u16() == 404 => {
            DomainError::NotFound(path)
        }
        other => DomainError::Upstream(other.to_string()),
    }
}
