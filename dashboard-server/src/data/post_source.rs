use async_trait::async_trait;
use dashboard_client::Post;

use crate::domain::error::DomainError;

#[async_trait]
pub(crate) trait PostSource: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Post, DomainError>;
}
