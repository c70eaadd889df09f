use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::data::post_source::PostSource;
use crate::domain::error::DomainError;
use crate::domain::post::{PostCard, parse_post_slug};

pub(crate) struct DashboardService {
    source: Arc<dyn PostSource>,
}

pub(crate) struct PendingCards(JoinHandle<Result<Vec<PostCard>, DomainError>>);

impl PendingCards {
    pub(crate) async fn resolve(self) -> Result<Vec<PostCard>, DomainError> {
        self.0
            .await
            .map_err(|err| DomainError::Unexpected(format!("posts fetch task failed: {err}")))?
    }
}

impl DashboardService {
    pub(crate) fn new(source: Arc<dyn PostSource>) -> Self {
        Self { source }
    }

    pub(crate) async fn list_cards(&self) -> Result<Vec<PostCard>, DomainError> {
        let posts = self.source.list_posts().await?;
        Ok(posts.into_iter().map(PostCard::from).collect())
    }

    pub(crate) fn prefetch_cards(self: &Arc<Self>) -> PendingCards {
        let service = Arc::clone(self);
        PendingCards(tokio::spawn(async move { service.list_cards().await }))
    }

    pub(crate) async fn get_card(&self, slug: &str) -> Result<PostCard, DomainError> {
        let id = parse_post_slug(slug)?;
        let post = self.source.get_post(id).await?;
        Ok(PostCard::from(post))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use dashboard_client::Post;

    use super::*;

    /// Fake source shared by service and handler tests.
    #[derive(Default)]
    pub(crate) struct FakePostSource {
        pub(crate) posts: Vec<Post>,
        pub(crate) fail_with: Option<fn() -> DomainError>,
        pub(crate) requested_ids: Mutex<Vec<i64>>,
    }

    impl FakePostSource {
        pub(crate) fn with_posts(posts: Vec<Post>) -> Self {
            Self {
                posts,
                ..Self::default()
            }
        }

        pub(crate) fn failing(fail_with: fn() -> DomainError) -> Self {
            Self {
                fail_with: Some(fail_with),
                ..Self::default()
            }
        }

        fn requested_ids(&self) -> Vec<i64> {
            self.requested_ids
                .lock()
                .expect("requested ids mutex poisoned")
                .clone()
        }
    }

    #[async_trait]
    impl PostSource for FakePostSource {
        async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
            if let Some(fail_with) = self.fail_with {
                return Err(fail_with());
            }
            Ok(self.posts.clone())
        }

        async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
            self.requested_ids
                .lock()
                .expect("requested ids mutex poisoned")
                .push(id);
            if let Some(fail_with) = self.fail_with {
                return Err(fail_with());
            }
            self.posts
                .iter()
                .find(|post| post.id == id)
                .cloned()
                .ok_or_else(|| DomainError::NotFound(format!("posts/{id}")))
        }
    }

    pub(crate) fn sample_post(id: i64, title: &str) -> Post {
        Post {
            id,
            user_id: 1,
            title: title.to_string(),
            body: format!("body of {title}"),
        }
    }

    #[tokio::test]
    async fn list_cards_maps_every_post() {
        let source = FakePostSource::with_posts(vec![sample_post(1, "first"), sample_post(2, "")]);
        let service = DashboardService::new(Arc::new(source));

        let cards = service.list_cards().await.expect("list must succeed");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "first");
        assert_eq!(cards[1].title, "Default title");
    }

    #[tokio::test]
    async fn prefetched_cards_resolve_to_the_same_list() {
        let source = FakePostSource::with_posts(vec![sample_post(5, "five")]);
        let service = Arc::new(DashboardService::new(Arc::new(source)));

        let pending = service.prefetch_cards();
        let cards = pending.resolve().await.expect("prefetch must succeed");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, 5);
    }

    #[tokio::test]
    async fn invalid_slug_never_reaches_the_source() {
        let source = Arc::new(FakePostSource::with_posts(vec![sample_post(1, "first")]));
        let service = DashboardService::new(source.clone());

        let err = service.get_card("first-post").await.expect_err("must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(source.requested_ids().is_empty());

        let card = service.get_card("1").await.expect("must succeed");
        assert_eq!(card.title, "first");
        assert_eq!(source.requested_ids(), vec![1]);
    }

    #[tokio::test]
    async fn source_errors_propagate() {
        let source = FakePostSource::failing(|| DomainError::Upstream("boom".to_string()));
        let service = DashboardService::new(Arc::new(source));

        let err = service.list_cards().await.expect_err("must fail");
        assert!(matches!(err, DomainError::Upstream(_)));
    }
}
