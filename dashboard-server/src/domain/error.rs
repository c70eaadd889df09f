use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
