use askama::Template;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::domain::error::DomainError;
use crate::presentation::views::ErrorPage;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("not found")]
    NotFound,

    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("template render failed: {0}")]
    Render(#[from] askama::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Domain(err) => match err {
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "not found".to_string()),
                DomainError::MissingConfiguration(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "the posts API is not configured".to_string(),
                ),
                DomainError::Upstream(_) => (
                    StatusCode::BAD_GATEWAY,
                    "failed to fetch posts".to_string(),
                ),
                DomainError::Unexpected(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                ),
            },
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            AppError::Multipart(err) => (err.status(), err.body_text()),
            AppError::Render(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(error = %self, %status, "request failed");
        }

        let page = ErrorPage {
            status: status.as_u16(),
            message,
        };
        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                error!(error = %err, "error page render failed");
                (status, page.message).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::NotFound("posts/9".into()), StatusCode::NOT_FOUND),
            (
                DomainError::MissingConfiguration("POSTS_API_URL".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (DomainError::Upstream("503".into()), StatusCode::BAD_GATEWAY),
            (DomainError::Unexpected("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn error_page_hides_internal_details() {
        let err = AppError::from(DomainError::Upstream("connection refused to 10.0.0.1".into()));
        let (_, message) = err.status_and_message();
        assert_eq!(message, "failed to fetch posts");
    }
}
