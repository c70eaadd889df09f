use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::dashboard::{list_post_cards, list_posts, show_post};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts))
        .route("/cards", get(list_post_cards))
        .route("/blog/{slug}", get(show_post))
}
