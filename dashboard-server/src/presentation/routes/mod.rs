use axum::Router;

use super::AppState;

pub(crate) mod auth;
pub(crate) mod dashboard;
pub(crate) mod products;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .nest("/dashboard", dashboard::router())
        .nest("/auth", auth::router())
        .nest("/products", products::router())
}
