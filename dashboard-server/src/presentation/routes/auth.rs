use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::auth::{login, login_page, register, register_page};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
}
