use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::products::{create_product, new_product_page, show_preview};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/new", get(new_product_page).post(create_product))
        .route("/previews/{id}", get(show_preview))
}
