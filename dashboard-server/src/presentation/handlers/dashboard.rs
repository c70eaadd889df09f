use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::views::{DashboardPage, PostPage, render};

pub(crate) async fn list_posts(State(state): State<AppState>) -> AppResult<Response> {
    let cards = state.dashboard.list_cards().await?;

    render(
        StatusCode::OK,
        &DashboardPage {
            heading: "Posts",
            cards,
            show_body: false,
        },
    )
}

pub(crate) async fn list_post_cards(State(state): State<AppState>) -> AppResult<Response> {
    let pending = state.dashboard.prefetch_cards();
    let cards = pending.resolve().await?;

    render(
        StatusCode::OK,
        &DashboardPage {
            heading: "Cards",
            cards,
            show_body: true,
        },
    )
}

pub(crate) async fn show_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let card = state.dashboard.get_card(&slug).await?;

    render(
        StatusCode::OK,
        &PostPage {
            card,
            show_body: false,
        },
    )
}
