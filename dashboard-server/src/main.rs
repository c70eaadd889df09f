use std::sync::Arc;

use anyhow::Result;
use dashboard_client::PostsClient;
use tracing::{info, warn};

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::dashboard_service::DashboardService;
use application::preview_store::PreviewStore;
use application::product_service::ProductService;
use data::http_post_source::HttpPostSource;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;
use presentation::middleware::route_guard::RouteGuard;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level, settings.log_format)?;

    let client = PostsClient::new(settings.posts_api_url.clone())?;
    match client.base_url() {
        Some(url) => info!(posts_api = %url, "posts API configured"),
        None => warn!("POSTS_API_URL is not set, dashboard pages will fail to load posts"),
    }

    let dashboard = Arc::new(DashboardService::new(Arc::new(HttpPostSource::new(client))));
    let previews = Arc::new(PreviewStore::new(settings.preview_capacity));
    let products = Arc::new(ProductService::new(previews));
    let guard = Arc::new(RouteGuard::new(
        &settings.guard_matchers,
        settings.guard_login_path.clone(),
    )?);

    let state = AppState::new(dashboard, products, guard);

    server::run_http(&settings, state).await
}
