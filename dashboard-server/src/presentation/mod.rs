use std::sync::Arc;

use crate::application::dashboard_service::DashboardService;
use crate::application::product_service::ProductService;
use crate::presentation::middleware::route_guard::RouteGuard;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod routes;
pub(crate) mod views;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) dashboard: Arc<DashboardService>,
    pub(crate) products: Arc<ProductService>,
    pub(crate) guard: Arc<RouteGuard>,
}

impl AppState {
    pub(crate) fn new(
        dashboard: Arc<DashboardService>,
        products: Arc<ProductService>,
        guard: Arc<RouteGuard>,
    ) -> Self {
        Self {
            dashboard,
            products,
            guard,
        }
    }
}
