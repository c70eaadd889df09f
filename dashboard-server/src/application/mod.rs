pub(crate) mod dashboard_service;
pub(crate) mod preview_store;
pub(crate) mod product_service;
