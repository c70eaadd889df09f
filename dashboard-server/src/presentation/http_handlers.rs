use axum::{
    Json, Router, middleware,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Serialize;

use super::app_error::AppError;
use super::middleware::route_guard::route_guard;
use super::{AppState, routes};

// guard оборачивает и fallback: защищённые префиксы редиректятся без своих маршрутов
pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/healthz", get(health_handler))
        .merge(routes::router())
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(state.clone(), route_guard))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

async fn index_handler() -> Redirect {
    Redirect::to("/dashboard")
}

async fn not_found_handler() -> Response {
    AppError::NotFound.into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::application::dashboard_service::DashboardService;
    use crate::application::dashboard_service::tests::{FakePostSource, sample_post};
    use crate::application::preview_store::PreviewStore;
    use crate::application::product_service::ProductService;
    use crate::domain::error::DomainError;
    use crate::presentation::middleware::route_guard::RouteGuard;

    fn app(source: FakePostSource) -> Router {
        let guard = RouteGuard::new(
            &["/dashboards/:path*".to_string(), "/admin/:path*".to_string()],
            "/auth/login",
        )
        .expect("valid matchers");
        let state = AppState::new(
            Arc::new(DashboardService::new(Arc::new(source))),
            Arc::new(ProductService::new(Arc::new(PreviewStore::new(16)))),
            Arc::new(guard),
        );
        routes(state)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router is infallible");
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, location, String::from_utf8_lossy(&body).into_owned())
    }

    async fn post_form(app: Router, uri: &str, form: &str) -> (StatusCode, String) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("request");
        let response = app.oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn protected_prefixes_redirect_to_login() {
        for uri in ["/dashboards", "/dashboards/stats", "/admin", "/admin/users?page=2"] {
            let (status, location, _) = get(app(FakePostSource::default()), uri).await;
            assert_eq!(status, StatusCode::TEMPORARY_REDIRECT, "uri: {uri}");
            assert_eq!(location.as_deref(), Some("/auth/login"), "uri: {uri}");
        }
    }

    #[tokio::test]
    async fn unprotected_pages_are_served() {
        let (status, location, _) = get(app(FakePostSource::default()), "/auth/login").await;
        assert_eq!(status, StatusCode::OK);
        assert!(location.is_none());

        let (status, _, body) = get(app(FakePostSource::default()), "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("ok"));
    }

    #[tokio::test]
    async fn dashboard_lists_fetched_posts() {
        let source = FakePostSource::with_posts(vec![
            sample_post(1, "sunt aut facere"),
            sample_post(2, "qui est esse"),
        ]);

        let (status, _, body) = get(app(source), "/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("sunt aut facere"));
        assert!(body.contains("href=\"/dashboard/blog/2\""));
    }

    #[tokio::test]
    async fn card_list_renders_bodies() {
        let source = FakePostSource::with_posts(vec![sample_post(4, "magnam facilis")]);

        let (status, _, body) = get(app(source), "/dashboard/cards").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("body of magnam facilis"));
    }

    #[tokio::test]
    async fn post_detail_escapes_html() {
        let source = FakePostSource::with_posts(vec![sample_post(3, "<script>x</script>")]);

        let (status, _, body) = get(app(source), "/dashboard/blog/3").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("<script>x</script>"));
        assert!(body.contains("&#60;script&#62;x&#60;/script&#62;"));
    }

    #[tokio::test]
    async fn unknown_post_and_bad_slug_render_not_found() {
        let (status, _, _) = get(app(FakePostSource::default()), "/dashboard/blog/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, body) = get(app(FakePostSource::default()), "/dashboard/blog/abc").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Something went wrong"));
    }

    #[tokio::test]
    async fn fetch_failures_render_the_error_page() {
        let source = FakePostSource::failing(|| DomainError::Upstream("status 500".to_string()));
        let (status, _, body) = get(app(source), "/dashboard").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("failed to fetch posts"));

        let source = FakePostSource::failing(|| {
            DomainError::MissingConfiguration("POSTS_API_URL is not defined".to_string())
        });
        let (status, _, _) = get(app(source), "/dashboard").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn invalid_login_shows_inline_errors() {
        let (status, body) =
            post_form(app(FakePostSource::default()), "/auth/login", "email=nope&password=short").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("Please input email"));
        assert!(body.contains("At least 8 characters"));
        assert!(body.contains("value=\"nope\""));
    }

    #[tokio::test]
    async fn valid_login_is_accepted() {
        let (status, body) = post_form(
            app(FakePostSource::default()),
            "/auth/login",
            "email=m%40example.com&password=hunter22",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Login submitted"));
    }

    #[tokio::test]
    async fn register_reports_password_policy() {
        let (status, body) = post_form(
            app(FakePostSource::default()),
            "/auth/register",
            "email=m%40example.com&password=alllowercase1%21",
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("Must contain at least one uppercase letter"));

        let (status, body) = post_form(
            app(FakePostSource::default()),
            "/auth/register",
            "email=m%40example.com&password=Sup3r-secret",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Registration submitted"));
    }

    const BOUNDARY: &str = "X-DASHBOARD-BOUNDARY";

    fn multipart_body(texts: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Body {
        let mut body = Vec::new();
        if let Some((file_name, content_type, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"images\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        for (name, value) in texts {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Body::from(body)
    }

    async fn post_multipart(app: Router, body: Body) -> (StatusCode, String) {
        let request = Request::post("/products/new")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(body)
            .expect("request");
        let response = app.oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    const VALID_FIELDS: [(&str, &str); 4] = [
        ("title", "Laptop stand"),
        ("price", "19.99"),
        ("category_id", "accessories"),
        ("description", "Aluminium stand for 13-16 inch laptops"),
    ];

    #[tokio::test]
    async fn valid_product_is_created() {
        let body = multipart_body(&VALID_FIELDS, Some(("front.png", "image/png", &b"\x89PNG"[..])));

        let (status, page) = post_multipart(app(FakePostSource::default()), body).await;
        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("Product created!"));
        assert!(!page.contains("/products/previews/"));
    }

    #[tokio::test]
    async fn invalid_product_keeps_the_staged_image() {
        let fields = [
            ("title", "ab"),
            ("price", "0"),
            ("category_id", ""),
            ("description", "too short"),
        ];
        let body = multipart_body(&fields, Some(("front.png", "image/png", &b"\x89PNG"[..])));

        let (status, page) = post_multipart(app(FakePostSource::default()), body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(page.contains("Title must be at least 3 characters"));
        assert!(page.contains("Minimum price is 0.01 USD"));
        assert!(page.contains("Please select a category"));
        assert!(page.contains("Description must be at least 20 characters"));
        assert!(page.contains("/products/previews/"));
    }

    #[tokio::test]
    async fn product_without_images_is_rejected() {
        let body = multipart_body(&VALID_FIELDS, None);

        let (status, page) = post_multipart(app(FakePostSource::default()), body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(page.contains("At least one image is required"));
    }

    #[tokio::test]
    async fn removing_an_image_rerenders_the_form() {
        let mut fields = VALID_FIELDS.to_vec();
        fields.push(("remove", "0"));
        let body = multipart_body(&fields, Some(("front.png", "image/png", &b"\x89PNG"[..])));

        let (status, page) = post_multipart(app(FakePostSource::default()), body).await;
        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("At least one image is required"));
        assert!(!page.contains("Product created!"));
    }

    #[tokio::test]
    async fn unknown_preview_is_not_found() {
        let (status, _, _) = get(
            app(FakePostSource::default()),
            "/products/previews/6f1c1a8e-4a53-4f0e-9a53-0d5f3f8a0c11",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (status, _, _) = get(app(FakePostSource::default()), "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
