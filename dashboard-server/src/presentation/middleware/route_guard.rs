use anyhow::{Result, anyhow};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::presentation::AppState;

/// Сессий нет: любой посетитель считается анонимным.
pub(crate) const IS_LOGGED_IN: bool = false;

const NESTED_SUFFIX: &str = "/:path*";

/// Шаблон `/prefix/:path*` совпадает с `/prefix` и всем, что ниже.
/// Без суффикса совпадает ровно один путь.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RouteMatcher {
    prefix: String,
    nested: bool,
}

impl RouteMatcher {
    pub(crate) fn parse(pattern: &str) -> Result<Self> {
        let pattern = pattern.trim();
        if !pattern.starts_with('/') {
            return Err(anyhow!("route matcher '{pattern}' must start with '/'"));
        }

        let (prefix, nested) = match pattern.strip_suffix(NESTED_SUFFIX) {
            Some(prefix) => (prefix, true),
            None => (pattern, false),
        };

        if prefix.contains(':') || prefix.contains('*') {
            return Err(anyhow!(
                "route matcher '{pattern}' only supports a trailing '{NESTED_SUFFIX}'"
            ));
        }

        Ok(Self {
            prefix: prefix.trim_end_matches('/').to_string(),
            nested,
        })
    }

    pub(crate) fn matches(&self, path: &str) -> bool {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        if self.nested {
            if self.prefix.is_empty() {
                return true;
            }
            return path == self.prefix
                || path
                    .strip_prefix(self.prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'));
        }

        if self.prefix.is_empty() {
            path == "/"
        } else {
            path == self.prefix
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GuardDecision {
    Allow,
    Redirect(String),
}

#[derive(Debug, Clone)]
pub(crate) struct RouteGuard {
    matchers: Vec<RouteMatcher>,
    login_path: String,
    logged_in: bool,
}

impl RouteGuard {
    pub(crate) fn new(patterns: &[String], login_path: impl Into<String>) -> Result<Self> {
        let matchers = patterns
            .iter()
            .map(|pattern| RouteMatcher::parse(pattern))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            matchers,
            login_path: login_path.into(),
            logged_in: IS_LOGGED_IN,
        })
    }

    pub(crate) fn login_path(&self) -> &str {
        &self.login_path
    }

    pub(crate) fn check(&self, path: &str) -> GuardDecision {
        if self.logged_in || path == self.login_path {
            return GuardDecision::Allow;
        }

        if self.matchers.iter().any(|matcher| matcher.matches(path)) {
            GuardDecision::Redirect(self.login_path.clone())
        } else {
            GuardDecision::Allow
        }
    }
}

pub(crate) async fn route_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    debug!(url = %request.uri(), %path, "route guard");

    match state.guard.check(&path) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(location) => {
            debug!(%path, %location, "not logged in, redirecting");
            Redirect::temporary(&location).into_response()
        }
    }
}
