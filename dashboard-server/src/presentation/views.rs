use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::domain::forms::FieldErrors;
use crate::domain::forms::login::LoginForm;
use crate::domain::forms::product::{CATEGORIES, ProductForm};
use crate::domain::forms::register::RegisterForm;
use crate::domain::post::PostCard;
use crate::presentation::app_error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Notice {
    pub(crate) kind: &'static str,
    pub(crate) message: String,
}

impl Notice {
    pub(crate) fn success(message: impl Into<String>) -> Self {
        Self {
            kind: "success",
            message: message.into(),
        }
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error",
            message: message.into(),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub(crate) struct DashboardPage {
    pub(crate) heading: &'static str,
    pub(crate) cards: Vec<PostCard>,
    pub(crate) show_body: bool,
}

#[derive(Template)]
#[template(path = "post.html")]
pub(crate) struct PostPage {
    pub(crate) card: PostCard,
    pub(crate) show_body: bool,
}

#[derive(Template)]
#[template(path = "login.html")]
pub(crate) struct LoginPage {
    pub(crate) values: LoginForm,
    pub(crate) errors: FieldErrors,
    pub(crate) notice: Option<Notice>,
}

#[derive(Template)]
#[template(path = "register.html")]
pub(crate) struct RegisterPage {
    pub(crate) values: RegisterForm,
    pub(crate) errors: FieldErrors,
    pub(crate) notice: Option<Notice>,
    pub(crate) login_path: String,
}

pub(crate) struct CategoryOption {
    pub(crate) value: &'static str,
    pub(crate) label: &'static str,
    pub(crate) selected: bool,
}

#[derive(Template)]
#[template(path = "product_form.html")]
pub(crate) struct ProductPage {
    pub(crate) values: ProductForm,
    pub(crate) categories: Vec<CategoryOption>,
    pub(crate) accept: String,
    pub(crate) errors: FieldErrors,
    pub(crate) notice: Option<Notice>,
}

impl ProductPage {
    pub(crate) fn new(values: ProductForm, errors: FieldErrors, notice: Option<Notice>) -> Self {
        let categories = CATEGORIES
            .iter()
            .map(|&(value, label)| CategoryOption {
                value,
                label,
                selected: values.is_category_selected(value),
            })
            .collect();

        Self {
            values,
            categories,
            accept: crate::domain::forms::product::ACCEPTED_IMAGE_TYPES.join(","),
            errors,
            notice,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub(crate) struct ErrorPage {
    pub(crate) status: u16,
    pub(crate) message: String,
}

pub(crate) fn render<T: Template>(status: StatusCode, page: &T) -> AppResult<Response> {
    let html = page.render()?;
    Ok((status, Html(html)).into_response())
}
