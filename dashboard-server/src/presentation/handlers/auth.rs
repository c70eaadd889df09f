use axum::{Form, extract::State, http::StatusCode, response::Response};
use tracing::info;

use crate::domain::forms::login::LoginForm;
use crate::domain::forms::register::RegisterForm;
use crate::domain::forms::{FieldErrors, validate_form};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::views::{LoginPage, Notice, RegisterPage, render};

pub(crate) async fn login_page() -> AppResult<Response> {
    render(
        StatusCode::OK,
        &LoginPage {
            values: LoginForm::default(),
            errors: FieldErrors::default(),
            notice: None,
        },
    )
}

pub(crate) async fn login(Form(form): Form<LoginForm>) -> AppResult<Response> {
    if let Err(errors) = validate_form(&form) {
        return render(
            StatusCode::UNPROCESSABLE_ENTITY,
            &LoginPage {
                values: form,
                errors,
                notice: None,
            },
        );
    }

    info!(email = %form.email, "login submitted");

    render(
        StatusCode::OK,
        &LoginPage {
            values: form,
            errors: FieldErrors::default(),
            notice: Some(Notice::success("Login submitted")),
        },
    )
}

pub(crate) async fn register_page(State(state): State<AppState>) -> AppResult<Response> {
    render(
        StatusCode::OK,
        &RegisterPage {
            values: RegisterForm::default(),
            errors: FieldErrors::default(),
            notice: None,
            login_path: state.guard.login_path().to_string(),
        },
    )
}

pub(crate) async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let login_path = state.guard.login_path().to_string();

    if let Err(errors) = validate_form(&form) {
        return render(
            StatusCode::UNPROCESSABLE_ENTITY,
            &RegisterPage {
                values: form,
                errors,
                notice: None,
                login_path,
            },
        );
    }

    info!(email = %form.email, "register submitted");

    render(
        StatusCode::OK,
        &RegisterPage {
            values: RegisterForm::default(),
            errors: FieldErrors::default(),
            notice: Some(Notice::success("Registration submitted")),
            login_path,
        },
    )
}
