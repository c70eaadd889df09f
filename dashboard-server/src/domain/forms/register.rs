use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidationError};

use super::rule_error;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub(crate) struct RegisterForm {
    #[serde(default)]
    #[validate(custom(function = "validate_register_email"))]
    pub(crate) email: String,
    #[serde(default)]
    #[validate(custom(function = "validate_password_policy"))]
    pub(crate) password: String,
}

fn validate_register_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(rule_error("required", "Please enter your email"));
    }
    if !email.validate_email() {
        return Err(rule_error("email", "Invalid email"));
    }
    Ok(())
}

// правила проверяются по порядку, возвращается первая ошибка
fn validate_password_policy(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < 8 {
        return Err(rule_error(
            "length",
            "Password must be at least 8 characters",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(rule_error(
            "uppercase",
            "Must contain at least one uppercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(rule_error(
            "lowercase",
            "Must contain at least one lowercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(rule_error("digit", "Must contain at least one number"));
    }
    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(rule_error(
            "special",
            "Must contain at least one special character",
        ));
    }
    Ok(())
}
