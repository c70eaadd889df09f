use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub(crate) struct LoginForm {
    #[serde(default)]
    #[validate(email(message = "Please input email"))]
    pub(crate) email: String,
    #[serde(default)]
    #[validate(length(min = 8, message = "At least 8 characters"))]
    pub(crate) password: String,
}
