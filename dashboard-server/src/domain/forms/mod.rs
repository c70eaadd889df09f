use std::borrow::Cow;
use std::collections::BTreeMap;

use validator::{Validate, ValidationError, ValidationErrors};

pub(crate) mod login;
pub(crate) mod product;
pub(crate) mod register;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub(crate) fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        for (field, field_errors) in errors.field_errors() {
            let message = field_errors.iter().find_map(|err| {
                err.message
                    .as_ref()
                    .map(|message| message.to_string())
                    .or_else(|| Some(err.code.to_string()))
            });
            if let Some(message) = message {
                fields.insert(field.to_string(), message);
            }
        }
        Self(fields)
    }
}

pub(crate) fn validate_form<T: Validate>(form: &T) -> Result<(), FieldErrors> {
    form.validate().map_err(|errors| FieldErrors::from(&errors))
}

pub(crate) fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}
