use bytes::Bytes;
use validator::{Validate, ValidationError};

use super::rule_error;
use crate::domain::error::DomainError;
use crate::domain::image_selection::{MAX_FILES, StagedImage};

pub(crate) const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;
pub(crate) const ACCEPTED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/webp"];
pub(crate) const CATEGORIES: [(&str, &str); 3] = [
    ("electronics", "Electronics"),
    ("laptops", "Laptops"),
    ("accessories", "Accessories"),
];

#[derive(Debug, Clone, Default, Validate)]
pub(crate) struct ProductForm {
    #[validate(custom(function = "validate_images"))]
    pub(crate) images: Vec<StagedImage>,
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub(crate) title: String,
    #[validate(custom(function = "validate_price"))]
    pub(crate) price: String,
    #[validate(length(min = 1, message = "Please select a category"))]
    pub(crate) category_id: String,
    #[validate(length(min = 20, message = "Description must be at least 20 characters"))]
    pub(crate) description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PayloadPart {
    File {
        name: &'static str,
        file_name: String,
        content_type: String,
        bytes: Bytes,
    },
    Text {
        name: &'static str,
        value: String,
    },
}

impl PayloadPart {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::File { name, .. } | Self::Text { name, .. } => name,
        }
    }
}

/// Тело multipart-запроса товара. Только собирается и логируется.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MultipartPayload {
    pub(crate) parts: Vec<PayloadPart>,
}

impl MultipartPayload {
    pub(crate) fn field_names(&self) -> Vec<&'static str> {
        self.parts.iter().map(PayloadPart::name).collect()
    }

    pub(crate) fn total_bytes(&self) -> usize {
        self.parts
            .iter()
            .map(|part| match part {
                PayloadPart::File { bytes, .. } => bytes.len(),
                PayloadPart::Text { value, .. } => value.len(),
            })
            .sum()
    }
}

impl ProductForm {
    pub(crate) fn parsed_price(&self) -> Option<f64> {
        coerce_price(&self.price)
    }

    pub(crate) fn is_category_selected(&self, value: &str) -> bool {
        self.category_id == value
    }

    pub(crate) fn to_payload(
        &self,
        mut load: impl FnMut(&StagedImage) -> Option<Bytes>,
    ) -> Result<MultipartPayload, DomainError> {
        let mut parts = Vec::with_capacity(self.images.len() + 4);

        for image in &self.images {
            let bytes = load(image).ok_or_else(|| {
                DomainError::NotFound(format!("staged image {} ({})", image.id, image.file_name))
            })?;
            parts.push(PayloadPart::File {
                name: "images",
                file_name: image.file_name.clone(),
                content_type: image.content_type.clone(),
                bytes,
            });
        }

        let price = self
            .parsed_price()
            .ok_or_else(|| DomainError::Unexpected("price is not a number".to_string()))?;

        parts.push(PayloadPart::Text {
            name: "title",
            value: self.title.clone(),
        });
        parts.push(PayloadPart::Text {
            name: "price",
            value: price.to_string(),
        });
        parts.push(PayloadPart::Text {
            name: "categoryId",
            value: self.category_id.clone(),
        });
        parts.push(PayloadPart::Text {
            name: "description",
            value: self.description.clone(),
        });

        Ok(MultipartPayload { parts })
    }
}

/// Пустая строка даёт 0; NaN, бесконечность и мусор дают `None`.
pub(crate) fn coerce_price(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub(crate) fn is_accepted_image_type(content_type: &str) -> bool {
    ACCEPTED_IMAGE_TYPES.contains(&content_type)
}

fn validate_images(images: &[StagedImage]) -> Result<(), ValidationError> {
    if images.is_empty() {
        return Err(rule_error("required", "At least one image is required"));
    }
    if images.len() > MAX_FILES {
        return Err(rule_error("max_files", "Up to 10 images allowed"));
    }
    if images.iter().any(|image| image.size > MAX_FILE_SIZE) {
        return Err(rule_error("file_size", "Each image must be 5MB or smaller"));
    }
    if !images
        .iter()
        .all(|image| is_accepted_image_type(&image.content_type))
    {
        return Err(rule_error("file_type", "Only JPG, JPEG, PNG, WebP allowed"));
    }
    Ok(())
}

fn validate_price(raw: &str) -> Result<(), ValidationError> {
    match coerce_price(raw) {
        None => Err(rule_error("number", "Must be a valid number")),
        Some(value) if value < 0.01 => Err(rule_error("min", "Minimum price is 0.01 USD")),
        Some(_) => Ok(()),
    }
}
