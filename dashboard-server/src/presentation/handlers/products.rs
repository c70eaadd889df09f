use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::warn;
use uuid::Uuid;

use crate::application::product_service::ImageUpload;
use crate::domain::forms::product::{ProductForm, is_accepted_image_type};
use crate::domain::forms::{FieldErrors, validate_form};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::views::{Notice, ProductPage, render};

#[derive(Debug, Default)]
pub(crate) struct ProductSubmission {
    pub(crate) title: String,
    pub(crate) price: String,
    pub(crate) category_id: String,
    pub(crate) description: String,
    pub(crate) staged: Vec<Uuid>,
    pub(crate) uploads: Vec<ImageUpload>,
    pub(crate) remove: Option<usize>,
}

async fn read_submission(mut multipart: Multipart) -> AppResult<ProductSubmission> {
    let mut submission = ProductSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "images" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                // браузер шлёт пустую часть, если файл не выбран
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                submission.uploads.push(ImageUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            "staged" => {
                let raw = field.text().await?;
                match Uuid::parse_str(raw.trim()) {
                    Ok(id) => submission.staged.push(id),
                    Err(_) => warn!(value = %raw, "ignoring malformed staged preview id"),
                }
            }
            "remove" => submission.remove = field.text().await?.trim().parse().ok(),
            "title" => submission.title = field.text().await?,
            "price" => submission.price = field.text().await?,
            "category_id" => submission.category_id = field.text().await?,
            "description" => submission.description = field.text().await?,
            _ => {}
        }
    }

    Ok(submission)
}

pub(crate) async fn new_product_page() -> AppResult<Response> {
    render(
        StatusCode::OK,
        &ProductPage::new(ProductForm::default(), FieldErrors::default(), None),
    )
}

pub(crate) async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Response> {
    let submission = read_submission(multipart).await?;
    let products = &state.products;

    let mut selection = products.restore_selection(&submission.staged);
    products.add_uploads(&mut selection, submission.uploads);

    let remove = submission.remove;
    if let Some(index) = remove {
        products.remove_image(&mut selection, index);
    }

    let form = ProductForm {
        images: selection.images().to_vec(),
        title: submission.title,
        price: submission.price,
        category_id: submission.category_id,
        description: submission.description,
    };

    if let Err(errors) = validate_form(&form) {
        // удаление изображения не является отправкой формы
        let status = if remove.is_some() {
            StatusCode::OK
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        return render(status, &ProductPage::new(form, errors, None));
    }

    if remove.is_some() {
        return render(
            StatusCode::OK,
            &ProductPage::new(form, FieldErrors::default(), None),
        );
    }

    match products.submit(&form, &mut selection) {
        Ok(_payload) => render(
            StatusCode::OK,
            &ProductPage::new(
                ProductForm::default(),
                FieldErrors::default(),
                Some(Notice::success("Product created!")),
            ),
        ),
        Err(err) => {
            warn!(error = %err, "failed to assemble product payload");
            let form = ProductForm {
                images: selection.images().to_vec(),
                ..form
            };
            render(
                StatusCode::OK,
                &ProductPage::new(
                    form,
                    FieldErrors::default(),
                    Some(Notice::error("Failed to create product")),
                ),
            )
        }
    }
}

pub(crate) async fn show_preview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::NotFound)?;
    let preview = state.products.preview(&id).ok_or(AppError::NotFound)?;

    let content_type = if is_accepted_image_type(&preview.content_type) {
        HeaderValue::from_str(&preview.content_type)
            .unwrap_or(HeaderValue::from_static("application/octet-stream"))
    } else {
        HeaderValue::from_static("application/octet-stream")
    };

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        ],
        preview.bytes,
    )
        .into_response())
}
