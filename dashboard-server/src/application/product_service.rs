use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};
use uuid::Uuid;

use super::preview_store::{PreviewFile, PreviewStore};
use crate::domain::error::DomainError;
use crate::domain::forms::product::{MultipartPayload, ProductForm};
use crate::domain::image_selection::{ImageSelection, StagedImage};

#[derive(Debug, Clone)]
pub(crate) struct ImageUpload {
    pub(crate) file_name: String,
    pub(crate) content_type: String,
    pub(crate) bytes: Bytes,
}

pub(crate) struct ProductService {
    previews: Arc<PreviewStore>,
}

impl ProductService {
    pub(crate) fn new(previews: Arc<PreviewStore>) -> Self {
        Self { previews }
    }

    pub(crate) fn preview(&self, id: &Uuid) -> Option<PreviewFile> {
        self.previews.get(id)
    }

    // id, которых уже нет в хранилище, отбрасываются
    pub(crate) fn restore_selection(&self, ids: &[Uuid]) -> ImageSelection {
        let staged = ids
            .iter()
            .filter_map(|id| {
                self.previews.get(id).map(|file| StagedImage {
                    id: *id,
                    size: file.bytes.len(),
                    file_name: file.file_name,
                    content_type: file.content_type,
                })
            })
            .collect();

        let mut selection = ImageSelection::default();
        self.release(selection.add(staged));
        selection
    }

    pub(crate) fn add_uploads(&self, selection: &mut ImageSelection, uploads: Vec<ImageUpload>) {
        let staged = uploads
            .into_iter()
            .map(|upload| {
                let size = upload.bytes.len();
                let id = self.previews.create(PreviewFile {
                    file_name: upload.file_name.clone(),
                    content_type: upload.content_type.clone(),
                    bytes: upload.bytes,
                });
                StagedImage {
                    id,
                    file_name: upload.file_name,
                    content_type: upload.content_type,
                    size,
                }
            })
            .collect();

        let overflow = selection.add(staged);
        if !overflow.is_empty() {
            debug!(
                kept = selection.len(),
                dropped = overflow.len(),
                "image selection is full"
            );
        }
        self.release(overflow);
    }

    pub(crate) fn remove_image(&self, selection: &mut ImageSelection, index: usize) {
        if let Some(removed) = selection.remove(index) {
            self.release(vec![removed]);
        }
    }

    pub(crate) fn reset(&self, selection: &mut ImageSelection) {
        if selection.is_empty() {
            return;
        }
        self.release(selection.clear());
    }

    pub(crate) fn submit(
        &self,
        form: &ProductForm,
        selection: &mut ImageSelection,
    ) -> Result<MultipartPayload, DomainError> {
        let payload = form.to_payload(|image| self.previews.get(&image.id).map(|file| file.bytes))?;

        info!(
            title = %form.title,
            price = %form.price,
            category_id = %form.category_id,
            images = form.images.len(),
            fields = ?payload.field_names(),
            bytes = payload.total_bytes(),
            "product submitted"
        );

        self.reset(selection);
        Ok(payload)
    }

    fn release(&self, images: Vec<StagedImage>) {
        for image in images {
            if self.previews.revoke(&image.id) {
                debug!(id = %image.id, file_name = %image.file_name, "preview released");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::image_selection::MAX_FILES;

    fn upload(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: Bytes::from(name.as_bytes().to_vec()),
        }
    }

    fn service() -> (ProductService, Arc<PreviewStore>) {
        let store = Arc::new(PreviewStore::new(64));
        (ProductService::new(store.clone()), store)
    }

    fn form_for(selection: &ImageSelection) -> ProductForm {
        ProductForm {
            images: selection.images().to_vec(),
            title: "Mechanical keyboard".to_string(),
            price: "89.5".to_string(),
            category_id: "accessories".to_string(),
            description: "Hot-swappable switches, aluminium case".to_string(),
        }
    }

    #[test]
    fn overflowing_uploads_are_released() {
        let (service, store) = service();
        let mut selection = ImageSelection::default();

        let uploads = (0..12).map(|i| upload(&format!("{i}.jpg"))).collect();
        service.add_uploads(&mut selection, uploads);

        assert_eq!(selection.len(), MAX_FILES);
        assert_eq!(store.len(), MAX_FILES);
    }

    #[test]
    fn restore_skips_revoked_ids() {
        let (service, store) = service();
        let mut selection = ImageSelection::default();
        service.add_uploads(&mut selection, vec![upload("a.jpg"), upload("b.jpg")]);
        let ids: Vec<Uuid> = selection.images().iter().map(|image| image.id).collect();

        store.revoke(&ids[0]);
        let restored = service.restore_selection(&ids);

        assert_eq!(restored.len(), 1);
        assert_eq!(restored.images()[0].file_name, "b.jpg");
        assert_eq!(restored.images()[0].size, 5);
    }

    #[test]
    fn remove_image_revokes_its_preview() {
        let (service, store) = service();
        let mut selection = ImageSelection::default();
        service.add_uploads(&mut selection, vec![upload("a.jpg"), upload("b.jpg")]);
        let removed_id = selection.images()[0].id;

        service.remove_image(&mut selection, 0);

        assert_eq!(selection.len(), 1);
        assert!(store.get(&removed_id).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn submit_builds_payload_and_releases_previews() {
        let (service, store) = service();
        let mut selection = ImageSelection::default();
        service.add_uploads(&mut selection, vec![upload("a.jpg")]);
        let form = form_for(&selection);

        let payload = service.submit(&form, &mut selection).expect("submit must succeed");

        assert_eq!(
            payload.field_names(),
            vec!["images", "title", "price", "categoryId", "description"]
        );
        assert!(selection.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn submit_fails_when_preview_vanished() {
        let (service, store) = service();
        let mut selection = ImageSelection::default();
        service.add_uploads(&mut selection, vec![upload("a.jpg")]);
        let form = form_for(&selection);
        store.revoke(&selection.images()[0].id);

        let err = service.submit(&form, &mut selection).expect_err("must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(selection.len(), 1);
    }
}
