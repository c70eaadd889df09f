use serde::Serialize;
use uuid::Uuid;

pub(crate) const MAX_FILES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct StagedImage {
    pub(crate) id: Uuid,
    pub(crate) file_name: String,
    pub(crate) content_type: String,
    pub(crate) size: usize,
}

/// Всё, что возвращают `add`, `remove` и `clear`, нужно освободить в хранилище превью.
#[derive(Debug, Clone, Default)]
pub(crate) struct ImageSelection {
    images: Vec<StagedImage>,
}

impl ImageSelection {
    pub(crate) fn images(&self) -> &[StagedImage] {
        &self.images
    }

    pub(crate) fn len(&self) -> usize {
        self.images.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub(crate) fn add(&mut self, added: Vec<StagedImage>) -> Vec<StagedImage> {
        self.images.extend(added);
        if self.images.len() > MAX_FILES {
            self.images.split_off(MAX_FILES)
        } else {
            Vec::new()
        }
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<StagedImage> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }

    pub(crate) fn clear(&mut self) -> Vec<StagedImage> {
        std::mem::take(&mut self.images)
    }
}
