use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use bytes::Bytes;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PreviewFile {
    pub(crate) file_name: String,
    pub(crate) content_type: String,
    pub(crate) bytes: Bytes,
}

#[derive(Default)]
struct Entries {
    files: HashMap<Uuid, PreviewFile>,
    order: VecDeque<Uuid>,
}

/// Загруженные изображения в памяти; при переполнении вытесняется самое старое.
pub(crate) struct PreviewStore {
    capacity: usize,
    entries: Mutex<Entries>,
}

impl PreviewStore {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(Entries::default()),
        }
    }

    pub(crate) fn create(&self, file: PreviewFile) -> Uuid {
        let id = Uuid::new_v4();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        while entries.order.len() >= self.capacity {
            let Some(oldest) = entries.order.pop_front() else {
                break;
            };
            entries.files.remove(&oldest);
            debug!(%oldest, "preview evicted");
        }

        entries.files.insert(id, file);
        entries.order.push_back(id);
        id
    }

    pub(crate) fn get(&self, id: &Uuid) -> Option<PreviewFile> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .files
            .get(id)
            .cloned()
    }

    pub(crate) fn revoke(&self, id: &Uuid) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.files.remove(id).is_none() {
            return false;
        }
        entries.order.retain(|entry| entry != id);
        true
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .files
            .len()
    }
}
