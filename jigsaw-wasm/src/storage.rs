use jigsaw_core::{MemoryStore, ProgressStore};
use web_sys::{Storage, Window};

use crate::constants::SAVE_KEY;

/// Progress store backed by `localStorage`.
///
/// When the browser denies storage access (private mode, quota, disabled),
/// reads and writes fall back to an in-memory record so the session keeps
/// working; only durability is lost.
pub struct LocalStore {
    storage: Option<Storage>,
    fallback: MemoryStore,
}

impl LocalStore {
    pub fn new(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
            fallback: MemoryStore::default(),
        }
    }
}

impl ProgressStore for LocalStore {
    fn read(&self) -> Option<String> {
        match &self.storage {
            Some(storage) => storage.get_item(SAVE_KEY).ok().flatten(),
            None => self.fallback.read(),
        }
    }

    fn write(&self, payload: &str) {
        match &self.storage {
            Some(storage) => {
                if storage.set_item(SAVE_KEY, payload).is_err() {
                    self.fallback.write(payload);
                }
            }
            None => self.fallback.write(payload),
        }
    }

    fn remove(&self) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(SAVE_KEY);
        }
        self.fallback.remove();
    }
}
