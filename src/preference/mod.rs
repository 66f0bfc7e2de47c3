//! Remembered view-type choice per list.
//!
//! Storage problems never surface to callers: they are logged and treated
//! as "no preference".

mod key;
mod store;

use std::sync::Arc;

use crate::view::ViewType;

pub use key::view_preference_key;
pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, StorageError};

#[derive(Clone)]
pub struct ViewPreferences {
    store: Arc<dyn PreferenceStore>,
    enabled: bool,
}

impl ViewPreferences {
    pub fn new(store: Arc<dyn PreferenceStore>, enabled: bool) -> Self {
        Self { store, enabled }
    }

    /// Preferences that never load nor save anything.
    pub fn disabled() -> Self {
        Self::new(Arc::new(MemoryPreferenceStore::new()), false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn key(&self, object_name: &str, view_id: Option<&str>) -> String {
        view_preference_key(object_name, view_id)
    }

    pub fn save(&self, key: &str, view_type: ViewType) {
        if !self.enabled {
            return;
        }
        match self.store.set(key, view_type.as_str()) {
            Ok(()) => tracing::debug!(key, view_type = %view_type, "View preference saved"),
            Err(err) => tracing::warn!(key, error = %err, "Failed to save view preference"),
        }
    }

    pub fn load(&self, key: &str) -> Option<ViewType> {
        if !self.enabled {
            return None;
        }
        let stored = match self.store.get(key) {
            Ok(stored) => stored?,
            Err(err) => {
                tracing::warn!(key, error = %err, "Failed to load view preference");
                return None;
            }
        };
        let view_type = ViewType::parse(&stored);
        if view_type.is_none() {
            tracing::warn!(key, value = %stored, "Ignoring unknown stored view type");
        }
        view_type
    }
}
