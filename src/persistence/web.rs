//! Browser LocalStorage backend (wasm32 only)

use super::{LevelProgressStore, SaveRecord, StoreError};

/// Watermark persisted in `window.localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    record: SaveRecord,
}

impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "sprite_clicker_progress";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }

    /// Load the stored watermark (level 1 if absent)
    pub fn load() -> Self {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let record = SaveRecord::parse_or_default(&json);
                log::info!("Loaded progress (level {} unlocked)", record.unlocked_level);
                return Self { record };
            }
        }

        log::info!("No progress found, starting fresh");
        Self {
            record: SaveRecord::default(),
        }
    }
}

impl LevelProgressStore for LocalStorageStore {
    fn unlocked_level(&self) -> u32 {
        self.record.unlocked_level
    }

    fn set_unlocked_level(&mut self, level: u32) -> Result<(), StoreError> {
        self.record.unlocked_level = level;
        let storage = Self::storage()
            .ok_or_else(|| StoreError::Unavailable("no localStorage".to_string()))?;
        let json = serde_json::to_string(&self.record)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        log::info!("Progress saved (level {} unlocked)", level);
        Ok(())
    }
}
