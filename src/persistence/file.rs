//! JSON save file for native builds

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{LevelProgressStore, SaveRecord, StoreError};

/// Watermark persisted to a small JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    record: SaveRecord,
    /// Existing save could not be read; leave it on disk untouched
    read_only: bool,
}

impl FileStore {
    /// Open (or lazily create) a save file. A missing or corrupt file reads as level 1.
    ///
    /// A file that exists but cannot be read also reads as level 1, but saves
    /// are refused so the unread progress is not clobbered.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut read_only = false;
        let record = match fs::read_to_string(&path) {
            Ok(json) => {
                let record = SaveRecord::parse_or_default(&json);
                log::info!(
                    "Loaded progress from {} (level {} unlocked)",
                    path.display(),
                    record.unlocked_level
                );
                record
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No progress at {}, starting fresh", path.display());
                SaveRecord::default()
            }
            Err(e) => {
                log::warn!(
                    "Cannot read progress at {} ({}), saving disabled",
                    path.display(),
                    e
                );
                read_only = true;
                SaveRecord::default()
            }
        };
        Self {
            path,
            record,
            read_only,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LevelProgressStore for FileStore {
    fn unlocked_level(&self) -> u32 {
        self.record.unlocked_level
    }

    fn set_unlocked_level(&mut self, level: u32) -> Result<(), StoreError> {
        self.record.unlocked_level = level;
        if self.read_only {
            return Err(StoreError::Unavailable(format!(
                "{} could not be read",
                self.path.display()
            )));
        }
        let json = serde_json::to_string(&self.record)?;

        // Write beside the target then rename, so a crash never leaves half a file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Progress saved (level {} unlocked)", level);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_first_level() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("progress.json"));
        assert_eq!(store.unlocked_level(), 1);
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut store = FileStore::open(&path);
        store.set_unlocked_level(4).unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.unlocked_level(), 4);
    }

    #[test]
    fn test_corrupt_file_reads_first_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "{ broken").unwrap();
        assert_eq!(FileStore::open(&path).unlocked_level(), 1);
    }

    #[test]
    fn test_unreadable_save_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the save file fails to read without being missing
        let path = dir.path().join("progress.json");
        fs::create_dir(&path).unwrap();

        let mut store = FileStore::open(&path);
        assert_eq!(store.unlocked_level(), 1);
        assert!(matches!(store.set_unlocked_level(2), Err(StoreError::Unavailable(_))));
        assert_eq!(store.unlocked_level(), 2);
        assert!(path.is_dir());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_unwritable_location_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("no_such_dir").join("progress.json"));
        assert!(matches!(store.set_unlocked_level(2), Err(StoreError::Io(_))));
        // In-memory value still moved forward
        assert_eq!(store.unlocked_level(), 2);
    }
}
