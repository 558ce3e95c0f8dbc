use crate::config::STORE_FILE_NAME;
use crate::error::{AppError, AppResult};
use crate::reminder::Reminder;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk layout of the store file: the id counter plus all records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFile {
    pub next_id: i64,
    pub reminders: Vec<Reminder>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            next_id: 1,
            reminders: Vec::new(),
        }
    }
}

fn store_file_path(app_data_path: &Path) -> PathBuf {
    app_data_path.join(STORE_FILE_NAME)
}

/// Load the store file. A missing file yields an empty store; a legacy
/// bare-array file (written before the id counter existed) is migrated by
/// re-deriving the counter from the highest stored id.
pub fn load_local(app_data_path: &Path) -> AppResult<StoreFile> {
    let path = store_file_path(app_data_path);

    if !path.exists() {
        return Ok(StoreFile::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| AppError::storage(e.to_string()))?;

    // Try to parse as the current format first
    if let Ok(data) = serde_json::from_str::<StoreFile>(&content) {
        return Ok(data);
    }

    // Legacy format: a bare array of reminders without the counter
    if let Ok(reminders) = serde_json::from_str::<Vec<Reminder>>(&content) {
        let next_id = reminders.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        info!(
            "Migrated legacy store file ({} reminders, next id {})",
            reminders.len(),
            next_id
        );
        return Ok(StoreFile { next_id, reminders });
    }

    Err(AppError::storage(format!(
        "unrecognized store file format: {}",
        path.display()
    )))
}

/// Save the store file.
pub fn save_local(app_data_path: &Path, data: &StoreFile) -> AppResult<()> {
    let path = store_file_path(app_data_path);
    let content =
        serde_json::to_string_pretty(data).map_err(|e| AppError::storage(e.to_string()))?;
    fs::write(&path, content).map_err(|e| AppError::storage(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_nonexistent_returns_empty() {
        let temp_dir = env::temp_dir().join("reminderd_test_load_nonexistent");
        let _ = fs::create_dir_all(&temp_dir);

        let store = load_local(&temp_dir).unwrap();
        assert_eq!(store.next_id, 1);
        assert!(store.reminders.is_empty());

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = env::temp_dir().join("reminderd_test_roundtrip");
        let _ = fs::create_dir_all(&temp_dir);

        let store = StoreFile {
            next_id: 2,
            reminders: vec![Reminder {
                id: 1,
                title: "Standup".to_string(),
                description: "daily sync".to_string(),
                time: "09:00".to_string(),
                completed: false,
                notified: true,
            }],
        };

        save_local(&temp_dir, &store).unwrap();
        let loaded = load_local(&temp_dir).unwrap();

        assert_eq!(loaded.next_id, 2);
        assert_eq!(loaded.reminders.len(), 1);
        assert_eq!(loaded.reminders[0].title, "Standup");
        assert!(loaded.reminders[0].notified);

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_legacy_array_file_is_migrated() {
        let temp_dir = env::temp_dir().join("reminderd_test_legacy_migration");
        let _ = fs::create_dir_all(&temp_dir);

        let legacy = r#"[
            {"id":4,"title":"Lunch","description":"","time":"12:00","completed":false},
            {"id":7,"title":"Standup","description":"","time":"09:00","completed":false}
        ]"#;
        fs::write(temp_dir.join(STORE_FILE_NAME), legacy).unwrap();

        let loaded = load_local(&temp_dir).unwrap();
        assert_eq!(loaded.next_id, 8);
        assert_eq!(loaded.reminders.len(), 2);
        // Records written before the notified flag existed load as unnotified
        assert!(loaded.reminders.iter().all(|r| !r.notified));

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let temp_dir = env::temp_dir().join("reminderd_test_garbage_file");
        let _ = fs::create_dir_all(&temp_dir);

        fs::write(temp_dir.join(STORE_FILE_NAME), "not json at all").unwrap();
        assert!(load_local(&temp_dir).is_err());

        let _ = fs::remove_dir_all(&temp_dir);
    }
}
