mod local;

use crate::config::APP_DIR_NAME;
use crate::error::{AppError, AppResult};
use crate::reminder::Reminder;
use local::StoreFile;
use log::{info, warn};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// Resolve (and create) the per-user application data directory.
pub fn app_data_dir() -> AppResult<PathBuf> {
    let path = dirs::data_local_dir()
        .ok_or_else(|| AppError::storage("failed to resolve local data dir"))?
        .join(APP_DIR_NAME);
    fs::create_dir_all(&path).map_err(|e| AppError::storage(e.to_string()))?;
    Ok(path)
}

/// Single source of truth for reminder records. Mediates all reads and
/// writes between the store file and its callers, keeping an in-memory
/// snapshot that is rebuilt from disk after every write.
pub struct ReminderStore {
    data: StoreFile,
    app_data_path: PathBuf,
}

impl ReminderStore {
    /// Open the store in the per-user data directory.
    pub fn open() -> AppResult<Self> {
        Ok(Self::open_at(app_data_dir()?))
    }

    /// Open a store rooted at an explicit directory (used by tests).
    pub fn open_at(app_data_path: PathBuf) -> Self {
        let data = match local::load_local(&app_data_path) {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to load store file, starting empty: {}", e);
                StoreFile::default()
            }
        };
        Self {
            data,
            app_data_path,
        }
    }

    /// Current snapshot, in insertion order (ids ascending).
    pub fn list(&self) -> Vec<Reminder> {
        self.data.reminders.clone()
    }

    /// Persist a scratch copy, then rebuild the cache from disk. On save
    /// failure the in-memory snapshot stays at the last good state; if the
    /// save landed but the re-read fails, the cache falls back to the
    /// document just written so callers still see their own writes.
    fn commit(&mut self, scratch: StoreFile) -> AppResult<()> {
        local::save_local(&self.app_data_path, &scratch)?;
        self.data = scratch;
        match local::load_local(&self.app_data_path) {
            Ok(data) => self.data = data,
            Err(e) => warn!("Failed to reload store, serving the written state: {}", e),
        }
        Ok(())
    }

    /// Persist a new reminder and return it with its assigned id. Ids come
    /// from a persisted monotonic counter, so deleting a record never frees
    /// its id for reuse. The time must be a valid "HH:MM" string; a record
    /// the scheduler could never match is rejected up front.
    pub fn create(
        &mut self,
        title: String,
        description: String,
        time: String,
    ) -> AppResult<Reminder> {
        if Reminder::minute_of_day(&time).is_none() {
            return Err(AppError::validation(format!(
                "not a valid HH:MM time: {:?}",
                time
            )));
        }
        let mut scratch = self.data.clone();
        let mut reminder = Reminder::new(title, description, time);
        reminder.id = scratch.next_id;
        scratch.next_id += 1;
        scratch.reminders.push(reminder.clone());
        self.commit(scratch)?;
        info!("Created reminder {} at {}", reminder.id, reminder.time);
        Ok(reminder)
    }

    /// Overwrite the record matching `reminder.id` with all supplied fields.
    /// An unknown id is a logged no-op.
    pub fn update(&mut self, reminder: Reminder) -> AppResult<()> {
        let mut scratch = self.data.clone();
        match scratch.reminders.iter_mut().find(|r| r.id == reminder.id) {
            Some(slot) => *slot = reminder,
            None => {
                warn!("Update for unknown reminder id {}", reminder.id);
                return Ok(());
            }
        }
        self.commit(scratch)
    }

    /// Remove the record with the given id. An unknown id is a logged no-op.
    pub fn delete(&mut self, id: i64) -> AppResult<()> {
        let mut scratch = self.data.clone();
        let before = scratch.reminders.len();
        scratch.reminders.retain(|r| r.id != id);
        if scratch.reminders.len() == before {
            warn!("Delete for unknown reminder id {}", id);
            return Ok(());
        }
        self.commit(scratch)
    }

    /// Clear every notified flag in one save. Called once at startup and
    /// once per detected day rollover.
    pub fn reset_daily_notifications(&mut self) -> AppResult<()> {
        let mut scratch = self.data.clone();
        for reminder in scratch.reminders.iter_mut() {
            reminder.notified = false;
        }
        self.commit(scratch)?;
        info!("Notification status reset for a new day");
        Ok(())
    }
}

/// Store handle shared between the host thread and the scheduler thread.
/// Every read and write funnels through one mutex so a user edit and a
/// scheduler-driven notified update cannot interleave destructively.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<ReminderStore>>,
}

impl SharedStore {
    pub fn new(store: ReminderStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Lock the store, recovering from poison if needed.
    pub fn lock(&self) -> MutexGuard<'_, ReminderStore> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Mutation capability handed to display-side collaborators, so list and
/// popup code can edit reminders without holding the whole store API.
pub trait ReminderMutator {
    fn update_reminder(&self, reminder: Reminder) -> AppResult<()>;
    fn delete_reminder(&self, id: i64) -> AppResult<()>;
    fn set_completed(&self, id: i64, completed: bool) -> AppResult<()>;
}

impl ReminderMutator for SharedStore {
    fn update_reminder(&self, reminder: Reminder) -> AppResult<()> {
        self.lock().update(reminder)
    }

    fn delete_reminder(&self, id: i64) -> AppResult<()> {
        self.lock().delete(id)
    }

    fn set_completed(&self, id: i64, completed: bool) -> AppResult<()> {
        let mut store = self.lock();
        let found = store.list().into_iter().find(|r| r.id == id);
        match found {
            Some(mut reminder) => {
                reminder.completed = completed;
                store.update(reminder)
            }
            None => {
                warn!("Completion toggle for unknown reminder id {}", id);
                Ok(())
            }
        }
    }
}
