pub mod config;
pub mod error;
pub mod notify;
pub mod reminder;
pub mod scheduler;
pub mod storage;

pub use error::{AppError, AppResult};
pub use notify::{DesktopNotifier, Notifier};
pub use reminder::Reminder;
pub use scheduler::{Clock, Scheduler, SchedulerHandle, SystemClock};
pub use storage::{ReminderMutator, ReminderStore, SharedStore};
