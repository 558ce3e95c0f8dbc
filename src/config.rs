/// Application configuration constants
///
/// Centralized configuration for the reminder daemon.
use std::time::Duration;

/// Directory under the user's local data dir holding the store and lock files
pub const APP_DIR_NAME: &str = "reminderd";

/// Store file name inside the app data directory
pub const STORE_FILE_NAME: &str = "reminders.json";

/// Single-instance lock file name
pub const LOCK_FILE_NAME: &str = "reminderd.lock";

/// Scheduler poll interval. Eligibility is exact-minute equality, so the
/// interval must stay well under 60 seconds or a matching minute can be
/// skipped entirely.
pub const TICK_INTERVAL: Duration = Duration::from_secs(15);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_interval_fits_inside_a_minute() {
        assert!(TICK_INTERVAL.as_secs() > 0);
        assert!(TICK_INTERVAL.as_secs() < 60);
    }

    #[test]
    fn test_file_names_are_set() {
        assert!(!APP_DIR_NAME.is_empty());
        assert!(!STORE_FILE_NAME.is_empty());
        assert!(!LOCK_FILE_NAME.is_empty());
    }
}
