use serde::{Deserialize, Serialize};

/// A user-defined daily reminder. `time` is a zero-padded 24-hour "HH:MM"
/// string; it carries no date or timezone and recurs every day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub time: String,
    pub completed: bool,
    /// Whether a notification has been delivered for the current day.
    /// Defaults to false so store files written before the flag existed
    /// load cleanly.
    #[serde(default)]
    pub notified: bool,
}

impl Reminder {
    pub fn new(title: String, description: String, time: String) -> Self {
        Self {
            id: 0, // Will be set by the store
            title,
            description,
            time,
            completed: false,
            notified: false,
        }
    }

    /// Minutes since midnight for an "HH:MM" string, None if malformed.
    pub fn minute_of_day(time: &str) -> Option<u32> {
        let (hour, minute) = time.split_once(':')?;
        let hour: u32 = hour.parse().ok()?;
        let minute: u32 = minute.parse().ok()?;
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(hour * 60 + minute)
    }

    /// A reminder fires when it is neither completed nor already notified
    /// today and its minute-of-day equals the clock's.
    pub fn is_eligible(&self, now_time: &str) -> bool {
        if self.completed || self.notified {
            return false;
        }
        match (
            Self::minute_of_day(&self.time),
            Self::minute_of_day(now_time),
        ) {
            (Some(reminder_minutes), Some(now_minutes)) => reminder_minutes == now_minutes,
            _ => false,
        }
    }

    /// Apply a user edit. Changing the time re-arms the reminder for today;
    /// any other edit leaves the notified flag as it was.
    pub fn edited(
        &self,
        title: String,
        description: String,
        time: String,
        completed: bool,
    ) -> Self {
        let notified = if time != self.time {
            false
        } else {
            self.notified
        };
        Self {
            id: self.id,
            title,
            description,
            time,
            completed,
            notified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder_at(time: &str) -> Reminder {
        Reminder {
            id: 1,
            title: "Standup".to_string(),
            description: String::new(),
            time: time.to_string(),
            completed: false,
            notified: false,
        }
    }

    #[test]
    fn test_minute_of_day_parses_valid_times() {
        assert_eq!(Reminder::minute_of_day("00:00"), Some(0));
        assert_eq!(Reminder::minute_of_day("09:05"), Some(545));
        assert_eq!(Reminder::minute_of_day("23:59"), Some(1439));
    }

    #[test]
    fn test_minute_of_day_rejects_malformed_times() {
        assert_eq!(Reminder::minute_of_day("24:00"), None);
        assert_eq!(Reminder::minute_of_day("12:60"), None);
        assert_eq!(Reminder::minute_of_day("noon"), None);
        assert_eq!(Reminder::minute_of_day(""), None);
    }

    #[test]
    fn test_eligible_only_on_exact_minute() {
        let reminder = reminder_at("09:00");
        assert!(reminder.is_eligible("09:00"));
        assert!(!reminder.is_eligible("08:59"));
        assert!(!reminder.is_eligible("09:01"));
    }

    #[test]
    fn test_completed_reminder_is_never_eligible() {
        let mut reminder = reminder_at("09:00");
        reminder.completed = true;
        assert!(!reminder.is_eligible("09:00"));
    }

    #[test]
    fn test_notified_reminder_is_not_eligible_again() {
        let mut reminder = reminder_at("09:00");
        reminder.notified = true;
        assert!(!reminder.is_eligible("09:00"));
    }

    #[test]
    fn test_malformed_time_is_never_eligible() {
        let reminder = reminder_at("late");
        assert!(!reminder.is_eligible("09:00"));
    }

    #[test]
    fn test_edit_changing_time_clears_notified() {
        let mut reminder = reminder_at("09:00");
        reminder.notified = true;

        let updated = reminder.edited(
            "Standup".to_string(),
            String::new(),
            "10:30".to_string(),
            false,
        );
        assert!(!updated.notified);
        assert_eq!(updated.id, reminder.id);
        assert_eq!(updated.time, "10:30");
    }

    #[test]
    fn test_edit_keeping_time_preserves_notified() {
        let mut reminder = reminder_at("09:00");
        reminder.notified = true;

        let updated = reminder.edited(
            "Renamed".to_string(),
            "details".to_string(),
            "09:00".to_string(),
            false,
        );
        assert!(updated.notified);
        assert_eq!(updated.title, "Renamed");
    }

    #[test]
    fn test_record_without_notified_field_loads_as_unnotified() {
        let json = r#"{"id":3,"title":"Lunch","description":"","time":"12:00","completed":false}"#;
        let reminder: Reminder = serde_json::from_str(json).unwrap();
        assert!(!reminder.notified);
    }
}
