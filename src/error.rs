use std::fmt;

/// Application error types for better error handling and logging.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Errors related to the reminder store file
    Storage(String),
    /// Errors related to desktop notification delivery
    Notify(String),
    /// Errors related to data validation
    Validation(String),
    /// Errors related to the single-instance lock
    Lock(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Notify(msg) => write!(f, "Notification error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Lock(msg) => write!(f, "Lock error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.to_string()
    }
}

// Convenience constructors
impl AppError {
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        AppError::Storage(msg.into())
    }

    pub fn notify<S: Into<String>>(msg: S) -> Self {
        AppError::Notify(msg.into())
    }

    pub fn validation<S: Into<String>>(msg: S) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn lock<S: Into<String>>(msg: S) -> Self {
        AppError::Lock(msg.into())
    }
}

/// Result type alias for store and scheduler operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::storage("file not found");
        assert_eq!(err.to_string(), "Storage error: file not found");
    }

    #[test]
    fn test_error_conversion_to_string() {
        let err = AppError::notify("delivery failed");
        let s: String = err.into();
        assert!(s.contains("Notification error"));
    }

    #[test]
    fn test_error_constructors() {
        let storage_err = AppError::storage("test");
        assert!(matches!(storage_err, AppError::Storage(_)));

        let lock_err = AppError::lock("test");
        assert!(matches!(lock_err, AppError::Lock(_)));
    }
}
