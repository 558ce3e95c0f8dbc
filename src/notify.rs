use crate::error::{AppError, AppResult};
use log::info;
use std::process::Command;

/// Delivery seam for desktop notifications. Implementations must be safe to
/// call repeatedly; failures are reported back so the scheduler can retry on
/// the next tick.
pub trait Notifier: Send {
    fn notify(&self, title: &str, body: &str) -> AppResult<()>;
}

/// Sends desktop popups through `notify-send` (libnotify).
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) -> AppResult<()> {
        let status = Command::new("notify-send")
            .arg("--icon=dialog-information")
            .arg("--")
            .arg(title)
            .arg(body)
            .status()
            .map_err(|e| AppError::notify(format!("failed to run notify-send: {}", e)))?;

        if !status.success() {
            return Err(AppError::notify(format!(
                "notify-send exited with {}",
                status
            )));
        }

        info!("Notification sent: {}", title);
        Ok(())
    }
}
